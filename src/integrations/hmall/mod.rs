pub mod client;

pub use client::HmallClient;
