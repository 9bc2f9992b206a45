pub mod client;

pub use client::OpenAiTitleGenerator;
