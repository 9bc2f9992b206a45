// src/application/mod.rs
//
// Application layer: wiring only. Transports (HTTP, desktop shells) sit on
// top of AppState; nothing below this module knows they exist.

pub mod state;

pub use state::AppState;
