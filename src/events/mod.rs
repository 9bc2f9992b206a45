// src/events/mod.rs
//
// Internal Event System - Public API

pub mod bus;
pub mod types;

pub use bus::EventBus;

pub use types::{BatchMerged, DomainEvent, ProductAdded, ProductsDeleted, TitleAssigned};
