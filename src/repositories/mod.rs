// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission

pub mod catalog_repository;

pub use catalog_repository::{CatalogRepository, InMemoryCatalogRepository, SqliteCatalogRepository};
