// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod catalog_service;
pub mod import_service;
pub mod query_service;
pub mod store;
pub mod title_service;

#[cfg(test)]
mod title_service_tests;

// Re-export all services and their types
pub use catalog_service::{
    AddProductRequest, CatalogService, DeleteReport, ExportRow, UpdateProductRequest,
};

pub use import_service::{ImportService, MergeReport, RawRow};

pub use query_service::{
    autocomplete_catalog, search_catalog, DateFilter, QueryService, SearchPage, SearchParams,
    SortOrder,
};

pub use store::CatalogStore;

pub use title_service::{AssignReport, TitleService};
