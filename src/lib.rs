// src/lib.rs
// ListForge - Product catalog manager with scraped metadata and
// AI-generated listing titles
//
// Architecture:
// - Domain-centric: entities, invariants, and the image URL codec are pure
// - Snapshot store: the whole catalog is one durable document; writers
//   serialize on a catalog-wide lock, readers take unlocked snapshots
// - Services orchestrate: merge, query, title assignment, single-record ops
// - Integrations are infrastructure: scraping and title generation live
//   behind traits and never touch domain entities

pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use domain::{
    derive_image_url, validate_product, Catalog, DomainError, DomainResult, ProductRecord,
    ProductStatus,
};

pub use error::{AppError, AppResult};

pub use events::{BatchMerged, EventBus, ProductAdded, ProductsDeleted, TitleAssigned};

pub use repositories::{CatalogRepository, InMemoryCatalogRepository, SqliteCatalogRepository};

pub use services::{
    AddProductRequest, AssignReport, CatalogService, CatalogStore, DateFilter, DeleteReport,
    ExportRow, ImportService, MergeReport, QueryService, RawRow, SearchPage, SearchParams,
    SortOrder, TitleService, UpdateProductRequest,
};

pub use integrations::{
    GenerationFailure, HmallClient, OpenAiTitleGenerator, ProductInfo, ProductInfoProvider,
    TitleGenerator,
};

pub use application::AppState;
