// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod catalog;
pub mod image_url;
pub mod product;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Product Domain
pub use product::{validate_product, ProductRecord, ProductStatus};

// Catalog (ordered snapshot collection)
pub use catalog::Catalog;

// Derived image URL codec
pub use image_url::derive_image_url;

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Duplicate product code: {0}")]
    DuplicateCode(String),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
