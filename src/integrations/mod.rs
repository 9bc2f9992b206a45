// src/integrations/mod.rs
//
// External Integrations Module
//
// Collaborator contracts consumed by the services, plus the concrete HTTP
// clients. Integrations are INFRASTRUCTURE: they return plain data and
// never create or mutate domain entities.

pub mod hmall;
pub mod titlegen;

pub use hmall::client::HmallClient;
pub use titlegen::client::OpenAiTitleGenerator;

use thiserror::Error;

/// Scraped product metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInfo {
    pub name: String,
    pub brand: String,
    pub price: f64,
}

/// Resolves product metadata for a product code.
///
/// Absence covers every internal failure (network, parse, missing fields);
/// implementations must never surface an error to the caller.
#[cfg_attr(test, mockall::automock)]
pub trait ProductInfoProvider: Send + Sync {
    fn resolve(&self, code: &str) -> Option<ProductInfo>;
}

/// A generation failure is a first-class outcome, not an exception
#[derive(Debug, Clone, Error)]
#[error("title generation failed: {reason}")]
pub struct GenerationFailure {
    pub reason: String,
}

impl GenerationFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Produces a marketing title for a product name plus a free-form hint.
#[cfg_attr(test, mockall::automock)]
pub trait TitleGenerator: Send + Sync {
    fn generate(&self, product_name: &str, hint: &str) -> Result<String, GenerationFailure>;
}
