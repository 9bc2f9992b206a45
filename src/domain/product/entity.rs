use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single catalog entry: one sellable product identified by its code,
/// enriched with scraped metadata and (eventually) a generated listing title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Business key. Unique among live records after every merge.
    pub product_code: String,

    /// Source listing URL supplied by the operator
    #[serde(default)]
    pub url: String,

    /// Image location; either supplied or derived from the product code
    #[serde(default)]
    pub image_url: String,

    /// Free-form instruction passed through to title generation
    #[serde(default)]
    pub additional_request: String,

    /// Scraped product name; empty means "not yet resolved"
    #[serde(default)]
    pub product_name: String,

    /// Scraped brand name; empty means "not yet resolved"
    #[serde(default)]
    pub brand_name: String,

    /// Scraped price, non-negative
    #[serde(default)]
    pub price: f64,

    /// Marketing title produced by the generator; empty until assignment succeeds
    #[serde(default)]
    pub generated_title: String,

    /// Title generation state
    pub status: ProductStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Title generation state of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Pending,
    Completed,
}

impl ProductStatus {
    /// Human-readable label used by the export projection
    pub fn label(&self) -> &'static str {
        match self {
            ProductStatus::Pending => "Pending",
            ProductStatus::Completed => "Completed",
        }
    }
}

impl ProductRecord {
    /// Create a new ProductRecord with catalog defaults
    /// This is the only way to construct a valid record
    pub fn new(product_code: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            product_code,
            url: String::new(),
            image_url: String::new(),
            additional_request: String::new(),
            product_name: String::new(),
            brand_name: String::new(),
            price: 0.0,
            generated_title: String::new(),
            status: ProductStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the scraped metadata fields
    /// Preserves the creation timestamp and stamps the modification timestamp
    pub fn apply_metadata(&mut self, name: &str, brand: &str, price: f64) {
        self.product_name = name.to_string();
        self.brand_name = brand.to_string();
        self.price = price;
        self.touch();
    }

    /// Record a successful title generation
    pub fn complete_title(&mut self, title: String) {
        self.generated_title = title;
        self.status = ProductStatus::Completed;
        self.touch();
    }

    /// Stamp the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::Pending => write!(f, "pending"),
            ProductStatus::Completed => write!(f, "completed"),
        }
    }
}
