pub mod entity;
pub mod invariants;

pub use entity::{ProductRecord, ProductStatus};
pub use invariants::validate_product;
