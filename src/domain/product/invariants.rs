use super::entity::{ProductRecord, ProductStatus};
use crate::domain::{DomainError, DomainResult};

/// Validates all ProductRecord invariants
/// These are the absolute rules that must hold for a record to be valid
pub fn validate_product(record: &ProductRecord) -> DomainResult<()> {
    validate_product_code(&record.product_code)?;
    validate_price(record.price)?;
    validate_status(record)?;
    Ok(())
}

/// Product code cannot be empty or blank
pub fn validate_product_code(code: &str) -> DomainResult<()> {
    if code.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Product code cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Price must be a finite, non-negative number
fn validate_price(price: f64) -> DomainResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(DomainError::InvariantViolation(format!(
            "Price must be non-negative, got {}",
            price
        )));
    }
    Ok(())
}

/// Completed status requires a generated title
fn validate_status(record: &ProductRecord) -> DomainResult<()> {
    if record.status == ProductStatus::Completed && record.generated_title.is_empty() {
        return Err(DomainError::InvariantViolation(
            "Completed record must carry a generated title".to_string(),
        ));
    }
    Ok(())
}

/// Invariants that must hold true for the Product domain:
///
/// 1. Identity (UUID) is immutable and never reused
/// 2. Product code is the business key; live records never share one
///    after a merge completes
/// 3. Empty metadata strings mean "not yet resolved", never "unknown"
/// 4. Price is non-negative
/// 5. Status is Completed iff a generated title was assigned
/// 6. Created timestamp never changes
/// 7. Updated timestamp reflects last modification

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_record() {
        let record = ProductRecord::new("2243196081".to_string());
        assert!(validate_product(&record).is_ok());
    }

    #[test]
    fn test_blank_code_fails() {
        let record = ProductRecord::new("   ".to_string());
        assert!(validate_product(&record).is_err());
    }

    #[test]
    fn test_negative_price_fails() {
        let mut record = ProductRecord::new("2243196081".to_string());
        record.price = -1.0;
        assert!(validate_product(&record).is_err());
    }

    #[test]
    fn test_completed_without_title_fails() {
        let mut record = ProductRecord::new("2243196081".to_string());
        record.status = ProductStatus::Completed;
        assert!(validate_product(&record).is_err());
    }

    #[test]
    fn test_completed_with_title_ok() {
        let mut record = ProductRecord::new("2243196081".to_string());
        record.complete_title("Great Widget".to_string());
        assert!(validate_product(&record).is_ok());
    }
}
