// src/services/catalog_service.rs
//
// Single-record operations and the export projection.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::image_url::derive_image_url;
use crate::domain::product::invariants::validate_product_code;
use crate::domain::{validate_product, DomainError, ProductRecord};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, ProductAdded, ProductsDeleted};
use crate::services::store::CatalogStore;

#[derive(Debug, Clone, Default)]
pub struct AddProductRequest {
    pub product_code: String,
    pub url: String,
    pub image_url: String,
    pub additional_request: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProductRequest {
    pub id: Uuid,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub additional_request: Option<String>,
    pub product_name: Option<String>,
    pub brand_name: Option<String>,
    pub price: Option<f64>,
}

/// Outcome of a bulk delete; unknown ids are reported, never fatal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub deleted: usize,
    pub missing: usize,
}

/// One row of the read-only export projection
#[derive(Debug, Clone, serde::Serialize)]
pub struct ExportRow {
    pub code: String,
    pub url: String,
    pub image_url: String,
    pub additional_request: String,
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub generated_title: String,
    pub status_label: String,
    pub created_at: String,
}

pub struct CatalogService {
    store: Arc<CatalogStore>,
    event_bus: Arc<EventBus>,
}

impl CatalogService {
    pub fn new(store: Arc<CatalogStore>, event_bus: Arc<EventBus>) -> Self {
        Self { store, event_bus }
    }

    /// Add a single record.
    ///
    /// Validation failures reject before any mutation. A code colliding
    /// with a live record is rejected; only the bulk merge path may touch
    /// an existing code.
    pub fn add(&self, request: AddProductRequest) -> AppResult<Uuid> {
        let code = request.product_code.trim().to_string();
        validate_product_code(&code).map_err(AppError::Domain)?;

        let _guard = self.store.lock_write();
        let mut catalog = self.store.snapshot();

        if catalog.find_index_by_code(&code).is_some() {
            return Err(AppError::Domain(DomainError::DuplicateCode(code)));
        }

        let mut record = ProductRecord::new(code);
        record.url = request.url;
        record.additional_request = request.additional_request;
        record.image_url = if request.image_url.is_empty() {
            derive_image_url(&record.product_code).unwrap_or_default()
        } else {
            request.image_url
        };

        validate_product(&record).map_err(AppError::Domain)?;

        let id = record.id;
        let product_code = record.product_code.clone();
        catalog.push(record);
        self.store.commit(&catalog)?;

        self.event_bus.emit(ProductAdded::new(id, product_code));
        Ok(id)
    }

    /// Update a record by id; unknown id is NotFound.
    pub fn update(&self, request: UpdateProductRequest) -> AppResult<()> {
        let _guard = self.store.lock_write();
        let mut catalog = self.store.snapshot();

        let record = catalog
            .find_by_id_mut(request.id)
            .ok_or(AppError::NotFound)?;

        if let Some(url) = request.url {
            record.url = url;
        }
        if let Some(image_url) = request.image_url {
            record.image_url = image_url;
        }
        if let Some(additional_request) = request.additional_request {
            record.additional_request = additional_request;
        }
        if let Some(product_name) = request.product_name {
            record.product_name = product_name;
        }
        if let Some(brand_name) = request.brand_name {
            record.brand_name = brand_name;
        }
        if let Some(price) = request.price {
            record.price = price;
        }
        record.touch();

        validate_product(record).map_err(AppError::Domain)?;

        self.store.commit(&catalog)?;
        Ok(())
    }

    /// Bulk delete by id. Every id is attempted; unknown ids land in the
    /// report instead of aborting the batch.
    pub fn delete(&self, ids: &[Uuid]) -> AppResult<DeleteReport> {
        let _guard = self.store.lock_write();
        let mut catalog = self.store.snapshot();

        let mut report = DeleteReport::default();
        for &id in ids {
            if catalog.remove_by_id(id) {
                report.deleted += 1;
            } else {
                report.missing += 1;
            }
        }

        self.store.commit(&catalog)?;

        log::info!(
            "Deleted {} records ({} ids unknown)",
            report.deleted,
            report.missing
        );
        self.event_bus
            .emit(ProductsDeleted::new(report.deleted, report.missing));
        Ok(report)
    }

    /// Read-only projection for CSV export: one row per record, in
    /// catalog order.
    pub fn export_rows(&self) -> Vec<ExportRow> {
        let catalog = self.store.snapshot();
        catalog
            .records
            .iter()
            .map(|r| ExportRow {
                code: r.product_code.clone(),
                url: r.url.clone(),
                image_url: r.image_url.clone(),
                additional_request: r.additional_request.clone(),
                name: r.product_name.clone(),
                brand: r.brand_name.clone(),
                price: r.price,
                generated_title: r.generated_title.clone(),
                status_label: r.status.label().to_string(),
                created_at: r.created_at.to_rfc3339(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventBus;
    use crate::repositories::InMemoryCatalogRepository;

    fn service() -> (Arc<CatalogStore>, CatalogService) {
        let store = Arc::new(CatalogStore::new(Arc::new(
            InMemoryCatalogRepository::new(),
        )));
        let service = CatalogService::new(Arc::clone(&store), Arc::new(EventBus::new()));
        (store, service)
    }

    fn add_request(code: &str) -> AddProductRequest {
        AddProductRequest {
            product_code: code.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_rejects_blank_code_before_mutation() {
        let (store, service) = service();
        assert!(service.add(add_request("   ")).is_err());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_add_rejects_duplicate_code() {
        let (store, service) = service();
        service.add(add_request("2243196081")).unwrap();

        let result = service.add(add_request("2243196081"));
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::DuplicateCode(_)))
        ));
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn test_add_derives_image_url_when_none_supplied() {
        let (store, service) = service();
        let id = service.add(add_request("2243196081")).unwrap();

        let catalog = store.snapshot();
        let record = catalog.find_by_id(id).unwrap();
        assert!(record.image_url.contains("image.hmall.com"));
        assert!(record.image_url.contains("/2243196081_0.jpg"));
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let (_, service) = service();
        let request = UpdateProductRequest {
            id: Uuid::new_v4(),
            url: Some("u".to_string()),
            ..Default::default()
        };
        assert!(matches!(service.update(request), Err(AppError::NotFound)));
    }

    #[test]
    fn test_delete_reports_missing_ids_without_aborting() {
        let (store, service) = service();
        let id = service.add(add_request("2243196081")).unwrap();

        let report = service.delete(&[id, Uuid::new_v4()]).unwrap();
        assert_eq!(report, DeleteReport {
            deleted: 1,
            missing: 1
        });
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_export_rows_project_every_record() {
        let (_, service) = service();
        service.add(add_request("2243196081")).unwrap();
        service.add(add_request("1111111111")).unwrap();

        let rows = service.export_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].code, "2243196081");
        assert_eq!(rows[0].status_label, "Pending");
        assert!(rows[0].created_at.contains('T'));
    }
}
