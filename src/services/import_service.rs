// src/services/import_service.rs
//
// Bulk import merge: reconcile parsed rows against the catalog by product
// code. Matches are updated in place, everything else becomes a new record.
// The operation is idempotent: replaying the same rows changes nothing but
// the update timestamps.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::image_url::derive_image_url;
use crate::domain::ProductRecord;
use crate::error::AppResult;
use crate::events::{BatchMerged, EventBus};
use crate::integrations::{ProductInfo, ProductInfoProvider};
use crate::services::store::CatalogStore;

/// One parsed bulk-upload row. The CSV byte format is handled upstream;
/// rows arrive as fields with the header already skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub product_code: String,
    pub url: String,
    pub image_url: String,
    pub additional_request: String,
}

impl RawRow {
    /// Map a pre-split field row (code, url, image URL, additional
    /// request); missing trailing fields default to empty.
    pub fn from_fields(fields: &[String]) -> Self {
        let field = |idx: usize| {
            fields
                .get(idx)
                .map(|f| f.trim().to_string())
                .unwrap_or_default()
        };
        Self {
            product_code: field(0),
            url: field(1),
            image_url: field(2),
            additional_request: field(3),
        }
    }
}

/// Merge outcome. `errors` are informational per-row diagnostics; a
/// persistence failure is the operation's `Err`, never an entry here.
#[derive(Debug, Clone, Default)]
pub struct MergeReport {
    pub imported: usize,
    pub updated: usize,
    pub errors: Vec<String>,
}

pub struct ImportService {
    store: Arc<CatalogStore>,
    provider: Arc<dyn ProductInfoProvider>,
    event_bus: Arc<EventBus>,
}

impl ImportService {
    pub fn new(
        store: Arc<CatalogStore>,
        provider: Arc<dyn ProductInfoProvider>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            store,
            provider,
            event_bus,
        }
    }

    /// Merge a batch of rows into the catalog.
    ///
    /// Rows with an empty product code are skipped silently. Metadata for
    /// every distinct code is resolved before the write lock is taken, so
    /// the lock is never held across network latency. The snapshot is
    /// persisted exactly once, after all rows.
    pub fn merge(&self, rows: &[RawRow]) -> AppResult<MergeReport> {
        let metadata = self.resolve_metadata(rows);

        let _guard = self.store.lock_write();
        let mut catalog = self.store.snapshot();

        // Built once; kept current as in-batch inserts land, so repeated
        // codes within the batch resolve against the latest state.
        let mut index = catalog.code_index();
        let mut report = MergeReport::default();

        for row in rows {
            let code = row.product_code.as_str();
            if code.is_empty() {
                continue;
            }

            let info = metadata.get(code).and_then(|m| m.as_ref());
            let derived = derive_image_url(code).unwrap_or_default();

            match index.get(code).copied() {
                Some(pos) => {
                    Self::update_existing(&mut catalog.records[pos], row, info, &derived);
                    report.updated += 1;
                }
                None => {
                    let record = Self::build_new(row, info, &derived);
                    if info.map_or(true, |i| i.name.is_empty()) {
                        report
                            .errors
                            .push(format!("No product metadata available for {}", code));
                    }
                    index.insert(code.to_string(), catalog.len());
                    catalog.push(record);
                    report.imported += 1;
                }
            }
        }

        self.store.commit(&catalog)?;

        log::info!(
            "Merged batch: {} imported, {} updated, {} diagnostics",
            report.imported,
            report.updated,
            report.errors.len()
        );
        self.event_bus.emit(BatchMerged::new(
            report.imported,
            report.updated,
            report.errors.len(),
        ));
        Ok(report)
    }

    /// Resolve metadata once per distinct code, outside the write lock.
    fn resolve_metadata(&self, rows: &[RawRow]) -> HashMap<String, Option<ProductInfo>> {
        let mut metadata: HashMap<String, Option<ProductInfo>> = HashMap::new();
        for row in rows {
            let code = row.product_code.as_str();
            if code.is_empty() || metadata.contains_key(code) {
                continue;
            }
            metadata.insert(code.to_string(), self.provider.resolve(code));
        }
        metadata
    }

    fn update_existing(
        record: &mut ProductRecord,
        row: &RawRow,
        info: Option<&ProductInfo>,
        derived: &str,
    ) {
        record.url = row.url.clone();
        record.additional_request = row.additional_request.clone();
        record.image_url = if row.image_url.is_empty() {
            derived.to_string()
        } else {
            row.image_url.clone()
        };

        if let Some(info) = info {
            record.product_name = info.name.clone();
            record.brand_name = info.brand.clone();
            record.price = info.price;
            // Metadata confirms the item exists upstream; backfill the
            // derived image when none is known yet.
            if record.image_url.is_empty() {
                record.image_url = derived.to_string();
            }
        }
        record.touch();
    }

    fn build_new(row: &RawRow, info: Option<&ProductInfo>, derived: &str) -> ProductRecord {
        let mut record = ProductRecord::new(row.product_code.clone());
        record.url = row.url.clone();
        record.additional_request = row.additional_request.clone();
        record.image_url = if row.image_url.is_empty() {
            derived.to_string()
        } else {
            row.image_url.clone()
        };
        if let Some(info) = info {
            record.product_name = info.name.clone();
            record.brand_name = info.brand.clone();
            record.price = info.price;
        }
        record
    }
}
