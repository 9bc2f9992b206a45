// src/services/title_service.rs
//
// Title assignment: run the generator over selected records and mark them
// completed. Works in two phases so no network call ever happens while the
// catalog write lock is held:
//
//   1. Plan (unlocked): snapshot the catalog, lazily backfill metadata for
//      records without a resolved name, invoke the generator.
//   2. Apply (locked): reload the catalog and apply each planned outcome
//      to records that still exist.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::image_url::derive_image_url;
use crate::error::AppResult;
use crate::events::{EventBus, TitleAssigned};
use crate::integrations::{ProductInfo, ProductInfoProvider, TitleGenerator};
use crate::services::store::CatalogStore;

/// Assignment outcome. `errors` carry one entry per record that could not
/// be titled; records deleted between phases are skipped silently.
#[derive(Debug, Clone, Default)]
pub struct AssignReport {
    pub generated: usize,
    pub errors: Vec<String>,
}

enum PlannedOutcome {
    Title(String),
    Error(String),
}

struct Plan {
    id: Uuid,
    metadata: Option<ProductInfo>,
    derived_image: Option<String>,
    outcome: PlannedOutcome,
}

pub struct TitleService {
    store: Arc<CatalogStore>,
    provider: Arc<dyn ProductInfoProvider>,
    generator: Arc<dyn TitleGenerator>,
    event_bus: Arc<EventBus>,
}

impl TitleService {
    pub fn new(
        store: Arc<CatalogStore>,
        provider: Arc<dyn ProductInfoProvider>,
        generator: Arc<dyn TitleGenerator>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            store,
            provider,
            generator,
            event_bus,
        }
    }

    /// Generate and assign titles for the given record ids.
    ///
    /// Every id is attempted; per-record failures never abort the batch.
    pub fn assign(&self, ids: &[Uuid]) -> AppResult<AssignReport> {
        let plans = self.plan(ids);

        let _guard = self.store.lock_write();
        let mut catalog = self.store.snapshot();

        let mut report = AssignReport::default();
        let mut assigned = Vec::new();

        for plan in plans {
            // Deleted while we were planning: skip silently
            let Some(record) = catalog.find_by_id_mut(plan.id) else {
                continue;
            };

            // Lazy backfill lands even when generation failed
            if record.product_name.is_empty() {
                if let Some(info) = &plan.metadata {
                    record.apply_metadata(&info.name, &info.brand, info.price);
                }
            }
            if record.image_url.is_empty() {
                if let Some(derived) = &plan.derived_image {
                    record.image_url = derived.clone();
                    record.touch();
                }
            }

            match plan.outcome {
                PlannedOutcome::Title(title) => {
                    record.complete_title(title.clone());
                    assigned.push(TitleAssigned::new(plan.id, title));
                    report.generated += 1;
                }
                PlannedOutcome::Error(reason) => {
                    report.errors.push(format!("{}: {}", plan.id, reason));
                }
            }
        }

        self.store.commit(&catalog)?;

        log::info!(
            "Assigned {} titles ({} errors)",
            report.generated,
            report.errors.len()
        );
        for event in assigned {
            self.event_bus.emit(event);
        }
        Ok(report)
    }

    /// Unlocked planning phase: all resolver and generator calls happen
    /// here, against a read-only snapshot.
    fn plan(&self, ids: &[Uuid]) -> Vec<Plan> {
        let snapshot = self.store.snapshot();
        let mut plans = Vec::new();

        for &id in ids {
            // Unknown ids are skipped silently, same as concurrent deletes
            let Some(record) = snapshot.find_by_id(id) else {
                continue;
            };

            let metadata = if record.product_name.is_empty() && !record.product_code.is_empty() {
                self.provider.resolve(&record.product_code)
            } else {
                None
            };

            let derived_image = if record.image_url.is_empty() {
                derive_image_url(&record.product_code)
            } else {
                None
            };

            let name = if record.product_name.is_empty() {
                metadata.as_ref().map(|m| m.name.clone()).unwrap_or_default()
            } else {
                record.product_name.clone()
            };

            let outcome = if name.is_empty() {
                PlannedOutcome::Error("no product name available".to_string())
            } else {
                match self.generator.generate(&name, &record.additional_request) {
                    Ok(title) => PlannedOutcome::Title(title),
                    Err(failure) => PlannedOutcome::Error(failure.reason),
                }
            };

            plans.push(Plan {
                id,
                metadata,
                derived_image,
                outcome,
            });
        }

        plans
    }
}
