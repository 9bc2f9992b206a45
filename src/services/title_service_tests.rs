// src/services/title_service_tests.rs
//
// UNIT TESTS: Title assignment
//
// INVARIANTS TESTED:
// - Success sets the generated title and flips status to Completed
// - Metadata is lazily backfilled for records without a resolved name
// - Generator failure records an error and leaves the record unchanged
// - Unknown ids are skipped silently
// - Every id in the batch is attempted regardless of earlier failures

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{ProductRecord, ProductStatus};
use crate::events::EventBus;
use crate::integrations::{
    GenerationFailure, MockProductInfoProvider, MockTitleGenerator, ProductInfo,
};
use crate::repositories::InMemoryCatalogRepository;
use crate::services::import_service::{ImportService, RawRow};
use crate::services::store::CatalogStore;
use crate::services::title_service::TitleService;

fn store() -> Arc<CatalogStore> {
    Arc::new(CatalogStore::new(Arc::new(
        InMemoryCatalogRepository::new(),
    )))
}

fn seed(store: &CatalogStore, record: ProductRecord) -> Uuid {
    let _guard = store.lock_write();
    let mut catalog = store.snapshot();
    let id = record.id;
    catalog.push(record);
    store.commit(&catalog).unwrap();
    id
}

fn named_record(code: &str, name: &str) -> ProductRecord {
    let mut record = ProductRecord::new(code.to_string());
    record.product_name = name.to_string();
    record.image_url = "https://example.com/own.jpg".to_string();
    record
}

fn service(
    store: &Arc<CatalogStore>,
    provider: MockProductInfoProvider,
    generator: MockTitleGenerator,
) -> TitleService {
    TitleService::new(
        Arc::clone(store),
        Arc::new(provider),
        Arc::new(generator),
        Arc::new(EventBus::new()),
    )
}

#[test]
fn test_assign_sets_title_and_completes() {
    let store = store();
    let id = seed(&store, named_record("2243196081", "Widget"));

    let provider = MockProductInfoProvider::new();
    let mut generator = MockTitleGenerator::new();
    generator
        .expect_generate()
        .returning(|_, _| Ok("Great Widget".to_string()));

    let report = service(&store, provider, generator).assign(&[id]).unwrap();

    assert_eq!(report.generated, 1);
    assert!(report.errors.is_empty());

    let record = store.snapshot().find_by_id(id).unwrap().clone();
    assert_eq!(record.generated_title, "Great Widget");
    assert_eq!(record.status, ProductStatus::Completed);
}

#[test]
fn test_lazy_metadata_backfill_before_generation() {
    let store = store();
    // No name yet, no image: both get backfilled during assignment
    let id = seed(&store, ProductRecord::new("2243196081".to_string()));

    let mut provider = MockProductInfoProvider::new();
    provider.expect_resolve().returning(|_| {
        Some(ProductInfo {
            name: "Widget".to_string(),
            brand: "B".to_string(),
            price: 100.0,
        })
    });
    let mut generator = MockTitleGenerator::new();
    generator
        .expect_generate()
        .withf(|name, _| name == "Widget")
        .returning(|_, _| Ok("Great Widget".to_string()));

    let report = service(&store, provider, generator).assign(&[id]).unwrap();
    assert_eq!(report.generated, 1);

    let record = store.snapshot().find_by_id(id).unwrap().clone();
    assert_eq!(record.product_name, "Widget");
    assert!(record.image_url.contains("/2243196081_0.jpg"));
    assert_eq!(record.status, ProductStatus::Completed);
}

#[test]
fn test_unresolvable_name_is_an_error_and_skips_generation() {
    let store = store();
    let id = seed(&store, ProductRecord::new("2243196081".to_string()));

    let mut provider = MockProductInfoProvider::new();
    provider.expect_resolve().returning(|_| None);
    let mut generator = MockTitleGenerator::new();
    generator.expect_generate().times(0);

    let report = service(&store, provider, generator).assign(&[id]).unwrap();

    assert_eq!(report.generated, 0);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(
        store.snapshot().find_by_id(id).unwrap().status,
        ProductStatus::Pending
    );
}

#[test]
fn test_generator_failure_leaves_record_unchanged() {
    let store = store();
    let id = seed(&store, named_record("2243196081", "Widget"));

    let provider = MockProductInfoProvider::new();
    let mut generator = MockTitleGenerator::new();
    generator
        .expect_generate()
        .returning(|_, _| Err(GenerationFailure::new("model unavailable")));

    let report = service(&store, provider, generator).assign(&[id]).unwrap();

    assert_eq!(report.generated, 0);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("model unavailable"));

    let record = store.snapshot().find_by_id(id).unwrap().clone();
    assert!(record.generated_title.is_empty());
    assert_eq!(record.status, ProductStatus::Pending);
}

#[test]
fn test_unknown_ids_are_skipped_silently() {
    let store = store();
    let provider = MockProductInfoProvider::new();
    let mut generator = MockTitleGenerator::new();
    generator.expect_generate().times(0);

    let report = service(&store, provider, generator)
        .assign(&[Uuid::new_v4()])
        .unwrap();

    assert_eq!(report.generated, 0);
    assert!(report.errors.is_empty());
}

#[test]
fn test_batch_attempts_every_id_despite_failures() {
    let store = store();
    let failing = seed(&store, ProductRecord::new("9999999999".to_string()));
    let working = seed(&store, named_record("2243196081", "Widget"));

    let mut provider = MockProductInfoProvider::new();
    provider.expect_resolve().returning(|_| None);
    let mut generator = MockTitleGenerator::new();
    generator
        .expect_generate()
        .returning(|_, _| Ok("Great Widget".to_string()));

    let report = service(&store, provider, generator)
        .assign(&[failing, working])
        .unwrap();

    assert_eq!(report.generated, 1);
    assert_eq!(report.errors.len(), 1);
}

/// End-to-end: empty catalog → merge one row → assign its title.
#[test]
fn test_import_then_assign_scenario() {
    let store = store();
    let bus = Arc::new(EventBus::new());

    let mut import_provider = MockProductInfoProvider::new();
    import_provider.expect_resolve().returning(|_| {
        Some(ProductInfo {
            name: "Widget".to_string(),
            brand: "B".to_string(),
            price: 100.0,
        })
    });
    let import = ImportService::new(
        Arc::clone(&store),
        Arc::new(import_provider),
        Arc::clone(&bus),
    );

    let report = import
        .merge(&[RawRow {
            product_code: "2243196081".to_string(),
            url: "u1".to_string(),
            image_url: String::new(),
            additional_request: "r1".to_string(),
        }])
        .unwrap();
    assert_eq!(report.imported, 1);
    assert_eq!(report.updated, 0);

    let record = store.snapshot().records[0].clone();
    assert_eq!(record.status, ProductStatus::Pending);
    assert!(record.image_url.contains("image.hmall.com"));

    let provider = MockProductInfoProvider::new();
    let mut generator = MockTitleGenerator::new();
    generator
        .expect_generate()
        .withf(|name, hint| name == "Widget" && hint == "r1")
        .returning(|_, _| Ok("Great Widget".to_string()));

    let assign_report = service(&store, provider, generator)
        .assign(&[record.id])
        .unwrap();
    assert_eq!(assign_report.generated, 1);

    let finished = store.snapshot().find_by_id(record.id).unwrap().clone();
    assert_eq!(finished.generated_title, "Great Widget");
    assert_eq!(finished.status, ProductStatus::Completed);
}
