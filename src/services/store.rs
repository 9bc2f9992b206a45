// src/services/store.rs
//
// CatalogStore: the single shared gateway to the persisted catalog.
//
// Every mutating operation (merge, assign, add, update, delete) runs
// load → compute → save while holding the catalog-wide write lock, so
// writers serialize on the whole snapshot. Read-only queries take an
// unlocked snapshot.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::Catalog;
use crate::error::AppResult;
use crate::repositories::CatalogRepository;

pub struct CatalogStore {
    repo: Arc<dyn CatalogRepository>,
    write_lock: Mutex<()>,
}

impl CatalogStore {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self {
            repo,
            write_lock: Mutex::new(()),
        }
    }

    /// Current snapshot.
    ///
    /// A load or deserialization failure degrades to an empty catalog;
    /// the failure is logged, never surfaced. Callers that mutate must
    /// hold the write lock before reading.
    pub fn snapshot(&self) -> Catalog {
        match self.repo.load() {
            Ok(catalog) => catalog,
            Err(e) => {
                log::error!("Failed to load catalog snapshot, starting empty: {}", e);
                Catalog::new()
            }
        }
    }

    /// Acquire the catalog-wide write lock.
    ///
    /// A poisoned lock is recovered: the catalog itself lives in the
    /// store, not behind this mutex, so a writer panic cannot leave it
    /// half-mutated.
    pub fn lock_write(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Persist the full snapshot. Failure is the caller's operation-level
    /// failure, distinct from any per-item diagnostics it collected.
    pub fn commit(&self, catalog: &Catalog) -> AppResult<()> {
        self.repo.save(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductRecord;
    use crate::repositories::InMemoryCatalogRepository;

    #[test]
    fn test_snapshot_and_commit_round_trip() {
        let store = CatalogStore::new(Arc::new(InMemoryCatalogRepository::new()));
        assert!(store.snapshot().is_empty());

        let _guard = store.lock_write();
        let mut catalog = store.snapshot();
        catalog.push(ProductRecord::new("2243196081".to_string()));
        store.commit(&catalog).unwrap();
        drop(_guard);

        assert_eq!(store.snapshot().len(), 1);
    }
}
