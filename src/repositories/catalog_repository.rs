// src/repositories/catalog_repository.rs
//
// Catalog snapshot persistence
//
// The whole catalog is read and written as one JSON document under a fixed
// key. A reader must never observe a partially-written snapshot, so the
// write happens inside a transaction.

use rusqlite::params;
use std::sync::{Arc, RwLock};

use crate::db::ConnectionPool;
use crate::domain::Catalog;
use crate::error::{AppError, AppResult};

/// Fixed document key for the catalog snapshot
const CATALOG_KEY: &str = "catalog";

pub trait CatalogRepository: Send + Sync {
    /// Read the current snapshot. A missing document is an empty catalog.
    fn load(&self) -> AppResult<Catalog>;

    /// Persist the full snapshot atomically.
    fn save(&self, catalog: &Catalog) -> AppResult<()>;
}

pub struct SqliteCatalogRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteCatalogRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl CatalogRepository for SqliteCatalogRepository {
    fn load(&self) -> AppResult<Catalog> {
        let conn = self.pool.get()?;

        let document: Option<String> = conn
            .query_row(
                "SELECT document FROM snapshots WHERE key = ?1",
                params![CATALOG_KEY],
                |row| row.get(0),
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(AppError::Database(other)),
            })?;

        match document {
            Some(json) => {
                let catalog: Catalog = serde_json::from_str(&json)?;
                Ok(catalog)
            }
            None => Ok(Catalog::new()),
        }
    }

    fn save(&self, catalog: &Catalog) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let json = serde_json::to_string(catalog)?;

        let tx = conn.transaction().map_err(AppError::Database)?;
        tx.execute(
            "INSERT INTO snapshots (key, document, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET
                 document = excluded.document,
                 updated_at = excluded.updated_at",
            params![CATALOG_KEY, json],
        )
        .map_err(AppError::Database)?;
        tx.commit().map_err(AppError::Database)?;

        log::debug!("Persisted catalog snapshot with {} records", catalog.len());
        Ok(())
    }
}

/// In-memory repository for tests and ephemeral use
#[derive(Default)]
pub struct InMemoryCatalogRepository {
    snapshot: RwLock<Catalog>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogRepository for InMemoryCatalogRepository {
    fn load(&self) -> AppResult<Catalog> {
        Ok(self
            .snapshot
            .read()
            .map_err(|_| AppError::Other("Catalog snapshot lock poisoned".to_string()))?
            .clone())
    }

    fn save(&self, catalog: &Catalog) -> AppResult<()> {
        let mut guard = self
            .snapshot
            .write()
            .map_err(|_| AppError::Other("Catalog snapshot lock poisoned".to_string()))?;
        *guard = catalog.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_connection_pool_at, initialize_database};
    use crate::domain::ProductRecord;

    fn sqlite_repo(dir: &tempfile::TempDir) -> SqliteCatalogRepository {
        let pool = create_connection_pool_at(&dir.path().join("test.db")).unwrap();
        {
            let conn = pool.get().unwrap();
            initialize_database(&conn).unwrap();
        }
        SqliteCatalogRepository::new(Arc::new(pool))
    }

    #[test]
    fn test_load_missing_snapshot_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = sqlite_repo(&dir);
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = sqlite_repo(&dir);

        let mut catalog = Catalog::new();
        let mut record = ProductRecord::new("2243196081".to_string());
        record.apply_metadata("Widget", "B", 100.0);
        let id = record.id;
        catalog.push(record);

        repo.save(&catalog).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded.len(), 1);
        let loaded_record = loaded.find_by_id(id).unwrap();
        assert_eq!(loaded_record.product_code, "2243196081");
        assert_eq!(loaded_record.product_name, "Widget");
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let repo = sqlite_repo(&dir);

        let mut catalog = Catalog::new();
        catalog.push(ProductRecord::new("1111111111".to_string()));
        repo.save(&catalog).unwrap();

        catalog.push(ProductRecord::new("2222222222".to_string()));
        repo.save(&catalog).unwrap();

        assert_eq!(repo.load().unwrap().len(), 2);
    }
}
