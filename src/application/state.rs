// src/application/state.rs

use std::sync::Arc;

use crate::db::{create_connection_pool, get_connection, initialize_database};
use crate::error::AppResult;
use crate::events::EventBus;
use crate::integrations::{HmallClient, OpenAiTitleGenerator, ProductInfoProvider, TitleGenerator};
use crate::repositories::SqliteCatalogRepository;
use crate::services::{CatalogService, CatalogStore, ImportService, QueryService, TitleService};

/// Application state shared by whatever transport sits on top.
/// All fields are Arc-wrapped for thread-safe sharing.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub catalog_service: Arc<CatalogService>,
    pub import_service: Arc<ImportService>,
    pub query_service: Arc<QueryService>,
    pub title_service: Arc<TitleService>,
}

impl AppState {
    /// Wire the full stack against the default database location and the
    /// real integration clients.
    pub fn initialize(title_generator: OpenAiTitleGenerator) -> AppResult<Self> {
        let pool = create_connection_pool()?;
        {
            let conn = get_connection(&pool)?;
            initialize_database(&conn)?;
        }

        let repository = Arc::new(SqliteCatalogRepository::new(Arc::new(pool)));
        let store = Arc::new(CatalogStore::new(repository));
        let event_bus = Arc::new(EventBus::new());

        let provider: Arc<dyn ProductInfoProvider> = Arc::new(HmallClient::new());
        let generator: Arc<dyn TitleGenerator> = Arc::new(title_generator);

        Ok(Self {
            catalog_service: Arc::new(CatalogService::new(
                Arc::clone(&store),
                Arc::clone(&event_bus),
            )),
            import_service: Arc::new(ImportService::new(
                Arc::clone(&store),
                Arc::clone(&provider),
                Arc::clone(&event_bus),
            )),
            query_service: Arc::new(QueryService::new(Arc::clone(&store))),
            title_service: Arc::new(TitleService::new(
                store,
                provider,
                generator,
                Arc::clone(&event_bus),
            )),
            event_bus,
        })
    }
}
