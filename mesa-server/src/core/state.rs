//! Server state
//!
//! Holds shared references to every service. Cheap to clone; axum
//! clones it per request.

use std::sync::Arc;

use crate::core::Config;
use crate::db::DbService;
use crate::services::{ContentService, HeroService, MenuService};
use crate::store::{JsonFileStore, SourceFileStore};
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub menu: MenuService,
    pub content: ContentService,
    pub hero: HeroService,
}

impl ServerState {
    /// Build all services from the startup configuration. Opens the
    /// database when one is configured; a broken database configuration
    /// is a startup error, not something to silently ignore.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let storage = config.storage();

        let db = match &config.database_path {
            Some(path) => {
                let service = DbService::new(path)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                tracing::info!(path, "database tier configured");
                Some(service)
            }
            None => {
                tracing::info!("no database configured, menu content uses the file store");
                None
            }
        };

        let files = SourceFileStore::new(&storage.content_dir);
        let json = JsonFileStore::new(&storage.content_dir);

        if config.is_production() && config.admin_token.is_none() {
            return Err(AppError::Internal(
                "ADMIN_TOKEN must be set in production".to_string(),
            ));
        }

        Ok(Self {
            config: Arc::new(config.clone()),
            menu: MenuService::new(&storage, db, files.clone()),
            content: ContentService::new(files),
            hero: HeroService::new(json),
        })
    }
}
