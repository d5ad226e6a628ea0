//! ============================================================================
//! Configuration - Environment-driven settings
//! ============================================================================
//! Read once at startup, after `.env` has been loaded by the binary.
//!
//! | Variable               | Meaning                                   |
//! |------------------------|-------------------------------------------|
//! | `GAME_CATALOG_DB_PATH` | Storage database file                     |
//! | `GAME_CATALOG_DATA`    | Catalog JSON file replacing the bundled set |
//! | `GAME_CATALOG_LOG`     | Default log directives                    |
//! ============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::catalog::GameCatalog;
use crate::storage::{KeyValueStore, RedbStore};

pub const DB_PATH_ENV: &str = "GAME_CATALOG_DB_PATH";
pub const DATA_PATH_ENV: &str = "GAME_CATALOG_DATA";
pub const LOG_ENV: &str = "GAME_CATALOG_LOG";

/// Log directives used when neither `RUST_LOG` nor `GAME_CATALOG_LOG` is set
pub const DEFAULT_LOG_DIRECTIVES: &str = "catalog_core=warn,game_catalog=info";

#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    /// None means the default location under the home directory
    pub db_path: Option<PathBuf>,
    /// None means the bundled catalog
    pub data_path: Option<PathBuf>,
    pub log_directives: Option<String>,
    /// Keep storage in memory only
    pub ephemeral: bool,
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        Self {
            db_path: std::env::var(DB_PATH_ENV).ok().map(PathBuf::from),
            data_path: std::env::var(DATA_PATH_ENV).ok().map(PathBuf::from),
            log_directives: std::env::var(LOG_ENV).ok(),
            ephemeral: false,
        }
    }

    pub fn log_directives(&self) -> &str {
        self.log_directives
            .as_deref()
            .unwrap_or(DEFAULT_LOG_DIRECTIVES)
    }

    pub fn load_catalog(&self) -> Result<GameCatalog> {
        match &self.data_path {
            Some(path) => GameCatalog::from_path(path)
                .with_context(|| format!("Failed to load catalog from {}", path.display())),
            None => GameCatalog::builtin().context("Bundled catalog data is invalid"),
        }
    }

    pub fn open_store(&self) -> Result<Arc<dyn KeyValueStore>> {
        let store = if self.ephemeral {
            info!("Using in-memory storage");
            RedbStore::in_memory().context("Failed to create in-memory storage")?
        } else {
            RedbStore::open(self.db_path.as_deref()).context("Failed to open local storage")?
        };
        Ok(Arc::new(store))
    }
}
