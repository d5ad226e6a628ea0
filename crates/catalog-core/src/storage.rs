// ============================================================================
// Local Storage - Durable key-value store (redb)
// ============================================================================
// String keys to serialized JSON values, the same model as browser local
// storage. Default path: ~/.game-catalog/catalog.redb
// ============================================================================

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use redb::{Database, ReadableTable, TableDefinition};
use tracing::{debug, info};

use crate::error::StorageError;

const LOCAL_STORAGE: TableDefinition<&str, &str> = TableDefinition::new("local_storage");

/// Directory under the home directory holding the default database
const DATA_DIR: &str = ".game-catalog";
const DB_FILE: &str = "catalog.redb";

/// Minimal key-value interface shared by every persisted list.
///
/// Implementations are shared between stores through `Arc`, so writes to a
/// key from one store are visible to every other store reading that key.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Returns whether a value was present
    fn remove(&self, key: &str) -> Result<bool, StorageError>;
}

fn db_err(context: &str, e: impl std::fmt::Display) -> StorageError {
    StorageError::Database(format!("{}: {}", context, e))
}

/// Default database location, creating its directory if needed
pub fn default_db_path() -> Result<PathBuf, StorageError> {
    let home = dirs::home_dir().ok_or(StorageError::NoHomeDir)?;
    let dir = home.join(DATA_DIR);
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join(DB_FILE))
}

/// Durable store backed by an embedded redb database
pub struct RedbStore {
    db: Database,
    path: Option<PathBuf>,
}

impl RedbStore {
    /// Open (or create) the database at `path`, or at [`default_db_path`]
    pub fn open(path: Option<&Path>) -> Result<Self, StorageError> {
        let db_path = match path {
            Some(p) => p.to_path_buf(),
            None => default_db_path()?,
        };

        info!("Opening local storage at: {}", db_path.display());

        let db = Database::create(&db_path).map_err(|e| db_err("Failed to open database", e))?;
        let store = Self {
            db,
            path: Some(db_path),
        };
        store.ensure_table()?;
        Ok(store)
    }

    /// Non-durable database, for sessions that must not touch disk
    pub fn in_memory() -> Result<Self, StorageError> {
        let db = Database::builder()
            .create_with_backend(redb::backends::InMemoryBackend::new())
            .map_err(|e| db_err("Failed to create in-memory database", e))?;
        let store = Self { db, path: None };
        store.ensure_table()?;
        Ok(store)
    }

    /// Database file path; None for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn ensure_table(&self) -> Result<(), StorageError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| db_err("Failed to begin write", e))?;
        {
            let _ = write_txn
                .open_table(LOCAL_STORAGE)
                .map_err(|e| db_err("Failed to create local_storage table", e))?;
        }
        write_txn
            .commit()
            .map_err(|e| db_err("Failed to commit init", e))?;
        Ok(())
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| db_err("Failed to begin read", e))?;
        let table = read_txn
            .open_table(LOCAL_STORAGE)
            .map_err(|e| db_err("Failed to open local_storage table", e))?;

        let value = table
            .get(key)
            .map_err(|e| db_err("Failed to get value", e))?
            .map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| db_err("Failed to begin write", e))?;
        {
            let mut table = write_txn
                .open_table(LOCAL_STORAGE)
                .map_err(|e| db_err("Failed to open local_storage table", e))?;
            table
                .insert(key, value)
                .map_err(|e| db_err("Failed to insert value", e))?;
        }
        write_txn
            .commit()
            .map_err(|e| db_err("Failed to commit", e))?;

        debug!("Stored {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| db_err("Failed to begin write", e))?;
        let removed;
        {
            let mut table = write_txn
                .open_table(LOCAL_STORAGE)
                .map_err(|e| db_err("Failed to open local_storage table", e))?;
            removed = table
                .remove(key)
                .map_err(|e| db_err("Failed to remove value", e))?
                .is_some();
        }
        write_txn
            .commit()
            .map_err(|e| db_err("Failed to commit delete", e))?;

        if removed {
            debug!("Removed {}", key);
        }
        Ok(removed)
    }
}

/// Process-local store; contents vanish with the process
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.remove(key).is_some())
    }
}
