//! ============================================================================
//! Error Types
//! ============================================================================

/// Errors raised while building a catalog from game data
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate game id: {0}")]
    DuplicateId(String),

    #[error("Duplicate game slug: {0}")]
    DuplicateSlug(String),

    #[error("Rating {rating} for game {id} is outside 0-10")]
    RatingOutOfRange { id: String, rating: f64 },

    #[error("Invalid catalog data: {0}")]
    InvalidData(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the durable key-value store
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage lock poisoned")]
    Poisoned,

    #[error("Cannot determine home directory")]
    NoHomeDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
