//! ============================================================================
//! CATALOG-CORE: Game showcase state engine
//! ============================================================================
//! Everything behind the game catalog front end, with no rendering:
//! - Immutable game catalog (bundled or loaded from JSON)
//! - Search, filter and sort over the catalog
//! - Favorites and recently viewed lists persisted in local storage (redb)
//! - Up-to-three game comparison table
//! - Intent-driven session that ties the pieces together
//! ============================================================================

pub mod catalog;
pub mod compare;
pub mod config;
pub mod detail;
pub mod error;
pub mod filter;
pub mod overlay;
pub mod persist;
pub mod session;
pub mod storage;
pub mod types;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use catalog::GameCatalog;
pub use compare::{CompareToggle, ComparisonField, ComparisonSet, ComparisonTable, MAX_COMPARE};
pub use config::CatalogConfig;
pub use detail::{DetailPage, GameDetail, ImageViewer};
pub use error::{CatalogError, StorageError};
pub use filter::{filter_and_sort, recommend, CatalogQuery, FilterCriteria, SortKey};
pub use overlay::DismissEvent;
pub use persist::{
    FavoritesStore, PersistentList, RecentlyViewedStore, FAVORITES_KEY, MAX_RECENT_ITEMS,
    RECENTLY_VIEWED_KEY,
};
pub use session::{CatalogSession, Intent, Outcome};
pub use storage::{KeyValueStore, MemoryStore, RedbStore};
pub use types::{Category, Game, PlatformFamily, PLATFORM_OPTIONS};
