//! ============================================================================
//! Catalog Session - Intent dispatch over all catalog state
//! ============================================================================
//! A front end owns one `CatalogSession` and feeds it discrete intents
//! (keystrokes, clicks, the one-time hydration signal). The session applies
//! each intent synchronously and exposes derived views; it never renders.
//!
//! ```text
//! UI event → Intent → dispatch() → stores / query state
//!                                        ↓
//!                  visible() · comparison_table() · current_detail()
//! ```
//! ============================================================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::GameCatalog;
use crate::compare::{CompareToggle, ComparisonSet, ComparisonTable};
use crate::detail::{DetailPage, ImageViewer};
use crate::filter::{filter_and_sort, recommend, CatalogQuery, FilterCriteria, SortKey};
use crate::overlay::{DismissEvent, Overlay};
use crate::persist::{FavoritesStore, RecentlyViewedStore};
use crate::storage::KeyValueStore;
use crate::types::Game;

/// A single user action or lifecycle signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "params", rename_all = "snake_case")]
pub enum Intent {
    /// The view is attached; persisted state may now be read
    Hydrated,
    SetQuery(String),
    SetFilters(FilterCriteria),
    ClearFilters,
    SetSort(SortKey),
    SetFavoritesOnly(bool),
    ToggleFavorite(String),
    ToggleCompare(String),
    OpenComparison,
    CloseComparison(DismissEvent),
    ViewGame(String),
    ClearRecentlyViewed,
    OpenImage { viewport_width: u32 },
    CloseImage(DismissEvent),
}

/// What a dispatched intent did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Updated,
    Unchanged,
    Favorite { id: String, favorite: bool },
    Compare { id: String, change: CompareToggle },
    /// Dropped because persisted state is not hydrated yet
    NotHydrated,
    /// The id or slug names no game in the catalog
    UnknownGame(String),
}

impl Outcome {
    fn changed(changed: bool) -> Self {
        if changed {
            Self::Updated
        } else {
            Self::Unchanged
        }
    }
}

pub struct CatalogSession {
    catalog: GameCatalog,
    favorites: FavoritesStore,
    recent: RecentlyViewedStore,
    comparison: ComparisonSet,
    comparison_view: Overlay,
    query: CatalogQuery,
    current_slug: Option<String>,
    image_viewer: ImageViewer,
}

impl CatalogSession {
    /// Both persistent stores share `store`. Nothing is read from it until
    /// [`Intent::Hydrated`] is dispatched.
    pub fn new(catalog: GameCatalog, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            catalog,
            favorites: FavoritesStore::new(store.clone()),
            recent: RecentlyViewedStore::new(store),
            comparison: ComparisonSet::new(),
            comparison_view: Overlay::new(),
            query: CatalogQuery::default(),
            current_slug: None,
            image_viewer: ImageViewer::new(),
        }
    }

    pub fn dispatch(&mut self, intent: Intent) -> Outcome {
        debug!("Dispatch: {:?}", intent);

        match intent {
            Intent::Hydrated => {
                let first = !self.favorites.is_hydrated();
                self.favorites.hydrate();
                self.recent.hydrate();
                if first {
                    info!(
                        "Session hydrated ({} favorites, {} recent)",
                        self.favorites.len(),
                        self.recent.games().len()
                    );
                }
                Outcome::changed(first)
            }
            Intent::SetQuery(text) => {
                self.query.text = text;
                Outcome::Updated
            }
            Intent::SetFilters(filters) => {
                self.query.filters = filters;
                Outcome::Updated
            }
            Intent::ClearFilters => {
                let changed = self.query.filters.has_active_filters();
                self.query.filters = FilterCriteria::cleared();
                Outcome::changed(changed)
            }
            Intent::SetSort(sort) => {
                let changed = self.query.sort != sort;
                self.query.sort = sort;
                Outcome::changed(changed)
            }
            Intent::SetFavoritesOnly(only) => {
                let changed = self.query.favorites_only != only;
                self.query.favorites_only = only;
                Outcome::changed(changed)
            }
            Intent::ToggleFavorite(id) => self.toggle_favorite(id),
            Intent::ToggleCompare(id) => {
                if !self.catalog.contains(&id) {
                    return Outcome::UnknownGame(id);
                }
                let change = self.comparison.toggle(&id);
                Outcome::Compare { id, change }
            }
            Intent::OpenComparison => Outcome::changed(self.comparison_view.open()),
            Intent::CloseComparison(event) => Outcome::changed(self.comparison_view.dismiss(event)),
            Intent::ViewGame(slug) => self.view_game(slug),
            Intent::ClearRecentlyViewed => {
                if !self.recent.is_hydrated() {
                    return Outcome::NotHydrated;
                }
                if self.recent.games().is_empty() {
                    return Outcome::Unchanged;
                }
                Outcome::changed(self.recent.clear())
            }
            Intent::OpenImage { viewport_width } => {
                if self.current_game().is_none() {
                    return Outcome::Unchanged;
                }
                let was_open = self.image_viewer.is_open();
                Outcome::changed(self.image_viewer.open(viewport_width) && !was_open)
            }
            Intent::CloseImage(event) => Outcome::changed(self.image_viewer.dismiss(event)),
        }
    }

    fn toggle_favorite(&mut self, id: String) -> Outcome {
        if !self.catalog.contains(&id) {
            return Outcome::UnknownGame(id);
        }
        match self.favorites.toggle(&id) {
            Some(favorite) => Outcome::Favorite { id, favorite },
            None => Outcome::NotHydrated,
        }
    }

    fn view_game(&mut self, slug: String) -> Outcome {
        self.image_viewer.reset();
        let outcome = match self.catalog.by_slug(&slug) {
            Some(game) => {
                if self.recent.add(game) {
                    Outcome::Updated
                } else {
                    Outcome::NotHydrated
                }
            }
            None => Outcome::UnknownGame(slug.clone()),
        };
        self.current_slug = Some(slug);
        outcome
    }

    /// The filtered, sorted list for the current query
    pub fn visible(&self) -> Vec<&Game> {
        filter_and_sort(self.catalog.games(), &self.query, self.favorites.ids())
    }

    pub fn recommendations(&self, limit: usize) -> Vec<&Game> {
        recommend(self.catalog.games(), self.favorites.ids(), limit)
    }

    pub fn comparison_games(&self) -> Vec<&Game> {
        self.comparison.resolve(&self.catalog)
    }

    pub fn comparison_table(&self) -> ComparisonTable {
        ComparisonTable::build(&self.comparison_games())
    }

    pub fn is_comparison_open(&self) -> bool {
        self.comparison_view.is_open()
    }

    /// Detail page for the last viewed slug, if any
    pub fn current_detail(&self) -> Option<DetailPage> {
        self.current_slug
            .as_deref()
            .map(|slug| DetailPage::for_slug(&self.catalog, slug))
    }

    fn current_game(&self) -> Option<&Game> {
        self.current_slug
            .as_deref()
            .and_then(|slug| self.catalog.by_slug(slug))
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.is_favorite(id)
    }

    pub fn is_image_open(&self) -> bool {
        self.image_viewer.is_open()
    }

    pub fn catalog(&self) -> &GameCatalog {
        &self.catalog
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn recently_viewed(&self) -> &[Game] {
        self.recent.games()
    }

    pub fn comparison(&self) -> &ComparisonSet {
        &self.comparison
    }
}
