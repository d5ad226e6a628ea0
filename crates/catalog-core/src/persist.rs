//! ============================================================================
//! Persistent Lists - Favorites and recently viewed games
//! ============================================================================
//! Small ordered lists serialized as JSON arrays under fixed storage keys.
//! Storage problems never reach the caller: unreadable data loads as an
//! empty list and failed writes are logged while the in-memory list stays
//! authoritative for the session.
//!
//! Both stores are inert until `hydrate()` runs. Before that, membership
//! queries answer "not a member" and mutations are dropped.
//! ============================================================================

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::storage::KeyValueStore;
use crate::types::Game;

/// Storage key for the favorite game ids
pub const FAVORITES_KEY: &str = "game-favorites";

/// Storage key for recently viewed games (full records, newest first)
pub const RECENTLY_VIEWED_KEY: &str = "recently-viewed-games";

/// Maximum number of recently viewed games kept
pub const MAX_RECENT_ITEMS: usize = 5;

/// A JSON array of `T` stored under one key
pub struct PersistentList<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    _item: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> PersistentList<T> {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _item: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored list. Absent, unparseable or non-array values
    /// all load as an empty list; entries of the wrong shape are skipped.
    pub fn load(&self) -> Vec<T> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read {}: {} - starting empty", self.key, e);
                return Vec::new();
            }
        };

        let value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Malformed JSON under {}: {} - starting empty", self.key, e);
                return Vec::new();
            }
        };

        let serde_json::Value::Array(entries) = value else {
            warn!("Value under {} is not an array - starting empty", self.key);
            return Vec::new();
        };

        let mut items = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value(entry) {
                Ok(item) => items.push(item),
                Err(e) => warn!("Skipping entry {} under {}: {}", index, self.key, e),
            }
        }
        items
    }

    /// Write the list. Failures are logged, never returned.
    pub fn save(&self, items: &[T]) {
        let json = match serde_json::to_string(items) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize {}: {}", self.key, e);
                return;
            }
        };

        match self.store.set(&self.key, &json) {
            Ok(()) => debug!("Saved {} entries to {}", items.len(), self.key),
            Err(e) => error!("Failed to save {}: {}", self.key, e),
        }
    }
}

/// Favorite game ids. Membership is unique; insertion order is kept for
/// display.
pub struct FavoritesStore {
    list: PersistentList<String>,
    ids: Vec<String>,
    hydrated: bool,
}

impl FavoritesStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            list: PersistentList::new(store, FAVORITES_KEY),
            ids: Vec::new(),
            hydrated: false,
        }
    }

    /// Load from storage and open the gate. Later calls are no-ops.
    pub fn hydrate(&mut self) {
        if self.hydrated {
            return;
        }
        let mut ids = Vec::new();
        for id in self.list.load() {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        self.ids = ids;
        self.hydrated = true;
        info!("Favorites hydrated: {} games", self.ids.len());
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.hydrated && self.ids.iter().any(|f| f == id)
    }

    /// Add or remove `id`, persisting immediately.
    ///
    /// Returns the new membership, or None if the store is not hydrated
    /// yet and the request was dropped.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        if !self.hydrated {
            debug!("Favorites not hydrated, dropping toggle for {}", id);
            return None;
        }

        let now_favorite = match self.ids.iter().position(|f| f == id) {
            Some(pos) => {
                self.ids.remove(pos);
                false
            }
            None => {
                self.ids.push(id.to_string());
                true
            }
        };

        self.list.save(&self.ids);
        debug!("Favorite {} -> {}", id, now_favorite);
        Some(now_favorite)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Most-recent-first log of viewed games, capped at [`MAX_RECENT_ITEMS`]
pub struct RecentlyViewedStore {
    list: PersistentList<Game>,
    games: Vec<Game>,
    hydrated: bool,
}

impl RecentlyViewedStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            list: PersistentList::new(store, RECENTLY_VIEWED_KEY),
            games: Vec::new(),
            hydrated: false,
        }
    }

    pub fn hydrate(&mut self) {
        if self.hydrated {
            return;
        }
        let mut games: Vec<Game> = Vec::new();
        for game in self.list.load() {
            if !games.iter().any(|g| g.id == game.id) {
                games.push(game);
            }
        }
        games.truncate(MAX_RECENT_ITEMS);
        self.games = games;
        self.hydrated = true;
        info!("Recently viewed hydrated: {} games", self.games.len());
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Move `game` to the front, dropping any older entry with its id.
    /// Returns false when dropped before hydration.
    pub fn add(&mut self, game: &Game) -> bool {
        if !self.hydrated {
            debug!("Recently viewed not hydrated, dropping {}", game.id);
            return false;
        }

        self.games.retain(|g| g.id != game.id);
        self.games.insert(0, game.clone());
        self.games.truncate(MAX_RECENT_ITEMS);
        self.list.save(&self.games);
        true
    }

    pub fn clear(&mut self) -> bool {
        if !self.hydrated {
            return false;
        }
        self.games.clear();
        self.list.save(&self.games);
        true
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn ids(&self) -> Vec<&str> {
        self.games.iter().map(|g| g.id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::test_support::{failing_store, game};

    fn memory() -> Arc<dyn KeyValueStore> {
        Arc::new(MemoryStore::new())
    }

    fn hydrated_favorites(store: &Arc<dyn KeyValueStore>) -> FavoritesStore {
        let mut favorites = FavoritesStore::new(store.clone());
        favorites.hydrate();
        favorites
    }

    #[test]
    fn test_list_save_then_load() {
        let list: PersistentList<String> = PersistentList::new(memory(), FAVORITES_KEY);
        assert!(list.load().is_empty());

        list.save(&["3".to_string(), "1".to_string()]);
        assert_eq!(list.load(), vec!["3", "1"]);
    }

    #[test]
    fn test_malformed_or_wrong_shape_loads_empty() {
        let store = memory();
        let list: PersistentList<String> = PersistentList::new(store.clone(), FAVORITES_KEY);

        for raw in ["not json", "{\"id\": \"1\"}", "\"1\"", "[1, 2, 3]", "null"] {
            store.set(FAVORITES_KEY, raw).unwrap();
            assert!(list.load().is_empty(), "expected empty for {}", raw);
        }
    }

    #[test]
    fn test_bad_entries_are_skipped() {
        let store = memory();
        store
            .set(FAVORITES_KEY, "[\"1\", 7, \"4\", {\"id\": \"5\"}]")
            .unwrap();
        let list: PersistentList<String> = PersistentList::new(store, FAVORITES_KEY);
        assert_eq!(list.load(), vec!["1", "4"]);
    }

    #[test]
    fn test_recent_keeps_readable_records() {
        let store = memory();
        let mut records = vec![
            serde_json::to_value(game("1", "Elden Ring")).unwrap(),
            serde_json::to_value(game("2", "God of War")).unwrap(),
            serde_json::to_value(game("3", "Hades")).unwrap(),
        ];
        records[1].as_object_mut().unwrap().remove("developer");
        store
            .set(RECENTLY_VIEWED_KEY, &serde_json::Value::Array(records).to_string())
            .unwrap();

        let mut recent = RecentlyViewedStore::new(store);
        recent.hydrate();
        assert_eq!(recent.ids(), vec!["1", "3"]);
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let store = memory();
        let mut favorites = hydrated_favorites(&store);

        assert_eq!(favorites.toggle("1"), Some(true));
        assert!(favorites.is_favorite("1"));
        assert_eq!(favorites.toggle("1"), Some(false));
        assert!(!favorites.is_favorite("1"));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_toggle_persists_immediately() {
        let store = memory();
        let mut favorites = hydrated_favorites(&store);
        favorites.toggle("2");
        favorites.toggle("5");

        assert_eq!(
            store.get(FAVORITES_KEY).unwrap().as_deref(),
            Some("[\"2\",\"5\"]")
        );

        let reloaded = hydrated_favorites(&store);
        assert_eq!(reloaded.ids(), favorites.ids());
    }

    #[test]
    fn test_hydration_gate() {
        let store = memory();
        store.set(FAVORITES_KEY, "[\"1\"]").unwrap();
        let mut favorites = FavoritesStore::new(store.clone());

        assert!(!favorites.is_hydrated());
        assert!(!favorites.is_favorite("1"));
        assert_eq!(favorites.toggle("2"), None);
        assert_eq!(store.get(FAVORITES_KEY).unwrap().as_deref(), Some("[\"1\"]"));

        favorites.hydrate();
        assert!(favorites.is_favorite("1"));
        assert!(!favorites.is_favorite("2"));
    }

    #[test]
    fn test_hydrate_is_idempotent() {
        let store = memory();
        let mut favorites = hydrated_favorites(&store);
        favorites.toggle("1");

        store.set(FAVORITES_KEY, "[\"9\"]").unwrap();
        favorites.hydrate();
        assert_eq!(favorites.ids(), ["1".to_string()]);
    }

    #[test]
    fn test_duplicate_stored_ids_collapse() {
        let store = memory();
        store.set(FAVORITES_KEY, "[\"1\",\"2\",\"1\"]").unwrap();
        let favorites = hydrated_favorites(&store);
        assert_eq!(favorites.ids(), ["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let store = failing_store(Some("[\"1\"]"));
        let mut favorites = hydrated_favorites(&store);
        assert!(favorites.is_favorite("1"));

        assert_eq!(favorites.toggle("2"), Some(true));
        assert!(favorites.is_favorite("2"));
        assert_eq!(favorites.len(), 2);
    }

    #[test]
    fn test_recent_cap_and_order() {
        let mut recent = RecentlyViewedStore::new(memory());
        recent.hydrate();

        for i in 1..=6 {
            recent.add(&game(&i.to_string(), &format!("Game {}", i)));
        }
        assert_eq!(recent.ids(), vec!["6", "5", "4", "3", "2"]);
    }

    #[test]
    fn test_recent_readd_moves_to_front() {
        let mut recent = RecentlyViewedStore::new(memory());
        recent.hydrate();
        for i in 1..=5 {
            recent.add(&game(&i.to_string(), &format!("Game {}", i)));
        }

        recent.add(&game("3", "Game 3"));
        assert_eq!(recent.ids(), vec!["3", "5", "4", "2", "1"]);
        assert_eq!(recent.games().len(), MAX_RECENT_ITEMS);
    }

    #[test]
    fn test_recent_stores_full_records() {
        let store = memory();
        let mut recent = RecentlyViewedStore::new(store.clone());
        recent.hydrate();
        recent.add(&game("1", "Elden Ring"));

        let raw = store.get(RECENTLY_VIEWED_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["title"], "Elden Ring");
        assert_eq!(value[0]["releaseDate"], "January 1, 2020");

        let mut reloaded = RecentlyViewedStore::new(store);
        reloaded.hydrate();
        assert_eq!(reloaded.games(), recent.games());
    }

    #[test]
    fn test_recent_gate_and_clear() {
        let store = memory();
        let mut recent = RecentlyViewedStore::new(store.clone());
        assert!(!recent.add(&game("1", "Elden Ring")));
        assert!(!recent.clear());
        assert_eq!(store.get(RECENTLY_VIEWED_KEY).unwrap(), None);

        recent.hydrate();
        assert!(recent.add(&game("1", "Elden Ring")));
        assert!(recent.clear());
        assert!(recent.games().is_empty());
        assert_eq!(store.get(RECENTLY_VIEWED_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_recent_overlong_stored_list_is_truncated() {
        let store = memory();
        let games: Vec<Game> = (1..=8)
            .map(|i| game(&i.to_string(), &format!("Game {}", i)))
            .collect();
        store
            .set(RECENTLY_VIEWED_KEY, &serde_json::to_string(&games).unwrap())
            .unwrap();

        let mut recent = RecentlyViewedStore::new(store);
        recent.hydrate();
        assert_eq!(recent.ids(), vec!["1", "2", "3", "4", "5"]);
    }
}
