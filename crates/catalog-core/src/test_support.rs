//! Shared fixtures for unit tests.

use std::sync::Arc;

use crate::catalog::GameCatalog;
use crate::error::StorageError;
use crate::storage::KeyValueStore;
use crate::types::{Category, Game};

/// Minimal game with neutral field values; tests override what they need
pub fn game(id: &str, title: &str) -> Game {
    Game {
        id: id.to_string(),
        slug: title.to_lowercase().replace(' ', "-"),
        title: title.to_string(),
        category: Category::ActionRpg,
        description: format!("{} description", title),
        image: format!("https://images.example/{}.jpg", id),
        rating: 5.0,
        developer: "Studio".to_string(),
        publisher: "Publisher".to_string(),
        release_date: "January 1, 2020".to_string(),
        platforms: vec!["PC".to_string()],
        story: String::new(),
        setting: String::new(),
        combat_style: String::new(),
        world_design: String::new(),
        player_choice_impact: false,
        multiplayer: false,
        expansion_content: Vec::new(),
        difficulty: "Moderate".to_string(),
        progression_system: String::new(),
    }
}

pub fn elden_ring() -> Game {
    Game {
        slug: "elden-ring".into(),
        category: Category::ActionRpg,
        description: "An open-world action RPG set in the Lands Between.".into(),
        rating: 9.5,
        developer: "FromSoftware".into(),
        release_date: "February 25, 2022".into(),
        platforms: vec!["PlayStation 5".into(), "PC".into()],
        story: "The Tarnished seeks the shattered Elden Ring.".into(),
        multiplayer: true,
        player_choice_impact: true,
        ..game("1", "Elden Ring")
    }
}

pub fn god_of_war() -> Game {
    Game {
        slug: "god-of-war".into(),
        category: Category::ActionAdventure,
        description: "A father and son journey through Norse mythology.".into(),
        rating: 9.8,
        developer: "Santa Monica Studio".into(),
        release_date: "April 20, 2018".into(),
        platforms: vec!["PlayStation 4".into(), "PlayStation 5".into()],
        story: "Kratos travels with his son Atreus.".into(),
        ..game("2", "God of War")
    }
}

/// Two-entry catalog used by the search and sort scenarios
pub fn sample_catalog() -> GameCatalog {
    GameCatalog::new(vec![elden_ring(), god_of_war()]).unwrap()
}

/// Store that serves reads from a fixed value and rejects every write
pub struct FailingStore {
    pub stored: Option<String>,
}

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.stored.clone())
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Database(format!("quota exceeded writing {}", key)))
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        Err(StorageError::Database(format!("quota exceeded removing {}", key)))
    }
}

pub fn failing_store(stored: Option<&str>) -> Arc<dyn KeyValueStore> {
    Arc::new(FailingStore {
        stored: stored.map(str::to_string),
    })
}
