//! ============================================================================
//! GameCatalog - Immutable ordered list of games
//! ============================================================================
//! Loaded once at startup, either from the bundled data set or from a JSON
//! file supplied through configuration. Ids and slugs are validated unique.
//! ============================================================================

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use crate::error::CatalogError;
use crate::types::{Category, Game};

/// Bundled game data, embedded at compile time
const BUILTIN_GAMES: &str = include_str!("../data/games.json");

#[derive(Debug, Clone)]
pub struct GameCatalog {
    games: Vec<Game>,
}

impl GameCatalog {
    /// Build a catalog, rejecting duplicate ids/slugs and out-of-range ratings
    pub fn new(games: Vec<Game>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        let mut slugs = HashSet::new();

        for game in &games {
            if !ids.insert(game.id.as_str()) {
                return Err(CatalogError::DuplicateId(game.id.clone()));
            }
            if !slugs.insert(game.slug.as_str()) {
                return Err(CatalogError::DuplicateSlug(game.slug.clone()));
            }
            if !(0.0..=10.0).contains(&game.rating) {
                return Err(CatalogError::RatingOutOfRange {
                    id: game.id.clone(),
                    rating: game.rating,
                });
            }
        }

        debug!("Catalog validated: {} games", games.len());
        Ok(Self { games })
    }

    /// The bundled data set
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_GAMES)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let games: Vec<Game> = serde_json::from_str(json)?;
        Self::new(games)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        info!("Loaded {} games from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn get(&self, id: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }

    pub fn by_slug(&self, slug: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.slug == slug)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Distinct categories present, in catalog order
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for game in &self.games {
            if !seen.contains(&game.category) {
                seen.push(game.category);
            }
        }
        seen
    }

    /// Distinct platform names present, in first-seen order
    pub fn platforms(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for platform in self.games.iter().flat_map(|g| g.platforms.iter()) {
            if !seen.contains(&platform.as_str()) {
                seen.push(platform.as_str());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{elden_ring, game, god_of_war};

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = GameCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.games()[0].title, "Elden Ring");
        assert_eq!(catalog.by_slug("god-of-war").unwrap().id, "2");
        assert_eq!(
            catalog.categories(),
            vec![Category::ActionRpg, Category::ActionAdventure]
        );
        assert!(catalog.platforms().contains(&"Nintendo Switch"));
        assert!(catalog.games().iter().all(|g| g.release_date().is_some()));
    }

    #[test]
    fn test_lookup_by_id_and_slug() {
        let catalog = GameCatalog::new(vec![elden_ring(), god_of_war()]).unwrap();
        assert_eq!(catalog.get("1").unwrap().title, "Elden Ring");
        assert_eq!(catalog.by_slug("elden-ring").unwrap().id, "1");
        assert!(catalog.get("99").is_none());
        assert!(catalog.by_slug("missing").is_none());
        assert!(catalog.contains("2"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut dup = god_of_war();
        dup.id = "1".into();
        let err = GameCatalog::new(vec![elden_ring(), dup]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "1"));
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let mut dup = god_of_war();
        dup.slug = "elden-ring".into();
        let err = GameCatalog::new(vec![elden_ring(), dup]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSlug(slug) if slug == "elden-ring"));
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let mut g = game("1", "Broken");
        g.rating = 11.0;
        assert!(matches!(
            GameCatalog::new(vec![g]),
            Err(CatalogError::RatingOutOfRange { .. })
        ));
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            GameCatalog::from_json("{\"not\": \"a list\"}"),
            Err(CatalogError::InvalidData(_))
        ));
        let unknown_category = r#"[{"id":"1","slug":"x","title":"X","category":"puzzle"}]"#;
        assert!(GameCatalog::from_json(unknown_category).is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameCatalog::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
