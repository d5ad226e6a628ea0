//! ============================================================================
//! Comparison - Side-by-side attribute table for up to three games
//! ============================================================================
//! The selection is transient session state and is never persisted. The
//! table is built from a fixed list of comparable fields, each with its own
//! accessor and formatter.
//! ============================================================================

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::GameCatalog;
use crate::types::Game;

/// Maximum number of games compared at once
pub const MAX_COMPARE: usize = 3;

/// Result of [`ComparisonSet::toggle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareToggle {
    Added,
    Removed,
    /// Selection already full; nothing changed
    AtCapacity,
}

/// Ids selected for comparison, in selection order
#[derive(Debug, Clone, Default)]
pub struct ComparisonSet {
    ids: Vec<String>,
}

impl ComparisonSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: &str) -> CompareToggle {
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(pos);
            return CompareToggle::Removed;
        }
        if self.ids.len() >= MAX_COMPARE {
            debug!("Comparison full, ignoring {}", id);
            return CompareToggle::AtCapacity;
        }
        self.ids.push(id.to_string());
        CompareToggle::Added
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
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

    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_COMPARE
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Selected games in catalog order (not selection order)
    pub fn resolve<'a>(&self, catalog: &'a GameCatalog) -> Vec<&'a Game> {
        catalog
            .games()
            .iter()
            .filter(|g| self.contains(&g.id))
            .collect()
    }
}

/// Attributes shown as comparison rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComparisonField {
    Rating,
    Developer,
    ReleaseDate,
    Platforms,
    Category,
    Difficulty,
    Multiplayer,
    PlayerChoiceImpact,
}

impl ComparisonField {
    pub const ALL: [ComparisonField; 8] = [
        ComparisonField::Rating,
        ComparisonField::Developer,
        ComparisonField::ReleaseDate,
        ComparisonField::Platforms,
        ComparisonField::Category,
        ComparisonField::Difficulty,
        ComparisonField::Multiplayer,
        ComparisonField::PlayerChoiceImpact,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Rating => "Rating",
            Self::Developer => "Developer",
            Self::ReleaseDate => "Release Date",
            Self::Platforms => "Platforms",
            Self::Category => "Category",
            Self::Difficulty => "Difficulty",
            Self::Multiplayer => "Multiplayer",
            Self::PlayerChoiceImpact => "Player Choice Impact",
        }
    }

    pub fn format(&self, game: &Game) -> String {
        match self {
            Self::Rating => format!("{}/10", game.rating),
            Self::Developer => game.developer.clone(),
            Self::ReleaseDate => game
                .release_date()
                .map(|d| d.format("%-m/%-d/%Y").to_string())
                .unwrap_or_else(|| game.release_date.clone()),
            Self::Platforms => game.platforms.join(", "),
            Self::Category => game.category.label().to_uppercase(),
            Self::Difficulty => game.difficulty.clone(),
            Self::Multiplayer => yes_no(game.multiplayer),
            Self::PlayerChoiceImpact => yes_no(game.player_choice_impact),
        }
    }
}

fn yes_no(flag: bool) -> String {
    let text = if flag { "Yes" } else { "No" };
    text.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub field: ComparisonField,
    pub label: String,
    /// One formatted value per compared game, in column order
    pub values: Vec<String>,
}

/// Rendered comparison: one column per game, one row per field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub titles: Vec<String>,
    pub images: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub const EMPTY_MESSAGE: &'static str = "No games selected for comparison";

    pub fn build(games: &[&Game]) -> Self {
        let rows = ComparisonField::ALL
            .iter()
            .map(|field| ComparisonRow {
                field: *field,
                label: field.label().to_string(),
                values: games.iter().map(|g| field.format(g)).collect(),
            })
            .collect();

        Self {
            titles: games.iter().map(|g| g.title.clone()).collect(),
            images: games.iter().map(|g| g.image.clone()).collect(),
            rows,
        }
    }

    /// True when no game is selected; callers show the empty state
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
