//! ============================================================================
//! Core Types for the Game Catalog
//! ============================================================================
//! Game records plus the small vocabularies (categories, platforms) that the
//! filter bar and comparison table are built from. Records serialize in
//! camelCase, which is also the shape persisted for recently viewed games.
//! ============================================================================

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Platforms offered as filter options
pub const PLATFORM_OPTIONS: [&str; 6] = [
    "PlayStation 4",
    "PlayStation 5",
    "Xbox One",
    "Xbox Series X/S",
    "PC",
    "Nintendo Switch",
];

/// Release date formats accepted in catalog data, tried in order
const RELEASE_DATE_FORMATS: [&str; 2] = ["%B %d, %Y", "%Y-%m-%d"];

/// Genre bucket a game is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    ActionRpg,
    ActionAdventure,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::ActionRpg, Category::ActionAdventure];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "action-rpg" => Some(Self::ActionRpg),
            "action-adventure" => Some(Self::ActionAdventure),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ActionRpg => "action-rpg",
            Self::ActionAdventure => "action-adventure",
        }
    }

    /// Human-readable name used on filter checkboxes ("action rpg")
    pub fn label(&self) -> String {
        self.as_str().replacen('-', " ", 1)
    }
}

/// Hardware family a platform name belongs to, used for compact badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformFamily {
    PlayStation,
    Xbox,
    Nintendo,
    Pc,
    Other,
}

impl PlatformFamily {
    /// Classify a free-form platform name by case-insensitive substring
    pub fn classify(platform: &str) -> Self {
        let lower = platform.to_lowercase();
        if lower.contains("playstation") {
            Self::PlayStation
        } else if lower.contains("xbox") {
            Self::Xbox
        } else if lower.contains("nintendo") || lower.contains("switch") {
            Self::Nintendo
        } else if lower.contains("pc") || lower.contains("steam") {
            Self::Pc
        } else {
            Self::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PlayStation => "PlayStation",
            Self::Xbox => "Xbox",
            Self::Nintendo => "Nintendo",
            Self::Pc => "PC",
            Self::Other => "Other",
        }
    }
}

/// A single catalog entry. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    /// URL-safe address of the detail page
    pub slug: String,
    pub title: String,
    pub category: Category,
    pub description: String,
    pub image: String,
    /// Review score on a 0-10 scale
    pub rating: f64,
    pub developer: String,
    pub publisher: String,
    /// Date as written in the source data, e.g. "February 25, 2022"
    pub release_date: String,
    pub platforms: Vec<String>,
    pub story: String,
    pub setting: String,
    pub combat_style: String,
    pub world_design: String,
    pub player_choice_impact: bool,
    pub multiplayer: bool,
    #[serde(default)]
    pub expansion_content: Vec<String>,
    pub difficulty: String,
    pub progression_system: String,
}

impl Game {
    /// Parsed release date, or None when the stored string is not a date
    pub fn release_date(&self) -> Option<NaiveDate> {
        let raw = self.release_date.trim();
        RELEASE_DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    }

    pub fn release_year(&self) -> Option<i32> {
        self.release_date().map(|d| d.year())
    }

    pub fn has_platform(&self, platform: &str) -> bool {
        self.platforms.iter().any(|p| p == platform)
    }

    /// Distinct platform families, in first-seen order
    pub fn platform_families(&self) -> Vec<PlatformFamily> {
        let mut families = Vec::new();
        for platform in &self.platforms {
            let family = PlatformFamily::classify(platform);
            if !families.contains(&family) {
                families.push(family);
            }
        }
        families
    }
}
