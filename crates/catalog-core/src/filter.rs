//! ============================================================================
//! Filter & Sort Engine
//! ============================================================================
//! Pure derivation of the visible game list from the current query state:
//! - Text search over title, description and developer (case-insensitive)
//! - Category, minimum rating and platform filters (ANDed together)
//! - Optional favorites-only restriction
//! - Stable sort by rating, title, release date or developer, with text
//!   keys ordered by the root-locale collator
//!
//! Cheap enough to recompute on every keystroke for catalogs of a few
//! hundred entries.
//! ============================================================================

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{Category, Game};

/// Active filter selections from the filter panel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Empty means every category; otherwise any listed category matches
    pub categories: Vec<Category>,
    /// 0 means unrestricted
    pub min_rating: f64,
    /// Empty means every platform; otherwise a game needs one listed platform
    pub platforms: Vec<String>,
    /// Carried with the filter state but not applied by any predicate
    pub release_year: String,
}

impl FilterCriteria {
    /// Unrestricted criteria, as produced by "clear filters"
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn has_active_filters(&self) -> bool {
        !self.categories.is_empty()
            || !self.platforms.is_empty()
            || self.min_rating > 0.0
            || !self.release_year.is_empty()
    }

    /// Number shown on the filter badge
    pub fn active_filter_count(&self) -> usize {
        self.categories.len() + self.platforms.len() + usize::from(self.min_rating > 0.0)
    }

    /// Checkbox semantics: remove when selected, append otherwise
    pub fn toggle_category(&mut self, category: Category) {
        if let Some(pos) = self.categories.iter().position(|c| *c == category) {
            self.categories.remove(pos);
        } else {
            self.categories.push(category);
        }
    }

    pub fn toggle_platform(&mut self, platform: &str) {
        if let Some(pos) = self.platforms.iter().position(|p| p == platform) {
            self.platforms.remove(pos);
        } else {
            self.platforms.push(platform.to_string());
        }
    }

    fn matches(&self, game: &Game) -> bool {
        let category_ok = self.categories.is_empty() || self.categories.contains(&game.category);
        let rating_ok = game.rating >= self.min_rating;
        let platform_ok = self.platforms.is_empty()
            || self.platforms.iter().any(|p| game.has_platform(p));
        category_ok && rating_ok && platform_ok
    }
}

/// Ordering applied after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Highest rated first
    #[default]
    Rating,
    /// A-Z
    Title,
    /// Newest first
    ReleaseDate,
    /// A-Z
    Developer,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Rating,
        SortKey::Title,
        SortKey::ReleaseDate,
        SortKey::Developer,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "rating" => Some(Self::Rating),
            "title" => Some(Self::Title),
            "releaseDate" | "release-date" | "release_date" => Some(Self::ReleaseDate),
            "developer" => Some(Self::Developer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Title => "title",
            Self::ReleaseDate => "releaseDate",
            Self::Developer => "developer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Rating => "Rating (High to Low)",
            Self::Title => "Title (A-Z)",
            Self::ReleaseDate => "Release Date (Newest)",
            Self::Developer => "Developer (A-Z)",
        }
    }

    fn is_textual(&self) -> bool {
        matches!(self, Self::Title | Self::Developer)
    }

    fn compare(&self, a: &Game, b: &Game, collator: Option<&Collator>) -> Ordering {
        match self {
            Self::Rating => b.rating.total_cmp(&a.rating),
            Self::Title => compare_text(collator, &a.title, &b.title),
            Self::ReleaseDate => match (a.release_date(), b.release_date()) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            Self::Developer => compare_text(collator, &a.developer, &b.developer),
        }
    }
}

/// Complete input to [`filter_and_sort`], as held by the search bar
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    pub text: String,
    pub filters: FilterCriteria,
    pub sort: SortKey,
    pub favorites_only: bool,
}

/// Root-locale collator at default strength
fn root_collator() -> Option<Collator> {
    match Collator::try_new(&Default::default(), CollatorOptions::new()) {
        Ok(collator) => Some(collator),
        Err(e) => {
            warn!("Collation data unavailable: {:?} - using case-insensitive order", e);
            None
        }
    }
}

/// Collated order with a byte-order tiebreak so the result is total
fn compare_text(collator: Option<&Collator>, a: &str, b: &str) -> Ordering {
    match collator {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    }
    .then_with(|| a.cmp(b))
}

fn matches_text(game: &Game, needle: &str) -> bool {
    needle.is_empty()
        || game.title.to_lowercase().contains(needle)
        || game.description.to_lowercase().contains(needle)
        || game.developer.to_lowercase().contains(needle)
}

/// Filter `games` by every active predicate in `query`, then sort.
///
/// `favorites` is the current favorite id list; it only matters when
/// `query.favorites_only` is set. Output order for equal sort keys follows
/// catalog order.
pub fn filter_and_sort<'a>(
    games: &'a [Game],
    query: &CatalogQuery,
    favorites: &[String],
) -> Vec<&'a Game> {
    let needle = query.text.trim().to_lowercase();

    let mut visible: Vec<&Game> = games
        .iter()
        .filter(|g| matches_text(g, &needle))
        .filter(|g| query.filters.matches(g))
        .filter(|g| !query.favorites_only || favorites.iter().any(|id| *id == g.id))
        .collect();

    let collator = if query.sort.is_textual() {
        root_collator()
    } else {
        None
    };
    visible.sort_by(|a, b| query.sort.compare(a, b, collator.as_ref()));
    visible
}

/// Games sharing a category with any favorite, best rated first.
/// Favorites themselves are never recommended.
pub fn recommend<'a>(games: &'a [Game], favorites: &[String], limit: usize) -> Vec<&'a Game> {
    let liked: Vec<Category> = games
        .iter()
        .filter(|g| favorites.contains(&g.id))
        .map(|g| g.category)
        .collect();

    if liked.is_empty() {
        return Vec::new();
    }

    let mut picks: Vec<&Game> = games
        .iter()
        .filter(|g| !favorites.contains(&g.id) && liked.contains(&g.category))
        .collect();
    picks.sort_by(|a, b| SortKey::Rating.compare(a, b, None));
    picks.truncate(limit);
    picks
}
