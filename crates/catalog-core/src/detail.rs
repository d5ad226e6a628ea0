//! ============================================================================
//! Detail Page - Per-game view model and image lightbox
//! ============================================================================

use serde::Serialize;
use tracing::debug;

use crate::catalog::GameCatalog;
use crate::overlay::{DismissEvent, Overlay};
use crate::types::Game;

/// Narrowest viewport, in pixels, on which the lightbox is offered
pub const LAPTOP_MIN_WIDTH: u32 = 1024;

/// Where the "back" link of a missing page points
pub const CATALOG_HREF: &str = "/";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledValue {
    pub label: &'static str,
    pub value: String,
}

fn labeled(label: &'static str, value: impl Into<String>) -> LabeledValue {
    LabeledValue {
        label,
        value: value.into(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameDetail {
    pub id: String,
    pub title: String,
    pub image: String,
    /// Long-form text blocks, top to bottom
    pub sections: Vec<LabeledValue>,
    /// Short facts shown as cards under the text
    pub stats: Vec<LabeledValue>,
    pub expansions: Vec<String>,
}

impl GameDetail {
    pub fn from_game(game: &Game) -> Self {
        Self {
            id: game.id.clone(),
            title: game.title.clone(),
            image: game.image.clone(),
            sections: vec![
                labeled("Description", game.description.as_str()),
                labeled("Story", game.story.as_str()),
                labeled("Setting", game.setting.as_str()),
                labeled("Combat Style", game.combat_style.as_str()),
                labeled("World Design", game.world_design.as_str()),
                labeled("Difficulty", game.difficulty.as_str()),
                labeled("Progression Style", game.progression_system.as_str()),
            ],
            stats: vec![
                labeled("Rating", format!("{}/10", game.rating)),
                labeled("Release Date", game.release_date.as_str()),
                labeled("Developer", game.developer.as_str()),
                labeled("Platforms", game.platforms.join(", ")),
            ],
            expansions: game.expansion_content.clone(),
        }
    }
}

/// Result of addressing a detail page by slug
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailPage {
    Found(GameDetail),
    NotFound { slug: String, back_href: String },
}

impl DetailPage {
    pub fn for_slug(catalog: &GameCatalog, slug: &str) -> Self {
        match catalog.by_slug(slug) {
            Some(game) => Self::Found(GameDetail::from_game(game)),
            None => {
                debug!("No game with slug {}", slug);
                Self::NotFound {
                    slug: slug.to_string(),
                    back_href: CATALOG_HREF.to_string(),
                }
            }
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Full-size image overlay on the detail page
#[derive(Debug, Clone, Default)]
pub struct ImageViewer {
    overlay: Overlay,
}

impl ImageViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open unless the viewport is too narrow; returns whether it is open
    pub fn open(&mut self, viewport_width: u32) -> bool {
        if viewport_width < LAPTOP_MIN_WIDTH {
            debug!("Viewport {}px too narrow for lightbox", viewport_width);
            return false;
        }
        self.overlay.open();
        true
    }

    pub fn dismiss(&mut self, event: DismissEvent) -> bool {
        self.overlay.dismiss(event)
    }

    /// Close regardless of input, e.g. when leaving the page
    pub fn reset(&mut self) {
        self.overlay.dismiss(DismissEvent::CloseButton);
    }

    pub fn is_open(&self) -> bool {
        self.overlay.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_catalog;

    #[test]
    fn test_found_page_layout() {
        let catalog = sample_catalog();
        let page = DetailPage::for_slug(&catalog, "elden-ring");
        let DetailPage::Found(detail) = page else {
            panic!("expected a found page");
        };

        assert_eq!(detail.title, "Elden Ring");
        let section_labels: Vec<&str> = detail.sections.iter().map(|s| s.label).collect();
        assert_eq!(
            section_labels,
            vec![
                "Description",
                "Story",
                "Setting",
                "Combat Style",
                "World Design",
                "Difficulty",
                "Progression Style"
            ]
        );
        assert_eq!(detail.stats[0].value, "9.5/10");
        assert_eq!(detail.stats[1].value, "February 25, 2022");
        assert_eq!(detail.stats[3].value, "PlayStation 5, PC");
    }

    #[test]
    fn test_unknown_slug_is_not_found() {
        let catalog = sample_catalog();
        let page = DetailPage::for_slug(&catalog, "half-life-3");
        assert!(!page.is_found());
        assert_eq!(
            page,
            DetailPage::NotFound {
                slug: "half-life-3".into(),
                back_href: "/".into()
            }
        );
    }

    #[test]
    fn test_lightbox_requires_wide_viewport() {
        let mut viewer = ImageViewer::new();
        assert!(!viewer.open(800));
        assert!(!viewer.is_open());

        assert!(viewer.open(LAPTOP_MIN_WIDTH));
        assert!(!viewer.dismiss(DismissEvent::ContentClick));
        assert!(viewer.dismiss(DismissEvent::Escape));
        assert!(!viewer.is_open());
    }

    #[test]
    fn test_lightbox_reset() {
        let mut viewer = ImageViewer::new();
        viewer.open(1440);
        viewer.reset();
        assert!(!viewer.is_open());
    }
}
