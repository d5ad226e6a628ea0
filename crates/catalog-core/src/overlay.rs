//! Open/closed state shared by the comparison panel and the image lightbox.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// User input that may dismiss an open overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissEvent {
    CloseButton,
    /// Click on the dimmed area around the content
    Backdrop,
    Escape,
    /// Click on the content itself; never dismisses
    ContentClick,
}

impl DismissEvent {
    pub fn closes(&self) -> bool {
        !matches!(self, Self::ContentClick)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Default)]
pub struct Overlay {
    state: OverlayState,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == OverlayState::Open
    }

    /// Returns whether the state changed
    pub fn open(&mut self) -> bool {
        let changed = self.state == OverlayState::Closed;
        self.state = OverlayState::Open;
        changed
    }

    /// Apply `event`; returns whether the overlay closed
    pub fn dismiss(&mut self, event: DismissEvent) -> bool {
        if !self.is_open() || !event.closes() {
            return false;
        }
        debug!("Overlay dismissed via {:?}", event);
        self.state = OverlayState::Closed;
        true
    }
}
