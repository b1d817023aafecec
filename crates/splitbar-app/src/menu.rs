// Menu anchor state: which tile owns the open split menu.

use splitbar_core::{Dimension, SplitCombine};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open {
        /// Name of the tile the menu hangs off (its dimension name).
        anchor: String,
        dimension: Dimension,
        split: SplitCombine,
    },
}

#[derive(Debug, Clone, Default)]
pub struct MenuController {
    state: MenuState,
}

impl MenuController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MenuState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, MenuState::Open { .. })
    }

    pub fn anchor(&self) -> Option<&str> {
        match &self.state {
            MenuState::Open { anchor, .. } => Some(anchor),
            MenuState::Closed => None,
        }
    }

    pub fn dimension(&self) -> Option<&Dimension> {
        match &self.state {
            MenuState::Open { dimension, .. } => Some(dimension),
            MenuState::Closed => None,
        }
    }

    /// Open the menu on `anchor`. Opening the anchor that already owns the
    /// menu closes it instead. Returns whether the menu is open afterwards.
    pub fn open(&mut self, dimension: Dimension, split: SplitCombine, anchor: &str) -> bool {
        if self.anchor() == Some(anchor) {
            self.close();
            return false;
        }
        log::debug!("menu open on {}", anchor);
        self.state = MenuState::Open {
            anchor: anchor.to_string(),
            dimension,
            split,
        };
        true
    }

    /// Returns false when there was nothing to close.
    pub fn close(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        log::debug!("menu closed");
        self.state = MenuState::Closed;
        true
    }
}
