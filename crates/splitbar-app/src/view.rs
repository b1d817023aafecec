// Render model handed to the host. It describes what to draw; drawing it is
// the host's business.

use serde::Serialize;
use splitbar_core::{Dimension, DimensionKind, DragPosition, Rect, SplitCombine};

pub const STRIP_TITLE: &str = "Split";
pub const SPLIT_CLASS_NAME: &str = "split";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileView {
    /// Stable per-grouping key.
    pub key: String,
    pub title: String,
    /// Dimension name; doubles as the menu anchor for this tile.
    pub dimension: String,
    pub kind: DimensionKind,
    pub index: usize,
    /// Left edge relative to the strip.
    pub x: f32,
    pub selected: bool,
}

impl TileView {
    pub fn class_names(&self) -> Vec<String> {
        let mut names = vec![
            SPLIT_CLASS_NAME.to_string(),
            format!("type-{}", self.kind.class_name()),
        ];
        if self.selected {
            names.push("selected".to_string());
        }
        names
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragIndicatorView {
    pub position: DragPosition,
    pub x: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuDirection {
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuView {
    pub anchor: String,
    pub dimension: Dimension,
    pub split: SplitCombine,
    pub direction: MenuDirection,
    /// Area the menu must stay inside.
    pub container: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileStripView {
    pub title: &'static str,
    pub drag_over: bool,
    pub tiles: Vec<TileView>,
    pub indicator: Option<DragIndicatorView>,
    pub menu: Option<MenuView>,
}

impl TileStripView {
    pub fn class_name(&self) -> &'static str {
        if self.drag_over {
            "split-tile drag-over"
        } else {
            "split-tile no-drag"
        }
    }
}
