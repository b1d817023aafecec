// Strip geometry and drag position engine.
// Tiles are laid out left to right at a fixed pitch; this crate turns a
// pointer offset into a discrete insert/replace target and places the drop
// indicator for it.


use splitbar_core::{DragPosition, SplitbarError};

// ──────────────────────────────────────────────
// Geometry
// ──────────────────────────────────────────────

/// Default tile width in pixels.
pub const DEFAULT_ITEM_WIDTH: f32 = 102.0;

/// Default gap between tiles in pixels.
pub const DEFAULT_ITEM_GAP: f32 = 8.0;

/// Share of a tile's width, on each side, that counts as an insert band.
/// 0.25 leaves the central half of every tile as the replace band.
pub const DEFAULT_INSERT_BAND: f32 = 0.25;

/// Upper bound for the insert band; past this no replace band would remain.
const MAX_INSERT_BAND: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripGeometry {
    pub item_width: f32,
    pub item_gap: f32,
    /// Fraction of `item_width` at each tile edge that inserts instead of
    /// replacing. Kept within `[0, 0.5]`.
    pub insert_band: f32,
}

impl StripGeometry {
    pub fn new(item_width: f32, item_gap: f32) -> Self {
        Self {
            item_width,
            item_gap,
            insert_band: DEFAULT_INSERT_BAND,
        }
    }

    pub fn with_insert_band(mut self, insert_band: f32) -> Self {
        self.insert_band = if insert_band.is_finite() {
            insert_band.clamp(0.0, MAX_INSERT_BAND)
        } else {
            DEFAULT_INSERT_BAND
        };
        self
    }

    /// Reject geometry the calculator cannot work with.
    pub fn validate(&self) -> Result<(), SplitbarError> {
        if !self.item_width.is_finite() || self.item_width <= 0.0 {
            return Err(SplitbarError::InvalidGeometry(format!(
                "item width must be positive, got {}",
                self.item_width
            )));
        }
        if !self.item_gap.is_finite() || self.item_gap < 0.0 {
            return Err(SplitbarError::InvalidGeometry(format!(
                "item gap must not be negative, got {}",
                self.item_gap
            )));
        }
        if !(0.0..=MAX_INSERT_BAND).contains(&self.insert_band) {
            return Err(SplitbarError::InvalidGeometry(format!(
                "insert band must be within [0, {}], got {}",
                MAX_INSERT_BAND, self.insert_band
            )));
        }
        Ok(())
    }

    /// Width of one tile plus the gap that follows it.
    pub fn section_width(&self) -> f32 {
        self.item_width + self.item_gap
    }

    /// Distance from a tile's edge inside which the pointer inserts.
    /// Never narrower than half a gap, so the gap itself always inserts.
    pub fn insert_edge(&self) -> f32 {
        (self.item_width * self.insert_band).max(self.item_gap / 2.0)
    }

    /// Left edge of the tile at `index`.
    pub fn tile_offset(&self, index: usize) -> f32 {
        index as f32 * self.section_width()
    }

    /// Total width occupied by `item_count` tiles, without the trailing gap.
    pub fn strip_width(&self, item_count: usize) -> f32 {
        if item_count == 0 {
            return 0.0;
        }
        self.tile_offset(item_count) - self.item_gap
    }

    /// Horizontal placement of the drop indicator: the middle of the gap for
    /// inserts, the tile's left edge for replaces.
    pub fn indicator_x(&self, position: DragPosition) -> Option<f32> {
        match position {
            DragPosition::Insert(index) => {
                Some((self.tile_offset(index) - self.item_gap / 2.0).max(0.0))
            }
            DragPosition::Replace(index) => Some(self.tile_offset(index)),
            DragPosition::None => None,
        }
    }
}

impl Default for StripGeometry {
    fn default() -> Self {
        Self::new(DEFAULT_ITEM_WIDTH, DEFAULT_ITEM_GAP)
    }
}

// ──────────────────────────────────────────────
// Position calculator
// ──────────────────────────────────────────────

/// Map a pointer offset (relative to the strip's left edge) to a drop target.
///
/// Within each tile the leading `insert_edge` inserts before it, the body
/// replaces it, and the trailing edge together with the following gap
/// inserts after it. Offsets left of the strip insert at 0; offsets past the
/// last tile insert at `item_count`. An empty strip always inserts at 0.
///
/// Returns [`DragPosition::None`] only for a non-finite offset or a
/// degenerate section width.
pub fn calculate_drag_position(
    offset_x: f32,
    item_count: usize,
    geometry: &StripGeometry,
) -> DragPosition {
    let section = geometry.section_width();
    if !offset_x.is_finite() || !section.is_finite() || section <= 0.0 {
        return DragPosition::None;
    }
    if item_count == 0 || offset_x < 0.0 {
        return DragPosition::Insert(0);
    }

    let slot = (offset_x / section).floor();
    if slot >= item_count as f32 {
        return DragPosition::Insert(item_count);
    }
    let slot = slot as usize;

    let within = offset_x - slot as f32 * section;
    let edge = geometry.insert_edge();
    if within < edge {
        DragPosition::Insert(slot)
    } else if within < geometry.item_width - edge {
        DragPosition::Replace(slot)
    } else {
        DragPosition::Insert(slot + 1)
    }
}
