use splitbar_core::{
    Clicker, Dimension, Essence, Rect, SplitCombine, SplitbarError, VisStrategy,
};
use splitbar_input::{
    write_split_payload, DataTransfer, DragResponse, DragState, DragTracker, DropContext,
};
use splitbar_layout::StripGeometry;

use crate::menu::MenuController;
use crate::view::{
    DragIndicatorView, MenuDirection, MenuView, TileStripView, TileView, STRIP_TITLE,
};

// ──────────────────────────────────────────────
// Split tile strip
// ──────────────────────────────────────────────

/// Controller for the strip of split tiles.
///
/// Holds the latest essence snapshot (owned by the application and replaced
/// through [`SplitTile::set_essence`]), the drag state machine, and the menu
/// anchor. Mutations never touch the snapshot; they go out through the
/// [`Clicker`] passed into each call.
pub struct SplitTile {
    essence: Essence,
    /// Bounds of the tile container in the host's coordinate space.
    strip_rect: Rect,
    /// Area the split menu is confined to.
    menu_stage: Rect,
    tracker: DragTracker,
    menu: MenuController,
    /// Anchors (dimension names) of the tiles drawn by the last render.
    rendered_anchors: Vec<String>,
}

impl SplitTile {
    pub fn new(essence: Essence, geometry: StripGeometry, menu_stage: Rect) -> Self {
        Self {
            essence,
            strip_rect: Rect::default(),
            menu_stage,
            tracker: DragTracker::new(geometry),
            menu: MenuController::new(),
            rendered_anchors: Vec::new(),
        }
    }

    pub fn essence(&self) -> &Essence {
        &self.essence
    }

    pub fn set_essence(&mut self, essence: Essence) {
        self.essence = essence;
    }

    pub fn set_strip_rect(&mut self, rect: Rect) {
        self.strip_rect = rect;
    }

    pub fn drag_state(&self) -> DragState {
        self.tracker.state()
    }

    pub fn menu(&self) -> &MenuController {
        &self.menu
    }

    fn offset(&self, client_x: f32) -> f32 {
        client_x - self.strip_rect.x
    }

    /// Split at `index` together with the dimension it groups on.
    fn tile_at(&self, index: usize) -> Result<Option<(SplitCombine, Dimension)>, SplitbarError> {
        let Some(split) = self.essence.splits().get(index) else {
            return Ok(None);
        };
        let dimension = split
            .dimension(self.essence.data_source())
            .ok_or_else(|| SplitbarError::DimensionNotFound {
                expression: split.expression.clone(),
            })?;
        Ok(Some((split.clone(), dimension.clone())))
    }

    // ── Menu ────────────────────────────────────

    /// Click on the tile at `index`: toggle its menu.
    pub fn click_tile(&mut self, index: usize) -> Result<bool, SplitbarError> {
        match self.tile_at(index)? {
            Some((split, dimension)) => {
                let anchor = dimension.name.clone();
                Ok(self.menu.open(dimension, split, &anchor))
            }
            None => Ok(false),
        }
    }

    /// Click on the remove control of the tile at `index`.
    pub fn remove_tile(&mut self, index: usize, clicker: &mut dyn Clicker) -> bool {
        let Some(split) = self.essence.splits().get(index).cloned() else {
            return false;
        };
        clicker.remove_split(&split, VisStrategy::FairGame);
        self.menu.close();
        true
    }

    /// Open the menu for `dimension` on behalf of another part of the
    /// application. Quietly does nothing when the dimension has no split or
    /// its tile has not been rendered yet.
    pub fn split_menu_request(&mut self, dimension: &Dimension) -> bool {
        let Some(split) = self.essence.splits().find_split_for_dimension(dimension).cloned() else {
            log::debug!("menu request for {}: no split", dimension.name);
            return false;
        };
        if !self.rendered_anchors.iter().any(|a| *a == dimension.name) {
            log::debug!("menu request for {}: tile not rendered", dimension.name);
            return false;
        }
        let anchor = dimension.name.clone();
        self.menu.open(dimension.clone(), split, &anchor)
    }

    // ── Drag source ─────────────────────────────

    /// Fill `session` with the payload for dragging the tile at `index`.
    /// Returns false when there is no such tile.
    pub fn drag_start(&self, index: usize, session: &mut DataTransfer) -> Result<bool, SplitbarError> {
        let Some((split, dimension)) = self.tile_at(index)? else {
            return Ok(false);
        };
        let sole = SplitCombine::from_expression(dimension.expression.clone());
        let url = self.essence.change_split(sole).url()?;
        write_split_payload(session, index, &split, &dimension, &url)?;
        Ok(true)
    }

    // ── Drop target ─────────────────────────────

    pub fn drag_enter(&mut self, client_x: f32, session: &DataTransfer) -> DragResponse {
        let offset = self.offset(client_x);
        let count = self.essence.splits().len();
        self.tracker.drag_enter(session, offset, count)
    }

    pub fn drag_over(&mut self, client_x: f32, session: &mut DataTransfer) -> DragResponse {
        let offset = self.offset(client_x);
        let count = self.essence.splits().len();
        self.tracker.drag_over(session, offset, count)
    }

    pub fn drag_leave(&mut self, session: &DataTransfer) -> DragResponse {
        self.tracker.drag_leave(session)
    }

    /// Resolve the drop and commit the new sequence through `clicker`.
    pub fn drop(
        &mut self,
        client_x: f32,
        session: &DataTransfer,
        clicker: &mut dyn Clicker,
    ) -> DragResponse {
        let offset = self.offset(client_x);
        let splits = self.essence.splits();
        let context = DropContext {
            splits,
            catalog: self.essence.data_source(),
        };
        let response = self.tracker.drop_payload(session, offset, &context);
        if let Some(action) = &response.action {
            clicker.change_splits(action.apply(splits), VisStrategy::FairGame);
        }
        response
    }

    /// The gesture ended (`dragend`) without a drop reaching this strip.
    pub fn cancel_drag(&mut self) {
        self.tracker.cancel();
    }

    // ── Render ──────────────────────────────────

    /// Build the render model. Every split must reference a live dimension;
    /// a dangling split fails the whole render.
    pub fn render(&mut self) -> Result<TileStripView, SplitbarError> {
        let data_source = self.essence.data_source();
        let geometry = self.tracker.geometry();
        let selected = self.menu.dimension();

        let tiles = self
            .essence
            .splits()
            .iter()
            .enumerate()
            .map(|(index, split)| {
                let dimension = split.dimension(data_source).ok_or_else(|| {
                    SplitbarError::DimensionNotFound {
                        expression: split.expression.clone(),
                    }
                })?;
                Ok(TileView {
                    key: split.to_key(),
                    title: dimension.title.clone(),
                    dimension: dimension.name.clone(),
                    kind: dimension.kind,
                    index,
                    x: geometry.tile_offset(index),
                    selected: selected == Some(dimension),
                })
            })
            .collect::<Result<Vec<_>, SplitbarError>>()?;

        let state = self.tracker.state();
        let position = state.position();
        let indicator = geometry
            .indicator_x(position)
            .map(|x| DragIndicatorView { position, x });

        let menu = match self.menu.state() {
            crate::menu::MenuState::Open {
                anchor,
                dimension,
                split,
            } => Some(MenuView {
                anchor: anchor.clone(),
                dimension: dimension.clone(),
                split: split.clone(),
                direction: MenuDirection::Down,
                container: self.menu_stage,
            }),
            crate::menu::MenuState::Closed => None,
        };

        self.rendered_anchors = tiles.iter().map(|t| t.dimension.clone()).collect();

        Ok(TileStripView {
            title: STRIP_TITLE,
            drag_over: state.is_hovering(),
            tiles,
            indicator,
            menu,
        })
    }
}
