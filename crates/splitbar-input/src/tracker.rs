use splitbar_core::{DragPosition, SplitCombine, Splits};
use splitbar_layout::{calculate_drag_position, StripGeometry};

use crate::decoder::{DropContext, PayloadDecoder};
use crate::session::{DataTransfer, DropEffect};

// ──────────────────────────────────────────────
// State
// ──────────────────────────────────────────────

/// Hover state of the strip during a drag.
///
/// Platforms fire enter/leave for every descendant the pointer crosses, so
/// `nesting` counts enters seen since the strip itself was entered. Only a
/// leave at nesting 0 really leaves the strip. The counter lives in
/// `Hovering` and is discarded with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Hovering { position: DragPosition, nesting: u32 },
}

impl DragState {
    pub fn is_hovering(&self) -> bool {
        matches!(self, DragState::Hovering { .. })
    }

    pub fn position(&self) -> DragPosition {
        match *self {
            DragState::Hovering { position, .. } => position,
            DragState::Idle => DragPosition::None,
        }
    }

    pub fn nesting(&self) -> u32 {
        match *self {
            DragState::Hovering { nesting, .. } => nesting,
            DragState::Idle => 0,
        }
    }
}

// ──────────────────────────────────────────────
// Output
// ──────────────────────────────────────────────

/// Mutation a drop asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum DropAction {
    Insert { index: usize, split: SplitCombine },
    Replace { index: usize, split: SplitCombine },
}

impl DropAction {
    /// The sequence after this drop.
    pub fn apply(&self, splits: &Splits) -> Splits {
        match self {
            DropAction::Insert { index, split } => splits.insert_by_index(*index, split.clone()),
            DropAction::Replace { index, split } => splits.replace_by_index(*index, split.clone()),
        }
    }
}

/// What the host should do with the platform event after a handler ran.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DragResponse {
    /// The payload passed the gate and the event was processed.
    pub accepted: bool,
    /// Suppress the platform's default handling.
    pub prevent_default: bool,
    pub drop_effect: Option<DropEffect>,
    pub action: Option<DropAction>,
}

impl DragResponse {
    fn ignored() -> Self {
        Self::default()
    }

    fn accepted() -> Self {
        Self {
            accepted: true,
            ..Self::default()
        }
    }
}

// ──────────────────────────────────────────────
// Tracker
// ──────────────────────────────────────────────

/// Drag state machine for one strip. Driven by the four drag lifecycle
/// events; every handler first checks the payload gate and ignores sessions
/// it cannot decode.
#[derive(Debug, Clone)]
pub struct DragTracker {
    state: DragState,
    geometry: StripGeometry,
    decoder: PayloadDecoder,
}

impl DragTracker {
    pub fn new(geometry: StripGeometry) -> Self {
        Self::with_decoder(geometry, PayloadDecoder::default())
    }

    pub fn with_decoder(geometry: StripGeometry, decoder: PayloadDecoder) -> Self {
        Self {
            state: DragState::Idle,
            geometry,
            decoder,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn geometry(&self) -> &StripGeometry {
        &self.geometry
    }

    fn can_accept(&self, session: &DataTransfer) -> bool {
        self.decoder.can_accept(session.types())
    }

    fn position_at(&self, offset_x: f32, item_count: usize) -> DragPosition {
        calculate_drag_position(offset_x, item_count, &self.geometry)
    }

    pub fn drag_enter(
        &mut self,
        session: &DataTransfer,
        offset_x: f32,
        item_count: usize,
    ) -> DragResponse {
        if !self.can_accept(session) {
            log::trace!("drag enter ignored: no droppable payload");
            return DragResponse::ignored();
        }
        match self.state {
            DragState::Idle => {
                let position = self.position_at(offset_x, item_count);
                log::debug!("drag enter: idle -> hovering at {:?}", position);
                self.state = DragState::Hovering {
                    position,
                    nesting: 0,
                };
            }
            DragState::Hovering {
                position,
                nesting,
            } => {
                self.state = DragState::Hovering {
                    position,
                    nesting: nesting + 1,
                };
            }
        }
        DragResponse::accepted()
    }

    /// Marks the drop as a move and tracks the pointer. Only `drag_enter`
    /// starts hovering; an over event while idle leaves the state alone.
    pub fn drag_over(
        &mut self,
        session: &mut DataTransfer,
        offset_x: f32,
        item_count: usize,
    ) -> DragResponse {
        if !self.can_accept(session) {
            return DragResponse::ignored();
        }
        session.drop_effect = DropEffect::Move;
        if let DragState::Hovering { nesting, .. } = self.state {
            let position = self.position_at(offset_x, item_count);
            log::trace!("drag over at {} -> {:?}", offset_x, position);
            self.state = DragState::Hovering { position, nesting };
        }

        DragResponse {
            accepted: true,
            prevent_default: true,
            drop_effect: Some(DropEffect::Move),
            action: None,
        }
    }

    pub fn drag_leave(&mut self, session: &DataTransfer) -> DragResponse {
        if !self.can_accept(session) {
            return DragResponse::ignored();
        }
        match self.state {
            DragState::Idle => {}
            DragState::Hovering { nesting: 0, .. } => {
                log::debug!("drag leave: hovering -> idle");
                self.state = DragState::Idle;
            }
            DragState::Hovering { position, nesting } => {
                self.state = DragState::Hovering {
                    position,
                    nesting: nesting - 1,
                };
            }
        }
        DragResponse::accepted()
    }

    /// Resolve the dropped entity and the target under the pointer. Returns
    /// to idle whether or not anything resolved.
    pub fn drop_payload(
        &mut self,
        session: &DataTransfer,
        offset_x: f32,
        context: &DropContext<'_>,
    ) -> DragResponse {
        if !self.can_accept(session) {
            return DragResponse::ignored();
        }

        let action = self.decoder.decode(session, context).and_then(|entity| {
            let split = entity.into_split();
            match self.position_at(offset_x, context.splits.len()) {
                DragPosition::Replace(index) => Some(DropAction::Replace { index, split }),
                DragPosition::Insert(index) => Some(DropAction::Insert { index, split }),
                DragPosition::None => None,
            }
        });
        match &action {
            Some(action) => log::debug!("drop: {:?}", action),
            None => log::debug!("drop: nothing to commit"),
        }

        self.state = DragState::Idle;
        DragResponse {
            accepted: true,
            prevent_default: true,
            drop_effect: None,
            action,
        }
    }

    /// The gesture ended without a drop on this strip.
    pub fn cancel(&mut self) {
        if self.state.is_hovering() {
            log::debug!("drag cancelled: hovering -> idle");
        }
        self.state = DragState::Idle;
    }
}
