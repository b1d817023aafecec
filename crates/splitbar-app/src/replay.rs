// Headless replay: drives a SplitTile through a scripted sequence of host
// events and reports what the strip ended up showing.

use std::path::Path;

use serde::{Deserialize, Serialize};
use splitbar_core::{
    Clicker, DataSource, DimensionCatalog, Essence, Rect, SplitCombine, SplitbarError, Splits,
    VisStrategy,
};
use splitbar_input::{write_dimension_payload, DataTransfer, DragResponse, SessionMode};
use splitbar_layout::StripGeometry;

use crate::split_tile::SplitTile;
use crate::view::TileStripView;

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("scenario references unknown dimension `{0}`")]
    UnknownDimension(String),
    #[error(transparent)]
    Strip(#[from] SplitbarError),
}

// ──────────────────────────────────────────────
// Scenario format
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub data_source: DataSource,
    /// Dimension names of the initial splits, in order.
    #[serde(default)]
    pub splits: Vec<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    /// Left edge of the tile container in client coordinates.
    #[serde(default)]
    pub strip_left: f32,
    #[serde(default)]
    pub events: Vec<ReplayEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayEvent {
    /// Pick up the tile at `index`.
    DragTile { index: usize },
    /// Pick up a dimension from outside the strip.
    DragDimension { name: String },
    Enter { x: f32 },
    Over { x: f32 },
    Leave,
    Drop { x: f32 },
    /// `dragend` without a drop.
    Cancel,
    Click { index: usize },
    Remove { index: usize },
    MenuRequest { dimension: String },
    Render,
}

pub fn load_scenario(path: &Path) -> Result<Scenario, ReplayError> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

// ──────────────────────────────────────────────
// In-memory clicker
// ──────────────────────────────────────────────

/// Applies mutations straight to an essence, standing in for the
/// application's query model.
pub struct EssenceClicker {
    essence: Essence,
    pub last_strategy: Option<VisStrategy>,
}

impl EssenceClicker {
    pub fn new(essence: Essence) -> Self {
        Self {
            essence,
            last_strategy: None,
        }
    }

    pub fn essence(&self) -> &Essence {
        &self.essence
    }
}

impl Clicker for EssenceClicker {
    fn remove_split(&mut self, split: &SplitCombine, strategy: VisStrategy) {
        self.essence = self.essence.remove_split(split);
        self.last_strategy = Some(strategy);
    }

    fn change_split(&mut self, split: SplitCombine, strategy: VisStrategy) {
        self.essence = self.essence.change_split(split);
        self.last_strategy = Some(strategy);
    }

    fn change_splits(&mut self, splits: Splits, strategy: VisStrategy) {
        self.essence = self.essence.change_splits(splits);
        self.last_strategy = Some(strategy);
    }
}

// ──────────────────────────────────────────────
// Runner
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub event: ReplayEvent,
    pub accepted: bool,
    pub prevent_default: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<StepRecord>,
    pub splits: Splits,
    pub view: TileStripView,
}

fn build_essence(scenario: &Scenario, base_url: &str) -> Result<Essence, ReplayError> {
    let splits = scenario
        .splits
        .iter()
        .map(|name| {
            scenario
                .data_source
                .get_dimension(name)
                .map(|d| SplitCombine::from_expression(d.expression.clone()))
                .ok_or_else(|| ReplayError::UnknownDimension(name.clone()))
        })
        .collect::<Result<Splits, ReplayError>>()?;
    Ok(Essence::new(
        scenario.data_source.clone(),
        splits,
        scenario.base_url.as_deref().unwrap_or(base_url),
    ))
}

fn record(event: &ReplayEvent, response: &DragResponse) -> StepRecord {
    StepRecord {
        event: event.clone(),
        accepted: response.accepted,
        prevent_default: response.prevent_default,
    }
}

pub fn run_scenario(
    scenario: &Scenario,
    geometry: StripGeometry,
    base_url: &str,
) -> Result<ReplayReport, ReplayError> {
    let essence = build_essence(scenario, base_url)?;
    let mut clicker = EssenceClicker::new(essence.clone());
    let mut tile = SplitTile::new(essence, geometry, Rect::default());
    tile.set_strip_rect(Rect::new(scenario.strip_left, 0.0, 0.0, 0.0));
    tile.render()?;

    let mut session: Option<DataTransfer> = None;
    let mut steps = Vec::with_capacity(scenario.events.len());

    for event in &scenario.events {
        let step = match event {
            ReplayEvent::DragTile { index } => {
                let mut fresh = DataTransfer::new();
                let started = tile.drag_start(*index, &mut fresh)?;
                fresh.set_mode(SessionMode::Protected);
                session = Some(fresh);
                StepRecord {
                    event: event.clone(),
                    accepted: started,
                    prevent_default: false,
                }
            }
            ReplayEvent::DragDimension { name } => {
                let dimension = scenario
                    .data_source
                    .get_dimension(name)
                    .ok_or_else(|| ReplayError::UnknownDimension(name.clone()))?;
                let sole = SplitCombine::from_expression(dimension.expression.clone());
                let url = tile.essence().change_split(sole).url()?;
                let mut fresh = DataTransfer::new();
                write_dimension_payload(&mut fresh, dimension, &url)?;
                fresh.set_mode(SessionMode::Protected);
                session = Some(fresh);
                StepRecord {
                    event: event.clone(),
                    accepted: true,
                    prevent_default: false,
                }
            }
            ReplayEvent::Enter { x } => {
                let current = session.get_or_insert_with(DataTransfer::new);
                record(event, &tile.drag_enter(*x, current))
            }
            ReplayEvent::Over { x } => {
                let current = session.get_or_insert_with(DataTransfer::new);
                record(event, &tile.drag_over(*x, current))
            }
            ReplayEvent::Leave => {
                let current = session.get_or_insert_with(DataTransfer::new);
                record(event, &tile.drag_leave(current))
            }
            ReplayEvent::Drop { x } => {
                let mut current = session.take().unwrap_or_default();
                current.set_mode(SessionMode::ReadOnly);
                let response = tile.drop(*x, &current, &mut clicker);
                tile.set_essence(clicker.essence().clone());
                record(event, &response)
            }
            ReplayEvent::Cancel => {
                session = None;
                tile.cancel_drag();
                StepRecord {
                    event: event.clone(),
                    accepted: true,
                    prevent_default: false,
                }
            }
            ReplayEvent::Click { index } => StepRecord {
                event: event.clone(),
                accepted: tile.click_tile(*index)?,
                prevent_default: false,
            },
            ReplayEvent::Remove { index } => {
                let removed = tile.remove_tile(*index, &mut clicker);
                tile.set_essence(clicker.essence().clone());
                StepRecord {
                    event: event.clone(),
                    accepted: removed,
                    prevent_default: false,
                }
            }
            ReplayEvent::MenuRequest { dimension } => {
                let dimension = scenario
                    .data_source
                    .get_dimension(dimension)
                    .ok_or_else(|| ReplayError::UnknownDimension(dimension.clone()))?;
                StepRecord {
                    event: event.clone(),
                    accepted: tile.split_menu_request(dimension),
                    prevent_default: false,
                }
            }
            ReplayEvent::Render => {
                tile.render()?;
                StepRecord {
                    event: event.clone(),
                    accepted: true,
                    prevent_default: false,
                }
            }
        };
        log::info!("{:?} -> accepted={}", step.event, step.accepted);
        steps.push(step);
    }

    let view = tile.render()?;
    Ok(ReplayReport {
        steps,
        splits: tile.essence().splits().clone(),
        view,
    })
}
