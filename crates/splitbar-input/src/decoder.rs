// Drag session decoder: turns the type tags on a session into the split a
// drop would commit.

use splitbar_core::{DimensionCatalog, SplitCombine, Splits};

use crate::payload::{tag_suffixes, type_family, DIMENSION_FAMILY, SPLIT_FAMILY};
use crate::session::DataTransfer;

/// What a drop resolves against: the current sequence and the catalog.
pub struct DropContext<'a> {
    pub splits: &'a Splits,
    pub catalog: &'a dyn DimensionCatalog,
}

/// The entity a drop carries into the strip.
#[derive(Debug, Clone, PartialEq)]
pub enum DroppedEntity {
    /// A tile already in the sequence, picked up at `index`.
    ExistingSplit { index: usize, split: SplitCombine },
    /// A dimension dragged in from elsewhere, as a fresh split.
    ForeignDimension { name: String, split: SplitCombine },
}

impl DroppedEntity {
    pub fn split(&self) -> &SplitCombine {
        match self {
            DroppedEntity::ExistingSplit { split, .. } => split,
            DroppedEntity::ForeignDimension { split, .. } => split,
        }
    }

    pub fn into_split(self) -> SplitCombine {
        match self {
            DroppedEntity::ExistingSplit { split, .. } => split,
            DroppedEntity::ForeignDimension { split, .. } => split,
        }
    }
}

/// Result of running one rule against its tag suffix.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    /// The suffix is not meaningful to this rule; try the next one.
    Pass,
    /// The rule owns this session. Its answer is final, even when empty.
    Claimed(Option<DroppedEntity>),
}

pub type DecodeFn = fn(&str, &DropContext<'_>) -> RuleOutcome;

/// One droppable kind: a tag family and how to decode its suffix.
#[derive(Clone, Copy)]
pub struct DecodeRule {
    pub family: &'static str,
    pub decode: DecodeFn,
}

impl std::fmt::Debug for DecodeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodeRule")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

/// Ordered rule list, tried first to last.
#[derive(Debug, Clone)]
pub struct PayloadDecoder {
    rules: Vec<DecodeRule>,
}

impl PayloadDecoder {
    pub fn new(rules: Vec<DecodeRule>) -> Self {
        Self { rules }
    }

    /// Append a rule with the lowest priority.
    pub fn with_rule(mut self, rule: DecodeRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[DecodeRule] {
        &self.rules
    }

    /// Cheap hover-time gate: does any tag belong to a family we decode?
    pub fn can_accept<'a, I>(&self, types: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        types.into_iter().filter_map(type_family).any(|(family, _)| {
            self.rules.iter().any(|rule| rule.family == family)
        })
    }

    /// Rules run in priority order; within a rule every tag of its family is
    /// tried in session order until one claims the drop.
    pub fn decode(&self, session: &DataTransfer, context: &DropContext<'_>) -> Option<DroppedEntity> {
        for rule in &self.rules {
            for suffix in tag_suffixes(session.types(), rule.family) {
                if let RuleOutcome::Claimed(entity) = (rule.decode)(suffix, context) {
                    return entity;
                }
            }
        }
        None
    }
}

impl Default for PayloadDecoder {
    /// Existing splits first, then foreign dimensions.
    fn default() -> Self {
        Self::new(vec![
            DecodeRule {
                family: SPLIT_FAMILY,
                decode: decode_existing_split,
            },
            DecodeRule {
                family: DIMENSION_FAMILY,
                decode: decode_foreign_dimension,
            },
        ])
    }
}

/// `split/<index>`: the tile at that index of the current sequence.
/// A parsed index claims the session even when it is out of range.
pub fn decode_existing_split(suffix: &str, context: &DropContext<'_>) -> RuleOutcome {
    match suffix.parse::<usize>() {
        Ok(index) => RuleOutcome::Claimed(context.splits.get(index).map(|split| {
            DroppedEntity::ExistingSplit {
                index,
                split: split.clone(),
            }
        })),
        Err(_) => RuleOutcome::Pass,
    }
}

/// `dimension/<name>`: a new split on the catalog dimension's expression.
pub fn decode_foreign_dimension(suffix: &str, context: &DropContext<'_>) -> RuleOutcome {
    if suffix.is_empty() {
        return RuleOutcome::Pass;
    }
    RuleOutcome::Claimed(context.catalog.get_dimension(suffix).map(|dimension| {
        DroppedEntity::ForeignDimension {
            name: dimension.name.clone(),
            split: SplitCombine::from_expression(dimension.expression.clone()),
        }
    }))
}
