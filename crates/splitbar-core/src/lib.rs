// Core value objects and traits shared by the splitbar crates.
// Nothing in here knows about drag sessions or rendering; it models the
// query state the tile strip reads and the entry points it mutates through.


use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Geometry
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

// ──────────────────────────────────────────────
// Drag position
// ──────────────────────────────────────────────

/// Discrete drop target inside the strip.
///
/// `Insert(i)` places a new tile before the tile currently at `i` (or at the
/// end when `i == len`). `Replace(i)` substitutes the tile at `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "index")]
pub enum DragPosition {
    Insert(usize),
    Replace(usize),
    #[default]
    None,
}

impl DragPosition {
    pub fn insert_index(&self) -> Option<usize> {
        match *self {
            DragPosition::Insert(i) => Some(i),
            _ => None,
        }
    }

    pub fn replace_index(&self) -> Option<usize> {
        match *self {
            DragPosition::Replace(i) => Some(i),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, DragPosition::None)
    }
}

// ──────────────────────────────────────────────
// Visualization strategy
// ──────────────────────────────────────────────

/// Re-layout hint handed to the [`Clicker`] together with every mutation.
/// The strip never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisStrategy {
    FairGame,
    UnfairGame,
    KeepAlways,
}

// ──────────────────────────────────────────────
// Dimensions
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionKind {
    #[default]
    String,
    Time,
    Number,
    Boolean,
}

impl DimensionKind {
    pub fn class_name(&self) -> &'static str {
        match self {
            DimensionKind::String => "string",
            DimensionKind::Time => "time",
            DimensionKind::Number => "number",
            DimensionKind::Boolean => "boolean",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub title: String,
    pub expression: String,
    #[serde(default)]
    pub kind: DimensionKind,
}

impl Dimension {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        expression: impl Into<String>,
        kind: DimensionKind,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            expression: expression.into(),
            kind,
        }
    }
}

/// Lookup of dimensions by name.
pub trait DimensionCatalog {
    fn get_dimension(&self, name: &str) -> Option<&Dimension>;
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataSource {
    pub name: String,
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
}

impl DataSource {
    pub fn new(name: impl Into<String>, dimensions: Vec<Dimension>) -> Self {
        Self {
            name: name.into(),
            dimensions,
        }
    }

    pub fn find_dimension_by_expression(&self, expression: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.expression == expression)
    }
}

impl DimensionCatalog for DataSource {
    fn get_dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name == name)
    }
}

// ──────────────────────────────────────────────
// Splits
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortAction {
    pub expression: String,
    pub direction: SortDirection,
}

/// One grouping clause of the query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SplitCombine {
    pub expression: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl SplitCombine {
    /// A bare split on `expression` with no sort or limit.
    pub fn from_expression(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            sort: None,
            limit: None,
        }
    }

    pub fn with_sort(mut self, expression: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(SortAction {
            expression: expression.into(),
            direction,
        });
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Stable per-grouping key, used as the tile key.
    pub fn to_key(&self) -> String {
        self.expression.clone()
    }

    pub fn dimension<'a>(&self, data_source: &'a DataSource) -> Option<&'a Dimension> {
        data_source.find_dimension_by_expression(&self.expression)
    }

    pub fn title(&self, data_source: &DataSource) -> Option<String> {
        self.dimension(data_source).map(|d| d.title.clone())
    }
}

/// Authoritative ordered list of active splits. Every mutation returns a new
/// sequence; the original is never touched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Splits {
    split_combines: Vec<SplitCombine>,
}

impl Splits {
    pub fn new(split_combines: Vec<SplitCombine>) -> Self {
        Self { split_combines }
    }

    pub fn from_split_combine(split: SplitCombine) -> Self {
        Self {
            split_combines: vec![split],
        }
    }

    pub fn len(&self) -> usize {
        self.split_combines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.split_combines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SplitCombine> {
        self.split_combines.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SplitCombine> {
        self.split_combines.iter()
    }

    /// Substitute the split at `index`.
    ///
    /// `index == len` behaves like an insert at the end. If `replace` already
    /// sits elsewhere in the sequence the two entries trade places, so a
    /// reorder never leaves a duplicate behind.
    pub fn replace_by_index(&self, index: usize, replace: SplitCombine) -> Splits {
        let len = self.len();
        if index == len {
            return self.insert_by_index(index, replace);
        }
        if index > len {
            return self.clone();
        }

        let mut split_combines = self.split_combines.clone();
        let replaced = split_combines[index].clone();
        if let Some(existing) = split_combines.iter().position(|s| *s == replace) {
            split_combines[existing] = replaced;
        }
        split_combines[index] = replace;
        Splits { split_combines }
    }

    /// Insert `insert` before the split at `index` (clamped to `len`),
    /// dropping any other copy of it.
    pub fn insert_by_index(&self, index: usize, insert: SplitCombine) -> Splits {
        let index = index.min(self.len());
        let mut spliced = self.split_combines.clone();
        spliced.insert(index, insert.clone());
        let split_combines = spliced
            .into_iter()
            .enumerate()
            .filter(|(i, split)| *i == index || *split != insert)
            .map(|(_, split)| split)
            .collect();
        Splits { split_combines }
    }

    pub fn remove(&self, split: &SplitCombine) -> Splits {
        Splits {
            split_combines: self
                .split_combines
                .iter()
                .filter(|s| *s != split)
                .cloned()
                .collect(),
        }
    }

    pub fn find_split_for_dimension(&self, dimension: &Dimension) -> Option<&SplitCombine> {
        self.split_combines
            .iter()
            .find(|s| s.expression == dimension.expression)
    }
}

impl FromIterator<SplitCombine> for Splits {
    fn from_iter<I: IntoIterator<Item = SplitCombine>>(iter: I) -> Self {
        Splits::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Splits {
    type Item = &'a SplitCombine;
    type IntoIter = std::slice::Iter<'a, SplitCombine>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ──────────────────────────────────────────────
// Essence
// ──────────────────────────────────────────────

/// Serialized view state carried in the fragment of a shareable URL.
#[derive(Serialize)]
struct ViewHash<'a> {
    data_source: &'a str,
    splits: &'a Splits,
}

/// Snapshot of the view the strip belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Essence {
    data_source: DataSource,
    splits: Splits,
    base_url: String,
}

impl Essence {
    pub fn new(data_source: DataSource, splits: Splits, base_url: impl Into<String>) -> Self {
        Self {
            data_source,
            splits,
            base_url: base_url.into(),
        }
    }

    pub fn data_source(&self) -> &DataSource {
        &self.data_source
    }

    pub fn splits(&self) -> &Splits {
        &self.splits
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn change_splits(&self, splits: Splits) -> Essence {
        Essence {
            splits,
            ..self.clone()
        }
    }

    /// The same view grouped by `split` alone.
    pub fn change_split(&self, split: SplitCombine) -> Essence {
        self.change_splits(Splits::from_split_combine(split))
    }

    pub fn remove_split(&self, split: &SplitCombine) -> Essence {
        self.change_splits(self.splits.remove(split))
    }

    /// Shareable URL: the base URL with the view state as a percent-encoded
    /// JSON fragment.
    pub fn url(&self) -> Result<String, SplitbarError> {
        let hash = serde_json::to_string(&ViewHash {
            data_source: &self.data_source.name,
            splits: &self.splits,
        })?;
        let mut url = url::Url::parse(&self.base_url)?;
        url.set_fragment(Some(&hash));
        Ok(url.into())
    }
}

// ──────────────────────────────────────────────
// Trait: Clicker
// ──────────────────────────────────────────────

/// Mutation entry point owned by the application. The strip only computes
/// what the new state should be and hands it over.
pub trait Clicker {
    fn remove_split(&mut self, split: &SplitCombine, strategy: VisStrategy);
    fn change_split(&mut self, split: SplitCombine, strategy: VisStrategy);
    fn change_splits(&mut self, splits: Splits, strategy: VisStrategy);
}

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum SplitbarError {
    /// A split references a dimension that is not in the catalog.
    #[error("no dimension found for split `{expression}`")]
    DimensionNotFound { expression: String },
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("payload serialization failed: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("invalid strip geometry: {0}")]
    InvalidGeometry(String),
}
