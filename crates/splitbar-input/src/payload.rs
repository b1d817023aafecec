// Drag payload wire format.
//
// A tile drag writes several entries on one session:
//   split/<index>      JSON SplitCombine of the dragged tile
//   dimension/<name>   JSON Dimension behind it
//   text/url-list      URL of the view grouped by that split alone
//   text/plain         same URL
// Targets pick what they understand from the type tags alone; values are
// only read on drop.

use splitbar_core::{Dimension, SplitCombine, SplitbarError};

use crate::session::{DataTransfer, EffectAllowed};

pub const SPLIT_FAMILY: &str = "split";
pub const DIMENSION_FAMILY: &str = "dimension";
pub const URL_LIST_TYPE: &str = "text/url-list";
pub const TEXT_PLAIN_TYPE: &str = "text/plain";

/// Split a tag into `(family, suffix)` at the first `/`.
pub fn type_family(tag: &str) -> Option<(&str, &str)> {
    tag.split_once('/')
}

/// Suffixes of every tag belonging to `family`, in session order.
pub fn tag_suffixes<'a, I>(types: I, family: &'a str) -> impl Iterator<Item = &'a str> + 'a
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: 'a,
{
    types
        .into_iter()
        .filter_map(type_family)
        .filter(move |(f, _)| *f == family)
        .map(|(_, suffix)| suffix)
}

pub fn split_tag(index: usize) -> String {
    format!("{}/{}", SPLIT_FAMILY, index)
}

pub fn dimension_tag(name: &str) -> String {
    format!("{}/{}", DIMENSION_FAMILY, name)
}

/// Payload for dragging the tile at `index`.
pub fn write_split_payload(
    session: &mut DataTransfer,
    index: usize,
    split: &SplitCombine,
    dimension: &Dimension,
    url: &str,
) -> Result<(), SplitbarError> {
    let split_json = serde_json::to_string(split)?;
    let dimension_json = serde_json::to_string(dimension)?;

    session.effect_allowed = EffectAllowed::All;
    session.set_data(URL_LIST_TYPE, url);
    session.set_data(TEXT_PLAIN_TYPE, url);
    session.set_data(&split_tag(index), &split_json);
    session.set_data(&dimension_tag(&dimension.name), &dimension_json);
    session.set_drag_image_label(&dimension.title);
    Ok(())
}

/// Payload for dragging a dimension that has no tile yet (e.g. from the
/// dimension list).
pub fn write_dimension_payload(
    session: &mut DataTransfer,
    dimension: &Dimension,
    url: &str,
) -> Result<(), SplitbarError> {
    let dimension_json = serde_json::to_string(dimension)?;

    session.effect_allowed = EffectAllowed::All;
    session.set_data(URL_LIST_TYPE, url);
    session.set_data(TEXT_PLAIN_TYPE, url);
    session.set_data(&dimension_tag(&dimension.name), &dimension_json);
    session.set_drag_image_label(&dimension.title);
    Ok(())
}

/// Split body carried under the first `split/*` tag, if readable.
pub fn read_split_value(session: &DataTransfer) -> Result<Option<SplitCombine>, SplitbarError> {
    read_value(session, SPLIT_FAMILY)
}

/// Dimension body carried under the first `dimension/*` tag, if readable.
pub fn read_dimension_value(session: &DataTransfer) -> Result<Option<Dimension>, SplitbarError> {
    read_value(session, DIMENSION_FAMILY)
}

fn read_value<T: serde::de::DeserializeOwned>(
    session: &DataTransfer,
    family: &str,
) -> Result<Option<T>, SplitbarError> {
    let tag = match session
        .types()
        .find(|tag| type_family(tag).is_some_and(|(f, _)| f == family))
    {
        Some(tag) => tag,
        None => return Ok(None),
    };
    match session.get_data(tag) {
        Some(json) => Ok(Some(serde_json::from_str(json)?)),
        None => Ok(None),
    }
}
