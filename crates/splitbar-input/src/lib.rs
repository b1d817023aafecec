// Drag input for the split strip: the session carrier, the payload wire
// format, the decoder that resolves a drop, and the hover state machine.

mod decoder;
mod payload;
mod session;
mod tracker;

pub use decoder::{
    decode_existing_split, decode_foreign_dimension, DecodeFn, DecodeRule, DropContext,
    DroppedEntity, PayloadDecoder, RuleOutcome,
};
pub use payload::{
    dimension_tag, read_dimension_value, read_split_value, split_tag, tag_suffixes, type_family,
    write_dimension_payload, write_split_payload, DIMENSION_FAMILY, SPLIT_FAMILY,
    TEXT_PLAIN_TYPE, URL_LIST_TYPE,
};
pub use session::{DataTransfer, DropEffect, EffectAllowed, SessionMode};
pub use tracker::{DragResponse, DragState, DragTracker, DropAction};
