//! Attribute schema: which attributes exist and how their values compare.
//!
//! The schema is a flat lookup table of declarative attribute records.
//! Adding a new attribute means registering its domain kind and label;
//! nothing downstream changes.

mod attribute;
mod value;

pub use attribute::{AttributeDef, AttributeId, AttributeKind, Schema};
pub use value::{normalize_text, AttrValue};
