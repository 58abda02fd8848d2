//! Briefing Editor
//!
//! This crate holds the in-progress step tree of a briefing design and the
//! point mutations the designer issues against it.
//!
//! Key differences from a plain `Vec<Step>`:
//! - Steps are keyed by `position`, never by array index
//! - The collection is always sorted ascending by position
//! - Edits go through typed field selectors instead of string keys
//! - A mutation either applies completely or fails and leaves the tree untouched

mod error;
mod field;
mod tree;

pub use error::EditError;
pub use field::{ConditionField, EntryField, StepField};
pub use tree::StepTree;
