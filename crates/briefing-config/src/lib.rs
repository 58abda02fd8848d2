//! Briefing Config
//!
//! This crate contains the serializable types shared by the designer and the
//! renderer. A [`Definition`] is the saved, shareable form design: an ordered
//! list of [`Step`]s, each holding [`FieldEntry`]s that reference catalog
//! input types and optionally carry visibility [`Condition`]s.
//!
//! Definitions travel as JSON:
//! - posted once by the designer when the wizard completes
//! - fetched by id when a briefing is rendered
//!
//! The catalog types ([`InputType`], [`ConditionType`]) are read-only reference
//! data loaded once per session and bundled into [`CatalogData`].

mod catalog;
mod definition;
mod entry;
mod step;

pub use catalog::{CatalogData, ConditionType, InputType};
pub use definition::Definition;
pub use entry::{Condition, FieldEntry};
pub use step::Step;
