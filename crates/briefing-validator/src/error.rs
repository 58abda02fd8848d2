use thiserror::Error;

use crate::stage::Stage;

/// A failed check, reported against the stage and field that caused it.
///
/// Validation never modifies the design, so entered data survives the error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
  pub stage: Stage,
  /// Dotted path of the offending field, e.g. `steps.2.inputs.0.inputId`.
  pub field: String,
  pub message: String,
}

impl ValidationError {
  pub fn new(stage: Stage, field: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      stage,
      field: field.into(),
      message: message.into(),
    }
  }
}
