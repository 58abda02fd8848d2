use thiserror::Error;

/// Unresolvable edit paths and position conflicts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
  #[error("step not found at position {position}")]
  StepNotFound { position: u32 },

  #[error("step {position} has no field at index {index}")]
  EntryOutOfRange { position: u32, index: usize },

  #[error("field {entry} of step {position} has no condition at index {index}")]
  ConditionOutOfRange {
    position: u32,
    entry: usize,
    index: usize,
  },

  #[error("a step already exists at position {position}")]
  DuplicatePosition { position: u32 },

  #[error("step positions start at 1")]
  InvalidPosition,

  #[error("no position left after the highest step")]
  PositionOverflow,
}
