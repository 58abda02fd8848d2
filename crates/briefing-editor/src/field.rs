//! Field selectors.
//!
//! Each editable scalar of a step, field entry or condition is a variant
//! carrying its new value, so a setter can only ever touch a field that exists.

/// Editable fields of a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepField {
  Title(String),
  Description(String),
  /// Moves the step to a new position. Conditions pointing at the old
  /// position are not rewritten.
  Position(u32),
}

/// Editable fields of a field entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryField {
  InputType(String),
  Label(String),
  Helper(String),
  Classes(Option<String>),
}

/// Editable fields of a condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionField {
  ConditionType(String),
  TargetStep(Option<u32>),
  Value(String),
}
