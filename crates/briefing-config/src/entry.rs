use serde::{Deserialize, Serialize};

/// One field instance within a step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldEntry {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  /// Id of a catalog [`InputType`](crate::InputType). Empty until chosen.
  #[serde(default, rename = "inputId")]
  pub input_type_id: String,
  #[serde(default)]
  pub label: String,
  #[serde(default)]
  pub helper: String,
  /// Presentation hint passed through to the renderer.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub classes: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub conditions: Vec<Condition>,
}

/// A visibility rule attached to a field.
///
/// The target step is referenced by position value, never by a live reference.
/// Conditions are carried through storage but not evaluated by the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  /// Id of a catalog [`ConditionType`](crate::ConditionType). Empty until chosen.
  #[serde(default, rename = "conditionId")]
  pub condition_type_id: String,
  #[serde(default, rename = "stepPosition", skip_serializing_if = "Option::is_none")]
  pub target_step_position: Option<u32>,
  #[serde(default)]
  pub value: String,
}
