use serde::{Deserialize, Serialize};

use crate::entry::FieldEntry;

/// One page of the briefing.
///
/// `position` is the step's logical identity: it orders the steps and is what
/// conditions point at. It is unique within a definition and starts at 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  pub position: u32,
  #[serde(default)]
  pub title: String,
  /// Older payloads call this `subtitle`.
  #[serde(default, alias = "subtitle")]
  pub description: String,
  #[serde(default)]
  pub inputs: Vec<FieldEntry>,
}

impl Step {
  /// Create an empty step at the given position.
  pub fn new(position: u32) -> Self {
    Self {
      id: None,
      position,
      title: String::new(),
      description: String::new(),
      inputs: Vec::new(),
    }
  }

  /// Title to show in a stepper, falling back to the position.
  pub fn label(&self) -> String {
    if self.title.is_empty() {
      format!("Step {}", self.position)
    } else {
      self.title.clone()
    }
  }
}
