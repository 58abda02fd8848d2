use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::step::Step;

/// A form design: identity, basic info and the ordered steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
  /// Assigned by storage on first save.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub description: String,
  /// Author email.
  #[serde(default)]
  pub author: String,
  #[serde(default)]
  pub steps: Vec<Step>,
  /// Creation timestamp, set by storage.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created: Option<DateTime<Utc>>,
}

impl Definition {
  /// Get a step by its position.
  pub fn step(&self, position: u32) -> Option<&Step> {
    self.steps.iter().find(|s| s.position == position)
  }

  /// Sort steps ascending by position. Storage order is not guaranteed.
  pub fn sort_steps(&mut self) {
    self.steps.sort_by_key(|s| s.position);
  }
}
