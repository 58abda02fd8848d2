use serde::{Deserialize, Serialize};

/// An available input type (text, email, date, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputType {
  #[serde(default)]
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub icon: String,
  #[serde(default)]
  pub description: String,
  /// The kind of value the input produces, e.g. "text" or "email".
  #[serde(default, rename = "value")]
  pub value_kind: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub premium: Option<bool>,
}

/// An available condition type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionType {
  #[serde(default)]
  pub id: String,
  pub name: String,
}

/// Catalog reference data, loaded once per session and never refreshed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogData {
  pub input_types: Vec<InputType>,
  pub condition_types: Vec<ConditionType>,
}

impl CatalogData {
  pub fn new(input_types: Vec<InputType>, condition_types: Vec<ConditionType>) -> Self {
    Self {
      input_types,
      condition_types,
    }
  }

  /// Look up an input type by id.
  pub fn input_type(&self, id: &str) -> Option<&InputType> {
    self.input_types.iter().find(|t| t.id == id)
  }

  /// Look up a condition type by id.
  pub fn condition_type(&self, id: &str) -> Option<&ConditionType> {
    self.condition_types.iter().find(|t| t.id == id)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_input_type_value_kind() {
    let input: InputType = serde_json::from_value(json!({
      "id": "email",
      "name": "Email",
      "icon": "mail",
      "value": "email",
      "premium": false
    }))
    .unwrap();
    assert_eq!(input.value_kind, "email");
    assert_eq!(input.premium, Some(false));
  }

  #[test]
  fn test_lookup() {
    let catalog = CatalogData::new(
      vec![InputType {
        id: "text".to_string(),
        name: "Text".to_string(),
        ..Default::default()
      }],
      vec![ConditionType {
        id: "equals".to_string(),
        name: "Equals".to_string(),
      }],
    );
    assert!(catalog.input_type("text").is_some());
    assert!(catalog.input_type("email").is_none());
    assert_eq!(catalog.condition_type("equals").unwrap().name, "Equals");
  }
}
