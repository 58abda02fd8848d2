use std::collections::HashSet;

use briefing_config::{CatalogData, Definition};
use tracing::warn;

use crate::error::ValidationError;
use crate::stage::Stage;

/// Validates designs against the catalog loaded for the session.
pub struct Validator<'a> {
  catalog: &'a CatalogData,
}

impl<'a> Validator<'a> {
  pub fn new(catalog: &'a CatalogData) -> Self {
    Self { catalog }
  }

  /// Check the fields a single stage collects.
  pub fn validate_stage(&self, stage: Stage, def: &Definition) -> Result<(), ValidationError> {
    match stage {
      Stage::Identity => self.validate_identity(def),
      Stage::BasicInfo => self.validate_basic_info(def),
      Stage::Design => self.validate_design(def),
    }
  }

  /// Run every stage check in order, then resolve all references.
  pub fn validate_submit(&self, def: &Definition) -> Result<(), ValidationError> {
    for stage in Stage::ALL {
      self.validate_stage(stage, def)?;
    }
    self.validate_references(def)
  }

  fn validate_identity(&self, def: &Definition) -> Result<(), ValidationError> {
    let author = def.author.trim();
    if author.is_empty() {
      return Err(ValidationError::new(
        Stage::Identity,
        "author",
        "an author email is required",
      ));
    }
    if !looks_like_email(author) {
      warn!(author = %author, "author does not look like an email address");
    }
    Ok(())
  }

  fn validate_basic_info(&self, def: &Definition) -> Result<(), ValidationError> {
    if def.title.trim().is_empty() {
      return Err(ValidationError::new(
        Stage::BasicInfo,
        "title",
        "a title is required",
      ));
    }
    Ok(())
  }

  /// At least one step, and at least one step holding a field.
  fn validate_design(&self, def: &Definition) -> Result<(), ValidationError> {
    if def.steps.is_empty() {
      return Err(ValidationError::new(
        Stage::Design,
        "steps",
        "add at least one step",
      ));
    }
    if def.steps.iter().all(|s| s.inputs.is_empty()) {
      return Err(ValidationError::new(
        Stage::Design,
        "steps",
        "add at least one field to a step",
      ));
    }
    Ok(())
  }

  /// Validate that step positions are usable and every reference resolves.
  fn validate_references(&self, def: &Definition) -> Result<(), ValidationError> {
    let mut positions = HashSet::new();
    for step in &def.steps {
      if step.position == 0 {
        return Err(ValidationError::new(
          Stage::Design,
          "steps",
          "step positions start at 1",
        ));
      }
      if !positions.insert(step.position) {
        return Err(ValidationError::new(
          Stage::Design,
          format!("steps.{}", step.position),
          format!("duplicate step position {}", step.position),
        ));
      }
    }

    for step in &def.steps {
      for (index, entry) in step.inputs.iter().enumerate() {
        let path = format!("steps.{}.inputs.{}", step.position, index);

        if entry.input_type_id.is_empty() {
          return Err(ValidationError::new(
            Stage::Design,
            format!("{path}.inputId"),
            "choose an input type",
          ));
        }
        if self.catalog.input_type(&entry.input_type_id).is_none() {
          return Err(ValidationError::new(
            Stage::Design,
            format!("{path}.inputId"),
            format!("unknown input type '{}'", entry.input_type_id),
          ));
        }

        for (c_index, condition) in entry.conditions.iter().enumerate() {
          let c_path = format!("{path}.conditions.{c_index}");

          if self
            .catalog
            .condition_type(&condition.condition_type_id)
            .is_none()
          {
            return Err(ValidationError::new(
              Stage::Design,
              format!("{c_path}.conditionId"),
              format!("unknown condition type '{}'", condition.condition_type_id),
            ));
          }
          match condition.target_step_position {
            None => {
              return Err(ValidationError::new(
                Stage::Design,
                format!("{c_path}.stepPosition"),
                "choose a target step",
              ));
            }
            Some(target) if !positions.contains(&target) => {
              return Err(ValidationError::new(
                Stage::Design,
                format!("{c_path}.stepPosition"),
                format!("no step at position {target}"),
              ));
            }
            Some(_) => {}
          }
        }
      }
    }

    Ok(())
  }
}

fn looks_like_email(value: &str) -> bool {
  match value.split_once('@') {
    Some((local, domain)) => !local.is_empty() && domain.contains('.'),
    None => false,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use briefing_config::{Condition, ConditionType, FieldEntry, InputType, Step};

  fn catalog() -> CatalogData {
    CatalogData::new(
      vec![InputType {
        id: "text".to_string(),
        name: "Text".to_string(),
        value_kind: "text".to_string(),
        ..Default::default()
      }],
      vec![ConditionType {
        id: "equals".to_string(),
        name: "Equals".to_string(),
      }],
    )
  }

  fn step_with_entry(position: u32, input: &str) -> Step {
    let mut step = Step::new(position);
    step.inputs.push(FieldEntry {
      input_type_id: input.to_string(),
      ..Default::default()
    });
    step
  }

  fn valid_definition() -> Definition {
    Definition {
      title: "Website redesign".to_string(),
      author: "ana@example.com".to_string(),
      steps: vec![step_with_entry(1, "text"), step_with_entry(2, "text")],
      ..Default::default()
    }
  }

  #[test]
  fn test_valid_definition_passes() {
    let catalog = catalog();
    assert_eq!(Validator::new(&catalog).validate_submit(&valid_definition()), Ok(()));
  }

  #[test]
  fn test_identity_requires_author() {
    let catalog = catalog();
    let def = Definition {
      author: "   ".to_string(),
      ..valid_definition()
    };
    let err = Validator::new(&catalog)
      .validate_stage(Stage::Identity, &def)
      .unwrap_err();
    assert_eq!(err.stage, Stage::Identity);
    assert_eq!(err.field, "author");
  }

  #[test]
  fn test_author_not_email_shaped_is_accepted() {
    let catalog = catalog();
    let def = Definition {
      author: "ana".to_string(),
      ..valid_definition()
    };
    assert!(Validator::new(&catalog).validate_stage(Stage::Identity, &def).is_ok());
  }

  #[test]
  fn test_basic_info_requires_title() {
    let catalog = catalog();
    let def = Definition {
      title: String::new(),
      ..valid_definition()
    };
    let err = Validator::new(&catalog).validate_submit(&def).unwrap_err();
    assert_eq!(err.stage, Stage::BasicInfo);
    assert_eq!(err.field, "title");
  }

  #[test]
  fn test_design_requires_a_field() {
    let catalog = catalog();
    let validator = Validator::new(&catalog);

    let empty = Definition {
      steps: vec![],
      ..valid_definition()
    };
    assert_eq!(
      validator.validate_stage(Stage::Design, &empty).unwrap_err().message,
      "add at least one step"
    );

    let no_fields = Definition {
      steps: vec![Step::new(1)],
      ..valid_definition()
    };
    assert_eq!(
      validator.validate_stage(Stage::Design, &no_fields).unwrap_err().message,
      "add at least one field to a step"
    );
  }

  #[test]
  fn test_unknown_input_type() {
    let catalog = catalog();
    let mut def = valid_definition();
    def.steps[1].inputs[0].input_type_id = "signature".to_string();

    let err = Validator::new(&catalog).validate_submit(&def).unwrap_err();
    assert_eq!(err.field, "steps.2.inputs.0.inputId");
    assert_eq!(err.message, "unknown input type 'signature'");
  }

  #[test]
  fn test_unset_input_type() {
    let catalog = catalog();
    let mut def = valid_definition();
    def.steps[0].inputs[0].input_type_id = String::new();

    let err = Validator::new(&catalog).validate_submit(&def).unwrap_err();
    assert_eq!(err.field, "steps.1.inputs.0.inputId");
  }

  #[test]
  fn test_condition_references() {
    let catalog = catalog();
    let validator = Validator::new(&catalog);
    let mut def = valid_definition();
    def.steps[1].inputs[0].conditions.push(Condition {
      condition_type_id: "equals".to_string(),
      target_step_position: Some(1),
      value: "yes".to_string(),
      ..Default::default()
    });
    assert_eq!(validator.validate_submit(&def), Ok(()));

    def.steps[1].inputs[0].conditions[0].target_step_position = Some(5);
    let err = validator.validate_submit(&def).unwrap_err();
    assert_eq!(err.field, "steps.2.inputs.0.conditions.0.stepPosition");
    assert_eq!(err.message, "no step at position 5");

    def.steps[1].inputs[0].conditions[0].target_step_position = None;
    let err = validator.validate_submit(&def).unwrap_err();
    assert_eq!(err.message, "choose a target step");

    def.steps[1].inputs[0].conditions[0].condition_type_id = "greater".to_string();
    let err = validator.validate_submit(&def).unwrap_err();
    assert_eq!(err.field, "steps.2.inputs.0.conditions.0.conditionId");
  }

  #[test]
  fn test_duplicate_positions() {
    let catalog = catalog();
    let def = Definition {
      steps: vec![step_with_entry(1, "text"), step_with_entry(1, "text")],
      ..valid_definition()
    };
    let err = Validator::new(&catalog).validate_submit(&def).unwrap_err();
    assert_eq!(err.message, "duplicate step position 1");
  }

  #[test]
  fn test_stage_order() {
    assert_eq!(Stage::from_index(1), Some(Stage::BasicInfo));
    assert_eq!(Stage::from_index(3), None);
    assert!(Stage::Design.is_last());
    assert!(!Stage::Identity.is_last());
    assert_eq!(Stage::BasicInfo.to_string(), "Basic info");
  }
}
