use std::collections::BTreeMap;

use briefing_config::{Condition, FieldEntry, Step};

use crate::error::EditError;
use crate::field::{ConditionField, EntryField, StepField};

/// Ordered collection of steps keyed by position.
///
/// The map key always equals the stored step's `position`, so iteration order
/// is ascending position order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepTree {
  steps: BTreeMap<u32, Step>,
}

impl StepTree {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  /// Get a step by position.
  pub fn step(&self, position: u32) -> Option<&Step> {
    self.steps.get(&position)
  }

  /// Iterate steps in ascending position order.
  pub fn steps(&self) -> impl Iterator<Item = &Step> {
    self.steps.values()
  }

  pub fn positions(&self) -> Vec<u32> {
    self.steps.keys().copied().collect()
  }

  /// Clone the steps out in position order.
  pub fn to_steps(&self) -> Vec<Step> {
    self.steps.values().cloned().collect()
  }

  /// Append an empty step after the highest position and return its position.
  ///
  /// Fails only when the highest position is already `u32::MAX`.
  pub fn add_step(&mut self) -> Result<u32, EditError> {
    let position = match self.steps.last_key_value() {
      Some((last, _)) => last.checked_add(1).ok_or(EditError::PositionOverflow)?,
      None => 1,
    };
    self.steps.insert(position, Step::new(position));
    Ok(position)
  }

  /// Append an empty field entry to a step and return its index.
  pub fn add_field_entry(&mut self, position: u32) -> Result<usize, EditError> {
    let step = self.step_mut(position)?;
    step.inputs.push(FieldEntry::default());
    Ok(step.inputs.len() - 1)
  }

  /// Remove a field entry, returning it.
  pub fn remove_entry(&mut self, position: u32, index: usize) -> Result<FieldEntry, EditError> {
    let step = self.step_mut(position)?;
    if index >= step.inputs.len() {
      return Err(EditError::EntryOutOfRange { position, index });
    }
    Ok(step.inputs.remove(index))
  }

  /// Append an empty condition to a field entry and return its index.
  pub fn add_condition(&mut self, position: u32, entry: usize) -> Result<usize, EditError> {
    let field = self.entry_mut(position, entry)?;
    field.conditions.push(Condition::default());
    Ok(field.conditions.len() - 1)
  }

  /// Remove a condition from a field entry, returning it.
  pub fn remove_condition(
    &mut self,
    position: u32,
    entry: usize,
    index: usize,
  ) -> Result<Condition, EditError> {
    let field = self.entry_mut(position, entry)?;
    if index >= field.conditions.len() {
      return Err(EditError::ConditionOutOfRange {
        position,
        entry,
        index,
      });
    }
    Ok(field.conditions.remove(index))
  }

  /// Replace one field of a step.
  pub fn set_step_field(&mut self, position: u32, field: StepField) -> Result<(), EditError> {
    match field {
      StepField::Title(title) => self.step_mut(position)?.title = title,
      StepField::Description(description) => self.step_mut(position)?.description = description,
      StepField::Position(target) => self.move_step(position, target)?,
    }
    Ok(())
  }

  /// Replace one field of a field entry.
  pub fn set_entry_field(
    &mut self,
    position: u32,
    entry: usize,
    field: EntryField,
  ) -> Result<(), EditError> {
    let target = self.entry_mut(position, entry)?;
    match field {
      EntryField::InputType(id) => target.input_type_id = id,
      EntryField::Label(label) => target.label = label,
      EntryField::Helper(helper) => target.helper = helper,
      EntryField::Classes(classes) => target.classes = classes,
    }
    Ok(())
  }

  /// Replace one field of a condition.
  pub fn set_condition_field(
    &mut self,
    position: u32,
    entry: usize,
    index: usize,
    field: ConditionField,
  ) -> Result<(), EditError> {
    let target = self
      .entry_mut(position, entry)?
      .conditions
      .get_mut(index)
      .ok_or(EditError::ConditionOutOfRange {
        position,
        entry,
        index,
      })?;
    match field {
      ConditionField::ConditionType(id) => target.condition_type_id = id,
      ConditionField::TargetStep(step) => target.target_step_position = step,
      ConditionField::Value(value) => target.value = value,
    }
    Ok(())
  }

  /// Re-key a step. All checks run before the step is taken out of the map.
  fn move_step(&mut self, from: u32, to: u32) -> Result<(), EditError> {
    if !self.steps.contains_key(&from) {
      return Err(EditError::StepNotFound { position: from });
    }
    if from == to {
      return Ok(());
    }
    if to == 0 {
      return Err(EditError::InvalidPosition);
    }
    if self.steps.contains_key(&to) {
      return Err(EditError::DuplicatePosition { position: to });
    }
    if let Some(mut step) = self.steps.remove(&from) {
      step.position = to;
      self.steps.insert(to, step);
    }
    Ok(())
  }

  fn step_mut(&mut self, position: u32) -> Result<&mut Step, EditError> {
    self
      .steps
      .get_mut(&position)
      .ok_or(EditError::StepNotFound { position })
  }

  fn entry_mut(&mut self, position: u32, index: usize) -> Result<&mut FieldEntry, EditError> {
    self
      .step_mut(position)?
      .inputs
      .get_mut(index)
      .ok_or(EditError::EntryOutOfRange { position, index })
  }
}
