use briefing_config::Definition;
use briefing_editor::StepTree;

/// In-memory state of a design being authored.
///
/// Nothing here is persisted until the wizard submits it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Designer {
  pub author: String,
  pub title: String,
  pub description: String,
  steps: StepTree,
}

impl Designer {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn steps(&self) -> &StepTree {
    &self.steps
  }

  pub fn steps_mut(&mut self) -> &mut StepTree {
    &mut self.steps
  }

  /// Snapshot the design as an unsaved definition.
  pub fn to_definition(&self) -> Definition {
    Definition {
      id: None,
      title: self.title.clone(),
      description: self.description.clone(),
      author: self.author.clone(),
      steps: self.steps.to_steps(),
      created: None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use briefing_editor::StepField;

  #[test]
  fn test_snapshot_is_unsaved_and_sorted() {
    let mut designer = Designer::new();
    designer.author = "ana@example.com".to_string();
    designer.title = "Kickoff".to_string();
    let steps = designer.steps_mut();
    steps.add_step().unwrap();
    steps.add_step().unwrap();
    steps.set_step_field(1, StepField::Position(5)).unwrap();

    let snapshot = designer.to_definition();

    assert!(snapshot.id.is_none());
    assert!(snapshot.created.is_none());
    assert_eq!(snapshot.title, "Kickoff");
    assert_eq!(snapshot.author, "ana@example.com");
    let positions: Vec<u32> = snapshot.steps.iter().map(|s| s.position).collect();
    assert_eq!(positions, vec![2, 5]);
  }

  #[test]
  fn test_snapshot_does_not_alias_state() {
    let mut designer = Designer::new();
    designer.steps_mut().add_step().unwrap();
    let mut snapshot = designer.to_definition();
    snapshot.steps.clear();
    assert_eq!(designer.steps().len(), 1);
  }
}
