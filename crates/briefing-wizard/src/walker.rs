use std::collections::BTreeMap;

use briefing_client::{Catalog, Storage, load_catalog};
use briefing_config::{CatalogData, Definition, FieldEntry, InputType, Step};
use briefing_editor::EditError;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::error::{ErrorNotice, WizardError};
use crate::guard::guarded;

/// A field of the current step paired with its catalog input type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedField<'a> {
  /// Index of the entry within its step.
  pub index: usize,
  pub entry: &'a FieldEntry,
  pub input_type: &'a InputType,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub answer: Option<&'a str>,
}

/// The renderer flow: walks an end user through a stored definition.
///
/// `current_index` ranges over `0..=steps.len()`; the upper bound is the
/// finished state. The definition is never modified.
#[derive(Debug, Clone)]
pub struct Walker {
  definition: Definition,
  catalog: CatalogData,
  current_index: usize,
  answers: BTreeMap<(u32, usize), String>,
  error: Option<ErrorNotice>,
}

impl Walker {
  /// Create a walker over an already fetched definition.
  pub fn new(mut definition: Definition, catalog: CatalogData) -> Self {
    definition.sort_steps();
    Self {
      definition,
      catalog,
      current_index: 0,
      answers: BTreeMap::new(),
      error: None,
    }
  }

  /// Fetch the definition and the catalog, then create the walker.
  #[instrument(skip(catalog, storage, cancel))]
  pub async fn load<C, S>(
    catalog: &C,
    storage: &S,
    id: &str,
    cancel: &CancellationToken,
  ) -> Result<Self, WizardError>
  where
    C: Catalog + ?Sized,
    S: Storage + ?Sized,
  {
    let (definition, data) = guarded(cancel, async {
      tokio::try_join!(storage.fetch_definition(id), load_catalog(catalog))
    })
    .await?;

    info!(
      title = %definition.title,
      steps = definition.steps.len(),
      "briefing loaded"
    );
    Ok(Self::new(definition, data))
  }

  pub fn definition(&self) -> &Definition {
    &self.definition
  }

  pub fn step_count(&self) -> usize {
    self.definition.steps.len()
  }

  pub fn current_index(&self) -> usize {
    self.current_index
  }

  pub fn is_finished(&self) -> bool {
    self.current_index == self.step_count()
  }

  /// The step being shown, or `None` once finished.
  pub fn current_step(&self) -> Option<&Step> {
    self.definition.steps.get(self.current_index)
  }

  /// Stepper labels, in step order.
  pub fn labels(&self) -> Vec<String> {
    self.definition.steps.iter().map(Step::label).collect()
  }

  /// The last surfaced error, until dismissed or the walker moves.
  pub fn error(&self) -> Option<&ErrorNotice> {
    self.error.as_ref()
  }

  pub fn clear_error(&mut self) {
    self.error = None;
  }

  /// Advance one step, stopping at the finished state.
  pub fn next(&mut self) -> usize {
    self.error = None;
    if self.current_index < self.step_count() {
      self.current_index += 1;
      debug!(index = self.current_index, "walker advanced");
    }
    self.current_index
  }

  /// Go back one step, stopping at the first.
  pub fn back(&mut self) -> usize {
    self.error = None;
    if self.current_index > 0 {
      self.current_index -= 1;
      debug!(index = self.current_index, "walker moved back");
    }
    self.current_index
  }

  /// Fields of the current step whose input type is in the catalog.
  ///
  /// Entries referencing an unknown input type are not rendered.
  pub fn fields(&self) -> Vec<RenderedField<'_>> {
    let Some(step) = self.current_step() else {
      return Vec::new();
    };

    step
      .inputs
      .iter()
      .enumerate()
      .filter_map(|(index, entry)| {
        let input_type = self.catalog.input_type(&entry.input_type_id)?;
        Some(RenderedField {
          index,
          entry,
          input_type,
          answer: self.answer(step.position, index),
        })
      })
      .collect()
  }

  /// Record the answer to a field.
  ///
  /// Answering a field that does not exist surfaces the error as well.
  pub fn set_answer(
    &mut self,
    position: u32,
    index: usize,
    value: impl Into<String>,
  ) -> Result<(), EditError> {
    let Some(step) = self.definition.step(position) else {
      return Err(self.surface(EditError::StepNotFound { position }));
    };
    if index >= step.inputs.len() {
      return Err(self.surface(EditError::EntryOutOfRange { position, index }));
    }
    self.answers.insert((position, index), value.into());
    Ok(())
  }

  pub fn answer(&self, position: u32, index: usize) -> Option<&str> {
    self.answers.get(&(position, index)).map(String::as_str)
  }

  fn surface(&mut self, err: EditError) -> EditError {
    warn!(error = %err, "answer rejected");
    self.error = Some(ErrorNotice::from(&WizardError::Edit(err.clone())));
    err
  }
}
