use briefing_client::{Catalog, ClientError, Storage, load_catalog};
use briefing_config::{CatalogData, Definition};
use briefing_validator::{Stage, Validator};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

use crate::designer::Designer;
use crate::error::{ErrorNotice, WizardError};
use crate::guard::guarded;

/// Where the wizard is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardState {
  /// Collecting the data of a stage.
  Editing(Stage),
  /// The definition was stored under `definition_id`.
  Done { definition_id: String },
}

/// The designer flow: identity, basic info and design, then submit.
pub struct Wizard<S: Storage> {
  storage: S,
  catalog: CatalogData,
  designer: Designer,
  state: WizardState,
  error: Option<ErrorNotice>,
}

impl<S: Storage> Wizard<S> {
  /// Create a wizard over already loaded catalog data.
  pub fn new(storage: S, catalog: CatalogData) -> Self {
    Self {
      storage,
      catalog,
      designer: Designer::new(),
      state: WizardState::Editing(Stage::Identity),
      error: None,
    }
  }

  /// Load the catalog once, then create the wizard.
  pub async fn load<C: Catalog + ?Sized>(
    catalog: &C,
    storage: S,
    cancel: &CancellationToken,
  ) -> Result<Self, WizardError> {
    let data = guarded(cancel, load_catalog(catalog)).await?;
    info!(
      input_types = data.input_types.len(),
      condition_types = data.condition_types.len(),
      "catalog loaded"
    );
    Ok(Self::new(storage, data))
  }

  pub fn state(&self) -> &WizardState {
    &self.state
  }

  /// The stage being edited, or `None` once done.
  pub fn stage(&self) -> Option<Stage> {
    match self.state {
      WizardState::Editing(stage) => Some(stage),
      WizardState::Done { .. } => None,
    }
  }

  /// Index of the current stage. Equals the stage count once done.
  pub fn current_index(&self) -> usize {
    self
      .stage()
      .map(Stage::index)
      .unwrap_or(Stage::ALL.len())
  }

  /// Stepper labels, in stage order.
  pub fn labels(&self) -> Vec<&'static str> {
    Stage::ALL.iter().map(|s| s.label()).collect()
  }

  pub fn definition_id(&self) -> Option<&str> {
    match &self.state {
      WizardState::Done { definition_id } => Some(definition_id),
      WizardState::Editing(_) => None,
    }
  }

  pub fn catalog(&self) -> &CatalogData {
    &self.catalog
  }

  pub fn designer(&self) -> &Designer {
    &self.designer
  }

  pub fn designer_mut(&mut self) -> &mut Designer {
    &mut self.designer
  }

  /// The last surfaced error, until dismissed or a transition succeeds.
  pub fn error(&self) -> Option<&ErrorNotice> {
    self.error.as_ref()
  }

  pub fn clear_error(&mut self) {
    self.error = None;
  }

  /// Move one stage forward if the current stage validates.
  ///
  /// On the last stage this submits the design instead. A failed check or a
  /// failed submit leaves the stage and the entered data unchanged.
  #[instrument(skip(self, cancel), fields(stage = ?self.stage()))]
  pub async fn next(&mut self, cancel: &CancellationToken) -> Result<WizardState, WizardError> {
    let stage = self.stage().ok_or(WizardError::Finished)?;
    let definition = self.designer.to_definition();

    let checked = Validator::new(&self.catalog).validate_stage(stage, &definition);
    if let Err(e) = checked {
      warn!(field = %e.field, message = %e.message, "stage validation failed");
      return Err(self.surface(e.into()));
    }

    if !stage.is_last() {
      let next = Stage::from_index(stage.index() + 1).unwrap_or(stage);
      self.state = WizardState::Editing(next);
      self.error = None;
      info!(to = %next, "stage advanced");
      return Ok(self.state.clone());
    }

    self.submit(definition, cancel).await
  }

  /// Move one stage back. Does nothing on the first stage or once done.
  pub fn back(&mut self) -> WizardState {
    if let WizardState::Editing(stage) = self.state
      && let Some(previous) = stage.index().checked_sub(1).and_then(Stage::from_index)
    {
      self.state = WizardState::Editing(previous);
      info!(to = %previous, "stage moved back");
    }
    self.state.clone()
  }

  async fn submit(
    &mut self,
    definition: Definition,
    cancel: &CancellationToken,
  ) -> Result<WizardState, WizardError> {
    let checked = Validator::new(&self.catalog).validate_submit(&definition);
    if let Err(e) = checked {
      warn!(field = %e.field, message = %e.message, "submit validation failed");
      return Err(self.surface(e.into()));
    }

    let result = guarded(cancel, self.storage.create_definition(&definition)).await;
    let created = match result {
      Ok(created) => created,
      Err(WizardError::Cancelled) => return Err(WizardError::Cancelled),
      Err(e) => {
        error!(error = %e, "submit failed");
        return Err(self.surface(e));
      }
    };

    let Some(definition_id) = created.id.filter(|id| !id.is_empty()) else {
      let e = WizardError::Remote(ClientError::MissingData {
        what: "definition id",
      });
      error!(error = %e, "submit failed");
      return Err(self.surface(e));
    };

    info!(definition_id = %definition_id, "definition submitted");
    self.error = None;
    self.state = WizardState::Done { definition_id };
    Ok(self.state.clone())
  }

  fn surface(&mut self, err: WizardError) -> WizardError {
    self.error = Some(ErrorNotice::from(&err));
    err
  }
}
