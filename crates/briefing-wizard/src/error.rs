use briefing_client::ClientError;
use briefing_editor::EditError;
use briefing_validator::ValidationError;

/// Errors from the wizard and walker.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
  /// The current stage, or the submission, did not pass validation.
  #[error(transparent)]
  Validation(#[from] ValidationError),

  /// A catalog or storage call failed.
  #[error("remote call failed: {0}")]
  Remote(#[from] ClientError),

  /// An edit or answer addressed a step or field that does not exist.
  #[error(transparent)]
  Edit(#[from] EditError),

  /// The view that issued the call is no longer active.
  #[error("view is no longer active")]
  Cancelled,

  /// The wizard already submitted its definition.
  #[error("the wizard has already finished")]
  Finished,
}

/// An error as shown to the user, kept until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
  /// The offending field, for validation errors.
  pub field: Option<String>,
  pub message: String,
}

impl From<&WizardError> for ErrorNotice {
  fn from(err: &WizardError) -> Self {
    match err {
      WizardError::Validation(e) => Self {
        field: Some(e.field.clone()),
        message: e.message.clone(),
      },
      other => Self {
        field: None,
        message: other.to_string(),
      },
    }
  }
}
