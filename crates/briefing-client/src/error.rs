use thiserror::Error;

/// Errors from the catalog and storage collaborators.
#[derive(Debug, Error)]
pub enum ClientError {
  /// The client configuration is unusable (bad base URL, bad header).
  #[error("invalid client config: {message}")]
  InvalidConfig { message: String },

  /// The request never produced a response.
  #[error("request failed: {0}")]
  Transport(#[from] reqwest::Error),

  /// The server declared an error, either through the HTTP status or
  /// through the status embedded in the response payload.
  #[error("server returned {status}: {message}")]
  Remote { status: u16, message: String },

  /// The payload did not match the expected shape.
  #[error("invalid response payload: {0}")]
  Decode(#[from] serde_json::Error),

  /// A success payload without the data it should carry.
  #[error("response is missing {what}")]
  MissingData { what: &'static str },

  /// No definition stored under this id.
  #[error("definition not found: {0}")]
  NotFound(String),
}

impl ClientError {
  pub fn invalid_config(message: impl Into<String>) -> Self {
    Self::InvalidConfig {
      message: message.into(),
    }
  }

  pub fn remote(status: u16, message: impl Into<String>) -> Self {
    Self::Remote {
      status,
      message: message.into(),
    }
  }
}
