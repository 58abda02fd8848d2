use std::time::Duration;

use async_trait::async_trait;
use briefing_config::{ConditionType, Definition, InputType};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, error, instrument};
use url::Url;

use crate::config::ClientConfig;
use crate::envelope;
use crate::error::ClientError;
use crate::{Catalog, Storage};

const INPUT_TYPES_PATH: &str = "input";
const CONDITION_TYPES_PATH: &str = "condition";
const DEFINITIONS_PATH: &str = "briefing";

/// Catalog and storage client for the briefing HTTP API.
///
/// Endpoints, relative to the configured base URL:
/// ```text
/// GET  input           -> input types
/// GET  condition       -> condition types
/// POST briefing        -> create a definition
/// GET  briefing/{id}   -> fetch a definition
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
  client: Client,
  base_url: Url,
}

impl HttpClient {
  /// Create a client from an explicit configuration.
  pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
    let mut base_url = Url::parse(&config.base_url).map_err(|e| {
      ClientError::invalid_config(format!("invalid base url '{}': {}", config.base_url, e))
    })?;
    if base_url.cannot_be_a_base() {
      return Err(ClientError::invalid_config(format!(
        "base url '{}' cannot have paths joined onto it",
        config.base_url
      )));
    }
    // Without a trailing slash, joining would replace the last path segment.
    if !base_url.path().ends_with('/') {
      let path = format!("{}/", base_url.path());
      base_url.set_path(&path);
    }

    let mut headers = HeaderMap::new();
    for (name, value) in &config.headers {
      let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| ClientError::invalid_config(format!("invalid header name '{name}': {e}")))?;
      let header_value = HeaderValue::from_str(value)
        .map_err(|e| ClientError::invalid_config(format!("invalid value for header '{name}': {e}")))?;
      headers.insert(header_name, header_value);
    }

    let mut builder = Client::builder().default_headers(headers);
    if let Some(timeout_ms) = config.timeout_ms {
      builder = builder.timeout(Duration::from_millis(timeout_ms));
    }

    Ok(Self {
      client: builder.build()?,
      base_url,
    })
  }

  /// The normalized base URL.
  pub fn base_url(&self) -> &Url {
    &self.base_url
  }

  /// Build an endpoint URL from path segments. Segments are percent-encoded.
  fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
    let mut url = self.base_url.clone();
    url
      .path_segments_mut()
      .map_err(|_| ClientError::invalid_config("base url cannot be a base"))?
      .pop_if_empty()
      .extend(segments);
    Ok(url)
  }

  /// Send a request and open the response envelope.
  async fn send(&self, request: RequestBuilder) -> Result<Value, ClientError> {
    let response = request.send().await?;
    let status = response.status().as_u16();
    let body = response.text().await?;

    envelope::open(status, &body).inspect_err(|e| {
      error!(status, error = %e, "request failed");
    })
  }

  async fn get(&self, segments: &[&str]) -> Result<Value, ClientError> {
    let url = self.endpoint(segments)?;
    debug!(url = %url, "GET");
    self.send(self.client.get(url)).await
  }
}

#[async_trait]
impl Catalog for HttpClient {
  #[instrument(skip(self))]
  async fn fetch_input_types(&self) -> Result<Vec<InputType>, ClientError> {
    let data = self.get(&[INPUT_TYPES_PATH]).await?;
    envelope::decode_list(data)
  }

  #[instrument(skip(self))]
  async fn fetch_condition_types(&self) -> Result<Vec<ConditionType>, ClientError> {
    let data = self.get(&[CONDITION_TYPES_PATH]).await?;
    envelope::decode_list(data)
  }
}

#[async_trait]
impl Storage for HttpClient {
  #[instrument(skip(self, definition), fields(title = %definition.title))]
  async fn create_definition(&self, definition: &Definition) -> Result<Definition, ClientError> {
    let url = self.endpoint(&[DEFINITIONS_PATH])?;
    debug!(url = %url, "POST");

    let data = self.send(self.client.post(url).json(definition)).await?;
    let created: Definition = envelope::decode(data)?;
    if created.id.as_deref().is_none_or(str::is_empty) {
      return Err(ClientError::MissingData {
        what: "definition id",
      });
    }
    Ok(created)
  }

  #[instrument(skip(self))]
  async fn fetch_definition(&self, id: &str) -> Result<Definition, ClientError> {
    let data = self.get(&[DEFINITIONS_PATH, id]).await?;
    envelope::decode(data)
  }
}
