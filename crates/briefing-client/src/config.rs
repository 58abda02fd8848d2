use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Connection settings for [`HttpClient`](crate::HttpClient).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
  /// API root, e.g. `https://api.example.com/v1/`. Endpoints are joined onto it.
  #[serde(default = "default_base_url")]
  pub base_url: String,

  /// Per-request timeout. No timeout when absent.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timeout_ms: Option<u64>,

  /// Headers sent with every request.
  #[serde(default, skip_serializing_if = "HashMap::is_empty")]
  pub headers: HashMap<String, String>,
}

impl ClientConfig {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      timeout_ms: None,
      headers: HashMap::new(),
    }
  }

  pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
    self.timeout_ms = Some(timeout_ms);
    self
  }

  pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.headers.insert(name.into(), value.into());
    self
  }
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self::new(default_base_url())
  }
}

fn default_base_url() -> String {
  "http://localhost:8080/".to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_partial_config_uses_defaults() {
    let config: ClientConfig =
      serde_json::from_str(r#"{"headers": {"x-api-key": "secret"}}"#).unwrap();
    assert_eq!(config.base_url, ClientConfig::default().base_url);
    assert_eq!(config.timeout_ms, None);
    assert_eq!(config.headers.get("x-api-key").map(String::as_str), Some("secret"));
  }
}
