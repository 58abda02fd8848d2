//! Response envelope decoding.
//!
//! Every API response body has the shape:
//!
//! ```json
//! { "status": 200, "message": "ok", "data": { ... } }
//! ```
//!
//! `status` and `message` are optional. A `status` of 400 or above is an error
//! even when the HTTP status was a success.

use briefing_config::{ConditionType, InputType};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;

#[derive(Debug, Default, Deserialize)]
struct Envelope {
  #[serde(default)]
  status: Option<u16>,
  #[serde(default)]
  message: Option<String>,
  #[serde(default)]
  data: Option<Value>,
}

/// Check the HTTP status and the embedded status, and return the `data` payload.
pub(crate) fn open(http_status: u16, body: &str) -> Result<Value, ClientError> {
  let http_ok = (200..300).contains(&http_status);

  let envelope: Envelope = match serde_json::from_str(body) {
    Ok(envelope) => envelope,
    Err(_) if !http_ok => {
      return Err(ClientError::remote(http_status, fallback_message(body)));
    }
    Err(e) => return Err(ClientError::Decode(e)),
  };

  if !http_ok {
    let message = envelope
      .message
      .unwrap_or_else(|| fallback_message(body));
    return Err(ClientError::remote(http_status, message));
  }

  if let Some(status) = envelope.status
    && status >= 400
  {
    let message = envelope
      .message
      .unwrap_or_else(|| format!("request failed with status {status}"));
    return Err(ClientError::remote(status, message));
  }

  envelope.data.ok_or(ClientError::MissingData { what: "data" })
}

/// Decode a single object payload.
pub(crate) fn decode<T: DeserializeOwned>(data: Value) -> Result<T, ClientError> {
  Ok(serde_json::from_value(data)?)
}

/// Catalog entries whose id may be carried by the key of a keyed payload.
pub(crate) trait Keyed {
  fn id_mut(&mut self) -> &mut String;
}

impl Keyed for InputType {
  fn id_mut(&mut self) -> &mut String {
    &mut self.id
  }
}

impl Keyed for ConditionType {
  fn id_mut(&mut self) -> &mut String {
    &mut self.id
  }
}

/// Decode a list payload sent either as an array or as an object keyed by id.
///
/// Keyed entries are returned in key order, with a missing id filled from the key.
pub(crate) fn decode_list<T: DeserializeOwned + Keyed>(data: Value) -> Result<Vec<T>, ClientError> {
  match data {
    Value::Object(map) => {
      let mut entries: Vec<(String, Value)> = map.into_iter().collect();
      entries.sort_by(|(a, _), (b, _)| a.cmp(b));
      entries
        .into_iter()
        .map(|(key, value)| -> Result<T, ClientError> {
          let mut item: T = serde_json::from_value(value)?;
          let id = item.id_mut();
          if id.is_empty() {
            *id = key;
          }
          Ok(item)
        })
        .collect()
    }
    other => Ok(serde_json::from_value(other)?),
  }
}

fn fallback_message(body: &str) -> String {
  let trimmed = body.trim();
  if trimmed.is_empty() {
    "empty response".to_string()
  } else {
    trimmed.to_string()
  }
}
