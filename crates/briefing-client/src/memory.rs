use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use briefing_config::{ConditionType, Definition, InputType};
use chrono::Utc;

use crate::error::ClientError;
use crate::{Catalog, Storage};

/// In-process catalog and storage.
///
/// Suitable for tests and offline use. Failures can be injected to exercise
/// the error paths of the flows built on top of it.
#[derive(Debug, Default)]
pub struct InMemoryStore {
  input_types: Vec<InputType>,
  condition_types: Vec<ConditionType>,
  definitions: Mutex<HashMap<String, Definition>>,
  next_id: AtomicU64,
  create_calls: AtomicUsize,
  fetch_calls: AtomicUsize,
  failure: Mutex<Option<(u16, String)>>,
}

impl InMemoryStore {
  pub fn new(input_types: Vec<InputType>, condition_types: Vec<ConditionType>) -> Self {
    Self {
      input_types,
      condition_types,
      ..Default::default()
    }
  }

  /// Store a definition directly, returning its id.
  pub fn insert(&self, mut definition: Definition) -> String {
    let id = match &definition.id {
      Some(id) => id.clone(),
      None => self.allocate_id(),
    };
    definition.id = Some(id.clone());
    self
      .definitions
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .insert(id.clone(), definition);
    id
  }

  /// Make every following call fail with a declared remote error.
  pub fn fail_with(&self, status: u16, message: impl Into<String>) {
    *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = Some((status, message.into()));
  }

  /// Stop injecting failures.
  pub fn recover(&self) {
    *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = None;
  }

  /// Number of `create_definition` calls received, failed ones included.
  pub fn create_calls(&self) -> usize {
    self.create_calls.load(Ordering::SeqCst)
  }

  /// Number of `fetch_definition` calls received, failed ones included.
  pub fn fetch_calls(&self) -> usize {
    self.fetch_calls.load(Ordering::SeqCst)
  }

  pub fn len(&self) -> usize {
    self
      .definitions
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  fn allocate_id(&self) -> String {
    format!("b-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
  }

  fn check_failure(&self) -> Result<(), ClientError> {
    match &*self.failure.lock().unwrap_or_else(PoisonError::into_inner) {
      Some((status, message)) => Err(ClientError::remote(*status, message.clone())),
      None => Ok(()),
    }
  }
}

#[async_trait]
impl Catalog for InMemoryStore {
  async fn fetch_input_types(&self) -> Result<Vec<InputType>, ClientError> {
    self.check_failure()?;
    Ok(self.input_types.clone())
  }

  async fn fetch_condition_types(&self) -> Result<Vec<ConditionType>, ClientError> {
    self.check_failure()?;
    Ok(self.condition_types.clone())
  }
}

#[async_trait]
impl Storage for InMemoryStore {
  async fn create_definition(&self, definition: &Definition) -> Result<Definition, ClientError> {
    self.create_calls.fetch_add(1, Ordering::SeqCst);
    self.check_failure()?;

    let mut created = definition.clone();
    created.id = None;
    created.created = Some(Utc::now());
    let id = self.insert(created.clone());
    created.id = Some(id);
    Ok(created)
  }

  async fn fetch_definition(&self, id: &str) -> Result<Definition, ClientError> {
    self.fetch_calls.fetch_add(1, Ordering::SeqCst);
    self.check_failure()?;

    self
      .definitions
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .get(id)
      .cloned()
      .ok_or_else(|| ClientError::NotFound(id.to_string()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_create_assigns_id() {
    let store = InMemoryStore::default();
    let def = Definition {
      title: "Kickoff".to_string(),
      ..Default::default()
    };

    let first = store.create_definition(&def).await.unwrap();
    let second = store.create_definition(&def).await.unwrap();

    assert_eq!(first.id.as_deref(), Some("b-1"));
    assert_eq!(second.id.as_deref(), Some("b-2"));
    assert!(first.created.is_some());
    assert_eq!(store.len(), 2);
    assert_eq!(store.create_calls(), 2);

    let fetched = store.fetch_definition("b-1").await.unwrap();
    assert_eq!(fetched, first);
  }

  #[tokio::test]
  async fn test_fetch_missing() {
    let store = InMemoryStore::default();
    let err = store.fetch_definition("nope").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(id) if id == "nope"));
  }

  #[tokio::test]
  async fn test_injected_failure() {
    let store = InMemoryStore::default();
    store.fail_with(500, "database unavailable");

    let err = store.create_definition(&Definition::default()).await.unwrap_err();
    assert!(matches!(err, ClientError::Remote { status: 500, .. }));
    assert!(store.is_empty());
    assert_eq!(store.create_calls(), 1);

    store.recover();
    assert!(store.create_definition(&Definition::default()).await.is_ok());
  }
}
