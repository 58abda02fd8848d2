//! Briefing Client
//!
//! This crate defines the two remote collaborators both briefing flows talk
//! to, and their implementations.
//!
//! The [`Catalog`] trait serves read-only reference data:
//! - available input types
//! - available condition types
//!
//! The [`Storage`] trait persists and loads definitions.
//!
//! [`HttpClient`] implements both against the briefing API, configured
//! explicitly through [`ClientConfig`]. [`InMemoryStore`] implements both in
//! process for tests and offline use.

mod config;
mod envelope;
mod error;
mod http;
mod memory;

pub use config::ClientConfig;
pub use error::ClientError;
pub use http::HttpClient;
pub use memory::InMemoryStore;

use std::sync::Arc;

use async_trait::async_trait;
use briefing_config::{CatalogData, ConditionType, Definition, InputType};

/// Read-only catalog reference data.
#[async_trait]
pub trait Catalog: Send + Sync {
  /// Fetch the available input types.
  async fn fetch_input_types(&self) -> Result<Vec<InputType>, ClientError>;

  /// Fetch the available condition types.
  async fn fetch_condition_types(&self) -> Result<Vec<ConditionType>, ClientError>;
}

/// Definition persistence.
#[async_trait]
pub trait Storage: Send + Sync {
  /// Persist a new definition and return it with its assigned id.
  async fn create_definition(&self, definition: &Definition) -> Result<Definition, ClientError>;

  /// Fetch a definition by id.
  async fn fetch_definition(&self, id: &str) -> Result<Definition, ClientError>;
}

#[async_trait]
impl<T: Catalog + ?Sized> Catalog for Arc<T> {
  async fn fetch_input_types(&self) -> Result<Vec<InputType>, ClientError> {
    (**self).fetch_input_types().await
  }

  async fn fetch_condition_types(&self) -> Result<Vec<ConditionType>, ClientError> {
    (**self).fetch_condition_types().await
  }
}

#[async_trait]
impl<T: Storage + ?Sized> Storage for Arc<T> {
  async fn create_definition(&self, definition: &Definition) -> Result<Definition, ClientError> {
    (**self).create_definition(definition).await
  }

  async fn fetch_definition(&self, id: &str) -> Result<Definition, ClientError> {
    (**self).fetch_definition(id).await
  }
}

/// Fetch both catalog lists concurrently.
pub async fn load_catalog<C: Catalog + ?Sized>(catalog: &C) -> Result<CatalogData, ClientError> {
  let (input_types, condition_types) =
    tokio::try_join!(catalog.fetch_input_types(), catalog.fetch_condition_types())?;
  Ok(CatalogData::new(input_types, condition_types))
}
