//! Entity clients: the boundary between controllers and the backend
//!
//! [`EntityClient`] is the only way controllers reach entity data. It is
//! injected explicitly (usually as `Arc<dyn EntityClient<T>>`) so screens
//! can run against the REST backend, the in-memory backend, or a test
//! double without changes.

pub mod in_memory;
pub mod rest;

pub use in_memory::InMemoryEntityClient;
pub use rest::{HttpTransport, RestEntityClient};

use crate::core::entity::Entity;
use crate::core::error::{AdminError, AdminResult};
use crate::core::query::{ListResponse, PageRequest};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::sync::Arc;

/// Status and headers of a response whose body is not needed
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    pub status: u16,
    pub headers: HeaderMap,
}

/// CRUD operations on one entity resource
///
/// Implementations do not retry, time out or cache; every failure is
/// returned to the caller.
#[async_trait]
pub trait EntityClient<T: Entity>: Send + Sync {
    /// Fetch one entity by identifier
    async fn find(&self, id: &str) -> AdminResult<T>;

    /// Fetch a page of entities, keeping the response headers
    async fn list(&self, request: &PageRequest) -> AdminResult<ListResponse<T>>;

    /// Full-text search; only for searchable schemas
    async fn search(&self, query: &str, request: &PageRequest) -> AdminResult<ListResponse<T>>;

    /// Create an entity, returning it with its server-assigned identifier
    async fn create(&self, entity: &T) -> AdminResult<T>;

    /// Replace an existing entity
    async fn update(&self, entity: &T) -> AdminResult<T>;

    /// Send only the fields that are set
    async fn partial_update(&self, entity: &T) -> AdminResult<T>;

    /// Delete an entity by identifier
    async fn delete(&self, id: &str) -> AdminResult<ResponseMeta>;
}

/// Source of relationship options for select inputs
#[async_trait]
pub trait OptionSource: Send + Sync {
    async fn load_options(&self) -> AdminResult<Vec<Value>>;
}

/// Options drawn from an [`EntityClient`], unpaged unless told otherwise
pub struct ClientOptions<T: Entity> {
    client: Arc<dyn EntityClient<T>>,
    request: PageRequest,
}

impl<T: Entity> ClientOptions<T> {
    pub fn new(client: Arc<dyn EntityClient<T>>) -> Self {
        Self {
            client,
            request: PageRequest::unpaged(),
        }
    }

    pub fn with_request(mut self, request: PageRequest) -> Self {
        self.request = request;
        self
    }

    /// Convenience for registering on an update controller
    pub fn shared(client: Arc<dyn EntityClient<T>>) -> Arc<dyn OptionSource> {
        Arc::new(Self::new(client))
    }
}

#[async_trait]
impl<T: Entity> OptionSource for ClientOptions<T> {
    async fn load_options(&self) -> AdminResult<Vec<Value>> {
        let response = self.client.list(&self.request).await?;
        response
            .items
            .iter()
            .map(|item| serde_json::to_value(item).map_err(Into::into))
            .collect()
    }
}

/// `Unsupported` unless `T`'s schema allows full-text search
pub(crate) fn ensure_searchable<T: Entity>() -> AdminResult<()> {
    if T::schema().is_searchable() {
        return Ok(());
    }
    Err(AdminError::Unsupported {
        entity: T::resource_name_singular().to_string(),
        operation: "search".to_string(),
    })
}

/// Serialise `entity` for a PATCH: nulls dropped, identifier kept
pub(crate) fn merge_patch_body<T: Entity>(entity: &T) -> AdminResult<Value> {
    let mut value = serde_json::to_value(entity)?;
    if let Value::Object(map) = &mut value {
        let id_field = T::schema().id_field();
        map.retain(|key, v| key == id_field || !v.is_null());
    }
    Ok(value)
}
