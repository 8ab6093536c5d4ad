//! REST implementation of [`EntityClient`]
//!
//! Resource layout, relative to `<api_url>/<api_prefix>`:
//!
//! | operation | request |
//! |---|---|
//! | find | `GET /<plural>/{id}` |
//! | list | `GET /<plural>?page=&size=&sort=` |
//! | search | `GET /<plural>/_search?query=` |
//! | create | `POST /<plural>` |
//! | update | `PUT /<plural>/{id}` |
//! | partial update | `PATCH /<plural>/{id}` (merge-patch) |
//! | delete | `DELETE /<plural>/{id}` |

use super::{EntityClient, ResponseMeta, ensure_searchable, merge_patch_body};
use crate::config::AdminConfig;
use crate::core::entity::Entity;
use crate::core::error::{AdminError, AdminResult, ApiError, ConfigError};
use crate::core::query::{ListResponse, PageRequest};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;

const MERGE_PATCH_CONTENT_TYPE: &str = "application/merge-patch+json";

/// Shared HTTP plumbing for every entity client
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct HttpTransport {
    inner: Arc<HttpTransportInner>,
}

struct HttpTransportInner {
    client: reqwest::Client,
    api_root: String,
}

impl HttpTransport {
    /// Build the transport from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the bearer token is not a valid header value or
    /// the HTTP client fails to build.
    pub fn new(config: &AdminConfig) -> AdminResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &config.bearer_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                ConfigError::Invalid(format!("bearer_token is not a valid header value: {e}"))
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self::with_client(client, config.api_root()))
    }

    /// Use an existing reqwest client
    pub fn with_client(client: reqwest::Client, api_root: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(HttpTransportInner {
                client,
                api_root: api_root.into().trim_end_matches('/').to_string(),
            }),
        }
    }

    pub fn api_root(&self) -> &str {
        &self.inner.api_root
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.inner.api_root, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!(%method, %url, "sending request");
        self.inner.client.request(method, url)
    }

    /// Send and return the response if its status is a success
    async fn send(&self, builder: RequestBuilder) -> AdminResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(Self::parse_error(response).await)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AdminResult<T> {
        let response = self.send(builder).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_list<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> AdminResult<ListResponse<T>> {
        let response = self.send(builder).await?;
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;
        let items: Vec<T> = serde_json::from_slice(&bytes)?;
        Ok(ListResponse::new(items, headers))
    }

    /// Turn an error response into [`AdminError::Api`]
    async fn parse_error(response: Response) -> AdminError {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return AdminError::Transport(e),
        };
        let err = ApiError::from_body(status, &body);
        tracing::warn!(status, %url, error = %err, "backend rejected request");
        AdminError::Api(err)
    }
}

/// [`EntityClient`] backed by the REST API
pub struct RestEntityClient<T: Entity> {
    transport: HttpTransport,
    resource: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for RestEntityClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            resource: self.resource.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> RestEntityClient<T> {
    /// Client for `T`'s own resource path
    pub fn new(transport: HttpTransport) -> Self {
        Self::with_resource(transport, T::resource_name())
    }

    /// Client for a non-default resource path
    pub fn with_resource(transport: HttpTransport, resource: impl Into<String>) -> Self {
        Self {
            transport,
            resource: resource.into().trim_matches('/').to_string(),
            _entity: PhantomData,
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.resource, encode_segment(id))
    }

    fn require_id(entity: &T) -> AdminResult<String> {
        entity.id().ok_or_else(|| AdminError::MissingIdentifier {
            entity: T::resource_name_singular().to_string(),
        })
    }
}

#[async_trait]
impl<T: Entity> EntityClient<T> for RestEntityClient<T> {
    async fn find(&self, id: &str) -> AdminResult<T> {
        let builder = self.transport.request(Method::GET, &self.item_path(id));
        self.transport.send_json(builder).await
    }

    async fn list(&self, request: &PageRequest) -> AdminResult<ListResponse<T>> {
        let builder = self
            .transport
            .request(Method::GET, &self.resource)
            .query(&request.to_query_pairs());
        self.transport.send_list(builder).await
    }

    async fn search(&self, query: &str, request: &PageRequest) -> AdminResult<ListResponse<T>> {
        ensure_searchable::<T>()?;
        let mut params = vec![("query".to_string(), query.to_string())];
        params.extend(request.to_query_pairs());
        let builder = self
            .transport
            .request(Method::GET, &format!("{}/_search", self.resource))
            .query(&params);
        self.transport.send_list(builder).await
    }

    async fn create(&self, entity: &T) -> AdminResult<T> {
        let builder = self
            .transport
            .request(Method::POST, &self.resource)
            .json(entity);
        let created: T = self.transport.send_json(builder).await?;
        tracing::info!(
            entity = T::resource_name_singular(),
            id = created.id().as_deref().unwrap_or("?"),
            "created"
        );
        Ok(created)
    }

    async fn update(&self, entity: &T) -> AdminResult<T> {
        let id = Self::require_id(entity)?;
        let builder = self
            .transport
            .request(Method::PUT, &self.item_path(&id))
            .json(entity);
        let updated = self.transport.send_json(builder).await?;
        tracing::info!(entity = T::resource_name_singular(), %id, "updated");
        Ok(updated)
    }

    async fn partial_update(&self, entity: &T) -> AdminResult<T> {
        let id = Self::require_id(entity)?;
        let body = serde_json::to_vec(&merge_patch_body(entity)?)?;
        let builder = self
            .transport
            .request(Method::PATCH, &self.item_path(&id))
            .header(CONTENT_TYPE, MERGE_PATCH_CONTENT_TYPE)
            .body(body);
        let updated = self.transport.send_json(builder).await?;
        tracing::info!(entity = T::resource_name_singular(), %id, "partially updated");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> AdminResult<ResponseMeta> {
        let builder = self.transport.request(Method::DELETE, &self.item_path(id));
        let response = self.transport.send(builder).await?;
        tracing::info!(entity = T::resource_name_singular(), %id, "deleted");
        Ok(ResponseMeta {
            status: response.status().as_u16(),
            headers: response.headers().clone(),
        })
    }
}

/// Percent-encode an identifier for use as one path segment
fn encode_segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
