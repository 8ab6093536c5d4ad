//! Test doubles shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use depot::client::{EntityClient, InMemoryEntityClient, ResponseMeta};
use depot::config::AdminConfig;
use depot::core::{AdminError, AdminResult, ApiError, Entity, ListResponse, PageRequest};
use depot::crud::{AlertMessage, Alerts, CrudContext, Navigator};
use std::sync::{Arc, Mutex};

/// One call made against a [`RecordingClient`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call<T> {
    Find(String),
    List(PageRequest),
    Search(String),
    Create(T),
    Update(T),
    PartialUpdate(T),
    Delete(String),
}

/// Client double that records every call and forwards to an in-memory store
///
/// `fail_with` makes every subsequent call return a backend error;
/// `fail_fetches_with` only fails `list` and `search`.
pub struct RecordingClient<T: Entity> {
    pub store: InMemoryEntityClient<T>,
    calls: Mutex<Vec<Call<T>>>,
    failure: Mutex<Option<u16>>,
    fetch_failure: Mutex<Option<u16>>,
}

impl<T: Entity> RecordingClient<T> {
    pub fn new(store: InMemoryEntityClient<T>) -> Arc<Self> {
        Arc::new(Self {
            store,
            calls: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            fetch_failure: Mutex::new(None),
        })
    }

    pub fn empty() -> Arc<Self> {
        Self::new(InMemoryEntityClient::new())
    }

    pub fn fail_with(&self, status: u16) {
        *self.failure.lock().unwrap() = Some(status);
    }

    pub fn fail_fetches_with(&self, status: u16) {
        *self.fetch_failure.lock().unwrap() = Some(status);
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
        *self.fetch_failure.lock().unwrap() = None;
    }

    pub fn calls(&self) -> Vec<Call<T>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call<T>) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    pub fn fetch_count(&self) -> usize {
        self.count(|c| matches!(c, Call::List(_) | Call::Search(_)))
    }

    fn record(&self, call: Call<T>) -> AdminResult<()> {
        let fetch = matches!(call, Call::List(_) | Call::Search(_));
        self.calls.lock().unwrap().push(call);
        let failure = match *self.failure.lock().unwrap() {
            Some(status) => Some(status),
            None if fetch => *self.fetch_failure.lock().unwrap(),
            None => None,
        };
        match failure {
            Some(status) => Err(AdminError::Api(ApiError::from_body(
                status,
                r#"{"title":"Internal Server Error","status":500,"message":"error.http.500"}"#,
            ))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<T: Entity> EntityClient<T> for RecordingClient<T> {
    async fn find(&self, id: &str) -> AdminResult<T> {
        self.record(Call::Find(id.to_string()))?;
        self.store.find(id).await
    }

    async fn list(&self, request: &PageRequest) -> AdminResult<ListResponse<T>> {
        self.record(Call::List(request.clone()))?;
        self.store.list(request).await
    }

    async fn search(&self, query: &str, request: &PageRequest) -> AdminResult<ListResponse<T>> {
        self.record(Call::Search(query.to_string()))?;
        self.store.search(query, request).await
    }

    async fn create(&self, entity: &T) -> AdminResult<T> {
        self.record(Call::Create(entity.clone()))?;
        self.store.create(entity).await
    }

    async fn update(&self, entity: &T) -> AdminResult<T> {
        self.record(Call::Update(entity.clone()))?;
        self.store.update(entity).await
    }

    async fn partial_update(&self, entity: &T) -> AdminResult<T> {
        self.record(Call::PartialUpdate(entity.clone()))?;
        self.store.partial_update(entity).await
    }

    async fn delete(&self, id: &str) -> AdminResult<ResponseMeta> {
        self.record(Call::Delete(id.to_string()))?;
        self.store.delete(id).await
    }
}

/// What the controllers told the user
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Info(AlertMessage),
    Success(AlertMessage),
    HttpError(Option<u16>),
}

#[derive(Default)]
pub struct RecordingAlerts {
    alerts: Mutex<Vec<Alert>>,
}

impl RecordingAlerts {
    pub fn all(&self) -> Vec<Alert> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn errors(&self) -> usize {
        self.all()
            .iter()
            .filter(|a| matches!(a, Alert::HttpError(_)))
            .count()
    }
}

impl Alerts for RecordingAlerts {
    fn show_info(&self, message: &AlertMessage) {
        self.alerts.lock().unwrap().push(Alert::Info(message.clone()));
    }

    fn show_success(&self, message: &AlertMessage) {
        self.alerts.lock().unwrap().push(Alert::Success(message.clone()));
    }

    fn show_http_error(&self, error: &AdminError) {
        self.alerts
            .lock()
            .unwrap()
            .push(Alert::HttpError(error.status_code()));
    }
}

#[derive(Default)]
pub struct CountingNavigator {
    back: Mutex<usize>,
    visited: Mutex<Vec<String>>,
}

impl CountingNavigator {
    pub fn back_count(&self) -> usize {
        *self.back.lock().unwrap()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

impl Navigator for CountingNavigator {
    fn previous_state(&self) {
        *self.back.lock().unwrap() += 1;
    }

    fn navigate(&self, path: &str) {
        self.visited.lock().unwrap().push(path.to_string());
    }
}

/// Context wired to recording collaborators
pub struct Harness {
    pub alerts: Arc<RecordingAlerts>,
    pub navigator: Arc<CountingNavigator>,
    pub ctx: CrudContext,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(AdminConfig::default())
    }

    pub fn with_config(config: AdminConfig) -> Self {
        let alerts = Arc::new(RecordingAlerts::default());
        let navigator = Arc::new(CountingNavigator::default());
        let ctx = CrudContext::new(alerts.clone(), navigator.clone(), Arc::new(config));
        Self {
            alerts,
            navigator,
            ctx,
        }
    }
}
