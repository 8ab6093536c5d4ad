//! User-facing notifications raised by the controllers

use crate::core::error::AdminError;
use serde::Serialize;
use std::collections::BTreeMap;

/// A translatable message: key plus interpolation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertMessage {
    pub key: String,
    pub params: BTreeMap<String, String>,
}

impl AlertMessage {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

/// Sink for alerts
///
/// Presentation belongs to the host; controllers only decide what to say.
pub trait Alerts: Send + Sync {
    fn show_info(&self, message: &AlertMessage);

    fn show_success(&self, message: &AlertMessage);

    /// Report a failed backend call
    fn show_http_error(&self, error: &AdminError);
}

/// Alerts written to the `tracing` log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAlerts;

impl Alerts for TracingAlerts {
    fn show_info(&self, message: &AlertMessage) {
        tracing::info!(key = %message.key, params = ?message.params, "alert");
    }

    fn show_success(&self, message: &AlertMessage) {
        tracing::info!(key = %message.key, params = ?message.params, "success");
    }

    fn show_http_error(&self, error: &AdminError) {
        tracing::error!(
            status = error.status_code(),
            code = error.error_code(),
            error = %error,
            "request failed"
        );
    }
}
