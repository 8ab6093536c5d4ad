//! Typed error handling for the admin client
//!
//! Every fallible operation in the crate returns [`AdminResult`]. Errors are
//! grouped by category so callers (and the alert collaborator) can match on
//! what went wrong instead of parsing strings:
//!
//! - [`AdminError::Transport`]: the request never produced an HTTP response
//! - [`AdminError::Api`]: the backend answered with a non-2xx status
//! - [`AdminError::Validation`]: client-side validation or form binding
//! - [`AdminError::Config`]: configuration loading and checking
//!
//! # Example
//!
//! ```rust,ignore
//! match client.find("9fec3727-3421-4967-b213-ba36557ca194").await {
//!     Ok(order) => println!("{order:?}"),
//!     Err(AdminError::Api(api)) if api.status == 404 => println!("gone"),
//!     Err(e) => alerts.show_http_error(&e),
//! }
//! ```

use crate::core::validation::ValidationReport;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type of the crate
#[derive(Debug, Error)]
pub enum AdminError {
    /// Connection, TLS or body transfer failure
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend rejected the request
    #[error("{0}")]
    Api(ApiError),

    /// A payload could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Client-side validation or form binding failure
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration could not be loaded or is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The entity does not support the requested operation
    #[error("{entity} does not support {operation}")]
    Unsupported { entity: String, operation: String },

    /// An operation that addresses a single resource was given an entity without key
    #[error("{entity} has no identifier")]
    MissingIdentifier { entity: String },
}

impl AdminError {
    /// HTTP status of the backend response, if there was one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AdminError::Api(api) => Some(api.status),
            AdminError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AdminError::Transport(_) => "TRANSPORT_ERROR",
            AdminError::Api(api) => api.error_code(),
            AdminError::Serialization(_) => "SERIALIZATION_ERROR",
            AdminError::Validation(_) => "VALIDATION_ERROR",
            AdminError::Config(_) => "CONFIG_ERROR",
            AdminError::Unsupported { .. } => "UNSUPPORTED_OPERATION",
            AdminError::MissingIdentifier { .. } => "MISSING_IDENTIFIER",
        }
    }

    /// Whether the backend reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// The backend error envelope, when the failure came from the backend
    pub fn envelope(&self) -> Option<&ErrorEnvelope> {
        match self {
            AdminError::Api(api) => Some(&api.envelope),
            _ => None,
        }
    }
}

impl From<ApiError> for AdminError {
    fn from(err: ApiError) -> Self {
        AdminError::Api(err)
    }
}

/// Result alias used throughout the crate
pub type AdminResult<T> = Result<T, AdminError>;

// =============================================================================
// Backend errors
// =============================================================================

/// A non-2xx response together with the body the backend sent
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: u16,
    pub envelope: ErrorEnvelope,
}

impl ApiError {
    /// Build from a status and a raw body, accepting problem-JSON or plain text
    pub fn from_body(status: u16, body: &str) -> Self {
        let envelope = serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| ErrorEnvelope {
                detail: (!body.trim().is_empty()).then(|| body.trim().to_string()),
                ..ErrorEnvelope::default()
            });
        Self { status, envelope }
    }

    pub fn error_code(&self) -> &'static str {
        match self.status {
            400 => "BAD_REQUEST",
            401 => "UNAUTHORIZED",
            403 => "FORBIDDEN",
            404 => "NOT_FOUND",
            409 => "CONFLICT",
            422 => "UNPROCESSABLE_ENTITY",
            500..=599 => "SERVER_ERROR",
            _ => "HTTP_ERROR",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "backend returned {}", self.status)?;
        if let Some(summary) = self.envelope.summary() {
            write!(f, ": {summary}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Problem-details style error body sent by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorEnvelope {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Translation key, e.g. `error.validation`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
}

impl ErrorEnvelope {
    fn is_empty(&self) -> bool {
        self == &ErrorEnvelope::default()
    }

    /// Most specific human-readable text available
    pub fn summary(&self) -> Option<&str> {
        self.detail
            .as_deref()
            .or(self.title.as_deref())
            .or(self.message.as_deref())
    }
}

/// Server-side validation failure for one field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldError {
    pub object_name: String,
    pub field: String,
    pub message: String,
}

// =============================================================================
// Validation errors
// =============================================================================

/// Client-side validation and form binding errors
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Save refused because the working copy is invalid
    #[error("{entity} failed validation: {}", .report.summary())]
    Rejected {
        entity: String,
        report: ValidationReport,
    },

    /// Form binding addressed a field the schema does not declare
    #[error("{entity} has no field '{field}'")]
    UnknownField { entity: String, field: String },

    /// Form binding addressed a server-managed field
    #[error("{entity}.{field} is read-only")]
    ReadOnlyField { entity: String, field: String },

    /// Form binding addressed a relationship the schema does not declare
    #[error("{entity} has no relationship '{relationship}'")]
    UnknownRelationship {
        entity: String,
        relationship: String,
    },

    /// A select addressed an option that is not loaded
    #[error("no '{relationship}' option with key '{key}'")]
    UnknownOption { relationship: String, key: String },

    /// A date-time input did not match the configured edit format
    #[error("'{input}' is not a valid date-time for '{field}' (expected {format})")]
    InvalidDateTime {
        field: String,
        input: String,
        format: String,
    },
}

// =============================================================================
// Config errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The YAML document could not be parsed
    #[error("failed to parse config{}: {message}", .file.as_deref().map(|f| format!(" file '{f}'")).unwrap_or_default())]
    Parse {
        file: Option<String>,
        message: String,
    },

    /// The configuration file could not be read
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A value was rejected by the configuration rules
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
