//! Configuration loading and management

use crate::core::datetime::{DATE_FORMAT, DATE_TIME_LONG_FORMAT, DateFormatter, is_valid_format};
use crate::core::error::{AdminResult, ConfigError};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// What `save()` does with a working copy that fails validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPolicy {
    /// Violations are reported, the save still goes to the backend
    #[default]
    Advisory,
    /// Violations abort the save before any request is sent
    Blocking,
}

/// Client configuration
///
/// ```yaml
/// api_url: https://depot.example.com
/// app_name: depotApp
/// items_per_page: 50
/// submit_policy: blocking
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AdminConfig {
    /// Backend origin, e.g. `http://localhost:8080`
    #[validate(url(message = "api_url must be an absolute URL"))]
    pub api_url: String,

    /// Path segment in front of every resource
    pub api_prefix: String,

    /// Prefix of translation keys in alert messages
    #[validate(length(min = 1, message = "app_name must not be empty"))]
    pub app_name: String,

    /// Default list page size
    #[validate(range(min = 1, max = 1000, message = "items_per_page must be within 1..=1000"))]
    pub items_per_page: usize,

    /// strftime format of date-time inputs and tables
    #[validate(
        length(min = 1),
        custom(function = "strftime_format", message = "date_time_format is not a valid strftime format")
    )]
    pub date_time_format: String,

    /// strftime format of date inputs and tables
    #[validate(
        length(min = 1),
        custom(function = "strftime_format", message = "date_format is not a valid strftime format")
    )]
    pub date_format: String,

    pub submit_policy: SubmitPolicy,

    /// Sent as `Authorization: Bearer <token>` when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
}

fn strftime_format(format: &str) -> Result<(), ValidationError> {
    if is_valid_format(format) {
        Ok(())
    } else {
        Err(ValidationError::new("strftime"))
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            api_prefix: "api".to_string(),
            app_name: "depotApp".to_string(),
            items_per_page: 20,
            date_time_format: DATE_TIME_LONG_FORMAT.to_string(),
            date_format: DATE_FORMAT.to_string(),
            submit_policy: SubmitPolicy::Advisory,
            bearer_token: None,
        }
    }
}

impl AdminConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> AdminResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::parse(&content, Some(path))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> AdminResult<Self> {
        Self::parse(yaml, None)
    }

    fn parse(yaml: &str, file: Option<&str>) -> AdminResult<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            file: file.map(str::to_string),
            message: e.to_string(),
        })?;
        config.check()?;
        Ok(config)
    }

    /// Run the declarative checks, folding all failures into one error
    pub fn check(&self) -> AdminResult<()> {
        self.validate().map_err(|errors| {
            let mut messages: Vec<String> = errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errs)| {
                    errs.iter().map(move |e| match &e.message {
                        Some(message) => message.to_string(),
                        None => format!("{field} is invalid ({})", e.code),
                    })
                })
                .collect();
            messages.sort();
            ConfigError::Invalid(messages.join("; "))
        })?;
        Ok(())
    }

    /// Root of every resource URL: `<api_url>/<api_prefix>`
    pub fn api_root(&self) -> String {
        let base = self.api_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{prefix}")
        }
    }

    pub fn date_formatter(&self) -> DateFormatter {
        DateFormatter::new(&self.date_time_format, &self.date_format)
    }

    /// `<app_name>.<entity>.<action>`
    pub fn message_key(&self, entity_key: &str, action: &str) -> String {
        format!("{}.{}.{}", self.app_name, entity_key, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AdminError;

    #[test]
    fn test_default_config_is_valid() {
        let config = AdminConfig::default();
        assert!(config.check().is_ok());
        assert_eq!(config.api_root(), "http://localhost:8080/api");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = AdminConfig::from_yaml_str("api_url: https://depot.example.com/\n").unwrap();
        assert_eq!(config.api_root(), "https://depot.example.com/api");
        assert_eq!(config.items_per_page, 20);
        assert_eq!(config.submit_policy, SubmitPolicy::Advisory);
    }

    #[test]
    fn test_submit_policy_parses() {
        let config = AdminConfig::from_yaml_str("submit_policy: blocking\n").unwrap();
        assert_eq!(config.submit_policy, SubmitPolicy::Blocking);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = AdminConfig::from_yaml_str("api_url: not a url\nitems_per_page: 0\n").unwrap_err();
        let AdminError::Config(ConfigError::Invalid(message)) = err else {
            panic!("expected invalid config, got {err:?}");
        };
        assert!(message.contains("api_url must be an absolute URL"));
        assert!(message.contains("items_per_page must be within 1..=1000"));
    }

    #[test]
    fn test_unknown_strftime_specifier_rejected() {
        let err = AdminConfig::from_yaml_str("date_time_format: \"%Y-%m-%d %Q\"\ndate_format: \"%d.%m.%Y\"\n")
            .unwrap_err();
        let AdminError::Config(ConfigError::Invalid(message)) = err else {
            panic!("expected invalid config, got {err:?}");
        };
        assert_eq!(message, "date_time_format is not a valid strftime format");

        let config = AdminConfig::from_yaml_str("date_format: \"%d.%m.%Y\"\n").unwrap();
        assert_eq!(
            config
                .date_formatter()
                .format_date(chrono::NaiveDate::from_ymd_opt(2024, 2, 9)),
            Some("09.02.2024".to_string())
        );
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        let err = AdminConfig::from_yaml_str("items_per_page: [").unwrap_err();
        assert!(matches!(err, AdminError::Config(ConfigError::Parse { file: None, .. })));
    }

    #[test]
    fn test_empty_prefix() {
        let config = AdminConfig {
            api_prefix: "/".to_string(),
            ..AdminConfig::default()
        };
        assert_eq!(config.api_root(), "http://localhost:8080");
    }

    #[test]
    fn test_message_key() {
        let config = AdminConfig::default();
        assert_eq!(config.message_key("workingUnit", "created"), "depotApp.workingUnit.created");
    }
}
