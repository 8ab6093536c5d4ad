//! Create/edit screen
//!
//! The controller owns a working copy of `T`. Form inputs mutate it through
//! the binding methods, which re-run schema validation after every change.
//! Relationship options come from [`OptionSource`]s registered per
//! relationship and are loaded concurrently with the primary fetch.

use super::CrudContext;
use crate::client::{EntityClient, OptionSource};
use crate::config::SubmitPolicy;
use crate::core::datetime::DateFormatter;
use crate::core::entity::Entity;
use crate::core::error::{AdminResult, ValidationError};
use crate::core::field::{Cardinality, FieldDescriptor, FieldKind};
use crate::core::validation::ValidationReport;
use futures::future::join_all;
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

/// Controller of the create/edit screen of `T`
pub struct UpdateController<T: Entity> {
    client: Arc<dyn EntityClient<T>>,
    ctx: CrudContext,
    entity: T,
    is_saving: bool,
    validation: ValidationReport,
    option_sources: IndexMap<String, Arc<dyn OptionSource>>,
    options: IndexMap<String, Vec<Value>>,
}

impl<T: Entity> UpdateController<T> {
    /// Start from a blank working copy
    pub fn new(client: Arc<dyn EntityClient<T>>, ctx: CrudContext) -> Self {
        let mut controller = Self {
            client,
            ctx,
            entity: T::default(),
            is_saving: false,
            validation: ValidationReport::new(),
            option_sources: IndexMap::new(),
            options: IndexMap::new(),
        };
        controller.revalidate();
        controller
    }

    /// Register the option source of a relationship
    pub fn with_options(
        mut self,
        relationship: &str,
        source: Arc<dyn OptionSource>,
    ) -> AdminResult<Self> {
        if T::schema().relationship(relationship).is_none() {
            return Err(ValidationError::UnknownRelationship {
                entity: T::resource_name_singular().to_string(),
                relationship: relationship.to_string(),
            }
            .into());
        }
        self.option_sources.insert(relationship.to_string(), source);
        self.options.insert(relationship.to_string(), Vec::new());
        Ok(self)
    }

    pub fn entity(&self) -> &T {
        &self.entity
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn validation(&self) -> &ValidationReport {
        &self.validation
    }

    pub fn is_valid(&self) -> bool {
        self.validation.is_valid()
    }

    /// Loaded options of a relationship; empty until loaded or on failure
    pub fn options(&self, relationship: &str) -> &[Value] {
        self.options
            .get(relationship)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Route entry
    ///
    /// Fetches the entity when the route carries an id, otherwise starts
    /// blank. Relationship options load at the same time; a failed option
    /// fetch leaves that list empty without failing `init`.
    pub async fn init(&mut self, route_id: Option<&str>) -> AdminResult<()> {
        let client = Arc::clone(&self.client);
        let primary = async move {
            match route_id {
                Some(id) => Some(client.find(id).await),
                None => None,
            }
        };
        let sources = self.sources();
        let (found, loaded) = futures::join!(primary, load_all(&sources));
        self.apply_options(loaded);

        match found {
            Some(Ok(entity)) => {
                self.entity = entity;
                self.revalidate();
                Ok(())
            }
            Some(Err(e)) => {
                self.ctx.alerts.show_http_error(&e);
                Err(e)
            }
            None => {
                self.entity = T::default();
                self.revalidate();
                Ok(())
            }
        }
    }

    /// Load the working copy alone
    pub async fn retrieve(&mut self, id: &str) -> AdminResult<()> {
        match self.client.find(id).await {
            Ok(entity) => {
                self.entity = entity;
                self.revalidate();
                Ok(())
            }
            Err(e) => {
                self.ctx.alerts.show_http_error(&e);
                Err(e)
            }
        }
    }

    /// Load every registered option list concurrently
    pub async fn init_relationships(&mut self) {
        let sources = self.sources();
        let loaded = load_all(&sources).await;
        self.apply_options(loaded);
    }

    fn sources(&self) -> Vec<(String, Arc<dyn OptionSource>)> {
        self.option_sources
            .iter()
            .map(|(name, source)| (name.clone(), Arc::clone(source)))
            .collect()
    }

    fn apply_options(&mut self, loaded: Vec<(String, AdminResult<Vec<Value>>)>) {
        for (name, result) in loaded {
            let values = result.unwrap_or_else(|e| {
                tracing::warn!(
                    entity = T::resource_name_singular(),
                    relationship = %name,
                    error = %e,
                    "failed to load options"
                );
                Vec::new()
            });
            self.options.insert(name, values);
        }
    }

    /// Replace the working copy
    pub fn set_entity(&mut self, entity: T) {
        self.entity = entity;
        self.revalidate();
    }

    /// Set one field of the working copy from its JSON value
    ///
    /// Read-only fields are refused. A value that does not deserialise into
    /// `T` leaves the working copy unchanged.
    pub fn set_field(&mut self, name: &str, value: Value) -> AdminResult<()> {
        let schema = T::schema();
        match schema.field(name) {
            Some(field) => Self::require_writable(field)?,
            None if name == schema.id_field() => {}
            None => {
                return Err(ValidationError::UnknownField {
                    entity: T::resource_name_singular().to_string(),
                    field: name.to_string(),
                }
                .into());
            }
        }
        self.patch(name, value)
    }

    /// Set an instant field from an edit-format input; blank clears it
    pub fn set_date_time_field(&mut self, name: &str, input: &str) -> AdminResult<()> {
        self.require_instant(name)?;
        if input.trim().is_empty() {
            return self.patch(name, Value::Null);
        }
        let formatter = self.formatter();
        let instant = formatter.convert_date_time_to_server(input).ok_or_else(|| {
            ValidationError::InvalidDateTime {
                field: name.to_string(),
                input: input.to_string(),
                format: formatter.date_time_format().to_string(),
            }
        })?;
        self.patch(name, Value::String(instant.to_rfc3339()))
    }

    /// Current value of an instant field in edit format
    pub fn date_time_input(&self, name: &str) -> Option<String> {
        let record = serde_json::to_value(&self.entity).ok()?;
        let instant = record
            .get(name)
            .and_then(Value::as_str)
            .and_then(DateFormatter::parse_server_date_time);
        self.formatter().convert_date_time_from_server(instant)
    }

    /// Pick an option by key
    ///
    /// To-one relationships take the option; to-many relationships toggle it.
    pub fn select_option(&mut self, relationship: &str, key: &str) -> AdminResult<()> {
        let rel = T::schema().relationship(relationship).ok_or_else(|| {
            ValidationError::UnknownRelationship {
                entity: T::resource_name_singular().to_string(),
                relationship: relationship.to_string(),
            }
        })?;
        let option = self
            .options(relationship)
            .iter()
            .find(|o| rel.key_of(o).as_deref() == Some(key))
            .cloned()
            .ok_or_else(|| ValidationError::UnknownOption {
                relationship: relationship.to_string(),
                key: key.to_string(),
            })?;

        let value = match rel.cardinality {
            Cardinality::One => option,
            Cardinality::Many => {
                let record = serde_json::to_value(&self.entity)?;
                let mut selected = match record.get(&rel.name) {
                    Some(Value::Array(items)) => items.clone(),
                    _ => Vec::new(),
                };
                let before = selected.len();
                selected.retain(|item| rel.key_of(item).as_deref() != Some(key));
                if selected.len() == before {
                    selected.push(option);
                }
                Value::Array(selected)
            }
        };
        self.patch(relationship, value)
    }

    /// Unset a to-one relationship or empty a to-many one
    pub fn clear_option(&mut self, relationship: &str) -> AdminResult<()> {
        let rel = T::schema().relationship(relationship).ok_or_else(|| {
            ValidationError::UnknownRelationship {
                entity: T::resource_name_singular().to_string(),
                relationship: relationship.to_string(),
            }
        })?;
        let value = match rel.cardinality {
            Cardinality::One => Value::Null,
            Cardinality::Many => Value::Array(Vec::new()),
        };
        self.patch(relationship, value)
    }

    pub fn is_selected(&self, relationship: &str, key: &str) -> bool {
        let Some(rel) = T::schema().relationship(relationship) else {
            return false;
        };
        let Ok(record) = serde_json::to_value(&self.entity) else {
            return false;
        };
        match record.get(&rel.name) {
            Some(Value::Array(items)) => items
                .iter()
                .any(|item| rel.key_of(item).as_deref() == Some(key)),
            Some(item @ Value::Object(_)) => rel.key_of(item).as_deref() == Some(key),
            _ => false,
        }
    }

    /// Create or update the working copy, then go back
    ///
    /// The working copy goes to `update` when it has an id and to `create`
    /// otherwise. Under [`SubmitPolicy::Blocking`] an invalid working copy is
    /// rejected before any request is made.
    pub async fn save(&mut self) -> AdminResult<T> {
        self.revalidate();
        if !self.validation.is_valid() {
            match self.ctx.config.submit_policy {
                SubmitPolicy::Blocking => {
                    return Err(ValidationError::Rejected {
                        entity: T::resource_name_singular().to_string(),
                        report: self.validation.clone(),
                    }
                    .into());
                }
                SubmitPolicy::Advisory => tracing::warn!(
                    entity = T::resource_name_singular(),
                    violations = %self.validation.summary(),
                    "saving with validation errors"
                ),
            }
        }

        let creating = self.entity.is_new();
        self.is_saving = true;
        let result = if creating {
            self.client.create(&self.entity).await
        } else {
            self.client.update(&self.entity).await
        };
        self.is_saving = false;

        match result {
            Ok(saved) => {
                self.ctx.navigator.previous_state();
                let key = T::schema().i18n_key();
                let id = saved.id();
                if creating {
                    let message = self.ctx.message(&key, "created", id.as_deref());
                    self.ctx.alerts.show_success(&message);
                } else {
                    let message = self.ctx.message(&key, "updated", id.as_deref());
                    self.ctx.alerts.show_info(&message);
                }
                self.entity = saved.clone();
                Ok(saved)
            }
            Err(e) => {
                self.ctx.alerts.show_http_error(&e);
                Err(e)
            }
        }
    }

    pub fn previous_state(&self) {
        self.ctx.navigator.previous_state();
    }

    fn formatter(&self) -> DateFormatter {
        self.ctx.config.date_formatter()
    }

    fn require_writable(field: &FieldDescriptor) -> AdminResult<()> {
        if field.read_only {
            return Err(ValidationError::ReadOnlyField {
                entity: T::resource_name_singular().to_string(),
                field: field.name.clone(),
            }
            .into());
        }
        Ok(())
    }

    fn require_instant(&self, name: &str) -> AdminResult<()> {
        match T::schema().field(name) {
            Some(field) if field.kind == FieldKind::Instant => Self::require_writable(field),
            _ => Err(ValidationError::UnknownField {
                entity: T::resource_name_singular().to_string(),
                field: name.to_string(),
            }
            .into()),
        }
    }

    fn patch(&mut self, name: &str, value: Value) -> AdminResult<()> {
        let mut record = serde_json::to_value(&self.entity)?;
        if let Value::Object(map) = &mut record {
            map.insert(name.to_string(), value);
        }
        self.entity = serde_json::from_value(record)?;
        self.revalidate();
        Ok(())
    }

    fn revalidate(&mut self) {
        match serde_json::to_value(&self.entity) {
            Ok(record) => self.validation = T::schema().validate(&record),
            Err(e) => tracing::warn!(
                entity = T::resource_name_singular(),
                error = %e,
                "cannot validate working copy"
            ),
        }
    }
}

async fn load_all(
    sources: &[(String, Arc<dyn OptionSource>)],
) -> Vec<(String, AdminResult<Vec<Value>>)> {
    join_all(
        sources
            .iter()
            .map(|(name, source)| async move { (name.clone(), source.load_options().await) }),
    )
    .await
}
