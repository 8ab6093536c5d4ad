//! Entity trait defining the core abstraction for all managed record types

use crate::core::schema::EntitySchema;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use uuid::Uuid;

/// Base trait for every record type managed through a REST resource.
///
/// Implementations are plain serde structs; the [`EntitySchema`] returned by
/// [`Entity::schema`] carries everything the generic controllers need to
/// know about them (resource path, key property, rules, relationships).
///
/// `Default` produces the blank working copy used by the create screen.
///
/// Usually implemented through [`impl_entity!`](crate::impl_entity).
pub trait Entity:
    Clone + Default + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Static metadata for this entity type
    fn schema() -> &'static EntitySchema;

    /// Identifier rendered for URLs, `None` while unset
    fn id(&self) -> Option<String>;

    /// Server-populated bookkeeping, if the entity is audited
    fn audit(&self) -> Option<&AuditFields> {
        None
    }

    /// A record is new exactly when its identifier is unset
    fn is_new(&self) -> bool {
        self.id().is_none()
    }

    /// The plural resource name used in URLs (e.g., "orders", "working-units")
    fn resource_name() -> &'static str {
        Self::schema().plural()
    }

    /// The singular resource name (e.g., "order", "working_unit")
    fn resource_name_singular() -> &'static str {
        Self::schema().name()
    }
}

/// Conversion of a key property into the string used in URLs
pub trait EntityKey {
    fn to_key(&self) -> Option<String>;
}

impl EntityKey for Option<Uuid> {
    fn to_key(&self) -> Option<String> {
        self.map(|id| id.to_string())
    }
}

/// Business keys: an empty string counts as unset
impl EntityKey for Option<String> {
    fn to_key(&self) -> Option<String> {
        self.as_deref().filter(|k| !k.is_empty()).map(str::to_string)
    }
}

impl EntityKey for Option<i64> {
    fn to_key(&self) -> Option<String> {
        self.map(|id| id.to_string())
    }
}

/// Creator/modifier identity and timestamps, maintained by the backend
///
/// Dates arrive as RFC 3339 strings and are parsed on deserialisation.
/// Unset values are left out of outgoing payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
}
