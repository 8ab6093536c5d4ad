//! Core module containing the entity model and its supporting types

pub mod datetime;
pub mod entity;
pub mod error;
pub mod field;
pub mod pluralize;
pub mod query;
pub mod schema;
pub mod validation;

pub use datetime::{DateFormatter, convert_date_time_from_server, convert_date_time_to_server};
pub use entity::{AuditFields, Entity, EntityKey};
pub use error::{AdminError, AdminResult, ApiError, ConfigError, ErrorEnvelope, ValidationError};
pub use field::{Cardinality, FieldDescriptor, FieldKind, RelationshipDescriptor};
pub use pluralize::Pluralizer;
pub use query::{Direction, ListResponse, PageRequest, PaginationMeta, SortOrder};
pub use schema::EntitySchema;
pub use validation::{FieldViolation, Rule, ValidationReport};
