//! Order status lookup, keyed by its business code

use super::pattern;
use crate::core::field::{FieldDescriptor, FieldKind};
use crate::core::schema::EntitySchema;
use crate::core::validation::Rule;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderStatus {
    /// Business key, e.g. `IN_TRANSIT`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
    pub terminal: Option<bool>,
}

crate::impl_entity!(OrderStatus, key = status_code, schema = {
    EntitySchema::builder("order_status")
        .id_field("statusCode")
        .field(
            FieldDescriptor::new("statusCode", FieldKind::Text)
                .required()
                .rule(Rule::MaxLength(20))
                .rule(pattern(r"^[A-Z][A-Z_]*$")),
        )
        .field(
            FieldDescriptor::new("description", FieldKind::Text)
                .required()
                .rule(Rule::MaxLength(255)),
        )
        .field(
            FieldDescriptor::new("sortOrder", FieldKind::Integer)
                .rule(Rule::Integer)
                .rule(Rule::Min(0.0)),
        )
        .field(FieldDescriptor::new("terminal", FieldKind::Boolean))
        .authority(crate::router::auth::ADMIN_AUTHORITY)
        .build()
});
