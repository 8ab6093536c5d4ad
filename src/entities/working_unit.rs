//! Warehouse, store or hub that holds stock

use super::user_address::UserAddress;
use crate::core::entity::AuditFields;
use crate::core::field::{FieldDescriptor, FieldKind, RelationshipDescriptor};
use crate::core::schema::EntitySchema;
use crate::core::validation::Rule;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const UNIT_KINDS: [&str; 3] = ["WAREHOUSE", "STORE", "HUB"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkingUnit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub code: Option<String>,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub capacity: Option<i64>,
    pub address: Option<UserAddress>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

crate::impl_entity!(WorkingUnit, key = id, audit = audit, schema = {
    let kinds: Vec<String> = UNIT_KINDS.iter().map(|k| k.to_string()).collect();
    EntitySchema::builder("working_unit")
        .field(
            FieldDescriptor::new("code", FieldKind::Text)
                .required()
                .rule(Rule::MaxLength(16)),
        )
        .field(FieldDescriptor::new("name", FieldKind::Text).required())
        .field(
            FieldDescriptor::new("kind", FieldKind::Enum(kinds.clone()))
                .required()
                .rule(Rule::OneOf(kinds)),
        )
        .field(
            FieldDescriptor::new("capacity", FieldKind::Integer)
                .rule(Rule::Integer)
                .rule(Rule::Min(0.0)),
        )
        .relationship(RelationshipDescriptor::one("address", "user_address").display("street"))
        .build()
});
