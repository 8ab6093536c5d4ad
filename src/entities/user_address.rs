//! Postal address of a user or site

use super::pattern;
use crate::core::entity::AuditFields;
use crate::core::field::{FieldDescriptor, FieldKind};
use crate::core::schema::EntitySchema;
use crate::core::validation::Rule;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub login: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

crate::impl_entity!(UserAddress, key = id, audit = audit, schema = {
    EntitySchema::builder("user_address")
        .field(FieldDescriptor::new("login", FieldKind::Text).required())
        .field(
            FieldDescriptor::new("street", FieldKind::Text)
                .required()
                .rule(Rule::MaxLength(200)),
        )
        .field(FieldDescriptor::new("city", FieldKind::Text).required())
        .field(FieldDescriptor::new("postalCode", FieldKind::Text).rule(pattern(r"^[0-9A-Z -]{3,10}$")))
        .field(
            FieldDescriptor::new("countryCode", FieldKind::Text)
                .required()
                .rule(Rule::MinLength(2))
                .rule(Rule::MaxLength(2)),
        )
        .build()
});
