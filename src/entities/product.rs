//! Catalogue product

use super::pattern;
use crate::core::entity::AuditFields;
use crate::core::field::{FieldDescriptor, FieldKind};
use crate::core::schema::EntitySchema;
use crate::core::validation::Rule;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub sku: Option<String>,
    pub name: Option<String>,
    pub unit_price: Option<f64>,
    /// Kilograms
    pub weight: Option<f64>,
    pub active: Option<bool>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

crate::impl_entity!(Product, key = id, audit = audit, schema = {
    EntitySchema::builder("product")
        .field(
            FieldDescriptor::new("sku", FieldKind::Text)
                .required()
                .rule(pattern(r"^[A-Z0-9-]{4,32}$")),
        )
        .field(
            FieldDescriptor::new("name", FieldKind::Text)
                .required()
                .rule(Rule::MaxLength(100)),
        )
        .field(
            FieldDescriptor::new("unitPrice", FieldKind::Decimal)
                .required()
                .rule(Rule::Numeric)
                .rule(Rule::Min(0.0)),
        )
        .field(
            FieldDescriptor::new("weight", FieldKind::Decimal)
                .rule(Rule::Numeric)
                .rule(Rule::Min(0.0)),
        )
        .field(FieldDescriptor::new("active", FieldKind::Boolean))
        .searchable()
        .build()
});
