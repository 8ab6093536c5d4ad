//! Customer order

use super::order_status::OrderStatus;
use super::product::Product;
use super::user_address::UserAddress;
use crate::core::entity::AuditFields;
use crate::core::field::{FieldDescriptor, FieldKind, RelationshipDescriptor};
use crate::core::schema::EntitySchema;
use crate::core::validation::Rule;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub order_number: Option<String>,
    pub order_date: Option<DateTime<Utc>>,
    pub total_amount: Option<f64>,
    pub notes: Option<String>,
    pub status: Option<OrderStatus>,
    pub shipping_address: Option<UserAddress>,
    pub products: Vec<Product>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

crate::impl_entity!(Order, key = id, audit = audit, schema = {
    EntitySchema::builder("order")
        .field(
            FieldDescriptor::new("orderNumber", FieldKind::Text)
                .required()
                .rule(Rule::MaxLength(32)),
        )
        .field(FieldDescriptor::new("orderDate", FieldKind::Instant).required())
        .field(
            FieldDescriptor::new("totalAmount", FieldKind::Decimal)
                .rule(Rule::Numeric)
                .rule(Rule::Min(0.0)),
        )
        .field(FieldDescriptor::new("notes", FieldKind::Text).rule(Rule::MaxLength(1000)))
        .relationship(
            RelationshipDescriptor::one("status", "order_status")
                .key_field("statusCode")
                .display("description")
                .required(),
        )
        .relationship(RelationshipDescriptor::one("shippingAddress", "user_address").display("street"))
        .relationship(RelationshipDescriptor::many("products", "product").display("name"))
        .searchable()
        .build()
});
