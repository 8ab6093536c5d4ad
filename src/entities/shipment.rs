//! Shipment of an order from a working unit

use super::order::Order;
use super::working_unit::WorkingUnit;
use crate::core::entity::AuditFields;
use crate::core::field::{FieldDescriptor, FieldKind, RelationshipDescriptor};
use crate::core::schema::EntitySchema;
use crate::core::validation::Rule;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const CARRIERS: [&str; 4] = ["DHL", "UPS", "FEDEX", "OTHER"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Shipment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub tracking_code: Option<String>,
    pub carrier: Option<String>,
    pub shipped_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub order: Option<Order>,
    pub origin: Option<WorkingUnit>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

crate::impl_entity!(Shipment, key = id, audit = audit, schema = {
    let carriers: Vec<String> = CARRIERS.iter().map(|c| c.to_string()).collect();
    EntitySchema::builder("shipment")
        .field(
            FieldDescriptor::new("trackingCode", FieldKind::Text)
                .required()
                .rule(Rule::MaxLength(64)),
        )
        .field(
            FieldDescriptor::new("carrier", FieldKind::Enum(carriers.clone()))
                .rule(Rule::OneOf(carriers)),
        )
        .field(FieldDescriptor::new("shippedAt", FieldKind::Instant))
        .field(FieldDescriptor::new("deliveredAt", FieldKind::Instant))
        .relationship(
            RelationshipDescriptor::one("order", "order")
                .display("orderNumber")
                .required(),
        )
        .relationship(RelationshipDescriptor::one("origin", "working_unit").display("name"))
        .searchable()
        .build()
});
