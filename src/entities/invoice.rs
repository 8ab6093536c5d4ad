//! Invoice raised against an order

use super::order::Order;
use crate::core::entity::AuditFields;
use crate::core::field::{FieldDescriptor, FieldKind, RelationshipDescriptor};
use crate::core::schema::EntitySchema;
use crate::core::validation::Rule;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Invoice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub invoice_number: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub paid: Option<bool>,
    pub order: Option<Order>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

crate::impl_entity!(Invoice, key = id, audit = audit, schema = {
    EntitySchema::builder("invoice")
        .field(FieldDescriptor::new("invoiceNumber", FieldKind::Text).required())
        .field(FieldDescriptor::new("issueDate", FieldKind::Date).required())
        .field(FieldDescriptor::new("dueDate", FieldKind::Date))
        .field(
            FieldDescriptor::new("amount", FieldKind::Decimal)
                .required()
                .rule(Rule::Numeric)
                .rule(Rule::Min(0.0)),
        )
        .field(FieldDescriptor::new("paid", FieldKind::Boolean))
        .relationship(
            RelationshipDescriptor::one("order", "order")
                .display("orderNumber")
                .required(),
        )
        .build()
});
