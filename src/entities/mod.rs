//! Warehouse and order-management entities

pub mod macros;

pub mod invoice;
pub mod order;
pub mod order_status;
pub mod product;
pub mod shipment;
pub mod user_address;
pub mod working_unit;

pub use invoice::Invoice;
pub use order::Order;
pub use order_status::OrderStatus;
pub use product::Product;
pub use shipment::Shipment;
pub use user_address::UserAddress;
pub use working_unit::WorkingUnit;

use crate::core::entity::Entity;
use crate::core::schema::EntitySchema;
use crate::core::validation::Rule;
use crate::router::RouteTable;

/// Pattern rule from a literal expression
fn pattern(expr: &str) -> Rule {
    Rule::pattern(expr).expect("entity patterns are valid regular expressions")
}

/// Schemas of every entity, in menu order
pub fn schemas() -> Vec<&'static EntitySchema> {
    vec![
        Order::schema(),
        OrderStatus::schema(),
        Invoice::schema(),
        Shipment::schema(),
        Product::schema(),
        WorkingUnit::schema(),
        UserAddress::schema(),
    ]
}

/// Register the list/create/edit/view screens of every entity
pub fn register_routes(table: &mut RouteTable) {
    for schema in schemas() {
        table.register(schema);
    }
}
