//! # depot
//!
//! Administrative client for a warehouse and order-management backend.
//!
//! ## Features
//!
//! - **Typed entity clients**: one `EntityClient<T>` per resource, REST or in-memory
//! - **Schema-driven screens**: generic list, detail and update controllers
//! - **Declarative validation**: per-field rules evaluated on every change
//! - **Route table**: `/<entity>`, `/<entity>/new`, `/<entity>/:id/edit`, `/<entity>/:id/view`
//! - **Configuration-Based**: YAML configuration checked on load
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use depot::prelude::*;
//!
//! let config = AdminConfig::from_yaml_file("depot.yaml")?;
//! let transport = HttpTransport::new(&config)?;
//! let orders: Arc<dyn EntityClient<Order>> = Arc::new(RestEntityClient::new(transport.clone()));
//! let statuses: Arc<dyn EntityClient<OrderStatus>> = Arc::new(RestEntityClient::new(transport));
//!
//! let ctx = CrudContext::new(Arc::new(TracingAlerts), navigator, Arc::new(config));
//! let mut form = UpdateController::new(orders, ctx)
//!     .with_options("status", ClientOptions::shared(statuses))?;
//! form.init(Some("9fec3727-3421-4967-b213-ba36557ca194")).await?;
//! form.set_field("notes", json!("fragile"))?;
//! form.save().await?;
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod crud;
pub mod entities;
pub mod router;
pub mod telemetry;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        AdminError, AdminResult, AuditFields, DateFormatter, Entity, EntityKey, EntitySchema,
        FieldDescriptor, FieldKind, PageRequest, RelationshipDescriptor, Rule, SortOrder,
        ValidationReport, convert_date_time_from_server,
    };

    // === Macros ===
    pub use crate::impl_entity;

    // === Clients ===
    pub use crate::client::{
        ClientOptions, EntityClient, HttpTransport, InMemoryEntityClient, OptionSource,
        RestEntityClient,
    };

    // === Screens ===
    pub use crate::crud::{
        AlertMessage, Alerts, CrudContext, DetailController, HistoryNavigator, ListController,
        Navigator, TracingAlerts, UpdateController,
    };

    // === Routing ===
    pub use crate::router::{AuthContext, AuthPolicy, RouteKind, RouteMatch, RouteTable};

    // === Entities ===
    pub use crate::entities::{
        Invoice, Order, OrderStatus, Product, Shipment, UserAddress, WorkingUnit,
    };

    // === Config ===
    pub use crate::config::{AdminConfig, SubmitPolicy};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
