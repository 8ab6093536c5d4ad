//! Generic list, detail and update screens driven by entity schemas
//!
//! Each controller owns the state of one screen and is parameterised by an
//! [`Entity`](crate::core::entity::Entity) type. Backend access goes through
//! an injected [`EntityClient`](crate::client::EntityClient); alerts and
//! navigation go through the [`CrudContext`].

pub mod alerts;
pub mod detail;
pub mod list;
pub mod navigation;
pub mod update;

pub use alerts::{AlertMessage, Alerts, TracingAlerts};
pub use detail::DetailController;
pub use list::{ListController, ListState};
pub use navigation::{HistoryNavigator, Navigator};
pub use update::UpdateController;

use crate::config::AdminConfig;
use std::sync::Arc;

/// Collaborators shared by every controller
#[derive(Clone)]
pub struct CrudContext {
    pub alerts: Arc<dyn Alerts>,
    pub navigator: Arc<dyn Navigator>,
    pub config: Arc<AdminConfig>,
}

impl CrudContext {
    pub fn new(
        alerts: Arc<dyn Alerts>,
        navigator: Arc<dyn Navigator>,
        config: Arc<AdminConfig>,
    ) -> Self {
        Self {
            alerts,
            navigator,
            config,
        }
    }

    /// Alert message for `action` on an entity, e.g. `depotApp.order.deleted`
    pub(crate) fn message(&self, i18n_key: &str, action: &str, id: Option<&str>) -> AlertMessage {
        let message = AlertMessage::new(self.config.message_key(i18n_key, action));
        match id {
            Some(id) => message.param("param", id),
            None => message,
        }
    }
}

impl Default for CrudContext {
    /// Log-only alerts, an in-process history and default configuration
    fn default() -> Self {
        Self::new(
            Arc::new(TracingAlerts),
            Arc::new(HistoryNavigator::default()),
            Arc::new(AdminConfig::default()),
        )
    }
}
