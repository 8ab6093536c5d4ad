//! Read-only detail screen

use super::CrudContext;
use crate::client::EntityClient;
use crate::core::entity::Entity;
use crate::core::error::AdminResult;
use std::sync::Arc;

/// Controller of the detail screen of `T`
pub struct DetailController<T: Entity> {
    client: Arc<dyn EntityClient<T>>,
    ctx: CrudContext,
    entity: Option<T>,
}

impl<T: Entity> DetailController<T> {
    pub fn new(client: Arc<dyn EntityClient<T>>, ctx: CrudContext) -> Self {
        Self {
            client,
            ctx,
            entity: None,
        }
    }

    pub fn entity(&self) -> Option<&T> {
        self.entity.as_ref()
    }

    /// Route entry: fetch the entity when the route carries an id
    pub async fn init(&mut self, route_id: Option<&str>) -> AdminResult<()> {
        match route_id {
            Some(id) => self.retrieve(id).await,
            None => Ok(()),
        }
    }

    pub async fn retrieve(&mut self, id: &str) -> AdminResult<()> {
        match self.client.find(id).await {
            Ok(entity) => {
                tracing::debug!(entity = T::resource_name_singular(), id, "detail loaded");
                self.entity = Some(entity);
                Ok(())
            }
            Err(e) => {
                self.ctx.alerts.show_http_error(&e);
                Err(e)
            }
        }
    }

    pub fn previous_state(&self) {
        self.ctx.navigator.previous_state();
    }
}
