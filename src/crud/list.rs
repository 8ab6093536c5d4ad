//! List screen: paged table with search, sorting and delete-with-confirmation

use super::CrudContext;
use crate::client::{EntityClient, ensure_searchable};
use crate::core::entity::Entity;
use crate::core::error::{AdminError, AdminResult};
use crate::core::query::{Direction, PageRequest, PaginationMeta, SortOrder};
use std::sync::Arc;

/// Where a list screen is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListState {
    #[default]
    Idle,
    Fetching,
    /// A delete confirmation is open
    Removing,
}

/// Page, sort and search term a fetch is made with
#[derive(Debug, Clone)]
struct ListQuery {
    page: usize,
    order: SortOrder,
    search: Option<String>,
}

/// Controller of the list screen of `T`
pub struct ListController<T: Entity> {
    client: Arc<dyn EntityClient<T>>,
    ctx: CrudContext,
    entities: Vec<T>,
    total_items: Option<u64>,
    page: usize,
    items_per_page: usize,
    order: SortOrder,
    current_search: Option<String>,
    state: ListState,
    remove_id: Option<String>,
}

impl<T: Entity> ListController<T> {
    pub fn new(client: Arc<dyn EntityClient<T>>, ctx: CrudContext) -> Self {
        let items_per_page = ctx.config.items_per_page;
        Self {
            client,
            ctx,
            entities: Vec::new(),
            total_items: None,
            page: 1,
            items_per_page,
            order: SortOrder::asc(T::schema().id_field()),
            current_search: None,
            state: ListState::Idle,
            remove_id: None,
        }
    }

    pub fn entities(&self) -> &[T] {
        &self.entities
    }

    /// Total across all pages, from `X-Total-Count` when the backend sends it
    pub fn total_items(&self) -> Option<u64> {
        self.total_items
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn order(&self) -> &SortOrder {
        &self.order
    }

    pub fn current_search(&self) -> Option<&str> {
        self.current_search.as_deref()
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    pub fn is_fetching(&self) -> bool {
        self.state == ListState::Fetching
    }

    /// Identifier awaiting delete confirmation
    pub fn remove_id(&self) -> Option<&str> {
        self.remove_id.as_deref()
    }

    pub fn pagination(&self) -> Option<PaginationMeta> {
        self.total_items
            .map(|total| PaginationMeta::new(self.page, self.items_per_page, total))
    }

    /// Request for the current page and sort; the id field breaks ties
    pub fn page_request(&self) -> PageRequest {
        let mut request = PageRequest::new(self.page, self.items_per_page).with_sort(self.order.clone());
        let id_field = T::schema().id_field();
        if self.order.field != id_field {
            request = request.with_sort(SortOrder::asc(id_field));
        }
        request
    }

    /// Fetch the current page, through search when a term is active
    ///
    /// On failure the list is left as it was and the error is alerted.
    pub async fn retrieve_all(&mut self) -> AdminResult<()> {
        let request = self.page_request();
        let resume = match self.state {
            ListState::Removing => ListState::Removing,
            _ => ListState::Idle,
        };
        self.state = ListState::Fetching;

        let result = match &self.current_search {
            Some(query) => self.client.search(query, &request).await,
            None => self.client.list(&request).await,
        };
        self.state = resume;

        match result {
            Ok(response) => {
                self.total_items = response
                    .total_count()
                    .or(Some(response.items.len() as u64));
                self.entities = response.items;
                tracing::debug!(
                    entity = T::resource_name_singular(),
                    count = self.entities.len(),
                    total = self.total_items,
                    "list loaded"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(entity = T::resource_name_singular(), error = %e, "list fetch failed");
                self.ctx.alerts.show_http_error(&e);
                Err(e)
            }
        }
    }

    fn query(&self) -> ListQuery {
        ListQuery {
            page: self.page,
            order: self.order.clone(),
            search: self.current_search.clone(),
        }
    }

    /// Fetch after a query change; a failed fetch restores `previous`
    async fn requery(&mut self, previous: ListQuery) -> AdminResult<()> {
        let result = self.retrieve_all().await;
        if result.is_err() {
            self.page = previous.page;
            self.order = previous.order;
            self.current_search = previous.search;
        }
        result
    }

    /// Search from the first page; a blank query clears the search
    ///
    /// Entities without full-text search answer `Unsupported` and keep
    /// their current query.
    pub async fn search(&mut self, query: &str) -> AdminResult<()> {
        let query = query.trim();
        if query.is_empty() {
            return self.clear().await;
        }
        ensure_searchable::<T>()?;
        let previous = self.query();
        self.current_search = Some(query.to_string());
        self.page = 1;
        self.requery(previous).await
    }

    /// Drop the search term and reload the first page
    pub async fn clear(&mut self) -> AdminResult<()> {
        let previous = self.query();
        self.current_search = None;
        self.page = 1;
        self.requery(previous).await
    }

    /// Reload from the first page keeping search and sort
    pub async fn handle_sync_list(&mut self) -> AdminResult<()> {
        let previous = self.query();
        self.page = 1;
        self.requery(previous).await
    }

    /// Sort by `field`; the same field again flips the direction
    pub async fn change_order(&mut self, field: &str) -> AdminResult<()> {
        let previous = self.query();
        self.order = if self.order.field == field {
            SortOrder {
                field: field.to_string(),
                direction: self.order.direction.reversed(),
            }
        } else {
            SortOrder {
                field: field.to_string(),
                direction: Direction::Asc,
            }
        };
        self.requery(previous).await
    }

    /// Switch to 1-based `page`; the current page is not refetched
    pub async fn load_page(&mut self, page: usize) -> AdminResult<()> {
        let page = page.max(1);
        if page == self.page {
            return Ok(());
        }
        let previous = self.query();
        self.page = page;
        self.requery(previous).await
    }

    /// Open the delete confirmation for `entity`
    pub fn prepare_remove(&mut self, entity: &T) -> AdminResult<()> {
        let id = entity.id().ok_or_else(|| AdminError::MissingIdentifier {
            entity: T::resource_name_singular().to_string(),
        })?;
        self.remove_id = Some(id);
        self.state = ListState::Removing;
        Ok(())
    }

    pub fn cancel_remove(&mut self) {
        self.remove_id = None;
        self.state = ListState::Idle;
    }

    /// Delete the confirmed entity, then refetch the list once
    ///
    /// A failed delete keeps the confirmation open and the list unchanged.
    /// Once the delete succeeds the result is `Ok`; a failing refetch is
    /// only alerted and logged, the stale rows stay until the next fetch.
    pub async fn remove_entity(&mut self) -> AdminResult<()> {
        let id = self
            .remove_id
            .clone()
            .ok_or_else(|| AdminError::MissingIdentifier {
                entity: T::resource_name_singular().to_string(),
            })?;

        if let Err(e) = self.client.delete(&id).await {
            self.ctx.alerts.show_http_error(&e);
            return Err(e);
        }

        let message = self
            .ctx
            .message(&T::schema().i18n_key(), "deleted", Some(&id));
        self.ctx.alerts.show_info(&message);
        self.remove_id = None;
        self.state = ListState::Idle;
        if let Err(e) = self.retrieve_all().await {
            tracing::warn!(
                entity = T::resource_name_singular(),
                %id,
                error = %e,
                "refetch after delete failed"
            );
        }
        Ok(())
    }
}
