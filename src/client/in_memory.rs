//! In-memory implementation of [`EntityClient`] for development and testing
//!
//! Behaves like a minimal backend: identifiers are assigned on create,
//! unknown identifiers answer 404, lists are paged and carry
//! `X-Total-Count`.

use super::{EntityClient, ResponseMeta, ensure_searchable, merge_patch_body};
use crate::core::entity::Entity;
use crate::core::error::{AdminError, AdminResult, ApiError};
use crate::core::query::{ListResponse, PageRequest};
use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory entity store
///
/// Uses a `RwLock` for thread-safe access; clones share the same data.
/// Insertion order is kept, so unsorted lists are stable.
pub struct InMemoryEntityClient<T: Entity> {
    entities: Arc<RwLock<IndexMap<String, T>>>,
}

impl<T: Entity> Clone for InMemoryEntityClient<T> {
    fn clone(&self) -> Self {
        Self {
            entities: Arc::clone(&self.entities),
        }
    }
}

impl<T: Entity> Default for InMemoryEntityClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> InMemoryEntityClient<T> {
    pub fn new() -> Self {
        Self {
            entities: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Pre-populate with entities that already carry identifiers
    pub fn with_entities(entities: impl IntoIterator<Item = T>) -> Self {
        let store = Self::new();
        if let Ok(mut map) = store.entities.write() {
            for entity in entities {
                if let Some(id) = entity.id() {
                    map.insert(id, entity);
                }
            }
        }
        store
    }

    pub fn len(&self) -> usize {
        self.entities.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> AdminResult<std::sync::RwLockReadGuard<'_, IndexMap<String, T>>> {
        self.entities
            .read()
            .map_err(|e| lock_error(&format!("Failed to acquire read lock: {e}")))
    }

    fn write(&self) -> AdminResult<std::sync::RwLockWriteGuard<'_, IndexMap<String, T>>> {
        self.entities
            .write()
            .map_err(|e| lock_error(&format!("Failed to acquire write lock: {e}")))
    }

    fn not_found(id: &str) -> AdminError {
        AdminError::Api(ApiError::from_body(
            404,
            &serde_json::json!({
                "title": "Not Found",
                "status": 404,
                "detail": format!("{} {} not found", T::resource_name_singular(), id),
                "message": "error.http.404"
            })
            .to_string(),
        ))
    }

    fn page(items: Vec<T>, request: &PageRequest) -> AdminResult<ListResponse<T>> {
        let mut items = items;
        if !request.sort.is_empty() {
            let mut keyed = items
                .into_iter()
                .map(|item| serde_json::to_value(&item).map(|value| (value, item)))
                .collect::<Result<Vec<_>, _>>()?;
            keyed.sort_by(|(a, _), (b, _)| {
                request
                    .sort
                    .iter()
                    .map(|order| {
                        let ordering = compare_json(&a[&order.field], &b[&order.field]);
                        match order.direction {
                            crate::core::query::Direction::Asc => ordering,
                            crate::core::query::Direction::Desc => ordering.reverse(),
                        }
                    })
                    .find(|o| o.is_ne())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            items = keyed.into_iter().map(|(_, item)| item).collect();
        }

        let total = items.len() as u64;
        let items = match (request.page, request.size) {
            (page, Some(size)) => {
                let page = page.unwrap_or(1).max(1);
                items
                    .into_iter()
                    .skip((page - 1).saturating_mul(size))
                    .take(size)
                    .collect()
            }
            _ => items,
        };
        Ok(ListResponse::with_total(items, total))
    }
}

#[async_trait]
impl<T: Entity> EntityClient<T> for InMemoryEntityClient<T> {
    async fn find(&self, id: &str) -> AdminResult<T> {
        self.read()?.get(id).cloned().ok_or_else(|| Self::not_found(id))
    }

    async fn list(&self, request: &PageRequest) -> AdminResult<ListResponse<T>> {
        let items: Vec<T> = self.read()?.values().cloned().collect();
        Self::page(items, request)
    }

    async fn search(&self, query: &str, request: &PageRequest) -> AdminResult<ListResponse<T>> {
        ensure_searchable::<T>()?;
        let needle = query.to_lowercase();
        let mut matches = Vec::new();
        for item in self.read()?.values() {
            if contains_text(&serde_json::to_value(item)?, &needle) {
                matches.push(item.clone());
            }
        }
        Self::page(matches, request)
    }

    async fn create(&self, entity: &T) -> AdminResult<T> {
        let mut value = serde_json::to_value(entity)?;
        let id_field = T::schema().id_field();
        let id = match entity.id() {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4().to_string();
                value[id_field] = Value::String(id.clone());
                id
            }
        };
        stamp_audit(&mut value, true);

        let created: T = serde_json::from_value(value)?;
        let mut map = self.write()?;
        if map.contains_key(&id) {
            return Err(AdminError::Api(ApiError::from_body(
                409,
                &format!("{} {} already exists", T::resource_name_singular(), id),
            )));
        }
        map.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, entity: &T) -> AdminResult<T> {
        let id = entity.id().ok_or_else(|| AdminError::MissingIdentifier {
            entity: T::resource_name_singular().to_string(),
        })?;
        let mut map = self.write()?;
        let existing = map.get(&id).ok_or_else(|| Self::not_found(&id))?;

        let mut value = serde_json::to_value(entity)?;
        carry_created(&serde_json::to_value(existing)?, &mut value);
        stamp_audit(&mut value, false);
        let updated: T = serde_json::from_value(value)?;
        map.insert(id, updated.clone());
        Ok(updated)
    }

    async fn partial_update(&self, entity: &T) -> AdminResult<T> {
        let id = entity.id().ok_or_else(|| AdminError::MissingIdentifier {
            entity: T::resource_name_singular().to_string(),
        })?;
        let patch = merge_patch_body(entity)?;
        let mut map = self.write()?;
        let existing = map.get(&id).ok_or_else(|| Self::not_found(&id))?;

        let mut value = serde_json::to_value(existing)?;
        if let (Value::Object(target), Value::Object(patch)) = (&mut value, patch) {
            target.extend(patch);
        }
        stamp_audit(&mut value, false);
        let updated: T = serde_json::from_value(value)?;
        map.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> AdminResult<ResponseMeta> {
        match self.write()?.shift_remove(id) {
            Some(_) => Ok(ResponseMeta {
                status: 204,
                headers: HeaderMap::new(),
            }),
            None => Err(Self::not_found(id)),
        }
    }
}

fn lock_error(message: &str) -> AdminError {
    AdminError::Api(ApiError::from_body(500, message))
}

fn stamp_audit(value: &mut Value, created: bool) {
    let Value::Object(map) = value else {
        return;
    };
    let now = Value::String(Utc::now().to_rfc3339());
    if created {
        map.insert("createdDate".to_string(), now.clone());
    }
    map.insert("lastModifiedDate".to_string(), now);
}

fn carry_created(existing: &Value, value: &mut Value) {
    let Value::Object(map) = value else {
        return;
    };
    for key in ["createdBy", "createdDate"] {
        if let Some(v) = existing.get(key).filter(|v| !v.is_null()) {
            map.insert(key.to_string(), v.clone());
        }
    }
}

fn contains_text(value: &Value, needle: &str) -> bool {
    match value {
        Value::String(s) => s.to_lowercase().contains(needle),
        Value::Number(n) => n.to_string().contains(needle),
        Value::Array(items) => items.iter().any(|v| contains_text(v, needle)),
        Value::Object(map) => map.values().any(|v| contains_text(v, needle)),
        _ => false,
    }
}

fn compare_json(a: &Value, b: &Value) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}
