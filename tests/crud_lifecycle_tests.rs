//! Lifecycle tests of the generic list, detail and update screens
//!
//! These tests verify that:
//! - save picks create or update from the identifier alone
//! - successful saves navigate back exactly once and clear `is_saving`
//! - a delete refetches the list exactly once and closes the confirmation
//! - route ids trigger exactly one `find`
//! - failures are alerted and leave state untouched

mod common;

use chrono::{TimeZone, Utc};
use common::{Alert, Call, Harness, RecordingClient};
use depot::client::{ClientOptions, EntityClient, InMemoryEntityClient};
use depot::config::{AdminConfig, SubmitPolicy};
use depot::core::{AdminError, ValidationError, convert_date_time_from_server};
use depot::crud::{DetailController, ListController, ListState, UpdateController};
use depot::entities::{Order, OrderStatus, Product};
use serde_json::json;
use uuid::Uuid;

const SAMPLE_ID: &str = "9fec3727-3421-4967-b213-ba36557ca194";

fn sample_order() -> Order {
    Order {
        id: Some(Uuid::parse_str(SAMPLE_ID).unwrap()),
        ..Order::default()
    }
}

fn product(sku: &str) -> Product {
    Product {
        sku: Some(sku.to_string()),
        name: Some(format!("Product {sku}")),
        unit_price: Some(9.5),
        ..Product::default()
    }
}

// =============================================================================
// Update screen
// =============================================================================

mod update_tests {
    use super::*;

    #[tokio::test]
    async fn test_save_existing_entity_calls_update_with_that_entity() {
        let store = InMemoryEntityClient::with_entities([sample_order()]);
        let client = RecordingClient::new(store);
        let h = Harness::new();
        let mut update = UpdateController::new(client.clone(), h.ctx.clone());

        update.set_entity(sample_order());
        let saved = update.save().await.unwrap();

        assert_eq!(client.calls(), vec![Call::Update(sample_order())]);
        assert_eq!(saved.id, sample_order().id);
        assert!(!update.is_saving());
    }

    #[tokio::test]
    async fn test_save_new_entity_calls_create() {
        let client = RecordingClient::<Order>::empty();
        let h = Harness::new();
        let mut update = UpdateController::new(client.clone(), h.ctx.clone());

        let draft = Order {
            order_number: Some("SO-1".to_string()),
            ..Order::default()
        };
        update.set_entity(draft.clone());
        let saved = update.save().await.unwrap();

        assert_eq!(client.calls(), vec![Call::Create(draft)]);
        assert!(saved.id.is_some());
        assert!(!update.is_saving());
    }

    #[tokio::test]
    async fn test_successful_save_navigates_back_once_and_alerts() {
        let client = RecordingClient::<Product>::empty();
        let h = Harness::new();
        let mut update = UpdateController::new(client.clone(), h.ctx.clone());

        update.set_entity(product("SKU-0001"));
        let created = update.save().await.unwrap();
        assert_eq!(h.navigator.back_count(), 1);

        update.set_field("name", json!("Renamed")).unwrap();
        update.save().await.unwrap();
        assert_eq!(h.navigator.back_count(), 2);

        let id = created.id.unwrap().to_string();
        let alerts = h.alerts.all();
        assert_eq!(alerts.len(), 2);
        match &alerts[0] {
            Alert::Success(m) => {
                assert_eq!(m.key, "depotApp.product.created");
                assert_eq!(m.params.get("param"), Some(&id));
            }
            other => panic!("expected success alert, got {other:?}"),
        }
        match &alerts[1] {
            Alert::Info(m) => assert_eq!(m.key, "depotApp.product.updated"),
            other => panic!("expected info alert, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_save_alerts_and_stays() {
        let client = RecordingClient::<Order>::empty();
        client.fail_with(500);
        let h = Harness::new();
        let mut update = UpdateController::new(client.clone(), h.ctx.clone());
        update.set_entity(sample_order());

        let err = update.save().await.unwrap_err();
        assert_eq!(err.status_code(), Some(500));
        assert!(!update.is_saving());
        assert_eq!(h.navigator.back_count(), 0);
        assert_eq!(h.alerts.all(), vec![Alert::HttpError(Some(500))]);
    }

    #[tokio::test]
    async fn test_blocking_policy_sends_nothing() {
        let client = RecordingClient::<Order>::empty();
        let h = Harness::with_config(AdminConfig {
            submit_policy: SubmitPolicy::Blocking,
            ..AdminConfig::default()
        });
        let mut update = UpdateController::new(client.clone(), h.ctx.clone());

        let err = update.save().await.unwrap_err();
        match err {
            AdminError::Validation(ValidationError::Rejected { report, .. }) => {
                assert!(report.has_error("orderNumber"));
                assert!(report.has_error("status"));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert!(client.calls().is_empty());
        assert_eq!(h.navigator.back_count(), 0);
    }

    #[tokio::test]
    async fn test_init_with_route_id_finds_once() {
        let store = InMemoryEntityClient::with_entities([sample_order()]);
        let client = RecordingClient::new(store);
        let h = Harness::new();
        let mut update = UpdateController::new(client.clone(), h.ctx.clone());

        update.init(Some(SAMPLE_ID)).await.unwrap();
        assert_eq!(client.calls(), vec![Call::Find(SAMPLE_ID.to_string())]);
        assert_eq!(update.entity(), &sample_order());
    }

    #[tokio::test]
    async fn test_init_without_id_starts_blank() {
        let client = RecordingClient::<Order>::empty();
        let h = Harness::new();
        let mut update = UpdateController::new(client.clone(), h.ctx.clone());

        update.init(None).await.unwrap();
        assert!(client.calls().is_empty());
        assert!(update.entity().id.is_none());
        assert!(update.validation().has_error("orderNumber"));
    }

    #[tokio::test]
    async fn test_failed_option_fetch_leaves_list_empty() {
        let orders = RecordingClient::new(InMemoryEntityClient::with_entities([sample_order()]));
        let statuses = RecordingClient::new(InMemoryEntityClient::with_entities([OrderStatus {
            status_code: Some("NEW".to_string()),
            description: Some("New".to_string()),
            ..OrderStatus::default()
        }]));
        let products = RecordingClient::<Product>::empty();
        products.fail_with(503);

        let h = Harness::new();
        let mut update = UpdateController::new(orders.clone(), h.ctx.clone())
            .with_options("status", ClientOptions::shared(statuses.clone()))
            .unwrap()
            .with_options("products", ClientOptions::shared(products.clone()))
            .unwrap();

        update.init(Some(SAMPLE_ID)).await.unwrap();
        assert_eq!(update.options("status").len(), 1);
        assert!(update.options("products").is_empty());
        assert_eq!(statuses.fetch_count(), 1);
        assert_eq!(products.fetch_count(), 1);
        // option failures are logged, not alerted
        assert_eq!(h.alerts.errors(), 0);

        update.select_option("status", "NEW").unwrap();
        assert_eq!(
            update.entity().status.as_ref().and_then(|s| s.status_code.as_deref()),
            Some("NEW")
        );
    }

    #[tokio::test]
    async fn test_unknown_route_id_alerts_404() {
        let client = RecordingClient::<Order>::empty();
        let h = Harness::new();
        let mut update = UpdateController::new(client.clone(), h.ctx.clone());

        let err = update.init(Some("nope")).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(h.alerts.all(), vec![Alert::HttpError(Some(404))]);
    }
}

// =============================================================================
// Detail screen
// =============================================================================

mod detail_tests {
    use super::*;

    #[tokio::test]
    async fn test_init_finds_once_and_stores_entity() {
        let client = RecordingClient::new(InMemoryEntityClient::with_entities([sample_order()]));
        let h = Harness::new();
        let mut detail = DetailController::new(client.clone(), h.ctx.clone());

        detail.init(Some(SAMPLE_ID)).await.unwrap();
        assert_eq!(client.calls(), vec![Call::Find(SAMPLE_ID.to_string())]);
        assert_eq!(detail.entity(), Some(&sample_order()));

        detail.previous_state();
        assert_eq!(h.navigator.back_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_find_is_alerted() {
        let client = RecordingClient::<Order>::empty();
        client.fail_with(500);
        let h = Harness::new();
        let mut detail = DetailController::new(client.clone(), h.ctx.clone());

        assert!(detail.init(Some(SAMPLE_ID)).await.is_err());
        assert!(detail.entity().is_none());
        assert_eq!(h.alerts.errors(), 1);
    }
}

// =============================================================================
// List screen
// =============================================================================

mod list_tests {
    use super::*;

    async fn seeded(n: usize) -> std::sync::Arc<RecordingClient<Product>> {
        let store = InMemoryEntityClient::<Product>::new();
        for i in 0..n {
            store.create(&product(&format!("SKU-{i:04}"))).await.unwrap();
        }
        RecordingClient::new(store)
    }

    #[tokio::test]
    async fn test_successful_delete_refetches_once_and_closes_dialog() {
        let client = seeded(3).await;
        let h = Harness::new();
        let mut list = ListController::new(client.clone(), h.ctx.clone());
        list.retrieve_all().await.unwrap();
        let before = client.fetch_count();

        let target = list.entities()[0].clone();
        list.prepare_remove(&target).unwrap();
        list.remove_entity().await.unwrap();

        assert_eq!(client.fetch_count(), before + 1);
        assert_eq!(list.state(), ListState::Idle);
        assert_eq!(list.remove_id(), None);
        assert_eq!(list.entities().len(), 2);

        let id = target.id.unwrap().to_string();
        match h.alerts.all().last() {
            Some(Alert::Info(m)) => {
                assert_eq!(m.key, "depotApp.product.deleted");
                assert_eq!(m.params.get("param"), Some(&id));
            }
            other => panic!("expected info alert, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_succeeds_even_if_refetch_fails() {
        let client = seeded(3).await;
        let h = Harness::new();
        let mut list = ListController::new(client.clone(), h.ctx.clone());
        list.retrieve_all().await.unwrap();

        let target = list.entities()[0].clone();
        list.prepare_remove(&target).unwrap();
        client.fail_fetches_with(503);
        list.remove_entity().await.unwrap();

        assert_eq!(client.store.len(), 2);
        assert_eq!(list.state(), ListState::Idle);
        assert_eq!(list.remove_id(), None);
        assert_eq!(list.entities().len(), 3);
        assert_eq!(h.alerts.errors(), 1);

        client.recover();
        list.handle_sync_list().await.unwrap();
        assert_eq!(list.entities().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_page_change_keeps_page() {
        let client = seeded(25).await;
        let h = Harness::new();
        let mut list = ListController::new(client.clone(), h.ctx.clone());
        list.retrieve_all().await.unwrap();

        client.fail_fetches_with(502);
        assert!(list.load_page(2).await.is_err());
        assert_eq!(list.page(), 1);
        assert!(list.change_order("sku").await.is_err());
        assert_eq!(list.order().field, "id");
        assert!(list.search("sku-0001").await.is_err());
        assert_eq!(list.current_search(), None);
        assert_eq!(list.entities().len(), 20);
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_list_and_dialog() {
        let client = seeded(2).await;
        let h = Harness::new();
        let mut list = ListController::new(client.clone(), h.ctx.clone());
        list.retrieve_all().await.unwrap();
        let before = client.fetch_count();

        let target = list.entities()[1].clone();
        list.prepare_remove(&target).unwrap();
        client.fail_with(500);
        assert!(list.remove_entity().await.is_err());

        assert_eq!(client.fetch_count(), before);
        assert_eq!(list.state(), ListState::Removing);
        assert_eq!(list.entities().len(), 2);
        assert_eq!(h.alerts.errors(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_rows() {
        let client = seeded(4).await;
        let h = Harness::new();
        let mut list = ListController::new(client.clone(), h.ctx.clone());
        list.retrieve_all().await.unwrap();

        client.fail_with(502);
        assert!(list.handle_sync_list().await.is_err());
        assert_eq!(list.entities().len(), 4);
        assert!(!list.is_fetching());
        assert_eq!(h.alerts.all(), vec![Alert::HttpError(Some(502))]);

        client.recover();
        list.handle_sync_list().await.unwrap();
        assert_eq!(list.entities().len(), 4);
    }

    #[tokio::test]
    async fn test_active_search_uses_search_endpoint() {
        let client = seeded(12).await;
        let h = Harness::new();
        let mut list = ListController::new(client.clone(), h.ctx.clone());

        list.search("sku-001").await.unwrap();
        assert_eq!(list.total_items(), Some(2));
        list.handle_sync_list().await.unwrap();

        let searches = client.count(|c| matches!(c, Call::Search(q) if q == "sku-001"));
        assert_eq!(searches, 2);
        assert_eq!(client.count(|c| matches!(c, Call::List(_))), 0);
    }
}

// =============================================================================
// Date formatting
// =============================================================================

mod date_tests {
    use super::*;

    #[test]
    fn test_convert_date_time_from_server() {
        assert_eq!(convert_date_time_from_server(None), None);

        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 42).unwrap();
        assert_eq!(
            convert_date_time_from_server(Some(instant)).as_deref(),
            Some("2024-03-01 10:15")
        );
    }
}
