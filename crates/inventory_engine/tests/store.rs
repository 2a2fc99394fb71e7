use std::time::Duration;

use inventory_core::{Item, NormalizedItem};
use inventory_engine::{ItemStore, ReqwestItemStore, StoreError, StoreSettings};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_for(server: &MockServer) -> ReqwestItemStore {
    ReqwestItemStore::new(StoreSettings {
        base_url: server.uri(),
        ..StoreSettings::default()
    })
    .expect("store")
}

fn test_payload() -> NormalizedItem {
    NormalizedItem {
        name: "Test Item".to_string(),
        description: "Test Description".to_string(),
        price: 99.99,
    }
}

#[tokio::test]
async fn list_returns_all_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Zeta", "description": "", "price": 5},
            {"id": 2, "name": "Alpha", "description": null, "price": "20.5"}
        ])))
        .mount(&server)
        .await;

    let items = store_for(&server).list().await.expect("list ok");
    assert_eq!(
        items,
        vec![
            Item {
                id: 1,
                name: "Zeta".to_string(),
                description: String::new(),
                price: Some(5.0),
            },
            Item {
                id: 2,
                name: "Alpha".to_string(),
                description: String::new(),
                price: Some(20.5),
            },
        ]
    );
}

#[tokio::test]
async fn list_surfaces_server_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/items"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "Database error: locked"})),
        )
        .mount(&server)
        .await;

    let err = store_for(&server).list().await.unwrap_err();
    assert_eq!(
        err,
        StoreError::Server {
            status: 500,
            message: "Database error: locked".to_string()
        }
    );
}

#[tokio::test]
async fn get_missing_item_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/items/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
        .mount(&server)
        .await;

    let err = store_for(&server).get(999).await.unwrap_err();
    assert_eq!(err, StoreError::NotFound("not found".to_string()));
}

#[tokio::test]
async fn create_posts_validated_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/items"))
        .and(body_json(json!({
            "name": "Test Item",
            "description": "Test Description",
            "price": 99.99
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1,
            "name": "Test Item",
            "description": "Test Description",
            "price": 99.99
        })))
        .expect(1)
        .mount(&server)
        .await;

    let item = store_for(&server)
        .create(&test_payload())
        .await
        .expect("create ok");
    assert_eq!(item.id, 1);
    assert_eq!(item.price, Some(99.99));
}

#[tokio::test]
async fn create_rejection_uses_message_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/items"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "price is required"})),
        )
        .mount(&server)
        .await;

    let err = store_for(&server)
        .create(&test_payload())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::ValidationRejected {
            status: 400,
            message: "price is required".to_string()
        }
    );
}

#[tokio::test]
async fn update_puts_to_member_url() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/items/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4,
            "name": "Test Item",
            "description": "Test Description",
            "price": 99.99
        })))
        .expect(1)
        .mount(&server)
        .await;

    let item = store_for(&server)
        .update(4, &test_payload())
        .await
        .expect("update ok");
    assert_eq!(item.id, 4);
}

#[tokio::test]
async fn update_of_missing_item_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/items/8"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Item not found"})))
        .mount(&server)
        .await;

    let err = store_for(&server)
        .update(8, &test_payload())
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::NotFound("Item not found".to_string()));
}

#[tokio::test]
async fn delete_accepts_empty_and_message_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/items/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/items/2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Item 2 deleted successfully"})),
        )
        .mount(&server)
        .await;

    let store = store_for(&server);
    assert_eq!(store.delete(1).await, Ok(()));
    assert_eq!(store.delete(2).await, Ok(()));
}

#[tokio::test]
async fn error_without_json_body_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/items/3"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = store_for(&server).delete(3).await.unwrap_err();
    assert_eq!(
        err,
        StoreError::Server {
            status: 503,
            message: "HTTP error, status=503".to_string()
        }
    );
}

#[tokio::test]
async fn malformed_success_body_is_a_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/items/5"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = store_for(&server).get(5).await.unwrap_err();
    assert!(matches!(err, StoreError::Server { status: 200, .. }));
}

#[tokio::test]
async fn slow_backend_times_out_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/items"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let store = ReqwestItemStore::new(StoreSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..StoreSettings::default()
    })
    .expect("store");
    let err = store.list().await.unwrap_err();
    assert!(matches!(err, StoreError::Network(_)));
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    // Reserve a free port, then close it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let base_url = format!("http://{}", listener.local_addr().expect("addr"));
    drop(listener);

    let store = ReqwestItemStore::new(StoreSettings {
        base_url,
        connect_timeout: Duration::from_millis(500),
        request_timeout: Duration::from_secs(2),
    })
    .expect("store");
    let err = store.list().await.unwrap_err();
    assert!(matches!(err, StoreError::Network(_)));
    assert_eq!(err.status(), None);
}
