#![allow(dead_code)]

use cr_queue::InMemoryJobQueue;
use cr_ws::{AppState, ConnectionConfig};

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, routing::get};
use axum_test::{TestServer, TestWebSocket};

pub const WS_PATH: &str = "/ws/analysis/";

/// Test server with access to AppState for publishing and inspection
pub struct TestServerWithState {
    pub server: TestServer,
    pub app_state: AppState,
}

pub fn create_test_server() -> TestServerWithState {
    let queue = Arc::new(InMemoryJobQueue::new(16, Duration::from_secs(30)));
    let app_state = AppState::new(queue, ConnectionConfig::default());

    let app = Router::new()
        .route(WS_PATH, get(cr_ws::handler))
        .with_state(app_state.clone());

    let server = TestServer::builder()
        .http_transport()
        .build(app)
        .expect("Failed to create test server");

    TestServerWithState { server, app_state }
}

pub async fn connect(server: &TestServer) -> TestWebSocket {
    server
        .get_websocket(WS_PATH)
        .await
        .into_websocket()
        .await
}

/// The upgrade returns before the connection task joins; poll until it has
pub async fn wait_for_members(state: &AppState, expected: usize) {
    let topic = state.config.topic.clone();
    let result = tokio::time::timeout(Duration::from_secs(2), async {
        while state.registry.member_count(&topic).await != expected {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;

    assert!(
        result.is_ok(),
        "expected {expected} members on {topic}, found {}",
        state.registry.member_count(&topic).await
    );
}
