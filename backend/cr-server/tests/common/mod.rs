#![allow(dead_code)]

//! Test infrastructure for cr-server API tests

use cr_queue::InMemoryJobQueue;
use cr_server::routes::{WS_ANALYSIS_PATH, build_router};
use cr_worker::{
    InferenceClient, InferenceError, InferenceRequest, InferenceResult, RetryPolicy, Worker,
    WorkerPool,
};
use cr_ws::{AppState, ConnectionConfig};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use axum_test::{TestServer, TestWebSocket};
use http_body_util::BodyExt;
use tokio::task::JoinHandle;
use tower::ServiceExt;

pub const VISIBILITY: Duration = Duration::from_secs(30);

/// AppState plus a concrete handle on the queue for inspection
pub fn create_test_app_state(capacity: usize) -> (AppState, Arc<InMemoryJobQueue>) {
    let queue = Arc::new(InMemoryJobQueue::new(capacity, VISIBILITY));
    let app_state = AppState::new(queue.clone(), ConnectionConfig::default());
    (app_state, queue)
}

/// Send one request through the router and decode the JSON body
pub async fn send_json(
    state: &AppState,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let app = build_router(state.clone());

    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

/// Echoes a fixed reply for every request
pub struct FixedClient(pub &'static str);

#[async_trait]
impl InferenceClient for FixedClient {
    async fn complete(&self, _request: &InferenceRequest) -> InferenceResult<String> {
        Ok(self.0.to_string())
    }
}

/// Fails every request with a server error
pub struct DownClient;

#[async_trait]
impl InferenceClient for DownClient {
    async fn complete(&self, _request: &InferenceRequest) -> InferenceResult<String> {
        Err(InferenceError::status(500, "down"))
    }
}

/// Full pipeline: router, queue and a running worker pool
pub struct Pipeline {
    pub server: TestServer,
    pub app_state: AppState,
    pub queue: Arc<InMemoryJobQueue>,
    pub workers: JoinHandle<()>,
}

pub fn create_pipeline(client: Arc<dyn InferenceClient>) -> Pipeline {
    let (app_state, queue) = create_test_app_state(16);

    let worker = Arc::new(Worker::new(
        client,
        app_state.publisher.clone(),
        app_state.config.topic.clone(),
        Duration::from_secs(5),
        RetryPolicy::none(),
    ));
    let pool = WorkerPool::new(worker, 2);
    let workers = tokio::spawn(pool.run(queue.clone(), app_state.shutdown.clone()));

    let server = TestServer::builder()
        .http_transport()
        .build(build_router(app_state.clone()))
        .expect("Failed to create test server");

    Pipeline {
        server,
        app_state,
        queue,
        workers,
    }
}

pub async fn connect(server: &TestServer) -> TestWebSocket {
    server
        .get_websocket(WS_ANALYSIS_PATH)
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

    assert!(result.is_ok(), "expected {expected} members on {topic}");
}
