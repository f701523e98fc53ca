use crate::{
    BroadcastPublisher, ConnectionConfig, ConnectionId, GroupRegistry, Metrics,
    ShutdownCoordinator, SubscriberConnection,
};

use cr_queue::JobQueue;

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::{debug, error, warn};

/// Shared application state for HTTP and WebSocket handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: GroupRegistry,
    pub publisher: BroadcastPublisher,
    pub queue: Arc<dyn JobQueue>,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
}

impl AppState {
    pub fn new(queue: Arc<dyn JobQueue>, config: ConnectionConfig) -> Self {
        let registry = GroupRegistry::new();
        let metrics = Metrics::new();
        let publisher = BroadcastPublisher::new(registry.clone(), metrics.clone());

        Self {
            registry,
            publisher,
            queue,
            metrics,
            shutdown: ShutdownCoordinator::new(),
            config,
        }
    }
}

/// WebSocket upgrade handler; the connection joins the configured topic
pub async fn handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    if state.shutdown.is_shutdown() {
        warn!("Rejecting WebSocket upgrade during shutdown");
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }

    let connection_id = ConnectionId::new();
    debug!(
        "WebSocket upgrade {} for {}",
        connection_id, state.config.topic
    );

    ws.on_upgrade(move |socket| handle_socket(socket, connection_id, state))
}

async fn handle_socket(socket: WebSocket, connection_id: ConnectionId, state: AppState) {
    let shutdown_guard = state.shutdown.subscribe_guard();

    let connection = SubscriberConnection::new(
        connection_id,
        &state.config,
        state.registry.clone(),
        state.metrics.clone(),
    );

    if let Err(e) = connection.handle(socket, shutdown_guard).await {
        error!("Connection {connection_id} error: {e}");
    }
}
