use crate::{
    ConnectionConfig, ConnectionId, ConnectionState, GroupRegistry, Metrics,
    Result as WsErrorResult, ShutdownGuard, WsError,
};

use cr_core::{BroadcastEvent, ErrorLocation, Topic};

use std::panic::Location;

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use tokio::sync::mpsc;

/// One browser subscribed to a topic.
///
/// Entering `Joined` registers the connection with the group registry;
/// entering `Closed` removes it again. If the value is dropped while still
/// joined (task aborted, panic unwinding) the leave is scheduled from `Drop`.
pub struct SubscriberConnection {
    connection_id: ConnectionId,
    topic: Topic,
    registry: GroupRegistry,
    metrics: Metrics,
    send_buffer_size: usize,
    state: ConnectionState,
}

impl SubscriberConnection {
    pub fn new(
        connection_id: ConnectionId,
        config: &ConnectionConfig,
        registry: GroupRegistry,
        metrics: Metrics,
    ) -> Self {
        Self {
            connection_id,
            topic: config.topic.clone(),
            registry,
            metrics,
            send_buffer_size: config.send_buffer_size,
            state: ConnectionState::Connecting,
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// `Connecting -> Joined`. Returns the receiving end of this member's
    /// broadcast channel.
    pub async fn join(&mut self) -> WsErrorResult<mpsc::Receiver<BroadcastEvent>> {
        if self.state != ConnectionState::Connecting {
            return Err(WsError::InvalidTransition {
                action: "join",
                state: self.state,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let (tx, rx) = mpsc::channel(self.send_buffer_size);
        self.registry.join(&self.topic, self.connection_id, tx).await;
        self.state = ConnectionState::Joined;

        info!("Connection {} joined {}", self.connection_id, self.topic);
        Ok(rx)
    }

    /// Any state -> `Closed`. Leaves the topic if joined; idempotent.
    pub async fn close(&mut self) {
        match self.state {
            ConnectionState::Closed => {}
            ConnectionState::Connecting => {
                self.state = ConnectionState::Closed;
                debug!("Connection {} closed before joining", self.connection_id);
            }
            ConnectionState::Joined => {
                // State flips first so Drop never schedules a second leave.
                self.state = ConnectionState::Closed;
                self.registry.leave(&self.topic, self.connection_id).await;
                info!("Connection {} left {}", self.connection_id, self.topic);
            }
        }
    }

    /// Drive the connection until the client goes away, the transport fails
    /// or the server shuts down.
    pub async fn handle(
        mut self,
        socket: WebSocket,
        mut shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()> {
        info!(
            "WebSocket connection {} established for {}",
            self.connection_id, self.topic
        );
        self.metrics.connection_established();

        let (mut ws_sender, mut ws_receiver) = socket.split();

        // Outbound frames (events and pongs) share one bounded writer queue.
        let (tx, mut rx) = mpsc::channel::<Message>(self.send_buffer_size);

        let send_task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if ws_sender.send(msg).await.is_err() {
                    break;
                }
            }
        });

        let result = match self.join().await {
            Ok(events) => self.run(&mut ws_receiver, events, &tx, &mut shutdown_guard).await,
            Err(e) => Err(e),
        };

        self.close().await;
        drop(tx);
        let _ = send_task.await;

        self.metrics
            .connection_closed(if result.is_ok() { "normal" } else { "error" });
        info!("WebSocket connection {} closed", self.connection_id);

        result
    }

    async fn run(
        &self,
        ws_receiver: &mut futures::stream::SplitStream<WebSocket>,
        mut events: mpsc::Receiver<BroadcastEvent>,
        tx: &mpsc::Sender<Message>,
        shutdown_guard: &mut ShutdownGuard,
    ) -> WsErrorResult<()> {
        loop {
            tokio::select! {
                msg = ws_receiver.next() => {
                    match msg {
                        Some(Ok(Message::Close(_))) | None => {
                            info!("Connection {} closed by client", self.connection_id);
                            return Ok(());
                        }
                        Some(Ok(msg)) => self.handle_client_message(msg, tx).await?,
                        Some(Err(e)) => {
                            error!("WebSocket error on connection {}: {}", self.connection_id, e);
                            self.metrics.error_occurred("transport");
                            return Err(WsError::connection_closed(format!("WebSocket error: {e}")));
                        }
                    }
                }

                event = events.recv() => {
                    match event {
                        Some(event) => self.forward_event(event, tx).await?,
                        None => {
                            warn!("Connection {} dropped from {} by registry", self.connection_id, self.topic);
                            return Ok(());
                        }
                    }
                }

                _ = shutdown_guard.wait() => {
                    info!("Shutting down connection {} gracefully", self.connection_id);
                    return Ok(());
                }
            }
        }
    }

    /// Inbound frames carry no commands; only pings get an answer.
    async fn handle_client_message(
        &self,
        msg: Message,
        tx: &mpsc::Sender<Message>,
    ) -> WsErrorResult<()> {
        match msg {
            Message::Ping(data) => tx
                .send(Message::Pong(data))
                .await
                .map_err(|_| WsError::send_buffer_closed()),
            Message::Text(text) => {
                debug!(
                    "Ignoring text frame ({} bytes) from connection {}",
                    text.as_str().len(),
                    self.connection_id
                );
                Ok(())
            }
            Message::Binary(data) => {
                debug!(
                    "Ignoring binary frame ({} bytes) from connection {}",
                    data.len(),
                    self.connection_id
                );
                Ok(())
            }
            Message::Pong(_) | Message::Close(_) => Ok(()),
        }
    }

    async fn forward_event(
        &self,
        event: BroadcastEvent,
        tx: &mpsc::Sender<Message>,
    ) -> WsErrorResult<()> {
        let json = match event.to_json() {
            Ok(json) => json,
            Err(e) => {
                error!(
                    "Dropping {} event for connection {}: {}",
                    event.event_type, self.connection_id, e
                );
                self.metrics.error_occurred("encode");
                return Ok(());
            }
        };

        tx.send(Message::Text(json.into()))
            .await
            .map_err(|_| WsError::send_buffer_closed())?;

        self.metrics.event_sent(event.event_type.as_str());
        Ok(())
    }
}

impl Drop for SubscriberConnection {
    fn drop(&mut self) {
        if self.state != ConnectionState::Joined {
            return;
        }

        self.state = ConnectionState::Closed;
        let registry = self.registry.clone();
        let topic = self.topic.clone();
        let connection_id = self.connection_id;

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                warn!(
                    "Connection {} dropped while joined to {}, scheduling leave",
                    connection_id, topic
                );
                handle.spawn(async move {
                    registry.leave(&topic, connection_id).await;
                });
            }
            Err(_) => error!(
                "Connection {} dropped outside a runtime, cannot leave {}",
                connection_id, topic
            ),
        }
    }
}
