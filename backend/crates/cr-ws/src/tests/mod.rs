mod broadcast_publisher;

use crate::{BroadcastPublisher, ConnectionId, GroupRegistry, Metrics};

use cr_core::{BroadcastEvent, EventType, Topic};

use tokio::sync::mpsc;

pub(crate) fn topic() -> Topic {
    Topic::analysis()
}

pub(crate) fn event(message: &str) -> BroadcastEvent {
    BroadcastEvent::new(EventType::AnalysisResult, message)
}

pub(crate) fn publisher(registry: &GroupRegistry) -> BroadcastPublisher {
    BroadcastPublisher::new(registry.clone(), Metrics::new())
}

/// Join a fresh member and hand back its id and inbox
pub(crate) async fn join_member(
    registry: &GroupRegistry,
    topic: &Topic,
    buffer: usize,
) -> (ConnectionId, mpsc::Receiver<BroadcastEvent>) {
    let id = ConnectionId::new();
    let (tx, rx) = mpsc::channel(buffer);
    registry.join(topic, id, tx).await;
    (id, rx)
}
