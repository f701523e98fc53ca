use crate::{GroupRegistry, Metrics, PublishReport};

use cr_core::{BroadcastEvent, Topic};

use log::{debug, warn};
use tokio::sync::mpsc::error::TrySendError;

/// Fans an event out to every current member of a topic.
///
/// Delivery is fire-and-forget: an empty topic drops the event, and a member
/// whose buffer is full or closed is skipped without affecting the others.
#[derive(Clone)]
pub struct BroadcastPublisher {
    registry: GroupRegistry,
    metrics: Metrics,
}

impl BroadcastPublisher {
    pub fn new(registry: GroupRegistry, metrics: Metrics) -> Self {
        Self { registry, metrics }
    }

    pub async fn publish(&self, topic: &Topic, event: BroadcastEvent) -> PublishReport {
        let members = self.registry.snapshot(topic).await;
        let mut report = PublishReport::default();

        if members.is_empty() {
            debug!(
                "No subscribers on {}, dropping {} event",
                topic, event.event_type
            );
            self.metrics.broadcast_published(event.event_type.as_str(), 0);
            return report;
        }

        for (connection_id, sender) in members {
            match sender.try_send(event.clone()) {
                Ok(()) => report.delivered += 1,
                Err(TrySendError::Full(_)) => {
                    warn!(
                        "Connection {} on {} too slow, dropping {} event",
                        connection_id, topic, event.event_type
                    );
                    self.metrics.publish_failed("buffer_full");
                    report.failed += 1;
                }
                Err(TrySendError::Closed(_)) => {
                    // Member is closing; its leave has not landed yet.
                    debug!(
                        "Connection {} on {} already closed, skipping",
                        connection_id, topic
                    );
                    self.metrics.publish_failed("closed");
                    report.failed += 1;
                }
            }
        }

        debug!(
            "Published {} event to {} ({} delivered, {} failed)",
            event.event_type, topic, report.delivered, report.failed
        );
        self.metrics
            .broadcast_published(event.event_type.as_str(), report.delivered);

        report
    }

    pub fn registry(&self) -> &GroupRegistry {
        &self.registry
    }
}
