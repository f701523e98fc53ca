use metrics::{counter, gauge};

/// Metrics collector for subscriber connections and fan-out
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "cr_ws" }
    }

    pub fn connection_established(&self) {
        counter!(format!("{}.connections.established", self.prefix)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).increment(1.0);
    }

    pub fn connection_closed(&self, reason: &str) {
        counter!(format!("{}.connections.closed", self.prefix)).increment(1);
        counter!(format!("{}.connections.closed.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).decrement(1.0);
    }

    /// Frame written to a subscriber's outbound channel
    pub fn event_sent(&self, event_type: &str) {
        counter!(format!("{}.events.sent", self.prefix)).increment(1);
        counter!(format!("{}.events.sent.{}", self.prefix, event_type)).increment(1);
    }

    pub fn broadcast_published(&self, event_type: &str, delivered: usize) {
        counter!(format!("{}.broadcast.published", self.prefix)).increment(1);
        counter!(format!("{}.broadcast.published.{}", self.prefix, event_type)).increment(1);
        gauge!(format!("{}.broadcast.last_recipients", self.prefix)).set(delivered as f64);
    }

    pub fn publish_failed(&self, reason: &str) {
        counter!(format!("{}.broadcast.failed", self.prefix)).increment(1);
        counter!(format!("{}.broadcast.failed.{}", self.prefix, reason)).increment(1);
    }

    pub fn error_occurred(&self, error_type: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, error_type)).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
