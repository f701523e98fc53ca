use cr_core::{JobKind, Outcome};

use std::time::Duration;

use metrics::{counter, gauge, histogram};

/// Job lifecycle counters under `cr_worker.*`
#[derive(Clone)]
pub struct WorkerMetrics {
    prefix: &'static str,
}

impl WorkerMetrics {
    pub fn new() -> Self {
        Self {
            prefix: "cr_worker",
        }
    }

    pub fn job_started(&self, kind: JobKind, attempt: u32) {
        counter!(format!("{}.jobs.started.{}", self.prefix, kind.as_str())).increment(1);
        gauge!(format!("{}.jobs.active", self.prefix)).increment(1.0);
        if attempt > 1 {
            counter!(format!("{}.jobs.redelivered", self.prefix)).increment(1);
        }
    }

    pub fn job_finished(&self, outcome: &Outcome, elapsed: Duration) {
        let status = outcome.status.as_str();
        counter!(format!("{}.jobs.{}", self.prefix, status)).increment(1);
        counter!(format!(
            "{}.jobs.{}.{}",
            self.prefix,
            status,
            outcome.kind.as_str()
        ))
        .increment(1);
        gauge!(format!("{}.jobs.active", self.prefix)).decrement(1.0);
        histogram!(format!("{}.jobs.duration_ms", self.prefix)).record(elapsed.as_millis() as f64);
    }

    pub fn job_panicked(&self) {
        counter!(format!("{}.jobs.panicked", self.prefix)).increment(1);
    }

    pub fn ack_failed(&self) {
        counter!(format!("{}.acks.failed", self.prefix)).increment(1);
    }
}

impl Default for WorkerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
