use crate::{Delivery, JobHandle, QueueResult};

use cr_core::JobRecord;

use async_trait::async_trait;

/// At-least-once channel between submitters and workers.
///
/// Implementations must never hand the same job to two consumers at once.
/// A delivery that is not acknowledged before its visibility timeout becomes
/// eligible for redelivery. There is no ordering guarantee across jobs.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Accept a job. Returns before the job runs.
    ///
    /// Fails with `QueueUnavailable` when the queue is full or closed.
    async fn enqueue(&self, job: JobRecord) -> QueueResult<JobHandle>;

    /// Wait for the next job. Returns `Closed` once the queue is closed.
    async fn dequeue(&self) -> QueueResult<Delivery>;

    /// Take the next job if one is ready right now.
    async fn try_dequeue(&self) -> QueueResult<Option<Delivery>>;

    /// Complete a delivery so it is never redelivered.
    ///
    /// Only the current lease can be completed. An ack for an attempt that
    /// already expired and was handed out again is ignored, so the newer
    /// lease stays in force.
    async fn ack(&self, delivery: &Delivery) -> QueueResult<()>;

    /// Stop accepting work and wake every blocked consumer.
    async fn close(&self);

    /// Jobs waiting to be delivered (in-flight deliveries excluded).
    async fn depth(&self) -> usize;
}
