use crate::{
    InferenceClient, InferenceError, InferenceRequest, RetryPolicy, WorkerMetrics, instructions,
    with_retry,
};

use cr_core::{BroadcastEvent, JobRecord, Outcome, Topic};
use cr_queue::Delivery;
use cr_ws::BroadcastPublisher;

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{error, info, warn};
use tracing::{Instrument, info_span};

/// Description published when processing panicked
pub const INTERNAL_FAILURE_MESSAGE: &str = "Internal worker error while processing the job";

/// Executes jobs: one inference call per job (plus retries), one published
/// Outcome per delivery.
///
/// `process` never fails. Collaborator errors, timeouts and panics all
/// become a Failed outcome.
pub struct Worker {
    client: Arc<dyn InferenceClient>,
    publisher: BroadcastPublisher,
    topic: Topic,
    timeout: Duration,
    retry: RetryPolicy,
    metrics: WorkerMetrics,
}

impl Worker {
    pub fn new(
        client: Arc<dyn InferenceClient>,
        publisher: BroadcastPublisher,
        topic: Topic,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            client,
            publisher,
            topic,
            timeout,
            retry,
            metrics: WorkerMetrics::new(),
        }
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    /// Run the inference call for `job` and turn the result into an Outcome
    pub async fn process(&self, job: &JobRecord) -> Outcome {
        let request = instructions::request_for(job);
        let operation_name = format!("{} job {}", job.kind(), job.id());

        let result = with_retry(&self.retry, &operation_name, |attempt| {
            self.call_once(&request, attempt)
        })
        .await;

        match result {
            Ok(text) => Outcome::success(job, text),
            Err(e) => Outcome::failed(job, e.description()),
        }
    }

    async fn call_once(
        &self,
        request: &InferenceRequest,
        attempt: u32,
    ) -> Result<String, InferenceError> {
        if attempt > 1 {
            info!("Inference retry attempt {}", attempt);
        }

        match tokio::time::timeout(self.timeout, self.client.complete(request)).await {
            Ok(result) => result,
            Err(_) => Err(InferenceError::timeout(self.timeout)),
        }
    }

    /// Process one delivery in its own task, then publish the Outcome.
    ///
    /// Publishing happens whether the job succeeded or failed; publish
    /// problems are logged and never returned.
    pub async fn handle(self: &Arc<Self>, delivery: &Delivery) -> Outcome {
        let job = delivery.job.clone();

        if delivery.is_redelivery() {
            warn!(
                "Job {} redelivered (attempt {}), processing again",
                job.id(),
                delivery.attempt
            );
        }

        info!(
            "Processing {} job {}: {}",
            job.kind(),
            job.id(),
            job.preview(50)
        );
        self.metrics.job_started(job.kind(), delivery.attempt);
        let started = Instant::now();

        let span = info_span!(
            "job",
            job_id = %job.id(),
            kind = %job.kind(),
            attempt = delivery.attempt,
        );

        let worker = Arc::clone(self);
        let task_job = job.clone();
        let task = tokio::spawn(async move { worker.process(&task_job).await }.instrument(span));

        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_panic() => {
                error!("Job {} panicked during processing", job.id());
                self.metrics.job_panicked();
                Outcome::failed(&job, INTERNAL_FAILURE_MESSAGE)
            }
            Err(e) => {
                error!("Job {} task did not complete: {}", job.id(), e);
                Outcome::failed(&job, INTERNAL_FAILURE_MESSAGE)
            }
        };

        self.metrics.job_finished(&outcome, started.elapsed());
        self.publish(&outcome).await;

        outcome
    }

    async fn publish(&self, outcome: &Outcome) {
        let event = BroadcastEvent::from_outcome(outcome);
        let report = self.publisher.publish(&self.topic, event).await;

        if outcome.is_success() {
            info!(
                "Job {} succeeded, result sent to {} subscriber(s) on {}",
                outcome.job_id, report.delivered, self.topic
            );
        } else {
            warn!(
                "Job {} failed ({}), error sent to {} subscriber(s) on {}",
                outcome.job_id, outcome.message, report.delivered, self.topic
            );
        }

        if report.failed > 0 {
            warn!(
                "Job {} result not delivered to {} subscriber(s)",
                outcome.job_id, report.failed
            );
        }
    }
}
