use crate::{Worker, WorkerMetrics};

use cr_queue::JobQueue;
use cr_ws::ShutdownCoordinator;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::task::JoinSet;

const DEQUEUE_ERROR_BACKOFF: Duration = Duration::from_millis(250);

/// Runs `concurrency` consumer loops against one queue.
///
/// Each loop takes a delivery, lets the worker finish it, then acks. A job
/// already taken is always finished before the loop looks at shutdown again,
/// so stopping never abandons a half-processed job.
pub struct WorkerPool {
    worker: Arc<Worker>,
    concurrency: usize,
    metrics: WorkerMetrics,
}

impl WorkerPool {
    pub fn new(worker: Arc<Worker>, concurrency: usize) -> Self {
        Self {
            worker,
            concurrency: concurrency.max(1),
            metrics: WorkerMetrics::new(),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Consume until the queue is closed or shutdown is signalled, then wait
    /// for every loop to finish its current job.
    pub async fn run(self, queue: Arc<dyn JobQueue>, shutdown: ShutdownCoordinator) {
        info!(
            "Starting {} worker(s) on {}",
            self.concurrency,
            self.worker.topic()
        );

        let mut loops = JoinSet::new();
        for index in 0..self.concurrency {
            loops.spawn(consume(
                index,
                Arc::clone(&self.worker),
                Arc::clone(&queue),
                shutdown.clone(),
                self.metrics.clone(),
            ));
        }

        while let Some(result) = loops.join_next().await {
            if let Err(e) = result {
                error!("Worker loop ended abnormally: {}", e);
            }
        }

        info!("All workers stopped");
    }
}

async fn consume(
    index: usize,
    worker: Arc<Worker>,
    queue: Arc<dyn JobQueue>,
    shutdown: ShutdownCoordinator,
    metrics: WorkerMetrics,
) {
    let mut shutdown_guard = shutdown.subscribe_guard();
    debug!("Worker {} started", index);

    loop {
        let delivery = tokio::select! {
            biased;

            _ = shutdown_guard.wait() => {
                info!("Worker {} stopping for shutdown", index);
                break;
            }

            next = queue.dequeue() => match next {
                Ok(delivery) => delivery,
                Err(e) if e.is_closed() => {
                    info!("Worker {} stopping, queue closed", index);
                    break;
                }
                Err(e) => {
                    warn!("Worker {} failed to dequeue: {}", index, e);
                    tokio::time::sleep(DEQUEUE_ERROR_BACKOFF).await;
                    continue;
                }
            },
        };

        worker.handle(&delivery).await;

        if let Err(e) = queue.ack(&delivery).await {
            error!(
                "Worker {} failed to ack job {}: {}",
                index,
                delivery.job.id(),
                e
            );
            metrics.ack_failed();
        }
    }
}
