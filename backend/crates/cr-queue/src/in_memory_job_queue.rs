use crate::{Delivery, JobHandle, JobQueue, QueueError, QueueResult};

use cr_config::QueueConfig;
use cr_core::{JobId, JobRecord};

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::sync::{Mutex, Notify};
use tokio::time::Instant;

/// In-process broker with visibility-timeout redelivery.
///
/// A dequeued job moves from `ready` to `in_flight` with a deadline. `ack`
/// of the current attempt removes it for good. A consumer that finds an expired lease moves that job
/// back to the front of `ready` with its attempt count preserved.
pub struct InMemoryJobQueue {
    inner: Mutex<Inner>,
    notify: Notify,
    capacity: usize,
    visibility_timeout: Duration,
}

struct Pending {
    job: JobRecord,
    attempts: u32,
}

struct Lease {
    job: JobRecord,
    attempts: u32,
    deadline: Instant,
}

#[derive(Default)]
struct Inner {
    ready: VecDeque<Pending>,
    in_flight: HashMap<JobId, Lease>,
    closed: bool,
}

impl Inner {
    fn len(&self) -> usize {
        self.ready.len() + self.in_flight.len()
    }

    fn reclaim_expired(&mut self, now: Instant) {
        let expired: Vec<JobId> = self
            .in_flight
            .iter()
            .filter(|(_, lease)| lease.deadline <= now)
            .map(|(id, _)| *id)
            .collect();

        for id in expired {
            if let Some(lease) = self.in_flight.remove(&id) {
                warn!(
                    "Job {} not acknowledged within visibility timeout (attempt {}), requeueing",
                    id, lease.attempts
                );
                self.ready.push_front(Pending {
                    job: lease.job,
                    attempts: lease.attempts,
                });
            }
        }
    }

    fn lease_next(&mut self, visibility_timeout: Duration) -> Option<Delivery> {
        let pending = self.ready.pop_front()?;
        let attempt = pending.attempts + 1;

        self.in_flight.insert(
            pending.job.id(),
            Lease {
                job: pending.job.clone(),
                attempts: attempt,
                deadline: Instant::now() + visibility_timeout,
            },
        );

        Some(Delivery {
            job: pending.job,
            attempt,
        })
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.in_flight.values().map(|lease| lease.deadline).min()
    }
}

impl InMemoryJobQueue {
    pub fn new(capacity: usize, visibility_timeout: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            notify: Notify::new(),
            capacity,
            visibility_timeout,
        }
    }

    pub fn from_config(config: &QueueConfig) -> Self {
        Self::new(
            config.capacity,
            Duration::from_secs(config.visibility_timeout_secs),
        )
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Deliveries handed out and not yet acknowledged
    pub async fn in_flight(&self) -> usize {
        self.inner.lock().await.in_flight.len()
    }
}

#[async_trait]
impl JobQueue for InMemoryJobQueue {
    async fn enqueue(&self, job: JobRecord) -> QueueResult<JobHandle> {
        let handle = {
            let mut inner = self.inner.lock().await;

            if inner.closed {
                return Err(QueueError::unavailable("queue is closed"));
            }

            if inner.len() >= self.capacity {
                return Err(QueueError::unavailable(format!(
                    "queue is full ({} jobs)",
                    self.capacity
                )));
            }

            let handle = JobHandle::for_job(&job);
            inner.ready.push_back(Pending { job, attempts: 0 });
            handle
        };

        debug!("Enqueued {} job {}", handle.kind, handle.job_id);
        self.notify.notify_one();

        Ok(handle)
    }

    async fn dequeue(&self) -> QueueResult<Delivery> {
        loop {
            // Register interest before inspecting state so a notify between
            // the check and the await is not lost.
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            let next_deadline = {
                let mut inner = self.inner.lock().await;

                if inner.closed {
                    return Err(QueueError::closed());
                }

                inner.reclaim_expired(Instant::now());

                if let Some(delivery) = inner.lease_next(self.visibility_timeout) {
                    return Ok(delivery);
                }

                inner.next_deadline()
            };

            match next_deadline {
                Some(deadline) => {
                    tokio::select! {
                        _ = &mut notified => {}
                        _ = tokio::time::sleep_until(deadline) => {}
                    }
                }
                None => notified.await,
            }
        }
    }

    async fn try_dequeue(&self) -> QueueResult<Option<Delivery>> {
        let mut inner = self.inner.lock().await;

        if inner.closed {
            return Err(QueueError::closed());
        }

        inner.reclaim_expired(Instant::now());
        Ok(inner.lease_next(self.visibility_timeout))
    }

    async fn ack(&self, delivery: &Delivery) -> QueueResult<()> {
        let job_id = delivery.job.id();
        let mut inner = self.inner.lock().await;
        let leased_attempt = inner.in_flight.get(&job_id).map(|lease| lease.attempts);

        match leased_attempt {
            Some(current) if current == delivery.attempt => {
                inner.in_flight.remove(&job_id);
                debug!("Acked job {} after attempt {}", job_id, current);
            }
            Some(current) => warn!(
                "Stale ack for job {} attempt {} ignored, attempt {} holds the lease",
                job_id, delivery.attempt, current
            ),
            None => debug!(
                "Ack for job {} attempt {} with no active lease ignored",
                job_id, delivery.attempt
            ),
        }

        Ok(())
    }

    async fn close(&self) {
        let mut inner = self.inner.lock().await;
        if inner.closed {
            return;
        }

        inner.closed = true;
        info!(
            "Job queue closed ({} ready, {} in flight)",
            inner.ready.len(),
            inner.in_flight.len()
        );
        drop(inner);

        self.notify.notify_waiters();
    }

    async fn depth(&self) -> usize {
        self.inner.lock().await.ready.len()
    }
}
