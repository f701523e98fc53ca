use crate::{JobId, JobKind, JobRecord, OutcomeStatus};

use serde::{Deserialize, Serialize};

/// Terminal result of processing one job delivery.
///
/// Transient: built by a worker, published once, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub job_id: JobId,
    pub kind: JobKind,
    pub status: OutcomeStatus,
    pub message: String,
}

impl Outcome {
    pub fn success(job: &JobRecord, message: impl Into<String>) -> Self {
        Self {
            job_id: job.id(),
            kind: job.kind(),
            status: OutcomeStatus::Success,
            message: message.into(),
        }
    }

    /// A failed outcome. An empty description is replaced so that subscribers
    /// always see something readable.
    pub fn failed(job: &JobRecord, description: impl Into<String>) -> Self {
        let description = description.into();
        let message = if description.trim().is_empty() {
            format!("{} job failed", job.kind())
        } else {
            description
        };

        Self {
            job_id: job.id(),
            kind: job.kind(),
            status: OutcomeStatus::Failed,
            message,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}
