use cr_core::{JobId, JobKind, JobRecord};

use chrono::{DateTime, Utc};

/// Receipt returned to the submitter once a job is accepted
#[derive(Debug, Clone, PartialEq)]
pub struct JobHandle {
    pub job_id: JobId,
    pub kind: JobKind,
    pub enqueued_at: DateTime<Utc>,
}

impl JobHandle {
    pub(crate) fn for_job(job: &JobRecord) -> Self {
        Self {
            job_id: job.id(),
            kind: job.kind(),
            enqueued_at: Utc::now(),
        }
    }
}
