use cr_queue::JobHandle;

use serde::Serialize;

/// Returned with 202 as soon as the job is queued
#[derive(Debug, Serialize)]
pub struct JobAcceptedResponse {
    pub job_id: String,
    pub kind: String,
    pub message: String,
    /// Unix seconds
    pub enqueued_at: i64,
}

impl JobAcceptedResponse {
    pub fn from_handle(handle: &JobHandle, message: impl Into<String>) -> Self {
        Self {
            job_id: handle.job_id.to_string(),
            kind: handle.kind.as_str().to_string(),
            message: message.into(),
            enqueued_at: handle.enqueued_at.timestamp(),
        }
    }
}
