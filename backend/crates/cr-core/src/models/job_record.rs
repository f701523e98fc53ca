use crate::{CoreError, CoreResult, ErrorLocation, JobId, JobKind};

use std::panic::Location;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One unit of asynchronous work.
///
/// Fields are private so that `kind` and `payload` cannot change after the
/// record has been validated and handed to the queue. Deserializing applies
/// the same payload check as `new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredJobRecord")]
pub struct JobRecord {
    id: JobId,
    kind: JobKind,
    payload: String,
    created_at: DateTime<Utc>,
}

impl JobRecord {
    /// Build a new record with a fresh identifier.
    ///
    /// Fails with a validation error when `payload` is empty or whitespace.
    #[track_caller]
    pub fn new(kind: JobKind, payload: impl Into<String>) -> CoreResult<Self> {
        let payload = payload.into();
        check_payload(&payload)?;

        Ok(Self {
            id: JobId::new(),
            kind,
            payload,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn kind(&self) -> JobKind {
        self.kind
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Short payload preview for log lines
    pub fn preview(&self, max_chars: usize) -> String {
        let mut preview: String = self.payload.chars().take(max_chars).collect();
        if self.payload.chars().count() > max_chars {
            preview.push_str("...");
        }
        preview
    }
}

#[track_caller]
fn check_payload(payload: &str) -> CoreResult<()> {
    if payload.trim().is_empty() {
        return Err(CoreError::Validation {
            message: "No content provided".to_string(),
            field: Some("content".to_string()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(())
}

/// Wire shape of a serialized record, checked before it becomes a `JobRecord`
#[derive(Deserialize)]
struct StoredJobRecord {
    id: JobId,
    kind: JobKind,
    payload: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<StoredJobRecord> for JobRecord {
    type Error = CoreError;

    fn try_from(stored: StoredJobRecord) -> CoreResult<Self> {
        check_payload(&stored.payload)?;

        Ok(Self {
            id: stored.id,
            kind: stored.kind,
            payload: stored.payload,
            created_at: stored.created_at,
        })
    }
}
