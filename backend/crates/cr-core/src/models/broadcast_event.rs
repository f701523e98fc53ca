use crate::{CoreError, CoreResult, ERROR_MESSAGE_PREFIX, ErrorLocation, EventType, Outcome};

use std::panic::Location;

use serde::{Deserialize, Serialize};

/// Message fanned out to subscribers: `{"type": ..., "message": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastEvent {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub message: String,
}

impl BroadcastEvent {
    pub fn new(event_type: EventType, message: impl Into<String>) -> Self {
        Self {
            event_type,
            message: message.into(),
        }
    }

    /// Failed outcomes get the error prefix; successful ones pass through untouched.
    pub fn from_outcome(outcome: &Outcome) -> Self {
        let message = if outcome.is_success() {
            outcome.message.clone()
        } else {
            format!("{ERROR_MESSAGE_PREFIX}{}", outcome.message)
        };

        Self::new(outcome.kind.event_type(), message)
    }

    #[track_caller]
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(self).map_err(|source| CoreError::Encode {
            source,
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
