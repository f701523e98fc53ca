use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Queue unavailable: {reason} {location}")]
    QueueUnavailable {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Queue closed {location}")]
    Closed { location: ErrorLocation },
}

impl QueueError {
    #[track_caller]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::QueueUnavailable {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn closed() -> Self {
        Self::Closed {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed { .. })
    }
}

pub type Result<T> = std::result::Result<T, QueueError>;
