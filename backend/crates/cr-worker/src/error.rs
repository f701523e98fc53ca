use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failure of one call to the inference service
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Inference timed out after {after:?} {location}")]
    Timeout {
        after: Duration,
        location: ErrorLocation,
    },

    #[error("Inference transport error: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
    },

    #[error("Inference service returned HTTP {code}: {body} {location}")]
    Status {
        code: u16,
        body: String,
        location: ErrorLocation,
    },

    #[error("Malformed inference response: {message} {location}")]
    MalformedResponse {
        message: String,
        location: ErrorLocation,
    },
}

impl InferenceError {
    #[track_caller]
    pub fn timeout(after: Duration) -> Self {
        Self::Timeout {
            after,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn status(code: u16, body: impl Into<String>) -> Self {
        Self::Status {
            code,
            body: body.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Map a reqwest failure, keeping timeouts distinct from other transport errors
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::timeout(timeout)
        } else if err.is_decode() {
            Self::malformed(err.to_string())
        } else {
            Self::transport(err.to_string())
        }
    }

    /// Human-readable description for subscribers (no source locations)
    pub fn description(&self) -> String {
        match self {
            Self::Timeout { after, .. } => {
                format!("Inference timed out after {}s", after.as_secs())
            }
            Self::Transport { message, .. } => {
                format!("Could not reach the inference service: {message}")
            }
            Self::Status { code, .. } => {
                format!("Inference service returned HTTP {code}")
            }
            Self::MalformedResponse { message, .. } => {
                format!("Inference service returned an unexpected response: {message}")
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, InferenceError>;
