use cr_core::CoreError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsError {
    #[error("Connection closed: {reason} {location}")]
    ConnectionClosed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Send buffer closed, client writer gone {location}")]
    SendBufferClosed { location: ErrorLocation },

    #[error("Invalid state transition: cannot {action} while {state} {location}")]
    InvalidTransition {
        action: &'static str,
        state: crate::ConnectionState,
        location: ErrorLocation,
    },

    #[error("Core error: {source} {location}")]
    Core {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },
}

impl WsError {
    #[track_caller]
    pub fn connection_closed(reason: impl Into<String>) -> Self {
        Self::ConnectionClosed {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn send_buffer_closed() -> Self {
        Self::SendBufferClosed {
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for WsError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::Core {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, WsError>;
