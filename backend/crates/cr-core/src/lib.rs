pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result as CoreResult};
pub use models::broadcast_event::BroadcastEvent;
pub use models::event_type::EventType;
pub use models::job_id::JobId;
pub use models::job_kind::JobKind;
pub use models::job_record::JobRecord;
pub use models::outcome::Outcome;
pub use models::outcome_status::OutcomeStatus;
pub use models::topic::{ANALYSIS_TOPIC, Topic};

pub use error_location::ErrorLocation;

/// Prefix applied to failure descriptions before they go on the wire
pub const ERROR_MESSAGE_PREFIX: &str = "Error: ";
