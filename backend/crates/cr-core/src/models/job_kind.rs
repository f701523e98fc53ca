use crate::{CoreError, CoreResult, ErrorLocation, EventType};

use std::panic::Location;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What a job asks the inference engine to do with its payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    Analyze,
    Fix,
}

impl JobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analyze => "analyze",
            Self::Fix => "fix",
        }
    }

    /// Wire discriminator used when this kind's outcome is broadcast
    pub fn event_type(&self) -> EventType {
        match self {
            Self::Analyze => EventType::AnalysisResult,
            Self::Fix => EventType::FixResult,
        }
    }
}

impl FromStr for JobKind {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "analyze" => Ok(Self::Analyze),
            "fix" => Ok(Self::Fix),
            _ => Err(CoreError::InvalidJobKind {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
