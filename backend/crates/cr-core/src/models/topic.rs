use crate::{CoreError, CoreResult, ErrorLocation};

use std::panic::Location;
use std::sync::Arc;

/// Well-known topic that analysis subscribers join
pub const ANALYSIS_TOPIC: &str = "analysis_group";

const MAX_TOPIC_LENGTH: usize = 100;

/// Named broadcast group.
///
/// Names are ASCII alphanumerics plus `_`, `-` and `.`, at most 100 chars.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Topic(Arc<str>);

impl Topic {
    #[track_caller]
    pub fn new(name: impl AsRef<str>) -> CoreResult<Self> {
        let name = name.as_ref();

        let valid = !name.is_empty()
            && name.len() <= MAX_TOPIC_LENGTH
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

        if !valid {
            return Err(CoreError::InvalidTopic {
                value: name.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self(Arc::from(name)))
    }

    pub fn analysis() -> Self {
        Self(Arc::from(ANALYSIS_TOPIC))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
