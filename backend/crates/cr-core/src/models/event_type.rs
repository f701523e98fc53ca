use serde::{Deserialize, Serialize};

/// Discriminator carried in the `type` field of every broadcast frame.
///
/// Publisher and subscriber both use this enum, so the strings below are the
/// whole wire contract with the browser.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    AnalysisResult,
    FixResult,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AnalysisResult => "analysis_result",
            Self::FixResult => "fix_result",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
