use serde::Deserialize;

/// Missing and null fields deserialize to `None` so the handler can answer
/// with a field-level validation error instead of a JSON extractor rejection.
#[derive(Debug, Deserialize)]
pub struct SubmitJobRequest {
    /// "analyze" or "fix"
    #[serde(default)]
    pub kind: Option<String>,

    /// Source text to process; missing, null or blank is rejected
    #[serde(default)]
    pub content: Option<String>,
}
