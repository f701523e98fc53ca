use crate::InferenceResult;

use async_trait::async_trait;

/// Prompt pair sent to the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRequest {
    pub system: String,
    pub user: String,
}

/// Text-completion collaborator used by the worker
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn complete(&self, request: &InferenceRequest) -> InferenceResult<String>;
}
