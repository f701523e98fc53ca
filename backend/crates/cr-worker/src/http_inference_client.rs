use crate::{InferenceClient, InferenceError, InferenceRequest, InferenceResult};

use cr_config::InferenceConfig;

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};

/// Longest error body kept in `InferenceError::Status`
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Client for an OpenAI-compatible `/chat/completions` endpoint
pub struct HttpInferenceClient {
    base_url: String,
    model: String,
    api_key: Option<String>,
    max_tokens: u32,
    timeout: Duration,
    client: ReqwestClient,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl HttpInferenceClient {
    pub fn new(config: &InferenceConfig) -> InferenceResult<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InferenceError::transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            max_tokens: config.max_tokens,
            timeout,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn complete(&self, request: &InferenceRequest) -> InferenceResult<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            max_tokens: self.max_tokens,
        };

        let mut req = self.client.post(self.endpoint()).json(&body);
        if let Some(ref api_key) = self.api_key {
            req = req.bearer_auth(api_key);
        }

        debug!(
            "POST {} (model {}, {} chars of user content)",
            self.endpoint(),
            self.model,
            request.user.len()
        );

        let response = req
            .send()
            .await
            .map_err(|e| InferenceError::from_reqwest(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body: String = text.chars().take(MAX_ERROR_BODY_CHARS).collect();
            return Err(InferenceError::status(status.as_u16(), body));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::from_reqwest(e, self.timeout))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| InferenceError::malformed("response contained no choices"))?
            .message
            .content
            .ok_or_else(|| InferenceError::malformed("first choice has no content"))?;

        if content.trim().is_empty() {
            return Err(InferenceError::malformed("completion was empty"));
        }

        Ok(content)
    }
}
