use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub const MIN_TIMEOUT_SECS: u64 = 1;
pub const MAX_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const MIN_MAX_TOKENS: u32 = 16;
pub const MAX_MAX_TOKENS: u32 = 32_768;
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

/// Settings for the external chat-completions endpoint.
///
/// `api_key` is normally supplied through `CR_INFERENCE_API_KEY` and is never
/// written to the log.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    /// Upper bound for a single inference call
    pub timeout_secs: u64,
    pub max_tokens: u32,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            model: String::from(DEFAULT_MODEL),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl InferenceConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::inference(format!(
                "inference.base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::inference("inference.model must not be empty"));
        }

        if self.timeout_secs < MIN_TIMEOUT_SECS || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::inference(format!(
                "inference.timeout_secs must be {}-{}, got {}",
                MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        if self.max_tokens < MIN_MAX_TOKENS || self.max_tokens > MAX_MAX_TOKENS {
            return Err(ConfigError::inference(format!(
                "inference.max_tokens must be {}-{}, got {}",
                MIN_MAX_TOKENS, MAX_MAX_TOKENS, self.max_tokens
            )));
        }

        Ok(())
    }
}
