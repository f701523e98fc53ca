use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Send buffer size constraints
pub const MIN_SEND_BUFFER_SIZE: usize = 1;
pub const MAX_SEND_BUFFER_SIZE: usize = 10000;
pub const DEFAULT_SEND_BUFFER_SIZE: usize = 100;

pub const DEFAULT_TOPIC: &str = "analysis_group";
pub const MAX_TOPIC_LENGTH: usize = 100;

/// Subscriber connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebSocketConfig {
    /// Topic every subscriber on `/ws/analysis/` joins
    pub topic: String,
    /// Per-connection outbound buffer; a full buffer drops broadcasts for that client
    pub send_buffer_size: usize,
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            topic: String::from(DEFAULT_TOPIC),
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
        }
    }
}

impl WebSocketConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.topic.is_empty() || self.topic.len() > MAX_TOPIC_LENGTH {
            return Err(ConfigError::config(format!(
                "websocket.topic must be 1-{} characters, got {}",
                MAX_TOPIC_LENGTH,
                self.topic.len()
            )));
        }

        if !self
            .topic
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(ConfigError::config(format!(
                "websocket.topic may only contain [A-Za-z0-9_.-], got '{}'",
                self.topic
            )));
        }

        if self.send_buffer_size < MIN_SEND_BUFFER_SIZE
            || self.send_buffer_size > MAX_SEND_BUFFER_SIZE
        {
            return Err(ConfigError::config(format!(
                "websocket.send_buffer_size must be {}-{}, got {}",
                MIN_SEND_BUFFER_SIZE, MAX_SEND_BUFFER_SIZE, self.send_buffer_size
            )));
        }

        Ok(())
    }
}
