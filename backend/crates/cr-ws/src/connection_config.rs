use cr_config::WebSocketConfig;
use cr_core::{CoreResult, Topic};

/// Per-connection settings derived from `[websocket]`
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Topic every subscriber joins on upgrade
    pub topic: Topic,
    /// Outbound frames buffered per connection before `publish` counts a failure
    pub send_buffer_size: usize,
}

impl ConnectionConfig {
    pub fn from_config(config: &WebSocketConfig) -> CoreResult<Self> {
        Ok(Self {
            topic: Topic::new(&config.topic)?,
            send_buffer_size: config.send_buffer_size,
        })
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            topic: Topic::analysis(),
            send_buffer_size: 100,
        }
    }
}
