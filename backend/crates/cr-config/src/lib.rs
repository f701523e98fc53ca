mod config;
mod error;
mod inference_config;
mod log_level;
mod logging_config;
mod queue_config;
mod retry_config;
mod server_config;
mod websocket_config;
mod worker_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use inference_config::InferenceConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use queue_config::QueueConfig;
pub use retry_config::RetryConfig;
pub use server_config::ServerConfig;
pub use websocket_config::WebSocketConfig;
pub use worker_config::WorkerConfig;

const CONFIG_DIR_ENV: &str = "CR_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".cr";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;
