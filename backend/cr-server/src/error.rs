use cr_config::ConfigError;
use cr_core::CoreError;
use cr_worker::InferenceError;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid setting: {0}")]
    Core(#[from] CoreError),

    #[error("Inference client setup failed: {0}")]
    Inference(#[from] InferenceError),

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
