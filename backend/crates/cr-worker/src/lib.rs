pub mod error;
pub mod http_inference_client;
pub mod inference_client;
pub mod instructions;
pub mod metrics;
pub mod retry;
pub mod worker;
pub mod worker_pool;

pub use error::{InferenceError, Result as InferenceResult};
pub use http_inference_client::HttpInferenceClient;
pub use inference_client::{InferenceClient, InferenceRequest};
pub use metrics::WorkerMetrics;
pub use retry::{IsRetryable, RetryPolicy, with_retry};
pub use worker::Worker;
pub use worker_pool::WorkerPool;

#[cfg(test)]
mod tests;
