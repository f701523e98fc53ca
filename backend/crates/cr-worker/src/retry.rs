use crate::InferenceError;

use cr_config::RetryConfig;

use std::time::Duration;

use tokio::time::sleep;

/// Backoff schedule for transient inference failures
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts including the first call
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    /// Scale each delay by a random factor in 0.5..1.5
    pub jitter: bool,
}

impl RetryPolicy {
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            initial_delay: Duration::from_millis(config.initial_delay_ms),
            max_delay: Duration::from_secs(config.max_delay_secs),
            backoff_multiplier: config.backoff_multiplier,
            jitter: config.jitter,
        }
    }

    /// Delay after failed attempt `attempt` (1-based): exponential, capped at
    /// `max_delay`, then jittered
    pub fn delay_before_retry(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(32) as i32;
        let base = self.initial_delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        let capped = base.min(self.max_delay.as_secs_f64());

        let factor = if self.jitter {
            0.5 + rand::random::<f64>()
        } else {
            1.0
        };

        Duration::from_secs_f64(capped * factor)
    }

    /// Single attempt, no retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

/// Run `operation` until it succeeds, fails with a non-retryable error, or
/// `max_attempts` is reached. The closure receives the 1-based attempt number.
pub async fn with_retry<F, Fut, T, E>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display + IsRetryable,
{
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(result) => {
                if attempt > 1 {
                    log::info!("{} succeeded on attempt {}", operation_name, attempt);
                }
                return Ok(result);
            }
            Err(e) if !e.is_retryable() => {
                log::warn!("{} failed (not retryable): {}", operation_name, e);
                return Err(e);
            }
            Err(e) if attempt >= policy.max_attempts => {
                log::warn!(
                    "{} failed after {} attempts: {}",
                    operation_name,
                    attempt,
                    e
                );
                return Err(e);
            }
            Err(e) => {
                let delay = policy.delay_before_retry(attempt);
                log::debug!(
                    "{} attempt {} failed: {}. Retrying in {:?}",
                    operation_name,
                    attempt,
                    e,
                    delay
                );
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// Trait for errors that can indicate retryability
pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for InferenceError {
    /// Timeouts, transport failures, 429 and 5xx are worth another try
    fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Transport { .. } => true,
            Self::Status { code, .. } => *code == 429 || (500..600).contains(code),
            Self::MalformedResponse { .. } => false,
        }
    }
}
