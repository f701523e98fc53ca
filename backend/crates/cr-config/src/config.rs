use crate::{
    CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    InferenceConfig, LoggingConfig, QueueConfig, RetryConfig, ServerConfig, WebSocketConfig,
    WorkerConfig,
};

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub websocket: WebSocketConfig,
    pub queue: QueueConfig,
    pub worker: WorkerConfig,
    pub inference: InferenceConfig,
    pub retry: RetryConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. CR_CONFIG_DIR env var, else ./.cr/
    /// 2. Create the directory if missing
    /// 3. config.toml if present, else defaults
    /// 4. CR_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: CR_CONFIG_DIR env var > ./.cr/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate every section. Call after load() so bad settings fail at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.logging.validate()?;
        self.websocket.validate()?;
        self.queue.validate()?;
        self.worker.validate()?;
        self.inference.validate()?;
        self.retry.validate()?;
        self.validate_visibility_covers_job()?;

        Ok(())
    }

    /// Longest a worker can hold one delivery: every inference attempt runs
    /// to its timeout and every retry waits the longest backoff.
    pub fn worst_case_job_duration(&self) -> Duration {
        Duration::from_secs(self.inference.timeout_secs) * self.retry.max_attempts
            + self.retry.worst_case_backoff()
    }

    /// A lease that can expire while its worker is still inside the retry
    /// loop hands the same job to a second worker.
    fn validate_visibility_covers_job(&self) -> ConfigErrorResult<()> {
        let visibility = Duration::from_secs(self.queue.visibility_timeout_secs);
        let worst_case = self.worst_case_job_duration();

        if visibility <= worst_case {
            return Err(ConfigError::queue(format!(
                "queue.visibility_timeout_secs ({}) must exceed the longest time a worker can spend on one job ({:.2}s from inference.timeout_secs {} x retry.max_attempts {} plus retry backoff)",
                self.queue.visibility_timeout_secs,
                worst_case.as_secs_f64(),
                self.inference.timeout_secs,
                self.retry.max_attempts
            )));
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Absolute path of the log file, if file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match &self.logging.file {
            Some(file) => Ok(Some(Self::config_dir()?.join(&self.logging.dir).join(file))),
            None => Ok(None),
        }
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
        info!(
            "  websocket: topic={}, buffer={}",
            self.websocket.topic, self.websocket.send_buffer_size
        );
        info!(
            "  queue: capacity={}, visibility_timeout={}s",
            self.queue.capacity, self.queue.visibility_timeout_secs
        );
        info!("  worker: concurrency={}", self.worker.concurrency);
        info!(
            "  inference: {} model={} timeout={}s api_key={}",
            self.inference.base_url,
            self.inference.model,
            self.inference.timeout_secs,
            if self.inference.api_key.is_some() {
                "set"
            } else {
                "unset"
            }
        );
        info!(
            "  retry: attempts={}, initial={}ms, max={}s, backoff={}x",
            self.retry.max_attempts,
            self.retry.initial_delay_ms,
            self.retry.max_delay_secs,
            self.retry.backoff_multiplier
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("CR_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("CR_SERVER_PORT", &mut self.server.port);

        // Logging
        Self::apply_env_parse("CR_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("CR_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("CR_LOG_FILE", &mut self.logging.file);

        // WebSocket
        Self::apply_env_string("CR_WS_TOPIC", &mut self.websocket.topic);
        Self::apply_env_parse(
            "CR_WS_SEND_BUFFER_SIZE",
            &mut self.websocket.send_buffer_size,
        );

        // Queue
        Self::apply_env_parse("CR_QUEUE_CAPACITY", &mut self.queue.capacity);
        Self::apply_env_parse(
            "CR_QUEUE_VISIBILITY_TIMEOUT_SECS",
            &mut self.queue.visibility_timeout_secs,
        );

        // Worker
        Self::apply_env_parse("CR_WORKER_CONCURRENCY", &mut self.worker.concurrency);

        // Inference
        Self::apply_env_string("CR_INFERENCE_BASE_URL", &mut self.inference.base_url);
        Self::apply_env_string("CR_INFERENCE_MODEL", &mut self.inference.model);
        Self::apply_env_option_string("CR_INFERENCE_API_KEY", &mut self.inference.api_key);
        Self::apply_env_parse(
            "CR_INFERENCE_TIMEOUT_SECS",
            &mut self.inference.timeout_secs,
        );
        Self::apply_env_parse("CR_INFERENCE_MAX_TOKENS", &mut self.inference.max_tokens);

        // Retry
        Self::apply_env_parse("CR_RETRY_MAX_ATTEMPTS", &mut self.retry.max_attempts);
        Self::apply_env_parse(
            "CR_RETRY_INITIAL_DELAY_MS",
            &mut self.retry.initial_delay_ms,
        );
        Self::apply_env_parse("CR_RETRY_MAX_DELAY_SECS", &mut self.retry.max_delay_secs);
        Self::apply_env_parse(
            "CR_RETRY_BACKOFF_MULTIPLIER",
            &mut self.retry.backoff_multiplier,
        );
        Self::apply_env_bool("CR_RETRY_JITTER", &mut self.retry.jitter);
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true"/"1"; anything else is false
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Unparseable values are ignored and the previous value is kept
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Empty string clears the value
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = if val.is_empty() { None } else { Some(val) };
        }
    }
}
