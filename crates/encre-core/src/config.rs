//! Configuration: remote endpoints from the environment, pipeline timing.

use std::time::Duration;
use thiserror::Error;

pub const GENERATION_WEBHOOK_URL_VAR: &str = "ENCRE_GENERATION_WEBHOOK_URL";
pub const PUBLISH_WEBHOOK_URL_VAR: &str = "ENCRE_PUBLISH_WEBHOOK_URL";
pub const STORE_URL_VAR: &str = "ENCRE_STORE_URL";
pub const STORE_API_KEY_VAR: &str = "ENCRE_STORE_API_KEY";
pub const GENERATION_WAIT_MS_VAR: &str = "ENCRE_GENERATION_WAIT_MS";
pub const PUBLISH_WAIT_MS_VAR: &str = "ENCRE_PUBLISH_WAIT_MS";
pub const HTTP_TIMEOUT_MS_VAR: &str = "ENCRE_HTTP_TIMEOUT_MS";

pub const DEFAULT_GENERATION_WAIT: Duration = Duration::from_secs(10);
pub const DEFAULT_PUBLISH_WAIT: Duration = Duration::from_secs(3);
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {reason}")]
    InvalidVar { name: &'static str, reason: String },
}

/// Timing knobs of the choreography.
///
/// The waits are the fixed delays between a webhook dispatch and the
/// datastore read-back; there is deliberately no retry/poll interval to
/// configure.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub generation_wait: Duration,
    pub publish_wait: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            generation_wait: DEFAULT_GENERATION_WAIT,
            publish_wait: DEFAULT_PUBLISH_WAIT,
        }
    }
}

/// Where the remote endpoints live.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub generation_webhook_url: String,
    pub publish_webhook_url: String,
    pub store_url: String,
    pub store_api_key: String,
    pub http_timeout: Duration,
}

/// Everything the binary needs, read from the environment.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub remote: RemoteConfig,
    pub pipeline: PipelineConfig,
}

impl EnvConfig {
    /// `None` when no remote endpoint variable is set at all (the caller can
    /// fall back to an offline mode); an error when the configuration is
    /// only partially there, so a typo fails fast instead of half-working.
    pub fn detect() -> Result<Option<Self>, ConfigError> {
        let required = [
            GENERATION_WEBHOOK_URL_VAR,
            PUBLISH_WEBHOOK_URL_VAR,
            STORE_URL_VAR,
            STORE_API_KEY_VAR,
        ];
        if required.iter().all(|name| std::env::var(name).is_err()) {
            return Ok(None);
        }
        Self::from_env().map(Some)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let remote = RemoteConfig {
            generation_webhook_url: require(GENERATION_WEBHOOK_URL_VAR)?,
            publish_webhook_url: require(PUBLISH_WEBHOOK_URL_VAR)?,
            store_url: require(STORE_URL_VAR)?,
            store_api_key: require(STORE_API_KEY_VAR)?,
            http_timeout: optional_duration_ms(HTTP_TIMEOUT_MS_VAR, DEFAULT_HTTP_TIMEOUT)?,
        };
        let pipeline = PipelineConfig {
            generation_wait: optional_duration_ms(GENERATION_WAIT_MS_VAR, DEFAULT_GENERATION_WAIT)?,
            publish_wait: optional_duration_ms(PUBLISH_WAIT_MS_VAR, DEFAULT_PUBLISH_WAIT)?,
        };
        Ok(Self { remote, pipeline })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn optional_duration_ms(name: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    match std::env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => parse_duration_ms(name, &raw),
    }
}

fn parse_duration_ms(name: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| ConfigError::InvalidVar {
            name,
            reason: e.to_string(),
        })
}
