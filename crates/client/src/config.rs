//! Client configuration.

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

/// Environment variable overriding the inference endpoint.
pub const ENDPOINT_VAR: &str = "VETTA_ENDPOINT";
/// Environment variable overriding the request timeout, in seconds.
pub const TIMEOUT_VAR: &str = "VETTA_TIMEOUT_SECS";

pub const DEFAULT_ENDPOINT: &str = "https://buddhi-vetta.onrender.com/predict";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// `POST` target for predictions.
    pub endpoint: Url,
    /// Upper bound on one submission, after which it fails with a timeout.
    pub timeout: Duration,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid endpoint `{value}`: {reason}")]
    Endpoint { value: String, reason: String },
    #[error("invalid timeout `{0}`: expected a positive number of seconds")]
    Timeout(String),
}

impl ClientConfig {
    pub fn new(endpoint: Url, timeout: Duration) -> Self {
        Self { endpoint, timeout }
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; missing keys use the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = match lookup(ENDPOINT_VAR) {
            Some(raw) => parse_endpoint(raw.trim())?,
            None => parse_endpoint(DEFAULT_ENDPOINT)?,
        };

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => parse_timeout(raw.trim())?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self { endpoint, timeout })
    }
}

fn parse_endpoint(value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::Endpoint {
        value: value.to_string(),
        reason,
    };

    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme `{other}`"))),
    }
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs > 0.0)
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| ConfigError::Timeout(value.to_string()))
}
