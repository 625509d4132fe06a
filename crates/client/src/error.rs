//! Why a submission failed.
//!
//! The variants stay distinct for logs and tests; users only ever see
//! [`PredictionError::user_message`].

use std::time::Duration;

use thiserror::Error;

/// Shown for every failure except a timeout.
pub const GENERIC_MESSAGE: &str = "prediction request failed";
/// Shown when the service did not answer within the configured bound.
pub const TIMEOUT_MESSAGE: &str = "timeout";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PredictionError {
    /// The request never produced a response (DNS, refused connection, reset).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service answered with a non-2xx status. The body is not interpreted.
    #[error("service responded with status {status}")]
    Service { status: u16 },

    /// A 2xx response whose body is not a valid prediction.
    #[error("malformed prediction response: {0}")]
    Parse(String),

    #[error("no response within {0:?}")]
    Timeout(Duration),
}

impl PredictionError {
    pub fn user_message(&self) -> &'static str {
        match self {
            PredictionError::Timeout(_) => TIMEOUT_MESSAGE,
            _ => GENERIC_MESSAGE,
        }
    }

    /// Short tag for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PredictionError::Transport(_) => "transport",
            PredictionError::Service { .. } => "service",
            PredictionError::Parse(_) => "parse",
            PredictionError::Timeout(_) => "timeout",
        }
    }
}
