//! `vetta-client`
//!
//! **Responsibility:** submit sensor readings to the inference service and own
//! the resulting outcome.
//!
//! This crate provides:
//! - Client configuration (endpoint, timeout)
//! - A typed error taxonomy mapped to one user-facing string at render time
//! - The HTTP transport (reqwest; `fetch` under wasm)
//! - `PredictionSession`, the per-form state container that sequences submissions
//!
//! The web frontend (wasm32 only) is a thin Leptos view over a session.

pub mod config;
pub mod error;
pub mod outcome;
pub mod session;
pub mod timer;
pub mod transport;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use config::{ClientConfig, ConfigError};
pub use error::PredictionError;
pub use outcome::PredictionOutcome;
pub use session::{PredictionSession, Ticket};
pub use transport::{HttpTransport, PredictionTransport};
