//! `vetta-core` — sensor readings, wire payloads and prediction results.
//!
//! This crate is **pure**: no I/O, no async runtime. It is shared by the native
//! CLI and the wasm frontend.

pub mod error;
pub mod id;
pub mod payload;
pub mod reading;
pub mod result;

pub use error::{DomainError, DomainResult};
pub use id::{RequestId, SessionId};
pub use payload::PredictionRequest;
pub use reading::{MachineType, RawFields, SensorReading, normalize};
pub use result::PredictionResult;
