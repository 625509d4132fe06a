//! `vetta-report`
//!
//! **Responsibility:** turn a decoded prediction into a display-ready render model.
//!
//! This crate is intentionally free of I/O and UI frameworks:
//! - It never talks to the inference service.
//! - It never interprets the narrative report (it is passed through verbatim).
//! - The same render model drives the CLI text output and the web view.

pub mod classify;
pub mod code;
pub mod format;

pub use classify::{Card, REPORT_HEADING, RenderModel, Verdict, classify};
pub use code::FailureCode;
pub use format::percent;
