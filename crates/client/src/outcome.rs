//! The single value the render layer reads.

use vetta_core::PredictionResult;
use vetta_report::{RenderModel, classify};

use crate::error::PredictionError;

/// State of the most recent submission.
///
/// Transitions per submission: `Idle | Succeeded | Failed` → `Loading` →
/// `Succeeded | Failed`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PredictionOutcome {
    #[default]
    Idle,
    Loading,
    Succeeded(PredictionResult),
    Failed(PredictionError),
}

impl PredictionOutcome {
    pub(crate) fn settled(result: Result<PredictionResult, PredictionError>) -> Self {
        match result {
            Ok(r) => PredictionOutcome::Succeeded(r),
            Err(e) => PredictionOutcome::Failed(e),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PredictionOutcome::Loading)
    }

    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            PredictionOutcome::Succeeded(_) | PredictionOutcome::Failed(_)
        )
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            PredictionOutcome::Succeeded(r) => Some(r),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&PredictionError> {
        match self {
            PredictionOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// User-facing failure text, if the submission failed.
    pub fn message(&self) -> Option<&'static str> {
        self.error().map(PredictionError::user_message)
    }

    /// Render model for a successful submission.
    pub fn render(&self) -> Option<RenderModel> {
        self.result().map(classify)
    }
}
