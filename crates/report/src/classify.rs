//! Classification of a prediction into a verdict and risk cards.
//!
//! Rules:
//! - `failure == false`: one healthy overall-risk card, failure modes ignored.
//! - `failure == true`: the overall-risk card, then one card per failure code,
//!   or a single "none detected" placeholder when no codes were returned.

use serde::Serialize;

use vetta_core::PredictionResult;

use crate::code::FailureCode;
use crate::format::percent;

/// Heading above the narrative report.
pub const REPORT_HEADING: &str = "AI Diagnostic Report";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Healthy,
    MaintenanceRequired,
}

impl Verdict {
    pub fn title(&self) -> &'static str {
        match self {
            Verdict::Healthy => "System Healthy",
            Verdict::MaintenanceRequired => "Maintenance Required",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Verdict::Healthy => {
                "All operational parameters are within normal thresholds. \
                 There are no immediate risks detected for this machine."
            }
            Verdict::MaintenanceRequired => {
                "Our model has detected a high probability of machine failure. \
                 Please review the specific risks and AI diagnostic report below."
            }
        }
    }
}

/// One tile of the risk grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Card {
    OverallRisk {
        probability: f64,
        percent: String,
    },
    FailureMode {
        code: FailureCode,
        probability: f64,
        percent: String,
    },
    /// Failure predicted, but the service named no specific mode.
    NoModeDetected,
}

impl Card {
    fn overall(probability: f64) -> Self {
        Card::OverallRisk {
            probability,
            percent: percent(probability),
        }
    }

    fn failure_mode(code: &str, probability: f64) -> Self {
        Card::FailureMode {
            code: FailureCode::parse(code),
            probability,
            percent: percent(probability),
        }
    }

    pub fn heading(&self) -> String {
        match self {
            Card::OverallRisk { .. } => "Overall Failure Risk".to_string(),
            Card::FailureMode { code, .. } => format!("{} RISK", code.label()),
            Card::NoModeDetected => "Primary Failure Mode".to_string(),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Card::OverallRisk { percent, .. } | Card::FailureMode { percent, .. } => {
                percent.as_str()
            }
            Card::NoModeDetected => "None Detected",
        }
    }

    /// Failure-mode cards and the placeholder, as opposed to the overall card.
    pub fn is_mode(&self) -> bool {
        !matches!(self, Card::OverallRisk { .. })
    }
}

/// Display-ready view of one prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderModel {
    pub verdict: Verdict,
    pub title: &'static str,
    pub summary: &'static str,
    /// Overall-risk card first, then mode cards ordered by failure code.
    pub cards: Vec<Card>,
    /// Verbatim narrative from the service.
    pub report: String,
}

impl RenderModel {
    pub fn mode_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.is_mode())
    }
}

pub fn classify(result: &PredictionResult) -> RenderModel {
    let verdict = if result.failure {
        Verdict::MaintenanceRequired
    } else {
        Verdict::Healthy
    };

    let mut cards = vec![Card::overall(result.failure_probability)];
    if result.failure {
        if result.failure_types.is_empty() {
            cards.push(Card::NoModeDetected);
        } else {
            // BTreeMap iteration keeps the cards in code order.
            cards.extend(
                result
                    .failure_types
                    .iter()
                    .map(|(code, p)| Card::failure_mode(code, *p)),
            );
        }
    }

    RenderModel {
        verdict,
        title: verdict.title(),
        summary: verdict.summary(),
        cards,
        report: result.report.clone(),
    }
}

impl core::fmt::Display for RenderModel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.summary)?;
        writeln!(f)?;
        for card in &self.cards {
            writeln!(f, "  {}: {}", card.heading(), card.value())?;
        }
        writeln!(f)?;
        writeln!(f, "{REPORT_HEADING}")?;
        writeln!(f, "{}", "-".repeat(REPORT_HEADING.len()))?;
        write!(f, "{}", self.report)
    }
}
