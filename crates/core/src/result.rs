//! Prediction returned by the inference service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Decoded, schema-checked success body.
///
/// Deserializes from (and serializes to) the service's wire shape:
///
/// ```json
/// { "prediction": { "failure": 1, "failure_probability": 0.87,
///                   "failure_types": { "TWF": 0.6 } },
///   "report": "..." }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PredictionEnvelope", into = "PredictionEnvelope")]
pub struct PredictionResult {
    pub failure: bool,
    /// In \[0, 1\].
    pub failure_probability: f64,
    /// Failure code to probability in \[0, 1\].
    pub failure_types: BTreeMap<String, f64>,
    /// Narrative text, opaque to the client.
    pub report: String,
}

impl PredictionResult {
    pub fn healthy(failure_probability: f64, report: impl Into<String>) -> Self {
        Self {
            failure: false,
            failure_probability,
            failure_types: BTreeMap::new(),
            report: report.into(),
        }
    }

    pub fn failing(failure_probability: f64, report: impl Into<String>) -> Self {
        Self {
            failure: true,
            ..Self::healthy(failure_probability, report)
        }
    }

    pub fn with_failure_type(mut self, code: impl Into<String>, probability: f64) -> Self {
        self.failure_types.insert(code.into(), probability);
        self
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PredictionEnvelope {
    prediction: PredictionBody,
    #[serde(default)]
    report: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PredictionBody {
    failure: FailureFlag,
    #[serde(default)]
    failure_probability: Option<f64>,
    #[serde(default)]
    failure_types: Option<BTreeMap<String, f64>>,
}

/// The service reports `failure` as `0`/`1`; booleans are accepted too.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum FailureFlag {
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl FailureFlag {
    fn to_bool(&self) -> Result<bool, DomainError> {
        match *self {
            FailureFlag::Bool(b) => Ok(b),
            FailureFlag::Int(0) => Ok(false),
            FailureFlag::Int(1) => Ok(true),
            FailureFlag::Float(f) if f == 0.0 => Ok(false),
            FailureFlag::Float(f) if f == 1.0 => Ok(true),
            ref other => Err(DomainError::validation(format!(
                "failure must be 0 or 1, got {other:?}"
            ))),
        }
    }
}

fn check_probability(name: &str, p: f64) -> Result<f64, DomainError> {
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(DomainError::validation(format!(
            "{name} must be within [0, 1], got {p}"
        )))
    }
}

impl TryFrom<PredictionEnvelope> for PredictionResult {
    type Error = DomainError;

    fn try_from(env: PredictionEnvelope) -> Result<Self, Self::Error> {
        let body = env.prediction;
        let failure = body.failure.to_bool()?;
        let failure_probability =
            check_probability("failure_probability", body.failure_probability.unwrap_or(0.0))?;

        let failure_types = body.failure_types.unwrap_or_default();
        for (code, p) in &failure_types {
            check_probability(&format!("failure_types.{code}"), *p)?;
        }

        Ok(Self {
            failure,
            failure_probability,
            failure_types,
            report: env.report.unwrap_or_default(),
        })
    }
}

impl From<PredictionResult> for PredictionEnvelope {
    fn from(r: PredictionResult) -> Self {
        Self {
            prediction: PredictionBody {
                failure: FailureFlag::Int(i64::from(r.failure)),
                failure_probability: Some(r.failure_probability),
                failure_types: Some(r.failure_types),
            },
            report: Some(r.report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(v: serde_json::Value) -> Result<PredictionResult, serde_json::Error> {
        serde_json::from_value(v)
    }

    #[test]
    fn decodes_failure_with_modes() {
        let r = decode(json!({
            "prediction": {
                "failure": 1,
                "failure_probability": 0.87,
                "failure_types": { "TWF": 0.6, "HDF": 0.3 }
            },
            "report": "inspect the spindle"
        }))
        .unwrap();

        assert!(r.failure);
        assert_eq!(r.failure_probability, 0.87);
        assert_eq!(r.failure_types.len(), 2);
        assert_eq!(r.failure_types["TWF"], 0.6);
        assert_eq!(r.report, "inspect the spindle");
    }

    #[test]
    fn missing_optional_parts_use_defaults() {
        let r = decode(json!({ "prediction": { "failure": 0 } })).unwrap();
        assert_eq!(r, PredictionResult::healthy(0.0, ""));

        let r = decode(json!({
            "prediction": { "failure": false, "failure_probability": null, "failure_types": null },
            "report": null
        }))
        .unwrap();
        assert_eq!(r, PredictionResult::healthy(0.0, ""));
    }

    #[test]
    fn accepts_boolean_failure_flag() {
        let r = decode(json!({ "prediction": { "failure": true, "failure_probability": 0.5 } }))
            .unwrap();
        assert!(r.failure);
    }

    #[test]
    fn rejects_schema_violations() {
        let bad = [
            json!({ "prediction": { "failure": 2 } }),
            json!({ "prediction": { "failure": "yes" } }),
            json!({ "prediction": { "failure": 1, "failure_probability": 1.5 } }),
            json!({ "prediction": { "failure": 1, "failure_types": { "TWF": -0.1 } } }),
            json!({ "prediction": { "failure": 1, "failure_types": { "TWF": "high" } } }),
            json!({ "prediction": { "failure": 1 }, "report": 7 }),
            json!({ "report": "no prediction" }),
            json!([1, 2, 3]),
        ];
        for body in bad {
            assert!(decode(body.clone()).is_err(), "accepted {body}");
        }
    }

    #[test]
    fn serializes_to_wire_shape() {
        let r = PredictionResult::failing(0.87, "r").with_failure_type("OSF", 0.25);
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(
            v,
            json!({
                "prediction": {
                    "failure": 1,
                    "failure_probability": 0.87,
                    "failure_types": { "OSF": 0.25 }
                },
                "report": "r"
            })
        );
        assert_eq!(decode(v).unwrap(), r);
    }
}
