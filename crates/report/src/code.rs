//! Failure codes returned by the inference service and their display labels.

use serde::{Serialize, Serializer};

/// Failure mechanism named by the service.
///
/// The four known codes get a human label; anything else is carried through
/// untouched and displayed as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FailureCode {
    /// `TWF`
    ToolWear,
    /// `HDF`
    HeatDissipation,
    /// `PWF`
    Power,
    /// `OSF`
    Overstrain,
    Other(String),
}

impl FailureCode {
    pub fn parse(code: &str) -> Self {
        match code {
            "TWF" => FailureCode::ToolWear,
            "HDF" => FailureCode::HeatDissipation,
            "PWF" => FailureCode::Power,
            "OSF" => FailureCode::Overstrain,
            other => FailureCode::Other(other.to_string()),
        }
    }

    /// Wire spelling.
    pub fn code(&self) -> &str {
        match self {
            FailureCode::ToolWear => "TWF",
            FailureCode::HeatDissipation => "HDF",
            FailureCode::Power => "PWF",
            FailureCode::Overstrain => "OSF",
            FailureCode::Other(code) => code,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FailureCode::ToolWear => "Tool Wear",
            FailureCode::HeatDissipation => "Heat Dissipation",
            FailureCode::Power => "Power",
            FailureCode::Overstrain => "Overstrain",
            FailureCode::Other(code) => code,
        }
    }
}

impl core::fmt::Display for FailureCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for FailureCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}
