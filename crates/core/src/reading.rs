//! Raw form fields and their normalization into a typed sensor reading.
//!
//! Normalization never fails. Text that is not a number reads as `0.0`, empty
//! names read as `"Unknown"`, and anything but `"L"` selects machine type `M`.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::payload::PredictionRequest;

/// Placeholder for empty text fields.
pub const UNKNOWN: &str = "Unknown";

/// The raw strings of the manual-entry form, keyed by the form's field ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFields {
    pub vehicle_name: String,
    pub model: String,
    pub machine_age: String,
    pub total_kilometers: String,
    #[serde(rename = "Air_temperature")]
    pub air_temperature: String,
    #[serde(rename = "Process_temperature")]
    pub process_temperature: String,
    #[serde(rename = "Rotational_speed")]
    pub rotational_speed: String,
    #[serde(rename = "Torque")]
    pub torque: String,
    #[serde(rename = "Tool_wear")]
    pub tool_wear: String,
    pub machine_type: String,
}

impl Default for RawFields {
    fn default() -> Self {
        Self {
            vehicle_name: String::new(),
            model: String::new(),
            machine_age: String::new(),
            total_kilometers: String::new(),
            air_temperature: String::new(),
            process_temperature: String::new(),
            rotational_speed: String::new(),
            torque: String::new(),
            tool_wear: String::new(),
            machine_type: MachineType::default().as_str().to_string(),
        }
    }
}

impl RawFields {
    /// Form field ids, in form order.
    pub const FIELD_IDS: [&'static str; 10] = [
        "vehicle_name",
        "model",
        "machine_type",
        "machine_age",
        "total_kilometers",
        "Air_temperature",
        "Process_temperature",
        "Rotational_speed",
        "Torque",
        "Tool_wear",
    ];

    fn slot(&self, field: &str) -> Option<&String> {
        Some(match field {
            "vehicle_name" => &self.vehicle_name,
            "model" => &self.model,
            "machine_age" => &self.machine_age,
            "total_kilometers" => &self.total_kilometers,
            "Air_temperature" => &self.air_temperature,
            "Process_temperature" => &self.process_temperature,
            "Rotational_speed" => &self.rotational_speed,
            "Torque" => &self.torque,
            "Tool_wear" => &self.tool_wear,
            "machine_type" => &self.machine_type,
            _ => return None,
        })
    }

    fn slot_mut(&mut self, field: &str) -> Option<&mut String> {
        Some(match field {
            "vehicle_name" => &mut self.vehicle_name,
            "model" => &mut self.model,
            "machine_age" => &mut self.machine_age,
            "total_kilometers" => &mut self.total_kilometers,
            "Air_temperature" => &mut self.air_temperature,
            "Process_temperature" => &mut self.process_temperature,
            "Rotational_speed" => &mut self.rotational_speed,
            "Torque" => &mut self.torque,
            "Tool_wear" => &mut self.tool_wear,
            "machine_type" => &mut self.machine_type,
            _ => return None,
        })
    }

    /// Current raw value of a field, by form id.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.slot(field).map(String::as_str)
    }

    /// Overwrite a field by form id.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> DomainResult<()> {
        let slot = self
            .slot_mut(field)
            .ok_or_else(|| DomainError::unknown_field(field))?;
        *slot = value.into();
        Ok(())
    }
}

/// Machine quality class. Only `L` and `M` are recognized.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineType {
    L,
    #[default]
    M,
}

impl MachineType {
    /// Exact match on `"L"` / `"M"`; anything else is the default.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "L" => MachineType::L,
            "M" => MachineType::M,
            _ => MachineType::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MachineType::L => "L",
            MachineType::M => "M",
        }
    }

    pub fn type_l(&self) -> bool {
        matches!(self, MachineType::L)
    }

    pub fn type_m(&self) -> bool {
        matches!(self, MachineType::M)
    }
}

/// A normalized reading, rebuilt for every submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub vehicle_name: String,
    pub model: String,
    /// Years, never negative.
    pub machine_age: f64,
    /// Never negative.
    pub total_kilometers: f64,
    /// Kelvin.
    pub air_temperature: f64,
    /// Kelvin.
    pub process_temperature: f64,
    /// RPM.
    pub rotational_speed: f64,
    /// Nm.
    pub torque: f64,
    /// Minutes.
    pub tool_wear: f64,
    pub machine_type: MachineType,
}

impl SensorReading {
    pub fn from_raw(raw: &RawFields) -> Self {
        Self {
            vehicle_name: text_or_unknown(&raw.vehicle_name),
            model: text_or_unknown(&raw.model),
            machine_age: non_negative(parse_number(&raw.machine_age)),
            total_kilometers: non_negative(parse_number(&raw.total_kilometers)),
            air_temperature: parse_number(&raw.air_temperature),
            process_temperature: parse_number(&raw.process_temperature),
            rotational_speed: parse_number(&raw.rotational_speed),
            torque: parse_number(&raw.torque),
            tool_wear: parse_number(&raw.tool_wear),
            machine_type: MachineType::from_raw(&raw.machine_type),
        }
    }

    pub fn to_request(&self) -> PredictionRequest {
        PredictionRequest {
            vehicle_name: self.vehicle_name.clone(),
            model: self.model.clone(),
            machine_age: self.machine_age,
            total_kilometers: self.total_kilometers,
            air_temperature: self.air_temperature,
            process_temperature: self.process_temperature,
            rotational_speed: self.rotational_speed,
            torque: self.torque,
            tool_wear: self.tool_wear,
            type_l: self.machine_type.type_l(),
            type_m: self.machine_type.type_m(),
        }
    }
}

/// Build the wire payload for a set of raw form values.
pub fn normalize(raw: &RawFields) -> PredictionRequest {
    SensorReading::from_raw(raw).to_request()
}

fn text_or_unknown(text: &str) -> String {
    if text.is_empty() {
        UNKNOWN.to_string()
    } else {
        text.to_string()
    }
}

fn non_negative(value: f64) -> f64 {
    if value < 0.0 { 0.0 } else { value }
}

/// Lenient decimal parse: skips leading whitespace and reads the longest
/// numeric prefix (`"12.5kg"` is `12.5`). Yields a finite value, never `-0.0`.
fn parse_number(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        let frac = frac_end - (end + 1);
        if mantissa + frac > 0 {
            end = frac_end;
            mantissa += frac;
        }
    }
    if mantissa == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    match s[..end].parse::<f64>() {
        // `+ 0.0` folds -0.0 into 0.0
        Ok(v) if v.is_finite() => v + 0.0,
        _ => 0.0,
    }
}
