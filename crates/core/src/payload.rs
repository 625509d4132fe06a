//! Wire payload sent to the inference service.

use serde::{Deserialize, Serialize};

/// JSON body of `POST /predict`.
///
/// Every key is always present; the service's feature names keep their
/// capitalized spelling on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub vehicle_name: String,
    pub model: String,
    pub machine_age: f64,
    pub total_kilometers: f64,
    #[serde(rename = "Air_temperature")]
    pub air_temperature: f64,
    #[serde(rename = "Process_temperature")]
    pub process_temperature: f64,
    #[serde(rename = "Rotational_speed")]
    pub rotational_speed: f64,
    #[serde(rename = "Torque")]
    pub torque: f64,
    #[serde(rename = "Tool_wear")]
    pub tool_wear: f64,
    #[serde(rename = "Type_L")]
    pub type_l: bool,
    #[serde(rename = "Type_M")]
    pub type_m: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::{RawFields, normalize};
    use serde_json::json;

    #[test]
    fn serializes_with_service_field_names() {
        let mut raw = RawFields::default();
        raw.set("Torque", "42.8").unwrap();
        raw.set("machine_type", "L").unwrap();

        let body = serde_json::to_value(normalize(&raw)).unwrap();
        assert_eq!(
            body,
            json!({
                "vehicle_name": "Unknown",
                "model": "Unknown",
                "machine_age": 0.0,
                "total_kilometers": 0.0,
                "Air_temperature": 0.0,
                "Process_temperature": 0.0,
                "Rotational_speed": 0.0,
                "Torque": 42.8,
                "Tool_wear": 0.0,
                "Type_L": true,
                "Type_M": false,
            })
        );
    }

    #[test]
    fn has_no_optional_keys() {
        let body = serde_json::to_value(normalize(&RawFields::default())).unwrap();
        let obj = body.as_object().unwrap();
        assert_eq!(obj.len(), 11);
        assert!(obj.values().all(|v| !v.is_null() && !v.is_object()));
    }
}
