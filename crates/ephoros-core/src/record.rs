//! Sensor record validation.
//!
//! Each element of the configuration's "sensors" array describes one
//! physical sensor: the identifier assigned by the CAN network and the MQTT
//! topic its readings are routed to. This module validates a single JSON
//! node and produces an owned record that outlives the parsed document.

use serde_json::{Map, Value};

use crate::table::ConfigError;

/// One validated sensor entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorRecord {
    /// Identifier assigned by the CAN network.
    pub id: String,

    /// Destination topic on the MQTT side.
    pub topic: String,
}

impl SensorRecord {
    /// Validate one element of the "sensors" array.
    ///
    /// The node must be a JSON object carrying non-empty string `id` and
    /// `topic` properties. Unknown properties are ignored, so newer
    /// configuration documents keep loading on older firmware.
    pub fn from_json(node: &Value) -> Result<Self, ConfigError> {
        let entry = node
            .as_object()
            .ok_or_else(|| ConfigError::invalid("sensor entry is not an object"))?;

        let id = string_property(entry, "id")?;
        let topic = string_property(entry, "topic")?;

        // Copies must outlive the parsed document; if the second copy
        // fails, the first is dropped before the error propagates.
        Ok(Self {
            id: owned_copy(id)?,
            topic: owned_copy(topic)?,
        })
    }
}

/// Look up a required non-empty string property on a sensor entry.
fn string_property<'a>(entry: &'a Map<String, Value>, key: &str) -> Result<&'a str, ConfigError> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            ConfigError::invalid(format!(
                "sensor entry is missing a non-empty string \"{key}\" property"
            ))
        })
}

/// Copy a borrowed string out of the parsed document, reporting allocation
/// exhaustion as an error instead of aborting the process.
fn owned_copy(value: &str) -> Result<String, ConfigError> {
    let mut copy = String::new();
    copy.try_reserve_exact(value.len())
        .map_err(|_| ConfigError::Allocation)?;
    copy.push_str(value);
    Ok(copy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_entry() {
        let node = serde_json::json!({
            "id": "NTC1",
            "topic": "Battery/Module-1/NTC-1"
        });

        let record = SensorRecord::from_json(&node).unwrap();
        assert_eq!(record.id, "NTC1");
        assert_eq!(record.topic, "Battery/Module-1/NTC-1");
    }

    #[test]
    fn test_unknown_properties_ignored() {
        let node = serde_json::json!({
            "id": "NTC1",
            "topic": "Battery/Module-1/NTC-1",
            "module": 1,
            "calibration": { "offset": 0.5 }
        });

        let record = SensorRecord::from_json(&node).unwrap();
        assert_eq!(record.id, "NTC1");
    }

    #[test]
    fn test_rejects_non_object() {
        let node = serde_json::json!(["NTC1", "Battery/Module-1/NTC-1"]);
        let err = SensorRecord::from_json(&node).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_missing_id() {
        let node = serde_json::json!({ "topic": "Battery/Module-1/NTC-1" });
        let err = SensorRecord::from_json(&node).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_missing_topic() {
        let node = serde_json::json!({ "id": "NTC1" });
        let err = SensorRecord::from_json(&node).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_non_string_id() {
        let node = serde_json::json!({ "id": 17, "topic": "Battery/Module-1/NTC-1" });
        let err = SensorRecord::from_json(&node).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_empty_fields() {
        let node = serde_json::json!({ "id": "", "topic": "Battery/Module-1/NTC-1" });
        assert!(SensorRecord::from_json(&node).is_err());

        let node = serde_json::json!({ "id": "NTC1", "topic": "" });
        assert!(SensorRecord::from_json(&node).is_err());
    }

    #[test]
    fn test_record_owns_its_strings() {
        let record;
        {
            let node = serde_json::json!({
                "id": "NTC1",
                "topic": "Battery/Module-1/NTC-1"
            });
            record = SensorRecord::from_json(&node).unwrap();
            // node is dropped here
        }

        assert_eq!(record.id, "NTC1");
        assert_eq!(record.topic, "Battery/Module-1/NTC-1");
    }
}
