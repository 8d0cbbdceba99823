//! Message types for sensor readings.
//!
//! A reading arrives from the field bus as an identifier plus a measured
//! value, and leaves the bridge as a JSON payload pairing the value with
//! the time it was published:
//!
//! ```json
//! { "value": 23.5625, "timestamp": "2024-01-17T10:30:00.000Z" }
//! ```

use serde::{Deserialize, Serialize};

/// A raw reading reported by a sensor on the CAN network.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    /// Identifier the CAN network assigned to the sensor.
    pub sensor_id: String,

    /// Measured value.
    pub value: f64,
}

impl SensorReading {
    /// Create a reading for the given sensor.
    pub fn new(sensor_id: impl Into<String>, value: f64) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            value,
        }
    }
}

/// Payload published to a sensor's topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingMessage {
    /// Measured value.
    pub value: f64,

    /// ISO 8601 timestamp (UTC).
    pub timestamp: String,
}

impl ReadingMessage {
    /// Create a message stamped with the current UTC time.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        }
    }

    /// Create a message with an explicit timestamp.
    ///
    /// Used by tests that need deterministic payloads.
    pub fn with_timestamp(value: f64, timestamp: impl Into<String>) -> Self {
        Self {
            value,
            timestamp: timestamp.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serialize() {
        let msg = ReadingMessage::with_timestamp(23.5625, "2024-01-17T10:30:00.000Z");
        let json = serde_json::to_string(&msg).unwrap();

        assert!(json.contains("\"value\":23.5625"));
        assert!(json.contains("\"timestamp\":\"2024-01-17T10:30:00.000Z\""));
    }

    #[test]
    fn test_message_deserialize() {
        let json = r#"{ "value": 3.85, "timestamp": "2024-01-17T10:30:00.000Z" }"#;

        let msg: ReadingMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.value, 3.85);
        assert_eq!(msg.timestamp, "2024-01-17T10:30:00.000Z");
    }

    #[test]
    fn test_new_stamps_current_time() {
        let msg = ReadingMessage::new(1.0);

        // RFC 3339 with millisecond precision, UTC designator.
        assert!(msg.timestamp.ends_with('Z'));
        assert!(msg.timestamp.contains('T'));
    }
}
