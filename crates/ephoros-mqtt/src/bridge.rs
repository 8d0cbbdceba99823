//! Routing of sensor readings to their configured topics.
//!
//! The bridge pairs the sensor table with a publisher: each incoming
//! reading is looked up by sensor identifier, wrapped in a timestamped
//! payload, and handed to the publisher. Readings from sensors that are
//! not configured are dropped and counted; that is a normal condition,
//! not a failure.

use ephoros_core::SensorTable;
use ephoros_protocol::{encode_reading, CodecError, ReadingMessage, SensorReading};
use thiserror::Error;
use tracing::debug;

use crate::publisher::{PublishError, Publisher};

/// Errors from publishing a reading end to end.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The payload could not be encoded.
    #[error("failed to encode payload: {0}")]
    Encode(#[from] CodecError),

    /// The publisher rejected the message.
    #[error("failed to publish reading: {0}")]
    Publish(#[from] PublishError),
}

/// Routes readings through the sensor table to a publisher.
pub struct ReadingBridge<P: Publisher> {
    table: SensorTable,
    publisher: P,
    /// Readings dropped because no topic was configured.
    dropped: u64,
}

impl<P: Publisher> ReadingBridge<P> {
    /// Create a bridge over a built table and a started publisher.
    pub fn new(table: SensorTable, publisher: P) -> Self {
        Self {
            table,
            publisher,
            dropped: 0,
        }
    }

    /// Publish one reading to its configured topic.
    ///
    /// Returns `Ok(true)` when the reading was published and `Ok(false)`
    /// when no topic is configured for the sensor; only encoding and
    /// transport failures are errors.
    pub fn publish_reading(&mut self, reading: &SensorReading) -> Result<bool, BridgeError> {
        let Some(topic) = self.table.topic_for(&reading.sensor_id) else {
            self.dropped += 1;
            debug!(sensor_id = %reading.sensor_id, "no topic configured, dropping reading");
            return Ok(false);
        };

        let message = ReadingMessage::new(reading.value);
        let payload = encode_reading(&message)?;
        self.publisher.publish(&topic, &payload)?;

        Ok(true)
    }

    /// Number of readings dropped because no topic was configured.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// The table backing this bridge.
    pub fn table(&self) -> &SensorTable {
        &self.table
    }

    /// The publisher backing this bridge.
    pub fn publisher(&self) -> &P {
        &self.publisher
    }
}
