//! # ephoros-protocol
//!
//! Reading message types and payload codec for the sensor bridge.
//!
//! This crate defines the payload format published to MQTT topics.

pub mod codec;
pub mod messages;

pub use codec::{decode_reading, encode_reading, CodecError};
pub use messages::{ReadingMessage, SensorReading};
