//! Payload codec for reading messages.
//!
//! Readings are published as JSON text. This module provides encoding and
//! decoding utilities for the payload format.

use crate::messages::ReadingMessage;
use thiserror::Error;

/// Errors that can occur during payload encoding/decoding.
#[derive(Debug, Error)]
pub enum CodecError {
    /// JSON serialization failed.
    #[error("Failed to serialize payload: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Encode a reading message to the JSON payload published over MQTT.
pub fn encode_reading(msg: &ReadingMessage) -> Result<String, CodecError> {
    serde_json::to_string(msg).map_err(CodecError::from)
}

/// Decode a JSON payload back into a reading message.
pub fn decode_reading(text: &str) -> Result<ReadingMessage, CodecError> {
    serde_json::from_str(text).map_err(CodecError::from)
}
