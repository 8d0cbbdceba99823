//! # ephoros-mqtt
//!
//! MQTT publisher abstraction and reading bridge.
//!
//! This crate connects the sensor table to a message broker:
//! - Broker connection settings and their validation
//! - An abstract publisher trait implemented per platform
//! - The bridge that routes each reading to its configured topic

pub mod bridge;
pub mod publisher;

pub use bridge::{BridgeError, ReadingBridge};
pub use publisher::{BrokerConfig, PublishError, Publisher};
