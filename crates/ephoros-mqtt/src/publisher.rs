//! MQTT publisher abstraction.
//!
//! The bridge stays independent of any particular MQTT client. By
//! abstracting the publisher, the routing logic can be shared between
//! platforms:
//! - Device builds wrap the platform's MQTT client
//! - Tests and tools use in-memory or logging publishers
//!
//! All methods are synchronous to support embedded platforms. Async
//! wrappers can be added at the application layer.

use thiserror::Error;

/// Errors surfaced by a publisher implementation.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The broker settings are incomplete.
    #[error("broker configuration is incomplete")]
    InvalidConfig,

    /// The connection to the broker could not be started.
    #[error("failed to start the MQTT connection: {0}")]
    Start(String),

    /// The message was not accepted for delivery.
    #[error("failed to publish to {topic}: {reason}")]
    Publish { topic: String, reason: String },
}

/// Connection settings for the MQTT broker.
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    /// Broker URI, e.g. "mqtt://broker.local:1883".
    pub broker_uri: String,

    /// Username presented to the broker.
    pub username: String,

    /// Password presented to the broker.
    pub password: String,
}

impl BrokerConfig {
    /// Check that every field required to reach the broker is present.
    pub fn validate(&self) -> Result<(), PublishError> {
        if self.broker_uri.is_empty() || self.username.is_empty() || self.password.is_empty() {
            return Err(PublishError::InvalidConfig);
        }
        Ok(())
    }
}

/// Abstract message publisher.
///
/// Implementations deliver a payload to a topic on the broker and report
/// delivery failures through [`PublishError`].
pub trait Publisher {
    /// Publish a payload to the given topic.
    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), PublishError>;
}
