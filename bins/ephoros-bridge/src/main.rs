use ephoros_core::SensorTable;
use ephoros_mqtt::{BrokerConfig, PublishError, Publisher, ReadingBridge};
use ephoros_protocol::SensorReading;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Built-in configuration used when no document is found on disk, so the
/// bridge runs out of the box.
const DEMO_CONFIG: &str = r#"{
    "sensors": [
        { "id": "NTC1", "topic": "Battery/Module-1/NTC-1" },
        { "id": "NTC2", "topic": "Battery/Module-2/NTC-2" },
        { "id": "NTC3", "topic": "Battery/Module-3/NTC-3" }
    ]
}"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,ephoros_mqtt=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Ephoros bridge starting...");

    // Configuration document
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sensors.json".to_string());
    let bytes = match std::fs::read(&config_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Could not read {}: {} - using built-in demo config", config_path, e);
            DEMO_CONFIG.as_bytes().to_vec()
        }
    };

    let table = SensorTable::from_slice(&bytes)?;
    tracing::info!("Loaded {} sensor(s) from configuration", table.len());

    // Broker settings
    let broker = BrokerConfig {
        broker_uri: std::env::var("EPHOROS_BROKER_URI")
            .unwrap_or_else(|_| "mqtt://localhost:1883".to_string()),
        username: std::env::var("EPHOROS_USERNAME").unwrap_or_else(|_| "ephoros".to_string()),
        password: std::env::var("EPHOROS_PASSWORD").unwrap_or_else(|_| "ephoros".to_string()),
    };
    broker.validate()?;
    tracing::info!("Broker target: {}", broker.broker_uri);

    let mut bridge = ReadingBridge::new(table, LogPublisher);

    // Demo data generator - simulated battery module temperatures
    let ids: Vec<String> = bridge
        .table()
        .records()
        .iter()
        .map(|record| record.id.clone())
        .collect();
    let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(1));
    let mut tick: u64 = 0;

    tracing::info!("🚀 Ephoros bridge ready!");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received Ctrl+C, shutting down...");
                break;
            }
            _ = interval.tick() => {
                tick += 1;
                for (i, id) in ids.iter().enumerate() {
                    // Vary each module's temperature slightly around 23.5 C
                    let value = 23.5 + ((tick + i as u64) as f64 * 0.1).sin();
                    let reading = SensorReading::new(id.clone(), value);
                    if let Err(e) = bridge.publish_reading(&reading) {
                        tracing::error!("Publish failed: {}", e);
                    }
                }
            }
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Publisher that logs deliveries instead of talking to a broker.
///
/// Stands in for the device's MQTT client on desktop runs.
struct LogPublisher;

impl Publisher for LogPublisher {
    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), PublishError> {
        tracing::info!("{} <- {}", topic, payload);
        Ok(())
    }
}
