//! In-memory sensor configuration table.
//!
//! The table is built once from a JSON configuration document and never
//! mutated afterwards; readings are routed by looking up the topic for a
//! sensor identifier. Construction is all-or-nothing: the first parse,
//! validation, or allocation failure returns an error and no table, with
//! every partially built record released on the way out.

use serde_json::Value;
use thiserror::Error;

use crate::record::SensorRecord;

/// Upper bound on JSON nodes accepted from a configuration document.
pub const MAX_JSON_NODES: usize = 2048;

/// Upper bound on sensor records kept in a table.
pub const MAX_SENSOR_RECORDS: usize = 1024;

/// Errors that can occur while building a sensor table.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Memory could not be reserved for the table or one of its records.
    #[error("allocation failed while building the sensor table")]
    Allocation,

    /// The document is not valid JSON or does not have the expected shape.
    #[error("invalid sensor configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ConfigError::Invalid(reason.into())
    }
}

/// Capacity limits applied while parsing a configuration document.
///
/// The defaults are sized for small targets; tests pass smaller values to
/// exercise boundary behavior.
#[derive(Debug, Clone, Copy)]
pub struct TableLimits {
    /// Documents holding more JSON nodes than this are rejected.
    pub max_nodes: usize,

    /// Sensor entries beyond this count are dropped, not rejected.
    pub max_records: usize,
}

impl Default for TableLimits {
    fn default() -> Self {
        Self {
            max_nodes: MAX_JSON_NODES,
            max_records: MAX_SENSOR_RECORDS,
        }
    }
}

/// The identifier-to-topic mapping for all configured sensors.
///
/// After construction the table is immutable read-only data; any number of
/// threads may call [`SensorTable::topic_for`] concurrently as long as the
/// owner keeps the table alive.
#[derive(Debug, Clone)]
pub struct SensorTable {
    /// Records in document order.
    records: Vec<SensorRecord>,
}

impl SensorTable {
    /// Build a table from the bytes of a JSON configuration document.
    ///
    /// The input is read, never mutated, and nothing in the returned table
    /// borrows from it.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        Self::from_slice_with_limits(bytes, TableLimits::default())
    }

    /// Build a table with explicit capacity limits.
    ///
    /// The top level must be an object with a `sensors` array; each element
    /// is validated by [`SensorRecord::from_json`] in document order.
    /// Elements beyond `limits.max_records` are dropped silently rather
    /// than rejected.
    pub fn from_slice_with_limits(bytes: &[u8], limits: TableLimits) -> Result<Self, ConfigError> {
        let document: Value = serde_json::from_slice(bytes)
            .map_err(|e| ConfigError::invalid(format!("not well-formed JSON: {e}")))?;

        if node_count(&document) > limits.max_nodes {
            return Err(ConfigError::invalid(format!(
                "document exceeds the limit of {} JSON nodes",
                limits.max_nodes
            )));
        }

        let sensors = document
            .get("sensors")
            .ok_or_else(|| ConfigError::invalid("missing top-level \"sensors\" property"))?
            .as_array()
            .ok_or_else(|| ConfigError::invalid("\"sensors\" is not an array"))?;

        // Reserve the worst case up front, then shrink to the accepted
        // count once the loop is done.
        let mut records = Vec::new();
        records
            .try_reserve_exact(limits.max_records)
            .map_err(|_| ConfigError::Allocation)?;

        for node in sensors.iter().take(limits.max_records) {
            records.push(SensorRecord::from_json(node)?);
        }
        records.shrink_to_fit();

        Ok(Self { records })
    }

    /// Topic configured for the given sensor identifier.
    ///
    /// Scans records in document order and returns an owned copy of the
    /// first matching topic, detached from the table. `None` means the
    /// sensor is not configured, which callers treat as a normal condition
    /// rather than an error.
    pub fn topic_for(&self, id: &str) -> Option<String> {
        self.records
            .iter()
            .find(|record| record.id == id)
            .map(|record| record.topic.clone())
    }

    /// Number of configured sensors.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the document configured no sensors.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in document order.
    pub fn records(&self) -> &[SensorRecord] {
        &self.records
    }
}

/// Number of nodes in a parsed JSON tree: one per value, containers
/// counting themselves plus their children.
fn node_count(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(node_count).sum::<usize>(),
        Value::Object(entries) => 1 + entries.values().map(node_count).sum::<usize>(),
        _ => 1,
    }
}
