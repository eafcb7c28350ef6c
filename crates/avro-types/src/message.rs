//! Kafka message types.
//!
//! High-level wrappers for decoded Kafka records, shared between the consumer
//! crate that produces them and the harness that prints them.

use crate::schema_id::SchemaId;
use crate::value::AvroValue;
use base64::Engine;
use std::fmt;

/// A decoded Kafka record with metadata.
///
/// The topic/partition/offset metadata comes from the consumption loop; only
/// the key and value are produced by decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Kafka topic name
    pub topic: String,
    /// Kafka partition number
    pub partition: i32,
    /// Kafka offset within the partition
    pub offset: i64,
    /// Message timestamp in milliseconds since epoch (if available)
    pub timestamp: Option<i64>,
    /// Decoded key (if any)
    pub key: Option<Payload>,
    /// Decoded value, `None` for tombstones
    pub value: Option<Payload>,
}

/// Decoded key or value.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Registry-framed Avro datum
    Avro {
        schema_id: SchemaId,
        value: AvroValue,
    },
    /// UTF-8 text
    Text(String),
    /// Undecoded bytes
    Bytes(Vec<u8>),
}

impl Payload {
    /// The Avro value, if this payload was registry-framed.
    pub fn avro(&self) -> Option<&AvroValue> {
        match self {
            Payload::Avro { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn schema_id(&self) -> Option<SchemaId> {
        match self {
            Payload::Avro { schema_id, .. } => Some(*schema_id),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Payload::Avro { value, .. } => value.to_json(),
            Payload::Text(s) => serde_json::Value::String(s.clone()),
            Payload::Bytes(bytes) => serde_json::Value::String(
                base64::engine::general_purpose::STANDARD.encode(bytes),
            ),
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Avro { value, .. } => write!(f, "{value}"),
            Payload::Text(s) => write!(f, "{s}"),
            Payload::Bytes(bytes) => write!(
                f,
                "{}",
                base64::engine::general_purpose::STANDARD.encode(bytes)
            ),
        }
    }
}

impl Message {
    /// Render the whole record, metadata included, as one JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "topic": self.topic,
            "partition": self.partition,
            "offset": self.offset,
            "timestamp": self.timestamp,
            "key": self.key.as_ref().map(Payload::to_json),
            "value_schema_id": self.value.as_ref().and_then(Payload::schema_id),
            "value": self.value.as_ref().map(Payload::to_json),
        })
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timestamp = self
            .timestamp
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-1".to_string());
        let key = self
            .key
            .as_ref()
            .map(|k| k.to_string())
            .unwrap_or_else(|| "null".to_string());
        let value = self
            .value
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "null".to_string());
        write!(
            f,
            "ConsumerRecord(topic = {}, partition = {}, offset = {}, timestamp = {}, key = {}, value = {})",
            self.topic, self.partition, self.offset, timestamp, key, value
        )
    }
}
