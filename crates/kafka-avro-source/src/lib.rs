//! Kafka consumer library for `registry-peek`: reads records whose values are
//! Avro bodies framed with a schema-registry id, and decodes them at runtime.
//!
//! Features:
//!
//! - Runtime Avro Support: Parse registry schemas at runtime and decode bodies without code generation
//! - Schema Caching: Each schema id is fetched from the registry once and shared across tasks
//! - Located Errors: Decode failures carry the field path and payload offset that failed
//! - Cancellable Polling: Poll in a background task until cancelled or a poll limit is reached

pub mod avro;
pub mod cache;

/// High-level API for spawning the consumption loop
///
/// Takes the consumer and registry config, wires a shared schema resolver
/// into each consumer, and runs the poll loop in its own async task.
pub mod client;

/// Low-level consumer that polls rdkafka and decodes what it receives
pub mod consumer;
pub mod envelope;
pub mod error;
pub mod record;
pub mod registry;
pub mod resolver;

// Re-export main types for easy access
pub use avro::{decode_datum, AvroSchema, DatumReader};
pub use cache::SchemaCache;
pub use client::{Client, PollCycle, PollOptions, RegistryConfig};
pub use consumer::{Consumer, ConsumerConfig, Received};
pub use envelope::parse_envelope;
pub use error::{DecodeError, DecodeErrorKind, Error, Result};
pub use record::{KeyFormat, RawRecord, RecordDecoder, RecordError};
pub use registry::{HttpSchemaRegistry, RegistryError, SchemaRegistry};
pub use resolver::SchemaResolver;

pub use avro_types::{AvroValue, Message, Payload, SchemaId};
