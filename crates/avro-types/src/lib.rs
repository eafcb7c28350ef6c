//! Avro types shared by registry-peek crates.
//!
//! This crate defines the data model of the decode path without any I/O:
//!
//! - [`schema_id`] - registry schema identifiers ([`SchemaId`])
//! - [`value`] - decoded datums ([`AvroValue`]) and their JSON rendering
//! - [`message`] - decoded Kafka records ([`Message`], [`Payload`])
//!
//! Parsed writer schemas are `apache_avro::Schema` values owned by
//! `kafka-avro-source`.
//!
//! # Dependency Flow
//!
//! ```text
//! avro-types (this crate):
//!   - Defines: SchemaId, AvroValue, Message, Payload
//!   - NO dependency on kafka-avro-source
//!
//! kafka-avro-source (consumer crate):
//!   - Depends on: avro-types, apache-avro
//!   - Provides: envelope parsing, schema resolution, decoder, consumer
//! ```

pub mod message;
pub mod schema_id;
pub mod value;

pub use message::{Message, Payload};
pub use schema_id::SchemaId;
pub use value::AvroValue;
