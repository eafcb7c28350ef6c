//! Avro schema handling and binary decoding.
//!
//! This module provides:
//! - Writer schemas parsed from the registry's schema text, with named types resolved
//! - Runtime decoding of Avro bodies against such a schema
//!
//! The decoded value types (AvroValue, etc.) are in avro-types.

pub mod decoder;
pub mod schema;

pub use decoder::{decode_datum, DatumReader};
pub use schema::AvroSchema;
