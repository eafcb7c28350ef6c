//! Schema registry access.
//!
//! The resolver only needs one operation from a registry: fetch the schema
//! text for an id. [`SchemaRegistry`] is that seam; [`HttpSchemaRegistry`]
//! implements it over the registry REST API, and tests substitute in-memory
//! registries.

pub mod http;

use async_trait::async_trait;
use avro_types::SchemaId;
use thiserror::Error;

pub use http::HttpSchemaRegistry;

/// Ways a registry fetch can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("schema not found")]
    NotFound,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed registry response: {0}")]
    Malformed(String),

    #[error("unsupported schema type: {0}")]
    UnsupportedSchemaType(String),
}

/// Source of raw schema text by id.
#[async_trait]
pub trait SchemaRegistry: Send + Sync {
    async fn fetch_schema(&self, id: SchemaId) -> Result<String, RegistryError>;
}
