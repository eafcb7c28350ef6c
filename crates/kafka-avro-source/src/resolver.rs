//! Schema id to schema resolution.

use crate::avro::AvroSchema;
use crate::cache::SchemaCache;
use crate::error::{Error, Result};
use crate::registry::{RegistryError, SchemaRegistry};
use avro_types::SchemaId;
use std::sync::Arc;
use tracing::debug;

/// Resolves schema ids through a cache backed by a registry.
///
/// Registry failures are returned to the caller as is; nothing is retried
/// here and failures never leave an entry in the cache.
#[derive(Clone)]
pub struct SchemaResolver {
    registry: Arc<dyn SchemaRegistry>,
    cache: SchemaCache,
}

impl SchemaResolver {
    pub fn new(registry: Arc<dyn SchemaRegistry>, cache: SchemaCache) -> Self {
        Self { registry, cache }
    }

    pub fn cache(&self) -> &SchemaCache {
        &self.cache
    }

    /// Return the schema registered under `id`, fetching it on a cache miss.
    pub async fn resolve(&self, id: SchemaId) -> Result<Arc<AvroSchema>> {
        if let Some(schema) = self.cache.get(id).await {
            debug!(schema_id = %id, "Schema cache hit");
            return Ok(schema);
        }

        debug!(schema_id = %id, "Schema cache miss, fetching from registry");
        let text = self
            .registry
            .fetch_schema(id)
            .await
            .map_err(|e| match e {
                RegistryError::NotFound => Error::SchemaNotFound(id),
                RegistryError::UnsupportedSchemaType(kind) => Error::InvalidSchema {
                    id,
                    reason: format!("registry serves it as {kind}, not AVRO"),
                },
                other => Error::RegistryUnavailable {
                    id,
                    reason: other.to_string(),
                },
            })?;

        let schema = AvroSchema::parse_str(&text).map_err(|e| Error::InvalidSchema {
            id,
            reason: e.to_string(),
        })?;
        let schema = Arc::new(schema);

        self.cache.insert(id, Arc::clone(&schema)).await;
        debug!(schema_id = %id, root = ?schema.kind(), "Schema cached");

        Ok(schema)
    }
}
