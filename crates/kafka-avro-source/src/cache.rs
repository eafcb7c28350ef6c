//! Schema cache shared by resolvers and decoders.

use crate::avro::AvroSchema;
use avro_types::SchemaId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Cache of resolved schemas by id.
///
/// Entries are never evicted: a published schema id always maps to the same
/// schema. Clones share the same underlying map, so one cache can back several
/// resolvers or be inspected from tests.
#[derive(Debug, Clone, Default)]
pub struct SchemaCache {
    schemas: Arc<RwLock<HashMap<SchemaId, Arc<AvroSchema>>>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: SchemaId) -> Option<Arc<AvroSchema>> {
        self.schemas.read().await.get(&id).cloned()
    }

    /// Store a schema. Concurrent inserts of the same id are harmless; the last one wins.
    pub async fn insert(&self, id: SchemaId, schema: Arc<AvroSchema>) {
        self.schemas.write().await.insert(id, schema);
    }

    pub async fn contains(&self, id: SchemaId) -> bool {
        self.schemas.read().await.contains_key(&id)
    }

    pub async fn len(&self) -> usize {
        self.schemas.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.schemas.read().await.is_empty()
    }
}
