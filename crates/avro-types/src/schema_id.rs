//! Registry schema identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a schema version in the registry.
///
/// Registry schemas are immutable once published, so the id is a stable cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaId(pub u32);

impl SchemaId {
    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for SchemaId {
    fn from(id: u32) -> Self {
        SchemaId(id)
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&SchemaId(42)).unwrap(), "42");
        let id: SchemaId = serde_json::from_str("7").unwrap();
        assert_eq!(id, SchemaId(7));
    }

    #[test]
    fn test_schema_id_display_and_conversion() {
        let id = SchemaId::from(1001);
        assert_eq!(id.to_string(), "1001");
        assert_eq!(id.value(), 1001);
    }
}
