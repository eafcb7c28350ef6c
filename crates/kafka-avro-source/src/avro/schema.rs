//! Parsed writer schemas.
//!
//! Schema text is parsed by `apache_avro`. Named types are resolved once at
//! parse time and kept by full name, so the decoder can follow
//! `Schema::Ref` (including a record referring to itself) without re-walking
//! the tree for every datum.

use crate::error::SchemaParseError;
use apache_avro::schema::{Name, ResolvedSchema, Schema, SchemaKind};
use std::collections::HashMap;

/// A writer schema together with its named types.
#[derive(Debug, Clone)]
pub struct AvroSchema {
    root: Schema,
    names: HashMap<Name, Schema>,
}

impl AvroSchema {
    /// Parse schema text as served by the registry.
    pub fn parse_str(text: &str) -> Result<Self, SchemaParseError> {
        Self::new(Schema::parse_str(text)?)
    }

    /// Wrap an already parsed schema, resolving its named types.
    pub fn new(root: Schema) -> Result<Self, SchemaParseError> {
        let names = ResolvedSchema::try_from(&root)?
            .get_names()
            .iter()
            .map(|(name, schema)| (name.clone(), (*schema).clone()))
            .collect();
        Ok(Self { root, names })
    }

    /// Top-level type of the datum
    pub fn root(&self) -> &Schema {
        &self.root
    }

    pub fn kind(&self) -> SchemaKind {
        SchemaKind::from(&self.root)
    }

    /// Find a named type by its fully qualified name.
    pub fn lookup(&self, name: &Name) -> Option<&Schema> {
        self.names.get(name)
    }

    /// Fully qualified names of the named types, sorted.
    pub fn named_types(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names.keys().map(|n| n.fullname(None)).collect();
        names.sort();
        names
    }
}
