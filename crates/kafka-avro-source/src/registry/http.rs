//! HTTP client for a Confluent-compatible schema registry.

use super::{RegistryError, SchemaRegistry};
use crate::error::{Error, Result};
use async_trait::async_trait;
use avro_types::SchemaId;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::time::Duration;

const REGISTRY_CONTENT_TYPES: &str =
    "application/vnd.schemaregistry.v1+json, application/vnd.schemaregistry+json, application/json";

/// Body of `GET /schemas/ids/{id}`
#[derive(Debug, Deserialize)]
struct SchemaResponse {
    schema: String,

    #[serde(rename = "schemaType")]
    schema_type: Option<String>,
}

/// Registry client that fetches schemas by id over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSchemaRegistry {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpSchemaRegistry {
    /// Create a client for the registry at `base_url` (e.g., "http://localhost:8081").
    ///
    /// `timeout` bounds each request; an expired request surfaces as a transport error.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::InvalidConfig(format!(
                "schema registry url must start with http:// or https://, got {base_url:?}"
            )));
        }

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::InvalidConfig(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn schema_url(&self, id: SchemaId) -> String {
        format!("{}/schemas/ids/{}", self.base_url, id)
    }
}

#[async_trait]
impl SchemaRegistry for HttpSchemaRegistry {
    async fn fetch_schema(&self, id: SchemaId) -> std::result::Result<String, RegistryError> {
        let url = self.schema_url(id);

        let response = self
            .http_client
            .get(&url)
            .header(ACCEPT, REGISTRY_CONTENT_TYPES)
            .send()
            .await
            .map_err(|e| RegistryError::Transport(format!("GET {url} failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| RegistryError::Transport(format!("Failed to read body of {url}: {e}")))?;

        let schema = parse_schema_response(status, &body)?;

        tracing::debug!(schema_id = %id, url = %url, "Schema retrieved from registry");

        Ok(schema)
    }
}

/// Interpret a registry answer to a schema-by-id lookup.
fn parse_schema_response(status: u16, body: &str) -> std::result::Result<String, RegistryError> {
    match status {
        200 => {
            let response: SchemaResponse = serde_json::from_str(body)
                .map_err(|e| RegistryError::Malformed(format!("{e}: {body}")))?;
            match response.schema_type.as_deref() {
                None | Some("AVRO") => Ok(response.schema),
                Some(other) => Err(RegistryError::UnsupportedSchemaType(other.to_string())),
            }
        }
        404 => Err(RegistryError::NotFound),
        other => Err(RegistryError::Transport(format!(
            "registry answered with status {other}: {body}"
        ))),
    }
}
