//! Record decoding: envelope, schema resolution, body.

use crate::avro::DatumReader;
use crate::envelope::{parse_envelope, ENVELOPE_LEN};
use crate::error::{Error, Result};
use crate::resolver::SchemaResolver;
use avro_types::{AvroValue, Message, Payload, SchemaId};
use tracing::debug;

/// How record keys are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum KeyFormat {
    /// UTF-8 text, invalid sequences replaced
    #[default]
    String,
    /// Raw bytes, printed as base64
    Bytes,
    /// Registry-framed Avro, decoded like values
    Avro,
}

/// An undecoded record as delivered by the consumption loop.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    pub timestamp: Option<i64>,
    pub key: Option<Vec<u8>>,
    pub payload: Option<Vec<u8>>,
}

/// A record that could not be decoded, with enough metadata to locate it.
#[derive(thiserror::Error, Debug)]
#[error("Failed to decode {part} of record {topic}/{partition}@{offset}: {source}")]
pub struct RecordError {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    /// "key" or "value"
    pub part: &'static str,
    #[source]
    pub source: Error,
}

/// Decodes registry-framed Avro payloads.
///
/// Holds no per-call state; the resolver's cache is the only thing shared
/// between calls, so one decoder can serve any number of concurrent records.
#[derive(Clone)]
pub struct RecordDecoder {
    resolver: SchemaResolver,
}

impl RecordDecoder {
    pub fn new(resolver: SchemaResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &SchemaResolver {
        &self.resolver
    }

    /// Decode one framed payload into its value.
    pub async fn decode(&self, payload: &[u8]) -> Result<AvroValue> {
        self.decode_framed(payload).await.map(|(_, value)| value)
    }

    /// Decode one framed payload, also returning the schema id it was written with.
    pub async fn decode_framed(&self, payload: &[u8]) -> Result<(SchemaId, AvroValue)> {
        let (schema_id, body) = parse_envelope(payload)?;
        let schema = self.resolver.resolve(schema_id).await?;

        let mut reader = DatumReader::new(&schema, body).with_base_offset(ENVELOPE_LEN);
        let value = reader.read_datum()?;
        if reader.remaining() > 0 {
            debug!(
                schema_id = %schema_id,
                trailing = reader.remaining(),
                "Ignoring trailing bytes after datum"
            );
        }

        Ok((schema_id, value))
    }

    /// Decode key and value of a raw record.
    ///
    /// The key is decoded first and independently of the value; either failing
    /// fails the whole record.
    pub async fn decode_record(
        &self,
        raw: RawRecord,
        key_format: KeyFormat,
    ) -> std::result::Result<Message, RecordError> {
        let key = match raw.key.as_deref() {
            Some(bytes) => Some(
                self.decode_key(bytes, key_format)
                    .await
                    .map_err(|source| record_error(&raw, "key", source))?,
            ),
            None => None,
        };

        let value = match raw.payload.as_deref() {
            Some(bytes) => {
                let (schema_id, value) = self
                    .decode_framed(bytes)
                    .await
                    .map_err(|source| record_error(&raw, "value", source))?;
                Some(Payload::Avro { schema_id, value })
            }
            None => None,
        };

        Ok(Message {
            topic: raw.topic,
            partition: raw.partition,
            offset: raw.offset,
            timestamp: raw.timestamp,
            key,
            value,
        })
    }

    async fn decode_key(&self, bytes: &[u8], key_format: KeyFormat) -> Result<Payload> {
        match key_format {
            KeyFormat::String => Ok(Payload::Text(String::from_utf8_lossy(bytes).into_owned())),
            KeyFormat::Bytes => Ok(Payload::Bytes(bytes.to_vec())),
            KeyFormat::Avro => {
                let (schema_id, value) = self.decode_framed(bytes).await?;
                Ok(Payload::Avro { schema_id, value })
            }
        }
    }
}

fn record_error(raw: &RawRecord, part: &'static str, source: Error) -> RecordError {
    RecordError {
        topic: raw.topic.clone(),
        partition: raw.partition,
        offset: raw.offset,
        part,
        source,
    }
}
