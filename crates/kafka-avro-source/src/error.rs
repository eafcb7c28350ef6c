use avro_types::SchemaId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    #[error("Payload too short: got {len} bytes, the envelope alone needs 5")]
    PayloadTooShort { len: usize },

    #[error("Unsupported format marker: 0x{0:02x}")]
    UnsupportedFormatMarker(u8),

    #[error("Schema {0} not found in registry")]
    SchemaNotFound(SchemaId),

    #[error("Schema registry unavailable while fetching schema {id}: {reason}")]
    RegistryUnavailable { id: SchemaId, reason: String },

    #[error("Schema {id} is not a usable Avro schema: {reason}")]
    InvalidSchema { id: SchemaId, reason: String },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Consumer error: {0}")]
    Consumer(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure while decoding an Avro body.
///
/// `field` is the path of the value being read (`$` is the root datum) and
/// `offset` the payload-relative position at which the failing read started.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Decode error in field {field} at byte offset {offset}: {kind}")]
pub struct DecodeError {
    pub field: String,
    pub offset: usize,
    pub kind: DecodeErrorKind,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeErrorKind {
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("varint does not fit in {bits} bits")]
    VarintOverflow { bits: u32 },

    #[error("invalid boolean byte 0x{0:02x}")]
    InvalidBoolean(u8),

    #[error("negative length prefix {0}")]
    NegativeLength(i64),

    #[error("length {length} exceeds the {remaining} remaining bytes")]
    LengthExceedsBuffer { length: u64, remaining: usize },

    #[error("union branch index {index} out of range for {branches} branches")]
    InvalidUnionIndex { index: i64, branches: usize },

    #[error("enum symbol index {index} out of range for {symbols} symbols")]
    InvalidEnumIndex { index: i32, symbols: usize },

    #[error("invalid UTF-8 in string: {0}")]
    InvalidUtf8(String),

    #[error("invalid uuid: {0}")]
    InvalidUuid(String),

    #[error("unresolved type reference: {0}")]
    UnresolvedReference(String),

    #[error("value nesting exceeds {0} levels")]
    TooDeep(usize),
}

/// Schema text that could not be parsed as Avro.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct SchemaParseError(#[from] pub apache_avro::Error);
