//! Decoded Avro values.
//!
//! This is the runtime representation of an Avro datum after decoding. Values
//! render to JSON the way a generic record prints itself: union branches are
//! unwrapped, bytes are base64 encoded and logical types are formatted for
//! humans.

use base64::Engine;
use chrono::{DateTime, NaiveTime, SecondsFormat, Utc};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum AvroValue {
    Null,
    Boolean(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bytes(Vec<u8>),
    String(String),
    /// Record fields in schema order
    Record(Vec<(String, AvroValue)>),
    /// Symbol index and symbol
    Enum(u32, String),
    Array(Vec<AvroValue>),
    Map(HashMap<String, AvroValue>),
    /// Branch index and the branch value
    Union(u32, Box<AvroValue>),
    Fixed(usize, Vec<u8>),
    /// Days since the unix epoch
    Date(i32),
    /// Milliseconds after midnight
    TimeMillis(i32),
    /// Microseconds after midnight
    TimeMicros(i64),
    /// Milliseconds since the unix epoch
    TimestampMillis(i64),
    /// Microseconds since the unix epoch
    TimestampMicros(i64),
    /// Milliseconds since the unix epoch, in no particular time zone
    LocalTimestampMillis(i64),
    /// Microseconds since the unix epoch, in no particular time zone
    LocalTimestampMicros(i64),
    /// Three little-endian u32 counts
    Duration { months: u32, days: u32, millis: u32 },
    Uuid(uuid::Uuid),
    /// Two's-complement big-endian unscaled value
    Decimal { unscaled: Vec<u8>, scale: usize },
}

impl AvroValue {
    /// Get a record field by name.
    ///
    /// Unions are looked through, so an optional record behaves like a record.
    pub fn get(&self, field: &str) -> Option<&AvroValue> {
        match self {
            AvroValue::Record(fields) => fields.iter().find(|(k, _)| k == field).map(|(_, v)| v),
            AvroValue::Union(_, inner) => inner.get(field),
            _ => None,
        }
    }

    /// List record field names in schema order.
    pub fn field_names(&self) -> Vec<&str> {
        match self {
            AvroValue::Record(fields) => fields.iter().map(|(k, _)| k.as_str()).collect(),
            AvroValue::Union(_, inner) => inner.field_names(),
            _ => Vec::new(),
        }
    }

    /// Strip union wrappers.
    pub fn unwrap_union(&self) -> &AvroValue {
        match self {
            AvroValue::Union(_, inner) => inner.unwrap_union(),
            other => other,
        }
    }

    /// Render as JSON.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            AvroValue::Null => Json::Null,
            AvroValue::Boolean(b) => Json::Bool(*b),
            AvroValue::Int(v) => Json::from(*v),
            AvroValue::Long(v) => Json::from(*v),
            AvroValue::Float(v) => float_to_json(f64::from(*v)),
            AvroValue::Double(v) => float_to_json(*v),
            AvroValue::Bytes(bytes) | AvroValue::Fixed(_, bytes) => {
                Json::String(base64::engine::general_purpose::STANDARD.encode(bytes))
            }
            AvroValue::String(s) => Json::String(s.clone()),
            AvroValue::Record(fields) => Json::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            AvroValue::Enum(_, symbol) => Json::String(symbol.clone()),
            AvroValue::Array(items) => Json::Array(items.iter().map(|v| v.to_json()).collect()),
            AvroValue::Map(entries) => Json::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            AvroValue::Union(_, inner) => inner.to_json(),
            AvroValue::Date(days) => DateTime::from_timestamp(i64::from(*days) * 86_400, 0)
                .map(|dt| Json::String(dt.date_naive().to_string()))
                .unwrap_or_else(|| Json::from(*days)),
            AvroValue::TimeMillis(ms) => {
                time_of_day(i64::from(*ms) * 1_000).unwrap_or_else(|| Json::from(*ms))
            }
            AvroValue::TimeMicros(us) => time_of_day(*us).unwrap_or_else(|| Json::from(*us)),
            AvroValue::TimestampMillis(ms) => DateTime::from_timestamp_millis(*ms)
                .map(|dt| Json::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
                .unwrap_or_else(|| Json::from(*ms)),
            AvroValue::TimestampMicros(us) => DateTime::from_timestamp_micros(*us)
                .map(|dt| Json::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
                .unwrap_or_else(|| Json::from(*us)),
            AvroValue::LocalTimestampMillis(ms) => DateTime::from_timestamp_millis(*ms)
                .map(|dt| local_timestamp(&dt))
                .unwrap_or_else(|| Json::from(*ms)),
            AvroValue::LocalTimestampMicros(us) => DateTime::from_timestamp_micros(*us)
                .map(|dt| local_timestamp(&dt))
                .unwrap_or_else(|| Json::from(*us)),
            AvroValue::Duration {
                months,
                days,
                millis,
            } => serde_json::json!({"months": months, "days": days, "millis": millis}),
            AvroValue::Uuid(id) => Json::String(id.to_string()),
            AvroValue::Decimal { unscaled, scale } => Json::String(format_decimal(unscaled, *scale)),
        }
    }
}

impl fmt::Display for AvroValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

// NaN and infinities have no JSON number form.
fn float_to_json(v: f64) -> serde_json::Value {
    serde_json::Number::from_f64(v)
        .map(serde_json::Value::Number)
        .unwrap_or_else(|| serde_json::Value::String(v.to_string()))
}

fn local_timestamp(dt: &DateTime<Utc>) -> serde_json::Value {
    serde_json::Value::String(dt.naive_utc().format("%Y-%m-%dT%H:%M:%S%.f").to_string())
}

fn time_of_day(micros: i64) -> Option<serde_json::Value> {
    let secs = u32::try_from(micros.div_euclid(1_000_000)).ok()?;
    let nanos = u32::try_from(micros.rem_euclid(1_000_000) * 1_000).ok()?;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
        .map(|t| serde_json::Value::String(t.to_string()))
}

/// Format a two's-complement big-endian unscaled integer with `scale` fractional digits.
///
/// Values wider than 128 bits are rendered as hex.
pub fn format_decimal(unscaled: &[u8], scale: usize) -> String {
    if unscaled.is_empty() {
        return "0".to_string();
    }
    if unscaled.len() > 16 {
        let hex: String = unscaled.iter().map(|b| format!("{b:02x}")).collect();
        return format!("0x{hex}");
    }

    let fill = if unscaled[0] & 0x80 != 0 { 0xff } else { 0x00 };
    let mut buf = [fill; 16];
    buf[16 - unscaled.len()..].copy_from_slice(unscaled);
    let value = i128::from_be_bytes(buf);

    let digits = value.unsigned_abs().to_string();
    let sign = if value < 0 { "-" } else { "" };
    if scale == 0 {
        return format!("{sign}{digits}");
    }
    let padded = if digits.len() <= scale {
        format!("{}{digits}", "0".repeat(scale + 1 - digits.len()))
    } else {
        digits
    };
    let (int_part, frac_part) = padded.split_at(padded.len() - scale);
    format!("{sign}{int_part}.{frac_part}")
}
