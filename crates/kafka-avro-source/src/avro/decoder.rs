//! Avro binary decoder.
//!
//! Decodes a body using a parsed writer schema. The body carries no field
//! names or separators: every boundary follows from the declared types, read
//! in declaration order.

use crate::avro::schema::AvroSchema;
use crate::error::{DecodeError, DecodeErrorKind};
use apache_avro::schema::Schema;
use avro_types::AvroValue;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, DecodeError>;

/// Maximum nesting of records, arrays, maps and unions in one datum.
pub const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone)]
enum PathSegment {
    Field(String),
    Index(usize),
    Key(String),
}

/// Single-pass reader of one Avro datum.
pub struct DatumReader<'a> {
    schema: &'a AvroSchema,
    buf: &'a [u8],
    pos: usize,
    base_offset: usize,
    path: Vec<PathSegment>,
}

impl<'a> DatumReader<'a> {
    pub fn new(schema: &'a AvroSchema, buf: &'a [u8]) -> Self {
        Self {
            schema,
            buf,
            pos: 0,
            base_offset: 0,
            path: Vec::new(),
        }
    }

    /// Report error offsets relative to an enclosing buffer that starts `offset` bytes earlier.
    pub fn with_base_offset(mut self, offset: usize) -> Self {
        self.base_offset = offset;
        self
    }

    /// Read one datum of the schema's root type.
    pub fn read_datum(&mut self) -> Result<AvroValue> {
        let schema = self.schema;
        self.read_value(schema.root(), 0)
    }

    /// Bytes not consumed so far.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn read_value(&mut self, schema: &Schema, depth: usize) -> Result<AvroValue> {
        match schema {
            Schema::Null => Ok(AvroValue::Null),
            Schema::Boolean => self.read_boolean().map(AvroValue::Boolean),
            Schema::Int => self.read_int().map(AvroValue::Int),
            Schema::Long => self.read_long().map(AvroValue::Long),
            Schema::Float => {
                let bytes = self.read_exact(4)?;
                Ok(AvroValue::Float(f32::from_le_bytes([
                    bytes[0], bytes[1], bytes[2], bytes[3],
                ])))
            }
            Schema::Double => {
                let bytes = self.read_exact(8)?;
                let mut raw = [0u8; 8];
                raw.copy_from_slice(bytes);
                Ok(AvroValue::Double(f64::from_le_bytes(raw)))
            }
            Schema::Bytes => self.read_bytes().map(|b| AvroValue::Bytes(b.to_vec())),
            Schema::String => self.read_string().map(AvroValue::String),
            Schema::Record(record) => {
                self.check_depth(depth)?;
                let mut fields = Vec::with_capacity(record.fields.len());
                for field in &record.fields {
                    self.path.push(PathSegment::Field(field.name.clone()));
                    let value = self.read_value(&field.schema, depth + 1)?;
                    self.path.pop();
                    fields.push((field.name.clone(), value));
                }
                Ok(AvroValue::Record(fields))
            }
            Schema::Enum(e) => {
                let start = self.pos;
                let index = self.read_int()?;
                let symbol = usize::try_from(index)
                    .ok()
                    .and_then(|i| e.symbols.get(i))
                    .ok_or_else(|| {
                        self.error_at(
                            start,
                            DecodeErrorKind::InvalidEnumIndex {
                                index,
                                symbols: e.symbols.len(),
                            },
                        )
                    })?;
                Ok(AvroValue::Enum(index as u32, symbol.clone()))
            }
            Schema::Array(items) => {
                self.check_depth(depth)?;
                let mut values = Vec::new();
                self.read_blocks(|reader| {
                    reader.path.push(PathSegment::Index(values.len()));
                    let value = reader.read_value(items, depth + 1)?;
                    reader.path.pop();
                    values.push(value);
                    Ok(())
                })?;
                Ok(AvroValue::Array(values))
            }
            Schema::Map(value_schema) => {
                self.check_depth(depth)?;
                let mut entries = HashMap::new();
                self.read_blocks(|reader| {
                    let key = reader.read_string()?;
                    reader.path.push(PathSegment::Key(key.clone()));
                    let value = reader.read_value(value_schema, depth + 1)?;
                    reader.path.pop();
                    entries.insert(key, value);
                    Ok(())
                })?;
                Ok(AvroValue::Map(entries))
            }
            Schema::Union(union) => {
                self.check_depth(depth)?;
                let branches = union.variants();
                let start = self.pos;
                let index = self.read_long()?;
                let branch = usize::try_from(index)
                    .ok()
                    .and_then(|i| branches.get(i))
                    .ok_or_else(|| {
                        self.error_at(
                            start,
                            DecodeErrorKind::InvalidUnionIndex {
                                index,
                                branches: branches.len(),
                            },
                        )
                    })?;
                let value = self.read_value(branch, depth + 1)?;
                Ok(AvroValue::Union(index as u32, Box::new(value)))
            }
            Schema::Fixed(fixed) => {
                let bytes = self.read_exact(fixed.size)?;
                Ok(AvroValue::Fixed(fixed.size, bytes.to_vec()))
            }
            Schema::Decimal(decimal) => {
                let unscaled = match self.resolve(&decimal.inner)? {
                    Schema::Fixed(fixed) => self.read_exact(fixed.size)?.to_vec(),
                    _ => self.read_bytes()?.to_vec(),
                };
                Ok(AvroValue::Decimal {
                    unscaled,
                    scale: decimal.scale,
                })
            }
            Schema::Uuid => {
                let start = self.pos;
                let text = self.read_string()?;
                uuid::Uuid::parse_str(&text)
                    .map(AvroValue::Uuid)
                    .map_err(|e| self.error_at(start, DecodeErrorKind::InvalidUuid(e.to_string())))
            }
            Schema::Date => self.read_int().map(AvroValue::Date),
            Schema::TimeMillis => self.read_int().map(AvroValue::TimeMillis),
            Schema::TimeMicros => self.read_long().map(AvroValue::TimeMicros),
            Schema::TimestampMillis => self.read_long().map(AvroValue::TimestampMillis),
            Schema::TimestampMicros => self.read_long().map(AvroValue::TimestampMicros),
            Schema::LocalTimestampMillis => self.read_long().map(AvroValue::LocalTimestampMillis),
            Schema::LocalTimestampMicros => self.read_long().map(AvroValue::LocalTimestampMicros),
            Schema::Duration => {
                let bytes = self.read_exact(12)?;
                let part = |i: usize| {
                    u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]])
                };
                Ok(AvroValue::Duration {
                    months: part(0),
                    days: part(4),
                    millis: part(8),
                })
            }
            Schema::Ref { .. } => {
                let target = self.resolve(schema)?;
                self.read_value(target, depth)
            }
        }
    }

    /// Read array/map blocks: a long item count, then the items, until a zero count.
    ///
    /// A negative count means `|count|` items preceded by the block's byte size.
    /// A count larger than the bytes left is rejected before any item is read.
    fn read_blocks<F>(&mut self, mut read_item: F) -> Result<()>
    where
        F: FnMut(&mut Self) -> Result<()>,
    {
        loop {
            let start = self.pos;
            let count = self.read_long()?;
            if count == 0 {
                return Ok(());
            }
            if count < 0 {
                let size_start = self.pos;
                let size = self.read_long()?;
                if size < 0 {
                    return Err(self.error_at(size_start, DecodeErrorKind::NegativeLength(size)));
                }
            }
            let count = count.unsigned_abs();
            if count > self.remaining() as u64 {
                return Err(self.error_at(
                    start,
                    DecodeErrorKind::LengthExceedsBuffer {
                        length: count,
                        remaining: self.remaining(),
                    },
                ));
            }
            for _ in 0..count {
                read_item(self)?;
            }
        }
    }

    fn resolve<'s>(&self, schema: &'s Schema) -> Result<&'s Schema>
    where
        'a: 's,
    {
        match schema {
            Schema::Ref { name } => self.schema.lookup(name).ok_or_else(|| {
                self.error_at(
                    self.pos,
                    DecodeErrorKind::UnresolvedReference(name.fullname(None)),
                )
            }),
            other => Ok(other),
        }
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth >= MAX_DEPTH {
            return Err(self.error_at(self.pos, DecodeErrorKind::TooDeep(MAX_DEPTH)));
        }
        Ok(())
    }

    fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(self.error_at(
                self.pos,
                DecodeErrorKind::UnexpectedEof {
                    needed: n,
                    remaining,
                },
            ));
        }
        let buf: &'a [u8] = self.buf;
        let bytes = &buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn read_boolean(&mut self) -> Result<bool> {
        let start = self.pos;
        match self.read_exact(1)?[0] {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(self.error_at(start, DecodeErrorKind::InvalidBoolean(other))),
        }
    }

    /// Read a little-endian base-128 varint holding at most `bits` bits.
    fn read_varint(&mut self, bits: u32) -> Result<u64> {
        let start = self.pos;
        let max_bytes = bits.div_ceil(7);
        let last_byte_limit = (1u64 << (bits - 7 * (max_bytes - 1))) - 1;

        let mut value = 0u64;
        for i in 0..max_bytes {
            let byte = u64::from(self.read_exact(1)?[0]);
            if i == max_bytes - 1 && byte > last_byte_limit {
                return Err(self.error_at(start, DecodeErrorKind::VarintOverflow { bits }));
            }
            value |= (byte & 0x7f) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(self.error_at(start, DecodeErrorKind::VarintOverflow { bits }))
    }

    fn read_int(&mut self) -> Result<i32> {
        let n = self.read_varint(32)? as u32;
        Ok(((n >> 1) as i32) ^ -((n & 1) as i32))
    }

    fn read_long(&mut self) -> Result<i64> {
        let n = self.read_varint(64)?;
        Ok(((n >> 1) as i64) ^ -((n & 1) as i64))
    }

    fn read_bytes(&mut self) -> Result<&'a [u8]> {
        let start = self.pos;
        let len = self.read_long()?;
        if len < 0 {
            return Err(self.error_at(start, DecodeErrorKind::NegativeLength(len)));
        }
        let remaining = self.remaining();
        if len as u64 > remaining as u64 {
            return Err(self.error_at(
                start,
                DecodeErrorKind::LengthExceedsBuffer {
                    length: len as u64,
                    remaining,
                },
            ));
        }
        self.read_exact(len as usize)
    }

    fn read_string(&mut self) -> Result<String> {
        let start = self.pos;
        let bytes = self.read_bytes()?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|e| self.error_at(start, DecodeErrorKind::InvalidUtf8(e.to_string())))
    }

    fn error_at(&self, pos: usize, kind: DecodeErrorKind) -> DecodeError {
        DecodeError {
            field: self.field_path(),
            offset: self.base_offset + pos,
            kind,
        }
    }

    fn field_path(&self) -> String {
        let mut path = String::from("$");
        for segment in &self.path {
            match segment {
                PathSegment::Field(name) => {
                    path.push('.');
                    path.push_str(name);
                }
                PathSegment::Index(i) => path.push_str(&format!("[{i}]")),
                PathSegment::Key(key) => path.push_str(&format!("[{key:?}]")),
            }
        }
        path
    }
}

/// Decode a whole body with `schema`. Trailing bytes are left unread.
pub fn decode_datum(schema: &AvroSchema, body: &[u8]) -> Result<AvroValue> {
    DatumReader::new(schema, body).read_datum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag(n: i64) -> Vec<u8> {
        let mut v = ((n << 1) ^ (n >> 63)) as u64;
        let mut out = Vec::new();
        loop {
            let byte = (v & 0x7f) as u8;
            v >>= 7;
            if v == 0 {
                out.push(byte);
                return out;
            }
            out.push(byte | 0x80);
        }
    }

    fn string(s: &str) -> Vec<u8> {
        let mut out = zigzag(s.len() as i64);
        out.extend_from_slice(s.as_bytes());
        out
    }

    fn person_schema() -> AvroSchema {
        AvroSchema::parse_str(
            r#"{"type": "record", "name": "Person", "fields": [
                {"name": "name", "type": "string"},
                {"name": "age", "type": "int"}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_decode_record() {
        let mut body = string("Ada");
        body.extend(zigzag(36));

        let value = decode_datum(&person_schema(), &body).unwrap();
        assert_eq!(
            value,
            AvroValue::Record(vec![
                ("name".to_string(), AvroValue::String("Ada".to_string())),
                ("age".to_string(), AvroValue::Int(36)),
            ])
        );
    }

    #[test]
    fn test_decode_primitives() {
        let cases: Vec<(&str, Vec<u8>, AvroValue)> = vec![
            (r#""null""#, vec![], AvroValue::Null),
            (r#""boolean""#, vec![1], AvroValue::Boolean(true)),
            (r#""int""#, vec![0x01], AvroValue::Int(-1)),
            (r#""int""#, vec![0xfe, 0xff, 0xff, 0xff, 0x0f], AvroValue::Int(i32::MAX)),
            (r#""long""#, zigzag(-1_234_567_890_123), AvroValue::Long(-1_234_567_890_123)),
            (r#""long""#, zigzag(i64::MIN), AvroValue::Long(i64::MIN)),
            (r#""float""#, 1.5f32.to_le_bytes().to_vec(), AvroValue::Float(1.5)),
            (r#""double""#, (-2.25f64).to_le_bytes().to_vec(), AvroValue::Double(-2.25)),
            (r#""bytes""#, vec![0x04, 0xde, 0xad], AvroValue::Bytes(vec![0xde, 0xad])),
            (r#""string""#, string("héllo"), AvroValue::String("héllo".to_string())),
        ];

        for (schema_text, body, expected) in cases {
            let schema = AvroSchema::parse_str(schema_text).unwrap();
            assert_eq!(decode_datum(&schema, &body).unwrap(), expected, "{schema_text}");
        }
    }

    #[test]
    fn test_decode_union_enum_array_map() {
        let schema = AvroSchema::parse_str(
            r#"{"type": "record", "name": "Hand", "fields": [
                {"name": "nickname", "type": ["null", "string"]},
                {"name": "suit", "type": {"type": "enum", "name": "Suit", "symbols": ["SPADES", "HEARTS"]}},
                {"name": "cards", "type": {"type": "array", "items": "int"}},
                {"name": "scores", "type": {"type": "map", "values": "long"}}
            ]}"#,
        )
        .unwrap();

        let mut body = vec![0x00]; // union branch 0: null
        body.extend(zigzag(1)); // HEARTS
        body.extend(zigzag(2));
        body.extend(zigzag(7));
        body.extend(zigzag(11));
        body.push(0x00);
        body.extend(zigzag(1));
        body.extend(string("ada"));
        body.extend(zigzag(100));
        body.push(0x00);

        let value = decode_datum(&schema, &body).unwrap();
        assert_eq!(
            value.get("nickname"),
            Some(&AvroValue::Union(0, Box::new(AvroValue::Null)))
        );
        assert_eq!(
            value.get("suit"),
            Some(&AvroValue::Enum(1, "HEARTS".to_string()))
        );
        assert_eq!(
            value.get("cards"),
            Some(&AvroValue::Array(vec![AvroValue::Int(7), AvroValue::Int(11)]))
        );
        let Some(AvroValue::Map(scores)) = value.get("scores") else {
            panic!("scores should be a map");
        };
        assert_eq!(scores.get("ada"), Some(&AvroValue::Long(100)));
    }

    #[test]
    fn test_decode_negative_block_count() {
        let schema = AvroSchema::parse_str(r#"{"type": "array", "items": "int"}"#).unwrap();
        // -2 items, block of 2 bytes, then the items, then end of array
        let mut body = zigzag(-2);
        body.extend(zigzag(2));
        body.extend(zigzag(3));
        body.extend(zigzag(4));
        body.push(0x00);

        assert_eq!(
            decode_datum(&schema, &body).unwrap(),
            AvroValue::Array(vec![AvroValue::Int(3), AvroValue::Int(4)])
        );
    }

    #[test]
    fn test_decode_recursive_list() {
        let schema = AvroSchema::parse_str(
            r#"{"type": "record", "name": "Node", "fields": [
                {"name": "value", "type": "long"},
                {"name": "next", "type": ["null", "Node"]}
            ]}"#,
        )
        .unwrap();

        let mut body = zigzag(1);
        body.extend(zigzag(1)); // next: Node
        body.extend(zigzag(2));
        body.extend(zigzag(0)); // next: null

        let value = decode_datum(&schema, &body).unwrap();
        let next = value.get("next").unwrap();
        assert_eq!(next.get("value"), Some(&AvroValue::Long(2)));
        assert_eq!(
            next.get("next"),
            Some(&AvroValue::Union(0, Box::new(AvroValue::Null)))
        );
    }

    #[test]
    fn test_decode_logical_types() {
        let schema = AvroSchema::parse_str(
            r#"{"type": "record", "name": "Payment", "fields": [
                {"name": "day", "type": {"type": "int", "logicalType": "date"}},
                {"name": "id", "type": {"type": "string", "logicalType": "uuid"}},
                {"name": "amount", "type": {"type": "bytes", "logicalType": "decimal", "precision": 9, "scale": 2}},
                {"name": "fee", "type": {"type": "fixed", "name": "Fee", "size": 2, "logicalType": "decimal", "precision": 4, "scale": 1}}
            ]}"#,
        )
        .unwrap();

        let mut body = zigzag(19723);
        body.extend(string("123e4567-e89b-12d3-a456-426614174000"));
        body.extend(zigzag(2));
        body.extend([0x30, 0x39]);
        body.extend([0x00, 0x0f]);

        let value = decode_datum(&schema, &body).unwrap();
        assert_eq!(value.get("day"), Some(&AvroValue::Date(19723)));
        assert!(matches!(value.get("id"), Some(AvroValue::Uuid(_))));
        assert_eq!(
            value.get("amount"),
            Some(&AvroValue::Decimal {
                unscaled: vec![0x30, 0x39],
                scale: 2
            })
        );
        assert_eq!(
            value.get("fee"),
            Some(&AvroValue::Decimal {
                unscaled: vec![0x00, 0x0f],
                scale: 1
            })
        );
    }

    #[test]
    fn test_short_body_reports_field_and_offset() {
        let body = string("Ada"); // age missing
        let err = DatumReader::new(&person_schema(), &body)
            .with_base_offset(5)
            .read_datum()
            .unwrap_err();
        assert_eq!(err.field, "$.age");
        assert_eq!(err.offset, 9);
        assert!(matches!(err.kind, DecodeErrorKind::UnexpectedEof { .. }));
    }

    #[test]
    fn test_invalid_union_index() {
        let schema = AvroSchema::parse_str(
            r#"{"type": "record", "name": "R", "fields": [{"name": "maybe", "type": ["null", "int"]}]}"#,
        )
        .unwrap();
        let err = decode_datum(&schema, &zigzag(2)).unwrap_err();
        assert_eq!(err.field, "$.maybe");
        assert_eq!(err.offset, 0);
        assert_eq!(
            err.kind,
            DecodeErrorKind::InvalidUnionIndex {
                index: 2,
                branches: 2
            }
        );

        let err = decode_datum(&schema, &zigzag(-1)).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::InvalidUnionIndex { index: -1, .. }));
    }

    #[test]
    fn test_invalid_string_lengths() {
        let err = decode_datum(&person_schema(), &zigzag(-3)).unwrap_err();
        assert_eq!(err.field, "$.name");
        assert_eq!(err.kind, DecodeErrorKind::NegativeLength(-3));

        let mut body = zigzag(10);
        body.extend(b"Ada");
        let err = decode_datum(&person_schema(), &body).unwrap_err();
        assert_eq!(
            err.kind,
            DecodeErrorKind::LengthExceedsBuffer {
                length: 10,
                remaining: 3
            }
        );
    }

    #[test]
    fn test_array_count_exceeding_buffer() {
        let schema = AvroSchema::parse_str(
            r#"{"type": "record", "name": "R", "fields": [{"name": "xs", "type": {"type": "array", "items": "long"}}]}"#,
        )
        .unwrap();
        let mut body = zigzag(1_000_000);
        body.extend(zigzag(1));
        let err = decode_datum(&schema, &body).unwrap_err();
        assert_eq!(err.field, "$.xs");
        assert!(matches!(
            err.kind,
            DecodeErrorKind::LengthExceedsBuffer { length: 1_000_000, .. }
        ));
    }

    #[test]
    fn test_nested_error_path() {
        let schema = AvroSchema::parse_str(
            r#"{"type": "record", "name": "Team", "fields": [
                {"name": "members", "type": {"type": "array", "items": {
                    "type": "record", "name": "Member", "fields": [{"name": "active", "type": "boolean"}]
                }}}
            ]}"#,
        )
        .unwrap();
        let body = vec![0x04, 0x01, 0x02];
        let err = decode_datum(&schema, &body).unwrap_err();
        assert_eq!(err.field, "$.members[1].active");
        assert_eq!(err.offset, 2);
        assert_eq!(err.kind, DecodeErrorKind::InvalidBoolean(2));
    }

    #[test]
    fn test_invalid_enum_and_overflow() {
        let schema = AvroSchema::parse_str(
            r#"{"type": "enum", "name": "Suit", "symbols": ["SPADES"]}"#,
        )
        .unwrap();
        let err = decode_datum(&schema, &zigzag(1)).unwrap_err();
        assert_eq!(err.field, "$");
        assert_eq!(
            err.kind,
            DecodeErrorKind::InvalidEnumIndex {
                index: 1,
                symbols: 1
            }
        );

        let int_schema = AvroSchema::parse_str(r#""int""#).unwrap();
        let err = decode_datum(&int_schema, &[0xff, 0xff, 0xff, 0xff, 0x1f]).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::VarintOverflow { bits: 32 });
    }

    #[test]
    fn test_invalid_utf8() {
        let err = decode_datum(&person_schema(), &[0x04, 0xc3, 0x28]).unwrap_err();
        assert_eq!(err.field, "$.name");
        assert!(matches!(err.kind, DecodeErrorKind::InvalidUtf8(_)));
    }

    #[test]
    fn test_trailing_bytes_are_left_unread() {
        let mut body = string("Ada");
        body.extend(zigzag(36));
        body.push(0x99);
        let schema = person_schema();
        let mut reader = DatumReader::new(&schema, &body);
        reader.read_datum().unwrap();
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn test_zero_width_items_cannot_outnumber_the_body() {
        let schema = AvroSchema::parse_str(r#"{"type": "array", "items": "null"}"#).unwrap();
        let mut body = zigzag(20_000_000);
        body.push(0x00);

        let err = decode_datum(&schema, &body).unwrap_err();
        assert_eq!(err.field, "$");
        assert_eq!(err.offset, 0);
        assert_eq!(
            err.kind,
            DecodeErrorKind::LengthExceedsBuffer {
                length: 20_000_000,
                remaining: 1
            }
        );

        let err = decode_datum(&schema, &[0x01, 0x00]).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::LengthExceedsBuffer { .. }));

        // One null followed by the terminating zero count
        assert_eq!(
            decode_datum(&schema, &[0x02, 0x00]).unwrap(),
            AvroValue::Array(vec![AvroValue::Null])
        );
    }

    #[test]
    fn test_empty_record_items_are_bounded() {
        let schema = AvroSchema::parse_str(
            r#"{"type": "array", "items": {"type": "record", "name": "Empty", "fields": []}}"#,
        )
        .unwrap();
        let mut body = zigzag(i64::MAX);
        body.push(0x00);

        let err = decode_datum(&schema, &body).unwrap_err();
        assert!(matches!(
            err.kind,
            DecodeErrorKind::LengthExceedsBuffer {
                length,
                remaining: 1
            } if length == i64::MAX as u64
        ));
    }

    #[test]
    fn test_decode_local_timestamps_and_duration() {
        let schema = AvroSchema::parse_str(
            r#"{"type": "record", "name": "Window", "fields": [
                {"name": "opened", "type": {"type": "long", "logicalType": "local-timestamp-millis"}},
                {"name": "length", "type": {"type": "fixed", "name": "Span", "size": 12, "logicalType": "duration"}}
            ]}"#,
        )
        .unwrap();

        let mut body = zigzag(1_704_067_200_000);
        body.extend(1u32.to_le_bytes());
        body.extend(2u32.to_le_bytes());
        body.extend(3_000u32.to_le_bytes());

        let value = decode_datum(&schema, &body).unwrap();
        assert_eq!(
            value.get("opened"),
            Some(&AvroValue::LocalTimestampMillis(1_704_067_200_000))
        );
        assert_eq!(
            value.get("length"),
            Some(&AvroValue::Duration {
                months: 1,
                days: 2,
                millis: 3_000
            })
        );
    }
}
