//! Schema-registry wire envelope.
//!
//! Format: `[magic_byte(1)][schema_id(4, big-endian)][body(N)]`

use crate::error::{Error, Result};
use avro_types::SchemaId;
use bytes::Buf;

/// Magic byte marking a registry-framed payload.
pub const MAGIC_BYTE: u8 = 0x00;

/// Length of the marker plus schema id.
pub const ENVELOPE_LEN: usize = 5;

/// Split a payload into its schema id and body.
pub fn parse_envelope(payload: &[u8]) -> Result<(SchemaId, &[u8])> {
    if payload.len() < ENVELOPE_LEN {
        return Err(Error::PayloadTooShort { len: payload.len() });
    }

    if payload[0] != MAGIC_BYTE {
        return Err(Error::UnsupportedFormatMarker(payload[0]));
    }

    let mut id_bytes = &payload[1..ENVELOPE_LEN];
    let schema_id = SchemaId(id_bytes.get_u32());

    Ok((schema_id, &payload[ENVELOPE_LEN..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_envelope() {
        let payload = [0x00, 0x00, 0x00, 0x01, 0x02, 0x06, 0x41];
        let (id, body) = parse_envelope(&payload).unwrap();
        assert_eq!(id, SchemaId(258));
        assert_eq!(body, &[0x06, 0x41]);
    }

    #[test]
    fn test_empty_body_is_allowed() {
        let (id, body) = parse_envelope(&[0x00, 0xff, 0xff, 0xff, 0xff]).unwrap();
        assert_eq!(id, SchemaId(u32::MAX));
        assert!(body.is_empty());
    }

    #[test]
    fn test_short_payloads_fail_regardless_of_content() {
        for payload in [&[][..], &[0x00], &[0x00, 0x00, 0x00, 0x01], &[0x07, 0x01]] {
            let err = parse_envelope(payload).unwrap_err();
            assert!(
                matches!(err, Error::PayloadTooShort { len } if len == payload.len()),
                "unexpected error: {err}"
            );
        }
    }

    #[test]
    fn test_wrong_marker_fails_even_with_valid_id() {
        let err = parse_envelope(&[0x01, 0x00, 0x00, 0x00, 0x01, 0x06]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormatMarker(0x01)));
    }
}
