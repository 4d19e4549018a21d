//! Payload envelope decoding
//!
//! # Schema Reference (sparkplug_b.proto)
//!
//! ```text
//! message Payload {
//!     optional uint64 timestamp = 1;
//!     repeated Metric metrics   = 2;
//!     optional uint64 seq       = 3;
//!     optional string uuid      = 4;
//!     optional bytes  body      = 5;
//! }
//! ```

use thiserror::Error;

use super::{decode_metric, lossy_string};
use crate::schema::payload as field;
use crate::types::millis_to_datetime;
use crate::{DecodeError, Payload, WireCursor, WireType};

/// A payload decode that stopped early
///
/// `payload` holds the envelope fields and every metric decoded before
/// `error` was hit, so callers can show what arrived alongside the failure.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("payload decode stopped after {} metrics: {error}", .payload.metrics.len())]
pub struct PartialDecode {
    pub payload: Payload,
    #[source]
    pub error: DecodeError,
}

impl PartialDecode {
    /// Split into the partial payload and the error
    pub fn into_parts(self) -> (Payload, DecodeError) {
        (self.payload, self.error)
    }
}

/// Decode a binary Sparkplug B payload
///
/// Unknown fields are skipped by wire type. A metric record that fails to
/// decode aborts the whole decode with `DecodeError::MetricDecodeFailed`.
///
/// # Errors
///
/// Returns `PartialDecode` carrying the payload decoded so far.
pub fn decode_payload(buf: &[u8]) -> std::result::Result<Payload, PartialDecode> {
    let mut payload = Payload::default();

    match decode_into(buf, &mut payload) {
        Ok(()) => Ok(payload),
        Err(error) => Err(PartialDecode { payload, error }),
    }
}

fn decode_into(buf: &[u8], payload: &mut Payload) -> crate::Result<()> {
    let mut cursor = WireCursor::new(buf);

    while !cursor.is_at_end() {
        let tag = cursor.read_tag()?;

        match (tag.field, tag.wire_type) {
            (field::TIMESTAMP, WireType::Varint) => {
                payload.timestamp = millis_to_datetime(cursor.read_varint()?);
            }
            (field::METRIC, WireType::LengthDelimited) => {
                let index = payload.metrics.len();
                let record = cursor.read_length_delimited()?;
                let offset = cursor.position() - record.len();
                let metric = decode_metric(record)
                    .map_err(|e| DecodeError::metric(index, offset, e))?;
                payload.metrics.push(metric);
            }
            (field::SEQ, WireType::Varint) => {
                payload.seq = cursor.read_varint()?;
            }
            (field::UUID, WireType::LengthDelimited) => {
                payload.uuid = lossy_string(cursor.read_length_delimited()?);
            }
            (_, wire_type) => cursor.skip_field(wire_type)?,
        }
    }

    Ok(())
}
