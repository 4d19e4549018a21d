//! Sparkplug B encoding
//!
//! Builds wire-format payloads from the owned data model. Only populated
//! fields are written, so a decoded-then-encoded payload decodes back to the
//! same value.
//!
//! # Usage
//!
//! ```ignore
//! use spmon_protocol::{SystemClock, encode_ncmd_rebirth};
//!
//! let bytes = encode_ncmd_rebirth(&SystemClock);
//! client.publish("spBv1.0/group/NCMD/node", bytes)?;
//! ```

mod payload;
mod rebirth;

pub use payload::{encode_metric, encode_payload};
pub use rebirth::{REBIRTH_METRIC_NAME, encode_ncmd_rebirth, encode_ncmd_rebirth_at};

use crate::{Tag, WireType};

/// Append a raw base-128 varint
#[inline]
fn write_varint(buf: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        buf.push((value as u8) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

#[inline]
fn write_tag(buf: &mut Vec<u8>, field: u64, wire_type: WireType) {
    write_varint(buf, Tag { field, wire_type }.to_raw());
}

/// Append a wire type 0 field
#[inline]
fn write_varint_field(buf: &mut Vec<u8>, field: u64, value: u64) {
    write_tag(buf, field, WireType::Varint);
    write_varint(buf, value);
}

/// Append a wire type 2 field
#[inline]
fn write_len_field(buf: &mut Vec<u8>, field: u64, data: &[u8]) {
    write_tag(buf, field, WireType::LengthDelimited);
    write_varint(buf, data.len() as u64);
    buf.extend_from_slice(data);
}

/// Append a wire type 5 field
#[inline]
fn write_fixed32_field(buf: &mut Vec<u8>, field: u64, value: u32) {
    write_tag(buf, field, WireType::Fixed32);
    buf.extend_from_slice(&value.to_le_bytes());
}

/// Append a wire type 1 field
#[inline]
fn write_fixed64_field(buf: &mut Vec<u8>, field: u64, value: u64) {
    write_tag(buf, field, WireType::Fixed64);
    buf.extend_from_slice(&value.to_le_bytes());
}
