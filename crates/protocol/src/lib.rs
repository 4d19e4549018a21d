//! spmon Protocol - Sparkplug B wire format without code generation
//!
//! This crate provides the codec used by the live monitor:
//! - `WireCursor` - proto2 primitives (varint, length-delimited, skip by wire type)
//! - `decode_metric` / `decode_payload` - schema-aware decoders for the
//!   fixed Sparkplug B `Payload` and `Payload.Metric` messages
//! - `encode_payload` / `encode_ncmd_rebirth` - the matching encoder and the
//!   NCMD rebirth command builder
//!
//! # Design Principles
//!
//! - **Bounds checked**: every slice is checked against the buffer before it
//!   is taken. Malformed input returns a `DecodeError`, never panics.
//! - **Forward compatible**: unknown fields are skipped by wire type.
//! - **Partial results**: a failing payload decode still hands back every
//!   field and metric decoded before the failure.
//!
//! # Wire Format
//!
//! ```text
//! Payload {
//!   timestamp (1, varint)   metrics (2, len, repeated)
//!   seq       (3, varint)   uuid    (4, len)
//! }
//! ```
//!
//! Metric field numbers are listed in `decode::metric`.

mod clock;
mod decode;
mod encode;
mod error;
mod schema;
mod types;
mod wire;

pub use clock::{Clock, FixedClock, SystemClock};
pub use decode::{PartialDecode, decode_metric, decode_payload};
pub use encode::{
    REBIRTH_METRIC_NAME, encode_metric, encode_ncmd_rebirth, encode_ncmd_rebirth_at,
    encode_payload,
};
pub use error::DecodeError;
pub use types::{DataType, Metric, MetricValue, Payload, millis_to_datetime};
pub use wire::{Tag, WireCursor, WireType, read_length_delimited, read_varint};

/// Result type for wire-level operations
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Sparkplug B topic namespace for this protocol version
pub const SPARKPLUG_NAMESPACE: &str = "spBv1.0";

/// Maximum encoded length of a varint (64 bits / 7 bits per byte, rounded up)
pub const MAX_VARINT_LEN: usize = 10;
