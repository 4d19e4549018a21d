//! Decoders for Sparkplug B messages
//!
//! Two levels, each with one field table and one `match`:
//!
//! - `metric` - a single `Payload.Metric` record
//! - `payload` - the outer `Payload` envelope, which embeds metric records
//!
//! # Usage
//!
//! ```ignore
//! use spmon_protocol::decode_payload;
//!
//! match decode_payload(&msg.payload) {
//!     Ok(payload) => render(&payload, None),
//!     // Everything decoded before the failure is still available
//!     Err(partial) => render(&partial.payload, Some(&partial.error)),
//! }
//! ```

mod metric;
mod payload;

pub use metric::decode_metric;
pub use payload::{PartialDecode, decode_payload};

/// Decode bytes as UTF-8, replacing invalid sequences
#[inline]
pub(crate) fn lossy_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
#[path = "decode_test.rs"]
mod decode_test;
