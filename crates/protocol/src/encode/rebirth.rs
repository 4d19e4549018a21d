//! NCMD rebirth command
//!
//! Wire layout:
//!
//! ```text
//! Payload {
//!   timestamp (1, varint) = now in milliseconds
//!   metrics   (2, len)    = Metric {
//!     name          (1, len)     = "Node Control/Rebirth"
//!     datatype      (4, varint)  = 11 (Boolean)
//!     boolean_value (14, varint) = 1
//!   }
//! }
//! ```

use super::{write_len_field, write_varint_field};
use crate::schema::{metric as metric_field, payload as payload_field};
use crate::{Clock, DataType};

/// Metric name that asks an edge node to republish its birth certificate
pub const REBIRTH_METRIC_NAME: &str = "Node Control/Rebirth";

/// Build the NCMD rebirth payload stamped with the clock's current time
pub fn encode_ncmd_rebirth<C: Clock + ?Sized>(clock: &C) -> Vec<u8> {
    encode_ncmd_rebirth_at(clock.now_millis())
}

/// Build the NCMD rebirth payload with an explicit timestamp (epoch ms)
pub fn encode_ncmd_rebirth_at(timestamp_ms: u64) -> Vec<u8> {
    let mut metric = Vec::with_capacity(REBIRTH_METRIC_NAME.len() + 8);
    write_len_field(&mut metric, metric_field::NAME, REBIRTH_METRIC_NAME.as_bytes());
    write_varint_field(
        &mut metric,
        metric_field::DATATYPE,
        u64::from(DataType::Boolean.code()),
    );
    write_varint_field(&mut metric, metric_field::BOOLEAN_VALUE, 1);

    let mut payload = Vec::with_capacity(metric.len() + 16);
    write_varint_field(&mut payload, payload_field::TIMESTAMP, timestamp_ms);
    write_len_field(&mut payload, payload_field::METRIC, &metric);
    payload
}
