//! Metric record decoding
//!
//! # Schema Reference (sparkplug_b.proto)
//!
//! ```text
//! message Metric {
//!     optional string   name          = 1;
//!     optional uint64   alias         = 2;
//!     optional uint64   timestamp     = 3;
//!     optional uint32   datatype      = 4;
//!     optional bool     is_historical = 5;
//!     optional bool     is_transient  = 6;
//!     optional bool     is_null       = 7;
//!     optional MetaData metadata      = 8;
//!     optional PropertySet properties = 9;
//!     oneof value {
//!         uint32 int_value     = 10;
//!         uint64 long_value    = 11;
//!         float  float_value   = 12;
//!         double double_value  = 13;
//!         bool   boolean_value = 14;
//!         string string_value  = 15;
//!         bytes  bytes_value   = 16;
//!         DataSet dataset_value        = 17;
//!         Template template_value      = 18;
//!         MetricValueExtension extension_value = 19;
//!     }
//! }
//! ```
//!
//! Only the fields listed in `decode_metric` are interpreted; everything else
//! (flags 5/6, metadata, properties, complex values) is skipped by wire type.

use super::lossy_string;
use crate::schema::metric as field;
use crate::types::millis_to_datetime;
use crate::{DataType, Metric, MetricValue, Result, WireCursor, WireType};

/// Decode one embedded metric record
///
/// Decoding stops successfully at the end of the buffer; no field is
/// required. When a field repeats, the last occurrence wins. A metric with
/// `is_null` set always ends up with `MetricValue::None`.
///
/// # Errors
///
/// Offsets in the returned error are relative to `buf`.
pub fn decode_metric(buf: &[u8]) -> Result<Metric> {
    let mut cursor = WireCursor::new(buf);
    let mut metric = Metric::default();

    while !cursor.is_at_end() {
        let tag = cursor.read_tag()?;

        match (tag.field, tag.wire_type) {
            (field::NAME, WireType::LengthDelimited) => {
                metric.name = lossy_string(cursor.read_length_delimited()?);
            }
            (field::ALIAS, WireType::Varint) => {
                metric.alias = cursor.read_varint()?;
            }
            (field::TIMESTAMP, WireType::Varint) => {
                metric.timestamp = millis_to_datetime(cursor.read_varint()?);
            }
            (field::DATATYPE, WireType::Varint) => {
                metric.data_type = DataType::from_u32(cursor.read_varint()? as u32);
            }
            (field::IS_NULL, WireType::Varint) => {
                metric.is_null = cursor.read_varint()? != 0;
            }
            (field::INT_VALUE, WireType::Varint) => {
                // uint32 on the wire; signed types rely on two's complement in the low 32 bits
                metric.value = MetricValue::Int(i64::from(cursor.read_varint()? as u32 as i32));
            }
            (field::LONG_VALUE, WireType::Varint) => {
                metric.value = MetricValue::Int(cursor.read_varint()? as i64);
            }
            (field::FLOAT_VALUE, WireType::Fixed32) => {
                let bits = cursor.read_fixed32()?;
                metric.value = MetricValue::Double(f64::from(f32::from_bits(bits)));
            }
            (field::DOUBLE_VALUE, WireType::Fixed64) => {
                metric.value = MetricValue::Double(f64::from_bits(cursor.read_fixed64()?));
            }
            (field::BOOLEAN_VALUE, WireType::Varint) => {
                metric.value = MetricValue::Bool(cursor.read_varint()? != 0);
            }
            (field::STRING_VALUE, WireType::LengthDelimited) => {
                metric.value = MetricValue::String(lossy_string(cursor.read_length_delimited()?));
            }
            (field::BYTES_VALUE, WireType::LengthDelimited) => {
                metric.value = MetricValue::Bytes(cursor.read_length_delimited()?.to_vec());
            }
            (_, wire_type) => cursor.skip_field(wire_type)?,
        }
    }

    if metric.is_null {
        metric.value = MetricValue::None;
    }

    Ok(metric)
}
