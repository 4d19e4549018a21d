//! Payload and metric encoding

use super::{write_fixed32_field, write_fixed64_field, write_len_field, write_varint_field};
use crate::schema::{metric as metric_field, payload as payload_field};
use crate::types::datetime_to_millis;
use crate::{DataType, Metric, MetricValue, Payload};

/// Encode a full payload
///
/// Absent timestamps, a zero sequence number and an empty UUID are omitted.
pub fn encode_payload(payload: &Payload) -> Vec<u8> {
    let mut buf = Vec::with_capacity(16 + payload.metrics.len() * 32);

    if let Some(ts) = &payload.timestamp {
        write_varint_field(&mut buf, payload_field::TIMESTAMP, datetime_to_millis(ts));
    }

    let mut record = Vec::with_capacity(64);
    for metric in &payload.metrics {
        record.clear();
        encode_metric_into(&mut record, metric);
        write_len_field(&mut buf, payload_field::METRIC, &record);
    }

    if payload.seq != 0 {
        write_varint_field(&mut buf, payload_field::SEQ, payload.seq);
    }
    if !payload.uuid.is_empty() {
        write_len_field(&mut buf, payload_field::UUID, payload.uuid.as_bytes());
    }

    buf
}

/// Encode a single metric record (without the enclosing length prefix)
pub fn encode_metric(metric: &Metric) -> Vec<u8> {
    let mut buf = Vec::with_capacity(64);
    encode_metric_into(&mut buf, metric);
    buf
}

fn encode_metric_into(buf: &mut Vec<u8>, metric: &Metric) {
    if !metric.name.is_empty() {
        write_len_field(buf, metric_field::NAME, metric.name.as_bytes());
    }
    if metric.alias != 0 {
        write_varint_field(buf, metric_field::ALIAS, metric.alias);
    }
    if let Some(ts) = &metric.timestamp {
        write_varint_field(buf, metric_field::TIMESTAMP, datetime_to_millis(ts));
    }
    if metric.data_type != DataType::Unknown(0) {
        write_varint_field(buf, metric_field::DATATYPE, u64::from(metric.data_type.code()));
    }
    if metric.is_null {
        write_varint_field(buf, metric_field::IS_NULL, 1);
        return;
    }

    // The narrow field is only used when it carries the value losslessly;
    // otherwise the value goes where a decoder would have found it.
    match &metric.value {
        MetricValue::Int(v) if metric.data_type.uses_int_value() && fits_int_value(*v) => {
            write_varint_field(buf, metric_field::INT_VALUE, u64::from(*v as i32 as u32));
        }
        MetricValue::Int(v) => write_varint_field(buf, metric_field::LONG_VALUE, *v as u64),
        MetricValue::Double(v) if metric.data_type == DataType::Float && fits_float_value(*v) => {
            write_fixed32_field(buf, metric_field::FLOAT_VALUE, (*v as f32).to_bits());
        }
        MetricValue::Double(v) => write_fixed64_field(buf, metric_field::DOUBLE_VALUE, v.to_bits()),
        MetricValue::Bool(v) => write_varint_field(buf, metric_field::BOOLEAN_VALUE, u64::from(*v)),
        MetricValue::String(s) => write_len_field(buf, metric_field::STRING_VALUE, s.as_bytes()),
        MetricValue::Bytes(b) => write_len_field(buf, metric_field::BYTES_VALUE, b),
        MetricValue::None => {}
    }
}

#[inline]
fn fits_int_value(v: i64) -> bool {
    i32::try_from(v).is_ok()
}

#[inline]
fn fits_float_value(v: f64) -> bool {
    f64::from(v as f32) == v
}
