//! Tests for the metric and payload decoders

use super::*;
use crate::{DataType, DecodeError, MetricValue};

// =============================================================================
// Test Helpers - hand-built wire bytes
// =============================================================================

fn varint(mut value: u64) -> Vec<u8> {
    let mut out = Vec::new();
    while value >= 0x80 {
        out.push((value as u8) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
    out
}

fn varint_field(field: u64, value: u64) -> Vec<u8> {
    let mut out = varint(field << 3);
    out.extend(varint(value));
    out
}

fn len_field(field: u64, data: &[u8]) -> Vec<u8> {
    let mut out = varint((field << 3) | 2);
    out.extend(varint(data.len() as u64));
    out.extend_from_slice(data);
    out
}

fn fixed32_field(field: u64, value: u32) -> Vec<u8> {
    let mut out = varint((field << 3) | 5);
    out.extend_from_slice(&value.to_le_bytes());
    out
}

fn fixed64_field(field: u64, value: u64) -> Vec<u8> {
    let mut out = varint((field << 3) | 1);
    out.extend_from_slice(&value.to_le_bytes());
    out
}

fn concat(parts: &[Vec<u8>]) -> Vec<u8> {
    parts.concat()
}

/// A metric record with a name, Int64 type and a long value
fn simple_metric(name: &str, value: u64) -> Vec<u8> {
    concat(&[
        len_field(1, name.as_bytes()),
        varint_field(4, 4),
        varint_field(11, value),
    ])
}

// =============================================================================
// Metric decoding
// =============================================================================

#[test]
fn test_decode_metric_all_header_fields() {
    let buf = concat(&[
        len_field(1, b"Engine/RPM"),
        varint_field(2, 42),
        varint_field(3, 1_700_000_000_000),
        varint_field(4, 3),
        varint_field(10, 1500),
    ]);

    let metric = decode_metric(&buf).unwrap();
    assert_eq!(metric.name, "Engine/RPM");
    assert_eq!(metric.alias, 42);
    assert_eq!(
        metric.timestamp.map(|t| t.timestamp_millis()),
        Some(1_700_000_000_000)
    );
    assert_eq!(metric.data_type, DataType::Int32);
    assert!(!metric.is_null);
    assert_eq!(metric.value, MetricValue::Int(1500));
}

#[test]
fn test_decode_metric_empty_record() {
    let metric = decode_metric(&[]).unwrap();
    assert!(metric.name.is_empty());
    assert!(metric.timestamp.is_none());
    assert!(metric.value.is_none());
}

#[test]
fn test_decode_metric_zero_timestamp_is_absent() {
    let metric = decode_metric(&varint_field(3, 0)).unwrap();
    assert!(metric.timestamp.is_none());
}

#[test]
fn test_decode_metric_int_value_sign_extends_low_32_bits() {
    // Publishers that encode negative int32 as uint32
    let metric = decode_metric(&varint_field(10, 0xFFFF_FFFF)).unwrap();
    assert_eq!(metric.value, MetricValue::Int(-1));

    // Publishers that sign-extend to 64 bits on the wire
    let metric = decode_metric(&varint_field(10, u64::MAX - 1)).unwrap();
    assert_eq!(metric.value, MetricValue::Int(-2));
}

#[test]
fn test_decode_metric_long_value_reinterprets_as_signed() {
    let metric = decode_metric(&varint_field(11, u64::MAX)).unwrap();
    assert_eq!(metric.value, MetricValue::Int(-1));
}

#[test]
fn test_decode_metric_float_value() {
    let metric = decode_metric(&fixed32_field(12, 2.5f32.to_bits())).unwrap();
    assert_eq!(metric.value, MetricValue::Double(2.5));
}

#[test]
fn test_decode_metric_double_value() {
    let metric = decode_metric(&fixed64_field(13, 21.75f64.to_bits())).unwrap();
    assert_eq!(metric.value, MetricValue::Double(21.75));
}

#[test]
fn test_decode_metric_bool_string_bytes_values() {
    let metric = decode_metric(&varint_field(14, 5)).unwrap();
    assert_eq!(metric.value, MetricValue::Bool(true));

    let metric = decode_metric(&len_field(15, b"running")).unwrap();
    assert_eq!(metric.value, MetricValue::String("running".into()));

    let metric = decode_metric(&len_field(16, &[0xDE, 0xAD])).unwrap();
    assert_eq!(metric.value, MetricValue::Bytes(vec![0xDE, 0xAD]));
}

#[test]
fn test_decode_metric_last_write_wins() {
    let buf = concat(&[
        len_field(1, b"first"),
        varint_field(11, 1),
        len_field(1, b"second"),
        len_field(15, b"text"),
    ]);

    let metric = decode_metric(&buf).unwrap();
    assert_eq!(metric.name, "second");
    assert_eq!(metric.value, MetricValue::String("text".into()));
}

#[test]
fn test_decode_metric_null_clears_value() {
    let buf = concat(&[
        len_field(1, b"Pressure"),
        varint_field(4, 10),
        fixed64_field(13, 1.0f64.to_bits()),
        varint_field(7, 1),
    ]);

    let metric = decode_metric(&buf).unwrap();
    assert!(metric.is_null);
    assert_eq!(metric.value, MetricValue::None);
    assert_eq!(metric.data_type, DataType::Double);
}

#[test]
fn test_decode_metric_skips_unknown_length_delimited_field() {
    let buf = concat(&[
        len_field(1, b"Temperature"),
        len_field(9, &[0x0A, 0x03, b'f', b'o', b'o']), // properties
        varint_field(4, 10),
        len_field(99, b"future extension"),
        fixed64_field(13, 19.5f64.to_bits()),
    ]);

    let metric = decode_metric(&buf).unwrap();
    assert_eq!(metric.name, "Temperature");
    assert_eq!(metric.data_type, DataType::Double);
    assert_eq!(metric.value, MetricValue::Double(19.5));
}

#[test]
fn test_decode_metric_complex_value_is_none() {
    // dataset_value (17) is skipped, so the value stays unset
    let buf = concat(&[
        len_field(1, b"Table"),
        varint_field(4, 16),
        len_field(17, &[0x08, 0x02]),
    ]);

    let metric = decode_metric(&buf).unwrap();
    assert_eq!(metric.data_type, DataType::DataSet);
    assert!(metric.value.is_none());
}

#[test]
fn test_decode_metric_known_field_with_wrong_wire_type_is_skipped() {
    // name sent as a varint is not a name
    let buf = concat(&[varint_field(1, 7), varint_field(2, 3)]);

    let metric = decode_metric(&buf).unwrap();
    assert!(metric.name.is_empty());
    assert_eq!(metric.alias, 3);
}

#[test]
fn test_decode_metric_unsupported_wire_type() {
    let buf = concat(&[len_field(1, b"x"), vec![(9 << 3) | 3]]);
    let err = decode_metric(&buf).unwrap_err();
    assert_eq!(err, DecodeError::unsupported_wire_type(3, 4));
}

#[test]
fn test_decode_metric_invalid_utf8_is_replaced() {
    let metric = decode_metric(&len_field(1, &[b'a', 0xFF, b'b'])).unwrap();
    assert_eq!(metric.name, "a\u{FFFD}b");
}

// =============================================================================
// Payload decoding
// =============================================================================

#[test]
fn test_decode_payload_envelope_fields() {
    let buf = concat(&[
        varint_field(1, 1_700_000_000_500),
        len_field(2, &simple_metric("a", 1)),
        len_field(2, &simple_metric("b", 2)),
        varint_field(3, 7),
        len_field(4, b"f81d4fae-7dec-11d0-a765-00a0c91e6bf6"),
    ]);

    let payload = decode_payload(&buf).unwrap();
    assert_eq!(
        payload.timestamp.map(|t| t.timestamp_millis()),
        Some(1_700_000_000_500)
    );
    assert_eq!(payload.seq, 7);
    assert_eq!(payload.uuid, "f81d4fae-7dec-11d0-a765-00a0c91e6bf6");
    assert_eq!(payload.metrics.len(), 2);
    assert_eq!(payload.metrics[0].name, "a");
    assert_eq!(payload.metrics[1].value, MetricValue::Int(2));
}

#[test]
fn test_decode_payload_empty_buffer() {
    let payload = decode_payload(&[]).unwrap();
    assert!(payload.timestamp.is_none());
    assert_eq!(payload.seq, 0);
    assert!(payload.metrics.is_empty());
}

#[test]
fn test_decode_payload_skips_body_and_unknown_fields() {
    let buf = concat(&[
        len_field(5, b"opaque body"),
        fixed32_field(30, 0),
        len_field(2, &simple_metric("kept", 9)),
    ]);

    let payload = decode_payload(&buf).unwrap();
    assert_eq!(payload.metrics.len(), 1);
    assert_eq!(payload.metrics[0].name, "kept");
}

#[test]
fn test_decode_payload_single_continuation_byte() {
    let partial = decode_payload(&[0x80]).unwrap_err();
    assert!(matches!(partial.error, DecodeError::Truncated { .. }));
    assert_eq!(partial.payload, Default::default());
}

#[test]
fn test_decode_payload_truncated_length_prefix_keeps_earlier_metrics() {
    let buf = concat(&[
        varint_field(3, 1),
        len_field(2, &simple_metric("first", 1)),
        len_field(2, &simple_metric("second", 2)),
        vec![0x12, 0x80], // metric tag, length varint cut short
    ]);

    let (payload, error) = decode_payload(&buf).unwrap_err().into_parts();
    assert!(error.is_truncated());
    assert_eq!(payload.seq, 1);
    assert_eq!(payload.metrics.len(), 2);
    assert_eq!(payload.metrics[0].name, "first");
    assert_eq!(payload.metrics[1].name, "second");
}

#[test]
fn test_decode_payload_failing_metric_is_wrapped_with_context() {
    let good = simple_metric("ok", 1);
    // Name claims 10 bytes but only 2 follow
    let bad = vec![0x0A, 0x0A, b'x', b'y'];
    let buf = concat(&[len_field(2, &good), len_field(2, &bad)]);

    let partial = decode_payload(&buf).unwrap_err();
    match &partial.error {
        DecodeError::MetricDecodeFailed {
            index,
            offset,
            source,
        } => {
            assert_eq!(*index, 1);
            assert_eq!(*offset, good.len() + 2 + 2);
            assert_eq!(**source, DecodeError::truncated(2, 10, 2));
        }
        other => panic!("expected MetricDecodeFailed, got {other:?}"),
    }
    assert_eq!(partial.payload.metrics.len(), 1);
    assert!(partial.to_string().contains("decoding metric 1"));
}

#[test]
fn test_decode_payload_unsupported_top_level_wire_type() {
    let buf = concat(&[varint_field(3, 4), vec![(6 << 3) | 7]]);
    let partial = decode_payload(&buf).unwrap_err();
    assert_eq!(partial.error, DecodeError::unsupported_wire_type(7, 3));
    assert_eq!(partial.payload.seq, 4);
}
