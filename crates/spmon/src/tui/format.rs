//! Text formatting helpers shared by the list and detail panes.

use std::fmt::{self, Write};

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use spmon_protocol::{Metric, MetricValue};

/// Bytes of a byte-array value shown before eliding the rest
const BYTES_PREVIEW: usize = 16;

/// Payload size in a fixed five-column cell: `999 B` or `12.3k`
pub fn format_size(n: usize) -> String {
    if n < 1000 {
        format!("{n:3} B")
    } else {
        format!("{:4.1}k", n as f64 / 1000.0)
    }
}

/// Cut `s` to `max` characters, marking the cut with `…`
///
/// Widths of three or less are too narrow to mark and leave `s` untouched.
pub fn truncate(s: &str, max: usize) -> String {
    if max <= 3 || s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Right-pad `s` with spaces to `width` characters
pub fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + width - len);
    out.push_str(s);
    out.extend(std::iter::repeat_n(' ', width - len));
    out
}

/// Wall-clock time with milliseconds, `15:04:05.000`
pub fn clock_time<Tz: TimeZone>(ts: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    ts.format("%H:%M:%S%.3f").to_string()
}

/// Full timestamp, RFC 3339 with milliseconds
pub fn full_time(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Lowercase hex without separators
pub fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // Writing to a String cannot fail
        let _ = write!(out, "{b:02x}");
    }
    out
}

/// Display text of a metric value
pub fn metric_value(metric: &Metric) -> String {
    if metric.is_null {
        return "null".to_string();
    }
    match &metric.value {
        MetricValue::None => "(complex)".to_string(),
        MetricValue::Double(v) if v.is_finite() && v.fract() == 0.0 => format!("{v:.1}"),
        MetricValue::Double(v) => v.to_string(),
        MetricValue::Int(v) => v.to_string(),
        MetricValue::Bool(v) => v.to_string(),
        MetricValue::String(s) => format!("{s:?}"),
        MetricValue::Bytes(b) if b.len() > BYTES_PREVIEW => {
            format!("0x{}… ({} bytes)", hex(&b[..BYTES_PREVIEW]), b.len())
        }
        MetricValue::Bytes(b) => format!("0x{}", hex(b)),
    }
}

/// Re-indent a JSON document, or `None` if it does not parse
pub fn pretty_json(bytes: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(bytes).ok()?;
    serde_json::to_string_pretty(&value).ok()
}

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;
