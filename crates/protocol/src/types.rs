//! Sparkplug B data model
//!
//! Owned representations of a decoded `Payload` and its `Metric` records.

use chrono::{DateTime, Utc};

// =============================================================================
// Data Types
// =============================================================================

/// Declared metric data type (Sparkplug B 3.0, section 6.4.16)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Type code 0 or any code this monitor does not know
    Unknown(u32),
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float,
    Double,
    Boolean,
    String,
    DateTime,
    Text,
    Uuid,
    DataSet,
    Bytes,
    File,
    Template,
}

impl Default for DataType {
    fn default() -> Self {
        Self::Unknown(0)
    }
}

impl DataType {
    #[inline]
    pub const fn from_u32(code: u32) -> Self {
        match code {
            1 => Self::Int8,
            2 => Self::Int16,
            3 => Self::Int32,
            4 => Self::Int64,
            5 => Self::UInt8,
            6 => Self::UInt16,
            7 => Self::UInt32,
            8 => Self::UInt64,
            9 => Self::Float,
            10 => Self::Double,
            11 => Self::Boolean,
            12 => Self::String,
            13 => Self::DateTime,
            14 => Self::Text,
            15 => Self::Uuid,
            16 => Self::DataSet,
            17 => Self::Bytes,
            18 => Self::File,
            19 => Self::Template,
            other => Self::Unknown(other),
        }
    }

    #[inline]
    pub const fn code(self) -> u32 {
        match self {
            Self::Int8 => 1,
            Self::Int16 => 2,
            Self::Int32 => 3,
            Self::Int64 => 4,
            Self::UInt8 => 5,
            Self::UInt16 => 6,
            Self::UInt32 => 7,
            Self::UInt64 => 8,
            Self::Float => 9,
            Self::Double => 10,
            Self::Boolean => 11,
            Self::String => 12,
            Self::DateTime => 13,
            Self::Text => 14,
            Self::Uuid => 15,
            Self::DataSet => 16,
            Self::Bytes => 17,
            Self::File => 18,
            Self::Template => 19,
            Self::Unknown(code) => code,
        }
    }

    /// Human-readable name, `None` for codes outside the known table
    #[inline]
    pub const fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::Int8 => "Int8",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::UInt8 => "UInt8",
            Self::UInt16 => "UInt16",
            Self::UInt32 => "UInt32",
            Self::UInt64 => "UInt64",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Boolean => "Boolean",
            Self::String => "String",
            Self::DateTime => "DateTime",
            Self::Text => "Text",
            Self::Uuid => "UUID",
            Self::DataSet => "DataSet",
            Self::Bytes => "Bytes",
            Self::File => "File",
            Self::Template => "Template",
            Self::Unknown(_) => return None,
        })
    }

    /// Integer types whose value travels in the 32-bit `int_value` field
    #[inline]
    pub const fn uses_int_value(self) -> bool {
        matches!(
            self,
            Self::Int8 | Self::Int16 | Self::Int32 | Self::UInt8 | Self::UInt16
        )
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Unknown({})", self.code()),
        }
    }
}

// =============================================================================
// Values
// =============================================================================

/// Scalar metric value
///
/// `None` covers null metrics and value kinds this monitor does not decode
/// (DataSet, Template, extension values).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MetricValue {
    Int(i64),
    Double(f64),
    Bool(bool),
    String(String),
    Bytes(Vec<u8>),
    #[default]
    None,
}

impl MetricValue {
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// A decoded `Payload.Metric`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metric {
    /// Empty when the publisher sent only an alias
    pub name: String,
    pub alias: u64,
    pub timestamp: Option<DateTime<Utc>>,
    pub data_type: DataType,
    pub is_null: bool,
    pub value: MetricValue,
}

impl Metric {
    /// Name for display, falling back to `<alias N>`
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("<alias {}>", self.alias)
        } else {
            self.name.clone()
        }
    }
}

/// A decoded Sparkplug B `Payload`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Payload {
    pub timestamp: Option<DateTime<Utc>>,
    pub seq: u64,
    pub uuid: String,
    pub metrics: Vec<Metric>,
}

/// Convert epoch milliseconds to a timestamp; 0 and out-of-range values are absent
pub fn millis_to_datetime(ms: u64) -> Option<DateTime<Utc>> {
    if ms == 0 {
        return None;
    }
    i64::try_from(ms).ok().and_then(DateTime::from_timestamp_millis)
}

/// Inverse of `millis_to_datetime`, clamping pre-epoch instants to 0
pub(crate) fn datetime_to_millis(ts: &DateTime<Utc>) -> u64 {
    u64::try_from(ts.timestamp_millis()).unwrap_or(0)
}
