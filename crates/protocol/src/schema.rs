//! Sparkplug B field numbers
//!
//! The single source of field numbers for both the decoders and the encoder.
//! See `sparkplug_b.proto` in the Eclipse Tahu project for the full schema.

/// `Payload` message fields
pub(crate) mod payload {
    pub const TIMESTAMP: u64 = 1;
    pub const METRIC: u64 = 2;
    pub const SEQ: u64 = 3;
    pub const UUID: u64 = 4;
}

/// `Payload.Metric` message fields
pub(crate) mod metric {
    pub const NAME: u64 = 1;
    pub const ALIAS: u64 = 2;
    pub const TIMESTAMP: u64 = 3;
    pub const DATATYPE: u64 = 4;
    pub const IS_NULL: u64 = 7;
    pub const INT_VALUE: u64 = 10;
    pub const LONG_VALUE: u64 = 11;
    pub const FLOAT_VALUE: u64 = 12;
    pub const DOUBLE_VALUE: u64 = 13;
    pub const BOOLEAN_VALUE: u64 = 14;
    pub const STRING_VALUE: u64 = 15;
    pub const BYTES_VALUE: u64 = 16;
}
