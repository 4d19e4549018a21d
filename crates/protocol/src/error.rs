//! Protocol error types
//!
//! Errors that can occur when decoding Sparkplug B payloads. Every variant
//! records the byte offset at which the problem was detected so the monitor
//! can point at the offending region of a hex dump.

use thiserror::Error;

/// Errors that can occur during wire decoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Buffer ended before a value was complete
    #[error("truncated at offset {offset}: need {needed} bytes, have {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Varint continues past 64 bits
    #[error("varint overflow at offset {offset}")]
    Overflow { offset: usize },

    /// Wire type the decoder has no size rule for (groups, reserved values)
    #[error("unsupported wire type {wire_type} at offset {offset}")]
    UnsupportedWireType { wire_type: u8, offset: usize },

    /// An embedded metric record failed to decode
    #[error("decoding metric {index} at offset {offset}: {source}")]
    MetricDecodeFailed {
        index: usize,
        offset: usize,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Create a truncated error
    #[inline]
    pub fn truncated(offset: usize, needed: usize, available: usize) -> Self {
        Self::Truncated {
            offset,
            needed,
            available,
        }
    }

    /// Create a varint overflow error
    #[inline]
    pub fn overflow(offset: usize) -> Self {
        Self::Overflow { offset }
    }

    /// Create an unsupported wire type error
    #[inline]
    pub fn unsupported_wire_type(wire_type: u8, offset: usize) -> Self {
        Self::UnsupportedWireType { wire_type, offset }
    }

    /// Wrap an error raised while decoding the metric at `index`
    #[inline]
    pub fn metric(index: usize, offset: usize, source: DecodeError) -> Self {
        Self::MetricDecodeFailed {
            index,
            offset,
            source: Box::new(source),
        }
    }

    /// Byte offset where the error was detected
    ///
    /// For `MetricDecodeFailed` this is the start of the metric record in
    /// the outer payload.
    pub fn offset(&self) -> usize {
        match self {
            Self::Truncated { offset, .. }
            | Self::Overflow { offset }
            | Self::UnsupportedWireType { offset, .. }
            | Self::MetricDecodeFailed { offset, .. } => *offset,
        }
    }

    /// The innermost error, unwrapping metric context
    pub fn root_cause(&self) -> &DecodeError {
        match self {
            Self::MetricDecodeFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Check if the input simply ended early
    pub fn is_truncated(&self) -> bool {
        matches!(self.root_cause(), Self::Truncated { .. })
    }
}
