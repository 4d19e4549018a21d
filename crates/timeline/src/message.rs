//! Received messages and topic families

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::SparkplugTopic;

/// Topic family, decided once from the topic prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// thin-edge.io telemetry under `te/`
    PrimaryTelemetry,
    /// Sparkplug B under `spBv1.0/`
    BinaryProtocol,
    Other,
}

impl Category {
    /// Classify a topic by prefix
    pub fn classify(topic: &str) -> Self {
        if topic.starts_with("spBv1.0/") {
            Self::BinaryProtocol
        } else if topic.starts_with("te/") {
            Self::PrimaryTelemetry
        } else {
            Self::Other
        }
    }

    #[inline]
    pub fn is_binary(self) -> bool {
        self == Self::BinaryProtocol
    }
}

/// One message as it came off the wire
///
/// Immutable once ingested. The payload is a refcounted `Bytes` so handing
/// it from the transport to the timeline never copies.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMessage {
    pub received_at: DateTime<Utc>,
    pub topic: String,
    pub payload: Bytes,
    pub category: Category,
}

impl RawMessage {
    /// Build a message, classifying its topic
    pub fn new(
        topic: impl Into<String>,
        payload: impl Into<Bytes>,
        received_at: DateTime<Utc>,
    ) -> Self {
        let topic = topic.into();
        Self {
            received_at,
            category: Category::classify(&topic),
            topic,
            payload: payload.into(),
        }
    }

    /// Payload size in bytes
    #[inline]
    pub fn size(&self) -> usize {
        self.payload.len()
    }

    /// Parsed Sparkplug topic, if this is a well-formed Sparkplug message
    pub fn sparkplug_topic(&self) -> Option<SparkplugTopic<'_>> {
        if !self.category.is_binary() {
            return None;
        }
        SparkplugTopic::parse(&self.topic)
    }
}

#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
