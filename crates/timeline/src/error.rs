//! Error types for the timeline crate

use thiserror::Error;

/// A publish the transport could not accept
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The client refused the request (queue full or event loop gone)
    #[error("publish to {topic} rejected: {reason}")]
    Rejected { topic: String, reason: String },
}

impl TransportError {
    #[inline]
    pub fn rejected(topic: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            topic: topic.into(),
            reason: reason.into(),
        }
    }
}

/// Errors from sending a rebirth command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RebirthError {
    /// Neither the timeline nor the defaults name a group and node
    #[error("no rebirth target (group {group:?}, node {node:?})")]
    MissingTarget { group: String, node: String },

    /// The transport refused the command
    #[error("sending rebirth to {topic}: {source}")]
    Publish {
        topic: String,
        #[source]
        source: TransportError,
    },
}

impl RebirthError {
    #[inline]
    pub fn missing_target(group: impl Into<String>, node: impl Into<String>) -> Self {
        Self::MissingTarget {
            group: group.into(),
            node: node.into(),
        }
    }

    #[inline]
    pub fn publish(topic: impl Into<String>, source: TransportError) -> Self {
        Self::Publish {
            topic: topic.into(),
            source,
        }
    }

    #[inline]
    pub fn is_missing_target(&self) -> bool {
        matches!(self, Self::MissingTarget { .. })
    }
}
