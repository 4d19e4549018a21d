//! Sparkplug B topic structure
//!
//! ```text
//! spBv1.0/{group_id}/{message_type}/{edge_node_id}[/{device_id}]
//! ```

use std::fmt;

use spmon_protocol::SPARKPLUG_NAMESPACE;

/// Borrowed view of a Sparkplug topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SparkplugTopic<'a> {
    pub group: &'a str,
    /// Message type (`NBIRTH`, `DDATA`, `NCMD`, ...), not validated
    pub command: &'a str,
    pub node: &'a str,
    /// Everything after the node segment
    pub device: Option<&'a str>,
}

impl<'a> SparkplugTopic<'a> {
    /// Parse a topic, requiring the namespace plus non-empty group and node
    pub fn parse(topic: &'a str) -> Option<Self> {
        let mut parts = topic.splitn(5, '/');

        if parts.next()? != SPARKPLUG_NAMESPACE {
            return None;
        }
        let group = parts.next()?;
        let command = parts.next()?;
        let node = parts.next()?;
        let device = parts.next();

        if group.is_empty() || node.is_empty() {
            return None;
        }

        Some(Self {
            group,
            command,
            node,
            device,
        })
    }

    /// The edge node this topic belongs to
    pub fn target(&self) -> RebirthTarget {
        RebirthTarget::new(self.group, self.node)
    }
}

/// Edge node addressed by a rebirth command
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RebirthTarget {
    pub group: String,
    pub node: String,
}

impl RebirthTarget {
    pub fn new(group: impl Into<String>, node: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            node: node.into(),
        }
    }

    /// True when both group and node are set
    #[inline]
    pub fn is_complete(&self) -> bool {
        !self.group.is_empty() && !self.node.is_empty()
    }

    /// The node command topic, `spBv1.0/{group}/NCMD/{node}`
    pub fn topic(&self) -> String {
        format!("{SPARKPLUG_NAMESPACE}/{}/NCMD/{}", self.group, self.node)
    }
}

impl fmt::Display for RebirthTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.node)
    }
}

#[cfg(test)]
#[path = "topic_test.rs"]
mod tests;
