//! Rebirth dispatch and the transient status line
//!
//! A rebirth asks an edge node to republish its NBIRTH/DBIRTH certificates,
//! which is the only way to learn metric names after subscribing mid-stream.
//! The command is fire-and-forget: QoS 0, never retained.

use std::time::Duration;

use spmon_protocol::{Clock, encode_ncmd_rebirth};
use tracing::debug;

use crate::{MessageTimeline, RebirthError, RebirthTarget, TransportError};

/// How long the "rebirth sent" status stays on screen
pub const REBIRTH_STATUS_TTL: Duration = Duration::from_secs(3);

// =============================================================================
// Publishing
// =============================================================================

/// MQTT delivery guarantee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QoS {
    #[default]
    AtMostOnce,
    AtLeastOnce,
    ExactlyOnce,
}

/// Outbound side of the transport
pub trait Publisher {
    /// Queue one message for publishing
    fn publish(
        &self,
        topic: &str,
        payload: Vec<u8>,
        qos: QoS,
        retain: bool,
    ) -> Result<(), TransportError>;
}

/// Send a rebirth command for the node nearest the selection
///
/// The target comes from `MessageTimeline::rebirth_target`, falling back to
/// `defaults`. Returns the target the command went to.
///
/// # Errors
///
/// - `MissingTarget` if the resolved group or node is empty
/// - `Publish` if the transport refuses the message
pub fn dispatch_rebirth(
    timeline: &MessageTimeline,
    defaults: &RebirthTarget,
    publisher: &dyn Publisher,
    clock: &dyn Clock,
) -> Result<RebirthTarget, RebirthError> {
    let target = timeline.rebirth_target(&defaults.group, &defaults.node);
    if !target.is_complete() {
        return Err(RebirthError::missing_target(target.group, target.node));
    }

    let topic = target.topic();
    let payload = encode_ncmd_rebirth(clock);
    let size = payload.len();

    publisher
        .publish(&topic, payload, QoS::AtMostOnce, false)
        .map_err(|e| RebirthError::publish(&topic, e))?;

    debug!(topic = %topic, bytes = size, "rebirth command published");
    Ok(target)
}

/// Status text shown after a rebirth went out
pub fn sent_status(target: &RebirthTarget) -> String {
    format!("↺  Rebirth command sent → {}", target.topic())
}

// =============================================================================
// Status line
// =============================================================================

/// Identifies one `StatusLine::show` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusToken(u64);

/// Transient one-line status with token-guarded expiry
///
/// Each `show` supersedes the previous text and hands out a new token.
/// An expiry timer armed for an older text holds an older token, so when it
/// fires late it leaves the newer text alone.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    text: Option<String>,
    generation: u64,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the status text
    pub fn show(&mut self, text: impl Into<String>) -> StatusToken {
        self.generation = self.generation.wrapping_add(1);
        self.text = Some(text.into());
        StatusToken(self.generation)
    }

    /// Clear the text if `token` is from the latest `show`
    ///
    /// Returns true if the text was cleared.
    pub fn expire(&mut self, token: StatusToken) -> bool {
        if token.0 != self.generation || self.text.is_none() {
            return false;
        }
        self.text = None;
        true
    }

    /// Current text, if any
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

#[cfg(test)]
#[path = "rebirth_test.rs"]
mod tests;
