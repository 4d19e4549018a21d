//! Capacity-bounded message timeline
//!
//! The timeline is the list pane's model: a FIFO of received messages, the
//! selected index, follow mode and the scrolled window the list shows.
//!
//! # Invariants
//!
//! - `len() <= capacity()`; the oldest message is evicted on overflow
//! - `selected` indexes a message, or is 0 when the timeline is empty
//! - while following, every ingest selects the newest message
//! - `offset <= selected < offset + height` once the window is clamped
//! - the window never starts later than it needs to show `height` rows
//!
//! Eviction shifts every index down by one, so a fixed selection keeps
//! pointing at the same message until that message itself is evicted.

use std::collections::VecDeque;

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::{RawMessage, RebirthTarget};

/// Messages kept before the oldest is dropped
pub const DEFAULT_CAPACITY: usize = 500;

/// Bounded message history with selection and follow mode
#[derive(Debug, Clone)]
pub struct MessageTimeline {
    messages: VecDeque<RawMessage>,
    capacity: usize,
    selected: usize,
    follow: bool,
    /// First index shown in the list window
    offset: usize,
    /// Rows in the list window
    height: usize,
}

impl MessageTimeline {
    /// Create a timeline with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a timeline holding at most `capacity` messages (minimum 1)
    ///
    /// Storage grows with the messages; only the default capacity is
    /// reserved up front.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
            selected: 0,
            follow: true,
            offset: 0,
            height: 1,
        }
    }

    // =========================================================================
    // Ingest
    // =========================================================================

    /// Append a message received from the broker
    pub fn ingest(
        &mut self,
        topic: impl Into<String>,
        payload: impl Into<Bytes>,
        received_at: DateTime<Utc>,
    ) {
        self.push(RawMessage::new(topic, payload, received_at));
    }

    /// Append an already built message
    pub fn push(&mut self, message: RawMessage) {
        if self.messages.len() >= self.capacity {
            self.messages.pop_front();
            self.selected = self.selected.saturating_sub(1);
        }

        self.messages.push_back(message);

        if self.follow {
            self.selected = self.messages.len() - 1;
        }
        self.clamp_window();
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Select the previous message; leaves follow mode when it moves
    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.follow = false;
        }
        self.clamp_window();
    }

    /// Select the next message; reaching the newest re-enters follow mode
    pub fn move_down(&mut self) {
        if self.selected + 1 < self.messages.len() {
            self.selected += 1;
            self.follow = self.selected + 1 == self.messages.len();
        }
        self.clamp_window();
    }

    /// Select the newest message and follow
    pub fn jump_to_bottom(&mut self) {
        if self.messages.is_empty() {
            return;
        }
        self.selected = self.messages.len() - 1;
        self.follow = true;
        self.clamp_window();
    }

    /// Select the oldest message and stop following
    pub fn jump_to_top(&mut self) {
        self.selected = 0;
        self.follow = false;
        self.offset = 0;
    }

    /// Drop every message and resume following
    pub fn clear(&mut self) {
        self.messages.clear();
        self.selected = 0;
        self.offset = 0;
        self.follow = true;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The selected message, if any
    pub fn selected(&self) -> Option<&RawMessage> {
        self.messages.get(self.selected)
    }

    #[inline]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    #[inline]
    pub fn is_following(&self) -> bool {
        self.follow
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&RawMessage> {
        self.messages.get(index)
    }

    // =========================================================================
    // List window
    // =========================================================================

    /// Resize the list window (minimum one row) and keep the selection inside it
    pub fn set_window_height(&mut self, height: usize) {
        self.height = height.max(1);
        self.clamp_window();
    }

    #[inline]
    pub fn window_height(&self) -> usize {
        self.height
    }

    /// Index of the first message in the window
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Messages inside the window, with their timeline indices
    pub fn visible(&self) -> impl Iterator<Item = (usize, &RawMessage)> {
        self.messages
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(self.height)
    }

    fn clamp_window(&mut self) {
        if self.selected < self.offset {
            self.offset = self.selected;
        }
        if self.selected >= self.offset + self.height {
            self.offset = self.selected + 1 - self.height;
        }
        // Keep the window full when there are enough messages
        self.offset = self.offset.min(self.messages.len().saturating_sub(self.height));
    }

    // =========================================================================
    // Rebirth
    // =========================================================================

    /// Node to send a rebirth to
    ///
    /// Walks back from the selection to the nearest Sparkplug message with a
    /// usable group and node; falls back to the given defaults.
    pub fn rebirth_target(&self, default_group: &str, default_node: &str) -> RebirthTarget {
        self.messages
            .iter()
            .take(self.selected + 1)
            .rev()
            .find_map(|msg| msg.sparkplug_topic())
            .map(|topic| topic.target())
            .unwrap_or_else(|| RebirthTarget::new(default_group, default_node))
    }
}

impl Default for MessageTimeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "timeline_test.rs"]
mod tests;
