//! Monitor state driven by actions.
//!
//! Everything the screen shows lives here; the terminal, channels and timers
//! stay in `App`. Keeping the two apart lets every key binding be exercised
//! without a terminal.

use spmon_protocol::Clock;
use spmon_timeline::{
    MessageTimeline, Publisher, RebirthTarget, StatusLine, StatusToken, dispatch_rebirth,
    sent_status,
};
use tracing::{info, warn};

use super::action::Action;

/// What the monitor knows and shows
#[derive(Debug)]
pub struct Monitor {
    pub timeline: MessageTimeline,
    pub status: StatusLine,
    pub connected: bool,
    /// Broker address shown in the header
    pub broker: String,
    /// Rebirth target when no Sparkplug message precedes the selection
    pub defaults: RebirthTarget,
    /// First visible line of the detail body
    pub detail_scroll: u16,
    /// Rows available to the detail body, set on draw
    pub detail_height: u16,
    pub should_quit: bool,
}

impl Monitor {
    pub fn new(capacity: usize, broker: impl Into<String>, defaults: RebirthTarget) -> Self {
        Self {
            timeline: MessageTimeline::with_capacity(capacity),
            status: StatusLine::new(),
            connected: false,
            broker: broker.into(),
            defaults,
            detail_scroll: 0,
            detail_height: 1,
            should_quit: false,
        }
    }

    /// Apply one action
    ///
    /// Returns a token when status text was shown; the caller arms the
    /// expiry timer for it.
    pub fn update(
        &mut self,
        action: Action,
        publisher: &dyn Publisher,
        clock: &dyn Clock,
    ) -> Option<StatusToken> {
        match action {
            Action::Quit => self.should_quit = true,
            Action::SelectPrevious => {
                self.timeline.move_up();
                self.detail_scroll = 0;
            }
            Action::SelectNext => self.timeline.move_down(),
            Action::SelectFirst => {
                self.timeline.jump_to_top();
                self.detail_scroll = 0;
            }
            Action::SelectLast => self.timeline.jump_to_bottom(),
            Action::Clear => {
                self.timeline.clear();
                self.detail_scroll = 0;
            }
            Action::Rebirth => return self.rebirth(publisher, clock),
            Action::DetailHalfPageUp => self.scroll_up(self.half_page()),
            Action::DetailHalfPageDown => self.scroll_down(self.half_page()),
            Action::DetailScrollUp(n) => self.scroll_up(n),
            Action::DetailScrollDown(n) => self.scroll_down(n),
            Action::ExpireStatus(token) => {
                self.status.expire(token);
            }
        }
        None
    }

    /// Record a connectivity transition
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    fn rebirth(&mut self, publisher: &dyn Publisher, clock: &dyn Clock) -> Option<StatusToken> {
        if !self.connected {
            return None;
        }

        match dispatch_rebirth(&self.timeline, &self.defaults, publisher, clock) {
            Ok(target) => {
                info!(%target, "rebirth requested");
                Some(self.status.show(sent_status(&target)))
            }
            Err(e) if e.is_missing_target() => None,
            Err(e) => {
                warn!(error = %e, "rebirth failed");
                Some(self.status.show(format!("✗  {e}")))
            }
        }
    }

    fn half_page(&self) -> u16 {
        (self.detail_height / 2).max(1)
    }

    fn scroll_up(&mut self, lines: u16) {
        self.detail_scroll = self.detail_scroll.saturating_sub(lines);
    }

    /// Scrolls past the end are pulled back when the body is drawn
    fn scroll_down(&mut self, lines: u16) {
        self.detail_scroll = self.detail_scroll.saturating_add(lines);
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
