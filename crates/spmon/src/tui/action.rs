//! Actions for TUI state management.
//!
//! Key and mouse input is translated into actions, as are timer
//! callbacks, so every state change goes through `Monitor::update`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use spmon_timeline::StatusToken;

/// Lines scrolled per mouse wheel notch
pub const WHEEL_LINES: u16 = 3;

/// Actions that can be dispatched in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application
    Quit,

    // List navigation
    SelectPrevious,
    SelectNext,
    SelectFirst,
    SelectLast,
    /// Drop every message
    Clear,

    /// Ask the nearest edge node to republish its births
    Rebirth,

    // Detail pane
    DetailHalfPageUp,
    DetailHalfPageDown,
    DetailScrollUp(u16),
    DetailScrollDown(u16),

    /// Status timer fired
    ExpireStatus(StatusToken),
}

impl Action {
    /// Map a key press to an action
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        let action = match key.code {
            KeyCode::Char('c') if ctrl => Self::Quit,
            KeyCode::Char('f') if ctrl => Self::DetailHalfPageDown,
            KeyCode::Char('b') if ctrl => Self::DetailHalfPageUp,
            KeyCode::Char('q') => Self::Quit,
            KeyCode::Up | KeyCode::Char('k') => Self::SelectPrevious,
            KeyCode::Down | KeyCode::Char('j') => Self::SelectNext,
            KeyCode::Char('g') => Self::SelectFirst,
            KeyCode::Char('G') => Self::SelectLast,
            KeyCode::Char('c') => Self::Clear,
            KeyCode::Char('R') => Self::Rebirth,
            KeyCode::PageUp => Self::DetailHalfPageUp,
            KeyCode::PageDown => Self::DetailHalfPageDown,
            _ => return None,
        };
        Some(action)
    }

    /// Map a mouse event to an action; only the wheel is used
    pub fn from_mouse(mouse: MouseEvent) -> Option<Self> {
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Self::DetailScrollUp(WHEEL_LINES)),
            MouseEventKind::ScrollDown => Some(Self::DetailScrollDown(WHEEL_LINES)),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "action_test.rs"]
mod tests;
