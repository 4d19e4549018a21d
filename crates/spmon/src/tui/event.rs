//! Terminal input events for the TUI.
//!
//! One blocking task owns the terminal reader for the life of the handler
//! and forwards every event it reads; a separate task sends ticks. No read
//! is ever abandoned mid-flight, so a key pressed next to a tick is kept.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;
use tracing::warn;

/// How long one blocking poll may wait before checking for shutdown
const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// TUI events.
#[derive(Debug, Clone)]
pub enum Event {
    /// Periodic redraw
    Tick,
    /// Key press
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal resize
    Resize(u16, u16),
}

/// Event handler that reads the terminal in the background.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    /// Keeps the channel open while the handler lives
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Start reading input; a `Tick` is sent every `tick_rate`.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let input_tx = tx.clone();
        tokio::task::spawn_blocking(move || read_input(&input_tx));

        let tick_tx = tx.clone();
        tokio::spawn(async move {
            let mut tick_interval = tokio::time::interval(tick_rate);
            loop {
                tick_interval.tick().await;
                if tick_tx.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Get the next event.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Forward terminal events until the handler is dropped or input fails.
fn read_input(tx: &mpsc::UnboundedSender<Event>) {
    loop {
        match event::poll(POLL_TIMEOUT) {
            Ok(true) => {}
            Ok(false) if tx.is_closed() => break,
            Ok(false) => continue,
            Err(e) => {
                warn!(error = %e, "terminal input unavailable");
                break;
            }
        }

        let raw = match event::read() {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "failed to read terminal event");
                break;
            }
        };

        if let Some(event) = translate(raw)
            && tx.send(event).is_err()
        {
            break;
        }
    }
}

/// Keep the events the monitor reacts to.
fn translate(raw: CrosstermEvent) -> Option<Event> {
    match raw {
        // Only key presses (Windows also reports releases)
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}

#[cfg(test)]
#[path = "event_test.rs"]
mod tests;
