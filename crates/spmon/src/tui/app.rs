//! Main TUI application.
//!
//! Owns the terminal and the channels, and funnels every input (keys,
//! mouse, broker traffic, timers) into `Monitor`.

use std::io::{self, Stderr};
use std::panic::{set_hook, take_hook};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::cursor;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use spmon_config::Config;
use spmon_protocol::SystemClock;
use spmon_timeline::{RebirthTarget, StatusToken};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use super::action::Action;
use super::event::{Event, EventHandler};
use super::state::Monitor;
use super::theme::Theme;
use super::ui;
use crate::transport::{IncomingMessage, Transport};

/// Main TUI application state.
pub struct App {
    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stderr>>,
    /// Key, mouse and tick events
    events: EventHandler,
    /// Action sender, cloned into status timers
    action_tx: UnboundedSender<Action>,
    action_rx: UnboundedReceiver<Action>,
    monitor: Monitor,
    theme: Theme,
    /// MQTT session feeding the monitor
    transport: Transport,
    clock: SystemClock,
    /// How long status text stays in the footer
    status_ttl: Duration,
}

impl App {
    /// Create the application; the terminal is not touched until `run`.
    pub fn new(config: &Config, transport: Transport) -> Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stderr()))
            .context("failed to create terminal")?;
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let defaults = RebirthTarget::new(&config.sparkplug.group, &config.sparkplug.node);
        let monitor = Monitor::new(config.ui.capacity, &config.mqtt.broker, defaults);

        Ok(Self {
            terminal,
            events: EventHandler::new(config.ui.tick_rate()),
            action_tx,
            action_rx,
            monitor,
            theme: Theme::default(),
            transport,
            clock: SystemClock,
            status_ttl: config.ui.status_ttl(),
        })
    }

    /// Run until the user quits, then restore the terminal and disconnect.
    pub async fn run(mut self) -> Result<()> {
        self.enter()?;
        let result = self.event_loop().await;
        let exited = self.exit();
        self.transport.shutdown();
        result.and(exited)
    }

    async fn event_loop(&mut self) -> Result<()> {
        loop {
            self.draw()?;

            tokio::select! {
                Some(event) = self.events.next() => {
                    self.handle_event(event);
                }
                Some(message) = self.transport.messages.recv() => {
                    self.ingest(message);
                    // Take whatever else is queued before the next draw
                    while let Ok(message) = self.transport.messages.try_recv() {
                        self.ingest(message);
                    }
                }
                Some(connected) = self.transport.connectivity.recv() => {
                    self.monitor.set_connected(connected);
                }
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }
            }

            if self.monitor.should_quit {
                return Ok(());
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        let action = match event {
            Event::Key(key) => Action::from_key(key),
            Event::Mouse(mouse) => Action::from_mouse(mouse),
            // Redrawn at the top of the loop
            Event::Tick | Event::Resize(..) => None,
        };
        if let Some(action) = action {
            self.handle_action(action);
        }
    }

    fn handle_action(&mut self, action: Action) {
        let token = self
            .monitor
            .update(action, &self.transport.publisher, &self.clock);
        if let Some(token) = token {
            self.arm_status_timer(token);
        }
    }

    fn ingest(&mut self, message: IncomingMessage) {
        self.monitor
            .timeline
            .ingest(message.topic, message.payload, message.received_at);
    }

    /// Expire status text after the TTL; a newer status makes this a no-op
    fn arm_status_timer(&self, token: StatusToken) {
        let tx = self.action_tx.clone();
        let ttl = self.status_ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if tx.send(Action::ExpireStatus(token)).is_err() {
                debug!("status timer fired after shutdown");
            }
        });
    }

    fn draw(&mut self) -> Result<()> {
        let monitor = &mut self.monitor;
        let theme = &self.theme;
        self.terminal
            .draw(|frame| ui::draw(frame, monitor, theme))
            .context("failed to draw frame")?;
        Ok(())
    }

    /// Enter TUI mode.
    fn enter(&mut self) -> Result<()> {
        Self::init_panic_hook();
        enable_raw_mode().context("failed to enable raw mode")?;
        crossterm::execute!(
            io::stderr(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
        )
        .context("failed to enter alternate screen")?;
        self.terminal.clear().context("failed to clear terminal")?;
        Ok(())
    }

    /// Exit TUI mode.
    fn exit(&mut self) -> Result<()> {
        if crossterm::terminal::is_raw_mode_enabled()? {
            disable_raw_mode().context("failed to disable raw mode")?;
            crossterm::execute!(
                io::stderr(),
                LeaveAlternateScreen,
                DisableMouseCapture,
                cursor::Show,
            )
            .context("failed to leave alternate screen")?;
        }
        Ok(())
    }

    /// Set up panic hook to restore terminal on panic.
    fn init_panic_hook() {
        let original_hook = take_hook();
        set_hook(Box::new(move |panic_info| {
            let _ = Self::restore_terminal();
            original_hook(panic_info);
        }));
    }

    fn restore_terminal() -> Result<()> {
        if crossterm::terminal::is_raw_mode_enabled()? {
            disable_raw_mode()?;
            crossterm::execute!(
                io::stderr(),
                LeaveAlternateScreen,
                DisableMouseCapture,
                cursor::Show,
            )?;
        }
        Ok(())
    }
}
