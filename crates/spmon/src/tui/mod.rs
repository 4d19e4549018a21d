//! Terminal UI for the live monitor.
//!
//! Two panes side by side: the message list on the left, the decoded
//! detail of the selected message on the right. A one-line header shows the
//! connection state and the footer shows key help or transient status.

mod action;
mod app;
mod detail;
mod event;
mod format;
mod state;
mod theme;
mod ui;

pub use app::App;
