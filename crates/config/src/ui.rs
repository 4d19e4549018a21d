//! Terminal UI settings

use std::time::Duration;

use serde::Deserialize;

/// Largest accepted `capacity`
pub const MAX_CAPACITY: usize = 100_000;

/// List size and timing of the monitor screen
///
/// # Example
///
/// ```toml
/// [ui]
/// capacity = 2000
/// tick_ms = 100
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Messages kept before the oldest is dropped, at most `MAX_CAPACITY`
    /// Default: 500
    pub capacity: usize,

    /// Redraw interval when idle, in milliseconds
    /// Default: 250
    pub tick_ms: u64,

    /// How long transient status text stays visible, in milliseconds
    /// Default: 3000
    pub status_ttl_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            capacity: 500,
            tick_ms: 250,
            status_ttl_ms: 3000,
        }
    }
}

impl UiConfig {
    #[inline]
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    #[inline]
    pub fn status_ttl(&self) -> Duration {
        Duration::from_millis(self.status_ttl_ms)
    }
}
