//! spmon Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! An empty file (or no file at all) connects to `localhost:1883` and
//! subscribes to the standard Sparkplug, thin-edge.io and Cumulocity topics.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use spmon_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[mqtt]\nbroker = \"10.0.0.5:1883\"").unwrap();
//! assert_eq!(config.mqtt.host_port().unwrap().1, 1883);
//! ```
//!
//! # Example Full Config
//!
//! ```toml
//! [mqtt]
//! broker = "localhost:1883"
//! keep_alive_secs = 30
//! reconnect_secs = 3
//! topics = ["tedge/health/#"]
//!
//! [sparkplug]
//! group = "tedge"
//! node = "gateway01"
//!
//! [ui]
//! capacity = 500
//!
//! [log]
//! level = "debug"
//! output = "/tmp/spmon.log"
//! ```

mod error;
mod logging;
mod mqtt;
mod sparkplug;
mod ui;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel, LogOutput};
pub use mqtt::{DEFAULT_PORT, DEFAULT_TOPICS, MqttConfig};
pub use sparkplug::SparkplugConfig;
pub use ui::{MAX_CAPACITY, UiConfig};

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Broker connection and subscriptions
    pub mqtt: MqttConfig,

    /// Rebirth fallback target
    pub sparkplug: SparkplugConfig,

    /// Screen settings
    pub ui: UiConfig,

    /// Logging configuration
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, contains invalid TOML, or fails
    /// validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// Prefer using the `FromStr` trait implementation.
    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// Called on load; call again after applying command-line overrides.
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
