//! Logging configuration
//!
//! The monitor draws on the terminal, so log lines never go to stdout or
//! stderr. They are written to a file when one is configured and dropped
//! otherwise.

use serde::Deserialize;

/// Log level
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level - very verbose
    Trace,
    /// Debug level - decode failures, rebirth dispatch
    Debug,
    /// Info level - connects and disconnects (default)
    #[default]
    Info,
    /// Warn level - warnings only
    Warn,
    /// Error level - errors only
    Error,
}

impl LogLevel {
    /// Convert to tracing level filter string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines (default)
    #[default]
    Console,
    /// JSON structured logging
    Json,
}

/// Log output destination
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    /// No logging (default)
    #[default]
    Off,
    /// Append to a file
    #[serde(untagged)]
    File(String),
}

impl LogOutput {
    /// File path, if logging is enabled
    pub fn file(&self) -> Option<&str> {
        match self {
            Self::Off => None,
            Self::File(path) => Some(path),
        }
    }
}

/// Logging configuration
///
/// # Example
///
/// ```toml
/// [log]
/// level = "debug"
/// format = "json"
/// output = "/tmp/spmon.log"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    /// Default: info
    pub level: LogLevel,

    /// Output format (console, json)
    /// Default: console
    pub format: LogFormat,

    /// Output destination ("off" or a file path)
    /// Default: off
    pub output: LogOutput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, LogFormat::Console);
        assert_eq!(config.output, LogOutput::Off);
        assert!(config.output.file().is_none());
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
level = "debug"
format = "json"
output = "/var/log/spmon.log"
"#;
        let config: LogConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.output.file(), Some("/var/log/spmon.log"));
    }

    #[test]
    fn test_deserialize_off() {
        let config: LogConfig = toml::from_str("output = \"off\"").unwrap();
        assert_eq!(config.output, LogOutput::Off);
    }

    #[test]
    fn test_deserialize_all_levels() {
        for (s, expected) in [
            ("trace", LogLevel::Trace),
            ("debug", LogLevel::Debug),
            ("info", LogLevel::Info),
            ("warn", LogLevel::Warn),
            ("error", LogLevel::Error),
        ] {
            let toml = format!("level = \"{}\"", s);
            let config: LogConfig = toml::from_str(&toml).unwrap();
            assert_eq!(config.level, expected);
            assert_eq!(expected.as_str(), s);
        }
    }
}
