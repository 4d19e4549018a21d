//! MQTT session configuration

use std::time::Duration;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Filters subscribed on every connect, before any extras
pub const DEFAULT_TOPICS: &[&str] = &[
    "spBv1.0/#",
    "te/device/+///m/",
    "te/device/+///m/+",
    "c8y/#",
];

/// Port of the default broker address; `broker` must always name a port
pub const DEFAULT_PORT: u16 = 1883;

/// Broker connection and subscriptions
///
/// # Example
///
/// ```toml
/// [mqtt]
/// broker = "192.168.1.20:1883"
/// client_id = "spmon-bench"
/// topics = ["tedge/health/#"]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// Broker address as `host:port`
    /// Default: "localhost:1883"
    pub broker: String,

    /// MQTT client id
    /// Default: None (generated as `spmon-<epoch ms>`)
    pub client_id: Option<String>,

    /// Keep-alive interval in seconds
    /// Default: 30
    pub keep_alive_secs: u64,

    /// Delay between reconnect attempts in seconds
    /// Default: 3
    pub reconnect_secs: u64,

    /// Extra topic filters, subscribed after `DEFAULT_TOPICS`
    /// Default: []
    pub topics: Vec<String>,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker: format!("localhost:{DEFAULT_PORT}"),
            client_id: None,
            keep_alive_secs: 30,
            reconnect_secs: 3,
            topics: Vec::new(),
        }
    }
}

impl MqttConfig {
    /// Split the broker address into host and port
    ///
    /// Accepts `host:port` and `[v6addr]:port`.
    pub fn host_port(&self) -> Result<(String, u16)> {
        let broker = self.broker.trim();
        if broker.is_empty() {
            return Err(ConfigError::missing_field("mqtt", "broker"));
        }

        let Some((host, port)) = broker.rsplit_once(':') else {
            return Err(ConfigError::invalid_value(
                "mqtt",
                "broker",
                format!("'{broker}' has no port (expected host:port)"),
            ));
        };

        let host = host.trim_start_matches('[').trim_end_matches(']');
        if host.is_empty() {
            return Err(ConfigError::invalid_value(
                "mqtt",
                "broker",
                format!("'{broker}' has no host"),
            ));
        }

        let port = port.parse::<u16>().map_err(|e| {
            ConfigError::invalid_value("mqtt", "broker", format!("bad port '{port}': {e}"))
        })?;

        Ok((host.to_string(), port))
    }

    /// Every filter to subscribe, defaults first, without duplicates
    pub fn subscriptions(&self) -> Vec<String> {
        let mut topics: Vec<String> = DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect();
        for extra in &self.topics {
            if !topics.contains(extra) {
                topics.push(extra.clone());
            }
        }
        topics
    }

    #[inline]
    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs)
    }

    #[inline]
    pub fn reconnect_interval(&self) -> Duration {
        Duration::from_secs(self.reconnect_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_broker(broker: &str) -> MqttConfig {
        MqttConfig {
            broker: broker.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = MqttConfig::default();
        assert_eq!(config.broker, "localhost:1883");
        assert!(config.client_id.is_none());
        assert_eq!(config.keep_alive(), Duration::from_secs(30));
        assert_eq!(config.reconnect_interval(), Duration::from_secs(3));
    }

    #[test]
    fn test_host_port() {
        assert_eq!(
            with_broker("broker.local:8883").host_port().unwrap(),
            ("broker.local".to_string(), 8883)
        );
        assert_eq!(
            with_broker("[::1]:1883").host_port().unwrap(),
            ("::1".to_string(), 1883)
        );
    }

    #[test]
    fn test_host_port_rejects_missing_port() {
        let err = with_broker("localhost").host_port().unwrap_err();
        assert!(err.to_string().contains("no port"));
    }

    #[test]
    fn test_host_port_rejects_bad_port() {
        assert!(with_broker("localhost:99999").host_port().is_err());
        assert!(with_broker("localhost:mqtt").host_port().is_err());
        assert!(with_broker(":1883").host_port().is_err());
        assert!(with_broker("  ").host_port().is_err());
    }

    #[test]
    fn test_subscriptions_append_extras_once() {
        let config = MqttConfig {
            topics: vec!["tedge/health/#".into(), "c8y/#".into()],
            ..Default::default()
        };
        let subs = config.subscriptions();
        assert_eq!(subs.len(), DEFAULT_TOPICS.len() + 1);
        assert_eq!(subs[0], "spBv1.0/#");
        assert_eq!(subs.last().map(String::as_str), Some("tedge/health/#"));
    }
}
