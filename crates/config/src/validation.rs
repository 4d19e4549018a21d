//! Configuration validation
//!
//! Runs after parsing and again after CLI overrides are applied:
//! - Broker address has a host and a u16 port
//! - Topic filters are non-empty
//! - Sparkplug defaults name a group and node
//! - UI capacity is between 1 and `MAX_CAPACITY`; tick rate is non-zero

use crate::Config;
use crate::ui::MAX_CAPACITY;
use crate::error::{ConfigError, Result};

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_mqtt(config)?;
    validate_sparkplug(config)?;
    validate_ui(config)?;
    Ok(())
}

fn validate_mqtt(config: &Config) -> Result<()> {
    let mqtt = &config.mqtt;

    mqtt.host_port()?;

    if let Some(id) = &mqtt.client_id
        && id.trim().is_empty()
    {
        return Err(ConfigError::invalid_value(
            "mqtt",
            "client_id",
            "must not be empty when set",
        ));
    }

    if mqtt.topics.iter().any(|t| t.trim().is_empty()) {
        return Err(ConfigError::invalid_value(
            "mqtt",
            "topics",
            "topic filters must not be empty",
        ));
    }

    if mqtt.reconnect_secs == 0 {
        return Err(ConfigError::invalid_value(
            "mqtt",
            "reconnect_secs",
            "must be at least 1",
        ));
    }

    Ok(())
}

fn validate_sparkplug(config: &Config) -> Result<()> {
    if config.sparkplug.group.is_empty() {
        return Err(ConfigError::missing_field("sparkplug", "group"));
    }
    if config.sparkplug.node.is_empty() {
        return Err(ConfigError::missing_field("sparkplug", "node"));
    }
    Ok(())
}

fn validate_ui(config: &Config) -> Result<()> {
    if config.ui.capacity == 0 {
        return Err(ConfigError::invalid_value(
            "ui",
            "capacity",
            "must be at least 1",
        ));
    }
    if config.ui.capacity > MAX_CAPACITY {
        return Err(ConfigError::invalid_value(
            "ui",
            "capacity",
            format!("must be at most {MAX_CAPACITY}"),
        ));
    }
    if config.ui.tick_ms == 0 {
        return Err(ConfigError::invalid_value("ui", "tick_ms", "must be at least 1"));
    }
    Ok(())
}
