//! spmon - live monitor for Sparkplug B and thin-edge.io MQTT traffic
//!
//! # Usage
//!
//! ```bash
//! # Local broker, default subscriptions
//! spmon
//!
//! # Remote broker with extra topics and a different rebirth fallback
//! spmon --broker 10.0.0.5:1883 --topics 'tedge/health/#,plant/#' --group site-a --node edge-3
//!
//! # Debug logging to a file (the terminal belongs to the UI)
//! spmon --log-level debug --log-file /tmp/spmon.log
//! ```

mod transport;
mod tui;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use spmon_config::{Config, LogFormat, LogOutput};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// spmon - live Sparkplug B / thin-edge.io MQTT monitor
#[derive(Parser, Debug)]
#[command(name = "spmon")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (error if specified but not found)
    #[arg(short, long, env = "SPMON_CONFIG")]
    config: Option<PathBuf>,

    /// MQTT broker as host:port. Overrides config file.
    #[arg(short, long)]
    broker: Option<String>,

    /// Comma-separated extra topics to subscribe to
    #[arg(short, long, value_delimiter = ',')]
    topics: Vec<String>,

    /// Sparkplug B group id used for rebirth when none has been seen
    #[arg(long)]
    group: Option<String>,

    /// Sparkplug B edge node id used for rebirth when none has been seen
    #[arg(long)]
    node: Option<String>,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long)]
    log_level: Option<String>,

    /// Write logs to this file. Overrides config file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if let Some(path) = config.log.output.file() {
        let level = resolve_log_level(cli.log_level.as_deref(), &config);
        init_logging(&level, config.log.format, Path::new(path))?;
    }

    info!(
        broker = %config.mqtt.broker,
        topics = config.mqtt.subscriptions().len(),
        "starting spmon"
    );

    let transport = transport::spawn(&config.mqtt)?;
    let app = tui::App::new(&config, transport)?;
    app.run().await
}

/// Load the config file (if any) and apply command-line overrides
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(broker) = &cli.broker {
        config.mqtt.broker = broker.clone();
    }
    config.mqtt.topics.extend(
        cli.topics
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string),
    );
    if let Some(group) = &cli.group {
        config.sparkplug.group = group.clone();
    }
    if let Some(node) = &cli.node {
        config.sparkplug.node = node.clone();
    }
    if let Some(path) = &cli.log_file {
        config.log.output = LogOutput::File(path.display().to_string());
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Resolve log level: CLI flag > config file > default "info"
fn resolve_log_level(cli_level: Option<&str>, config: &Config) -> String {
    match cli_level {
        Some(level) => level.to_string(),
        None => config.log.level.as_str().to_string(),
    }
}

/// Initialize the tracing subscriber, writing to `path`
fn init_logging(level: &str, format: LogFormat, path: &Path) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let writer = Mutex::new(file);

    match format {
        LogFormat::Console => tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .with(filter)
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(writer))
            .with(filter)
            .init(),
    }

    Ok(())
}
