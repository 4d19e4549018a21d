//! MQTT session
//!
//! One `rumqttc` event loop runs in its own task and feeds the UI through two
//! bounded channels:
//!
//! ```text
//! EventLoop::poll ─┬─ Publish ──► messages     (depth 256)
//!                  └─ ConnAck / error ──► connectivity (depth 4)
//! ```
//!
//! When the UI falls behind, the message channel fills and the event loop
//! waits on `send`; the broker then holds back delivery.
//!
//! Subscriptions are renewed on every ConnAck, so a broker restart or a
//! dropped clean session does not silently stop the stream.

use std::time::Duration;

use anyhow::Result;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet};
use spmon_config::MqttConfig;
use spmon_timeline::{Publisher, QoS, TransportError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Depth of the received-message channel
pub const MESSAGE_CHANNEL_DEPTH: usize = 256;

/// Depth of the connectivity channel
pub const CONNECTIVITY_CHANNEL_DEPTH: usize = 4;

/// Depth of the rumqttc request queue (subscribes and publishes)
const REQUEST_QUEUE_DEPTH: usize = 64;

/// Largest packet accepted or sent; Sparkplug births can be large
const MAX_PACKET_SIZE: usize = 1024 * 1024;

/// A message delivered by the broker
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub topic: String,
    pub payload: Bytes,
    pub received_at: DateTime<Utc>,
}

/// Handles to a running MQTT session
pub struct Transport {
    pub publisher: MqttPublisher,
    pub messages: mpsc::Receiver<IncomingMessage>,
    /// `true` on every ConnAck, `false` when the connection drops
    pub connectivity: mpsc::Receiver<bool>,
    task: JoinHandle<()>,
}

impl Transport {
    /// Disconnect from the broker and stop the event loop
    pub fn shutdown(self) {
        if let Err(e) = self.publisher.client.try_disconnect() {
            debug!(error = %e, "disconnect request not queued");
        }
        self.task.abort();
    }
}

/// Start the MQTT session in a background task
///
/// Returns immediately; the first connection attempt happens in the task.
pub fn spawn(config: &MqttConfig) -> Result<Transport> {
    let (host, port) = config.host_port()?;
    let client_id = config.client_id.clone().unwrap_or_else(generated_client_id);

    let mut options = MqttOptions::new(&client_id, &host, port);
    options
        .set_keep_alive(config.keep_alive())
        .set_clean_session(true)
        .set_max_packet_size(MAX_PACKET_SIZE, MAX_PACKET_SIZE);

    let (client, eventloop) = AsyncClient::new(options, REQUEST_QUEUE_DEPTH);
    let (msg_tx, msg_rx) = mpsc::channel(MESSAGE_CHANNEL_DEPTH);
    let (conn_tx, conn_rx) = mpsc::channel(CONNECTIVITY_CHANNEL_DEPTH);

    info!(%host, port, %client_id, "connecting to broker");

    let session = Session {
        client: client.clone(),
        topics: config.subscriptions(),
        reconnect: config.reconnect_interval(),
        msg_tx,
        conn_tx,
    };
    let task = tokio::spawn(session.run(eventloop));

    Ok(Transport {
        publisher: MqttPublisher { client },
        messages: msg_rx,
        connectivity: conn_rx,
        task,
    })
}

/// `spmon-<epoch ms>`, unique enough for side-by-side monitors
fn generated_client_id() -> String {
    format!("spmon-{}", Utc::now().timestamp_millis())
}

// =============================================================================
// Event loop
// =============================================================================

struct Session {
    client: AsyncClient,
    topics: Vec<String>,
    reconnect: Duration,
    msg_tx: mpsc::Sender<IncomingMessage>,
    conn_tx: mpsc::Sender<bool>,
}

impl Session {
    async fn run(self, mut eventloop: EventLoop) {
        let mut connected = false;

        loop {
            match eventloop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                    info!(code = ?ack.code, "connected");
                    self.subscribe_all();
                    connected = true;
                    if self.conn_tx.send(true).await.is_err() {
                        break;
                    }
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    let message = IncomingMessage {
                        topic: publish.topic,
                        payload: publish.payload,
                        received_at: Utc::now(),
                    };
                    if self.msg_tx.send(message).await.is_err() {
                        break;
                    }
                }
                Ok(Event::Incoming(Packet::SubAck(ack))) => {
                    debug!(pkid = ack.pkid, codes = ?ack.return_codes, "subscription acknowledged");
                }
                Ok(_) => {}
                Err(e) => {
                    if connected {
                        warn!(error = %e, "connection lost");
                        connected = false;
                        if self.conn_tx.send(false).await.is_err() {
                            break;
                        }
                    } else {
                        debug!(error = %e, "connect attempt failed");
                    }
                    tokio::time::sleep(self.reconnect).await;
                }
            }
        }

        debug!("event loop stopped, receiver gone");
    }

    fn subscribe_all(&self) {
        for topic in &self.topics {
            if let Err(e) = self.client.try_subscribe(topic, rumqttc::QoS::AtMostOnce) {
                warn!(%topic, error = %e, "subscribe not queued");
            }
        }
    }
}

// =============================================================================
// Publishing
// =============================================================================

/// `Publisher` backed by the rumqttc request queue
///
/// `publish` never waits: it queues the packet for the event loop or fails.
#[derive(Clone)]
pub struct MqttPublisher {
    client: AsyncClient,
}

impl Publisher for MqttPublisher {
    fn publish(
        &self,
        topic: &str,
        payload: Vec<u8>,
        qos: QoS,
        retain: bool,
    ) -> Result<(), TransportError> {
        self.client
            .try_publish(topic, mqtt_qos(qos), retain, payload)
            .map_err(|e| TransportError::rejected(topic, e.to_string()))
    }
}

fn mqtt_qos(qos: QoS) -> rumqttc::QoS {
    match qos {
        QoS::AtMostOnce => rumqttc::QoS::AtMostOnce,
        QoS::AtLeastOnce => rumqttc::QoS::AtLeastOnce,
        QoS::ExactlyOnce => rumqttc::QoS::ExactlyOnce,
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
