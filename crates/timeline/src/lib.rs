//! spmon Timeline - what the monitor has seen and what it can send back
//!
//! This crate holds the UI-independent core of the live monitor:
//!
//! - `RawMessage` / `Category` - a received MQTT message and its topic family
//! - `MessageTimeline` - capacity-bounded FIFO with a selection cursor,
//!   follow mode and a scrolled list window
//! - `SparkplugTopic` / `RebirthTarget` - topic parsing and the NCMD address
//! - `dispatch_rebirth` / `StatusLine` - sending a rebirth request and the
//!   transient status text that reports it
//!
//! # Data Flow
//!
//! ```text
//! transport ──(topic, payload, received_at)──► MessageTimeline::ingest
//!                                                   │
//!                                   selected ◄──────┤ move_up / move_down / jump_*
//!                                                   │
//!                       rebirth_target ◄────────────┘
//!                             │
//!                             ▼
//!             dispatch_rebirth ──► Publisher (QoS 0, no retain)
//! ```
//!
//! Nothing here touches the terminal or the network directly; the binary
//! supplies a `Publisher` and drives the timeline from its event loop.

mod error;
pub mod message;
pub mod rebirth;
pub mod timeline;
pub mod topic;

pub use error::{RebirthError, TransportError};
pub use message::{Category, RawMessage};
pub use rebirth::{
    Publisher, QoS, REBIRTH_STATUS_TTL, StatusLine, StatusToken, dispatch_rebirth, sent_status,
};
pub use timeline::{DEFAULT_CAPACITY, MessageTimeline};
pub use topic::{RebirthTarget, SparkplugTopic};
