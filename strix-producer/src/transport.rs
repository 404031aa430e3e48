//! Transport seam between a producer resource and the wire.
//!
//! The wire protocol itself lives outside this crate; producers only need a
//! way to hand a fully resolved dispatch to whatever carries it to the broker.

use bytes::Bytes;
use std::collections::HashMap;
use strix_core::{DeliveryMode, Destination, MessageId, Priority, Result, TimeToLive, Timestamp};

/// A message with all delivery parameters resolved, ready for transmission.
///
/// The producer resource builds one of these per send after applying
/// destination fallback and its own ID/timestamp suppression flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// Resolved destination for this transmission
    pub destination: Destination,

    /// Message ID, `None` when the resource suppresses IDs
    pub message_id: Option<MessageId>,

    /// Message timestamp, `None` when the resource suppresses timestamps
    pub timestamp: Option<Timestamp>,

    /// Message payload
    pub payload: Bytes,

    /// Application headers
    pub headers: Option<HashMap<String, String>>,

    /// Resolved persistence policy
    pub delivery_mode: DeliveryMode,

    /// Resolved priority
    pub priority: Priority,

    /// Resolved lifetime; zero means no expiration
    pub time_to_live: TimeToLive,
}

/// Carrier for dispatches on their way to the broker.
///
/// Exactly one `transmit` call per underlying resource is in flight at any
/// instant; the resource serializes callers before invoking this.
pub trait Transport: Send {
    /// Transmit one dispatch to the broker.
    ///
    /// # Errors
    /// Returns [`Error::Transport`](strix_core::Error::Transport) or
    /// [`Error::ResourceClosed`](strix_core::Error::ResourceClosed) when the
    /// broker interaction fails; the producer propagates it unchanged.
    fn transmit(&mut self, dispatch: Dispatch) -> Result<()>;
}
