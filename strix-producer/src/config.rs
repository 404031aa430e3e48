//! Producer configuration types.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use strix_core::{DeliveryMode, Priority, TimeToLive};

/// Delivery configuration carried by a producer.
///
/// Every field is an independent default applied to sends that do not supply
/// an explicit value. No cross-field consistency is guaranteed or required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerConfig {
    /// Persistence policy for sent messages
    pub delivery_mode: DeliveryMode,

    /// Do not stamp outgoing messages with a message ID
    pub suppress_message_id: bool,

    /// Do not stamp outgoing messages with a timestamp
    pub suppress_timestamp: bool,

    /// Priority for sent messages
    pub priority: Priority,

    /// Message lifetime; zero means no expiration
    pub time_to_live: TimeToLive,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            delivery_mode: DeliveryMode::Persistent,
            suppress_message_id: false,
            suppress_timestamp: false,
            priority: Priority::DEFAULT,
            time_to_live: Duration::ZERO,
        }
    }
}
