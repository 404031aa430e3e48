//! Message types for the Strix client.

use crate::types::Timestamp;
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Generate a new unique message ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a message ID from a UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A message handed to a producer for transmission.
///
/// A message carries no destination or delivery parameters of its own; those
/// are resolved by the producer at send time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier
    pub id: MessageId,

    /// Message payload (zero-copy)
    pub payload: Bytes,

    /// Creation timestamp
    pub timestamp: Timestamp,

    /// Optional application headers
    pub headers: Option<HashMap<String, String>>,
}

impl Message {
    /// Create a new message with the given payload.
    #[must_use]
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            id: MessageId::new(),
            payload: payload.into(),
            timestamp: Utc::now(),
            headers: None,
        }
    }

    /// Create a message builder for more complex construction.
    #[must_use]
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }

    /// Get the payload size in bytes.
    #[must_use]
    pub fn payload_size(&self) -> usize {
        self.payload.len()
    }

    /// Get a header value by key.
    #[must_use]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.as_ref()?.get(key).map(String::as_str)
    }

    /// Add or update a header.
    pub fn set_header(&mut self, key: String, value: String) {
        self.headers.get_or_insert_with(HashMap::new).insert(key, value);
    }
}

/// Builder for constructing messages with headers.
#[derive(Debug, Default)]
pub struct MessageBuilder {
    payload: Option<Bytes>,
    headers: Option<HashMap<String, String>>,
}

impl MessageBuilder {
    /// Set the message payload.
    #[must_use]
    pub fn payload(mut self, payload: impl Into<Bytes>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Add a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.get_or_insert_with(HashMap::new).insert(key.into(), value.into());
        self
    }

    /// Build the message. A missing payload builds an empty one.
    #[must_use]
    pub fn build(self) -> Message {
        Message {
            id: MessageId::new(),
            payload: self.payload.unwrap_or_else(Bytes::new),
            timestamp: Utc::now(),
            headers: self.headers,
        }
    }
}
