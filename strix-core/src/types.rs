//! Delivery and addressing types shared across the Strix client.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Timestamp type for message stamping and expiration.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Message lifetime before broker-side expiration.
///
/// `Duration::ZERO` means the message never expires.
pub type TimeToLive = Duration;

/// Persistence policy for a sent message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DeliveryMode {
    /// Message survives broker restarts.
    #[default]
    Persistent,
    /// Message may be lost if the broker goes down.
    NonPersistent,
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persistent => write!(f, "PERSISTENT"),
            Self::NonPersistent => write!(f, "NON_PERSISTENT"),
        }
    }
}

/// Message priority in the range 0..=9, where 9 is most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Priority(u8);

impl Priority {
    /// Highest priority the broker accepts.
    pub const MAX: Self = Self(9);

    /// The normal priority for messages without an explicit override.
    pub const DEFAULT: Self = Self(4);

    /// Create a priority, validating the 0..=9 range.
    ///
    /// # Errors
    /// Returns [`Error::InvalidMessage`](crate::Error::InvalidMessage) if the
    /// value is above 9.
    pub fn new(value: u8) -> crate::Result<Self> {
        if value > Self::MAX.0 {
            return Err(crate::Error::InvalidMessage {
                message: format!("priority {value} is outside the 0..=9 range"),
            });
        }
        Ok(Self(value))
    }

    /// Get the raw priority value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Priority {
    type Error = crate::Error;

    fn try_from(value: u8) -> crate::Result<Self> {
        Self::new(value)
    }
}

/// An addressable target messages are sent to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    /// Point-to-point: each message is consumed by exactly one receiver.
    Queue(String),
    /// Publish-subscribe: each message is delivered to every subscriber.
    Topic(String),
}

impl Destination {
    /// Create a queue destination with a validated name.
    ///
    /// # Errors
    /// Returns an error if the name is empty, longer than 255 characters, or
    /// contains characters outside `[A-Za-z0-9._-]`.
    pub fn queue(name: impl Into<String>) -> crate::Result<Self> {
        Ok(Self::Queue(validate_name(name.into())?))
    }

    /// Create a topic destination with a validated name.
    ///
    /// # Errors
    /// Same validation rules as [`Destination::queue`].
    pub fn topic(name: impl Into<String>) -> crate::Result<Self> {
        Ok(Self::Topic(validate_name(name.into())?))
    }

    /// Get the destination name without its kind.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Queue(name) | Self::Topic(name) => name,
        }
    }

    /// Whether this destination is a queue.
    #[must_use]
    pub const fn is_queue(&self) -> bool {
        matches!(self, Self::Queue(_))
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Queue(name) => write!(f, "queue://{name}"),
            Self::Topic(name) => write!(f, "topic://{name}"),
        }
    }
}

fn validate_name(name: String) -> crate::Result<String> {
    if name.is_empty() {
        return Err(crate::Error::InvalidDestination {
            message: "Destination name cannot be empty".to_string(),
        });
    }

    if name.len() > 255 {
        return Err(crate::Error::InvalidDestination {
            message: "Destination name cannot exceed 255 characters".to_string(),
        });
    }

    if !name.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.') {
        return Err(crate::Error::InvalidDestination {
            message: "Destination name contains invalid characters".to_string(),
        });
    }

    Ok(name)
}
