//! Error types for the Strix core library.

use thiserror::Error;

/// Main error type for Strix client operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Reading configuration from a producer resource failed, typically
    /// because the pool already invalidated it.
    #[error("Resource query failed: {message}")]
    ResourceQuery { message: String },

    /// The underlying transport reported a failure while transmitting.
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The producer resource was invalidated and can no longer transmit.
    #[error("Resource is closed")]
    ResourceClosed,

    /// Invalid destination name or kind
    #[error("Invalid destination: {message}")]
    InvalidDestination { message: String },

    /// Invalid message format or content
    #[error("Invalid message: {message}")]
    InvalidMessage { message: String },
}

/// Result type alias for Strix operations.
pub type Result<T> = std::result::Result<T, Error>;
