//! # Strix Core
//!
//! Core types for the Strix messaging client: the message model, destination
//! and delivery-parameter types, and the shared error taxonomy.
//!
//! This crate holds no producer or transport logic; those live in the client
//! crates built on top of it (see `strix-producer`).
//!
//! ## Quick Start
//!
//! ```rust
//! use strix_core::{Destination, DeliveryMode, Message, Priority};
//!
//! # fn main() -> strix_core::Result<()> {
//! let destination = Destination::queue("orders.inbound")?;
//! let message = Message::builder()
//!     .payload("hello")
//!     .header("trace-id", "abc123")
//!     .build();
//!
//! assert_eq!(destination.to_string(), "queue://orders.inbound");
//! assert_eq!(Priority::default().value(), 4);
//! assert_eq!(DeliveryMode::default(), DeliveryMode::Persistent);
//! # let _ = message;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod message;
pub mod prelude;
pub mod types;

pub use crate::{
    error::{Error, Result},
    message::{Message, MessageBuilder, MessageId},
    types::{DeliveryMode, Destination, Priority, TimeToLive, Timestamp},
};
