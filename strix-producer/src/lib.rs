//! # Strix Producer
//!
//! Producer client surface for the Strix messaging system.
//!
//! This crate provides:
//! - The [`Producer`] contract shared by every producer handle
//! - [`CoreProducer`], the broker-bound resource owning the transport link
//! - [`PooledProducer`], a cheap handle that reuses a shared resource across
//!   many logical producer lifetimes
//!
//! Registering a producer on the broker is expensive; applications that
//! create and discard producers per unit of work should work against pooled
//! handles instead. A pooled handle copies the resource's delivery
//! configuration at wrap time and serializes sends through the mutex owned by
//! the resource, so any number of handles can share one resource safely.
//!
//! ## Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use strix_core::{Destination, Message};
//! use strix_producer::{CoreProducer, Dispatch, PooledProducer, Producer, ProducerConfig, Transport};
//!
//! struct NullTransport;
//!
//! impl Transport for NullTransport {
//!     fn transmit(&mut self, _dispatch: Dispatch) -> strix_core::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> strix_core::Result<()> {
//! let destination = Destination::queue("orders.inbound")?;
//! let resource = Arc::new(CoreProducer::new(
//!     destination.clone(),
//!     ProducerConfig::default(),
//!     Box::new(NullTransport),
//! ));
//!
//! let mut producer = PooledProducer::new(Arc::clone(&resource), destination)?;
//! producer.send(&Message::new("hello world"))?;
//! producer.close()?; // no-op: the resource stays alive for the pool
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod pooled;
pub mod producer;
pub mod transport;

pub use config::ProducerConfig;
pub use pooled::PooledProducer;
pub use producer::{CoreProducer, Producer};
pub use strix_core::{Error, Result};
pub use transport::{Dispatch, Transport};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{CoreProducer, PooledProducer, Producer, ProducerConfig};
    pub use strix_core::prelude::*;
}
