//! Pooled producer handles over a shared resource.

use crate::config::ProducerConfig;
use crate::producer::{CoreProducer, Producer};
use std::fmt;
use std::sync::Arc;
use strix_core::{DeliveryMode, Destination, Message, Priority, Result, TimeToLive};
use tracing::debug;

/// A lightweight producer handle over a shared [`CoreProducer`].
///
/// A pool manager creates one of these per checkout, binding a checked-out
/// resource to a default destination. The wrapper copies the resource's
/// delivery configuration at construction; after that the copy is local, so
/// reconfiguring one wrapper never leaks into the resource or into sibling
/// wrappers sharing it.
///
/// Any number of wrappers may share one resource across threads. Sends are
/// serialized by the mutex owned by the resource, one transmit at a time, no
/// matter which wrapper initiates them.
///
/// `close` is deliberately a no-op: application code following the usual
/// create-use-close pattern must not tear down the shared resource, whose
/// lifecycle belongs to the pool.
#[derive(Debug)]
pub struct PooledProducer {
    resource: Arc<CoreProducer>,
    destination: Destination,
    config: ProducerConfig,
}

impl PooledProducer {
    /// Wrap a checked-out resource with a default destination.
    ///
    /// The resource's current delivery configuration is copied into the
    /// wrapper; later changes on either side do not propagate to the other.
    ///
    /// # Errors
    /// Returns [`Error::ResourceQuery`](strix_core::Error::ResourceQuery) if
    /// the configuration read fails because the pool already invalidated the
    /// resource. No partially initialized wrapper is returned.
    pub fn new(resource: Arc<CoreProducer>, destination: Destination) -> Result<Self> {
        let config = resource.snapshot_config()?;
        debug!(resource = %resource.id(), %destination, "wrapped pooled producer");
        Ok(Self { resource, destination, config })
    }

    /// The shared resource this wrapper delegates to.
    #[must_use]
    pub fn resource(&self) -> &Arc<CoreProducer> {
        &self.resource
    }
}

impl Producer for PooledProducer {
    fn send_full(
        &self,
        destination: Option<&Destination>,
        message: &Message,
        delivery_mode: DeliveryMode,
        priority: Priority,
        time_to_live: TimeToLive,
    ) -> Result<()> {
        let destination = destination.unwrap_or(&self.destination);
        self.resource.transmit(Some(destination), message, delivery_mode, priority, time_to_live)
    }

    fn destination(&self) -> &Destination {
        &self.destination
    }

    fn delivery_mode(&self) -> DeliveryMode {
        self.config.delivery_mode
    }

    fn set_delivery_mode(&mut self, delivery_mode: DeliveryMode) {
        self.config.delivery_mode = delivery_mode;
    }

    fn suppress_message_id(&self) -> bool {
        self.config.suppress_message_id
    }

    fn set_suppress_message_id(&mut self, suppress: bool) {
        self.config.suppress_message_id = suppress;
    }

    fn suppress_timestamp(&self) -> bool {
        self.config.suppress_timestamp
    }

    fn set_suppress_timestamp(&mut self, suppress: bool) {
        self.config.suppress_timestamp = suppress;
    }

    fn priority(&self) -> Priority {
        self.config.priority
    }

    fn set_priority(&mut self, priority: Priority) {
        self.config.priority = priority;
    }

    fn time_to_live(&self) -> TimeToLive {
        self.config.time_to_live
    }

    fn set_time_to_live(&mut self, time_to_live: TimeToLive) {
        self.config.time_to_live = time_to_live;
    }

    fn close(&mut self) -> Result<()> {
        // The resource outlives this handle; the pool recycles it.
        Ok(())
    }
}

impl fmt::Display for PooledProducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PooledProducer {{ {} }}", self.resource)
    }
}
