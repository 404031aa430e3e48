//! The producer contract and the direct, broker-bound implementation.

use crate::config::ProducerConfig;
use crate::transport::{Dispatch, Transport};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use strix_core::{DeliveryMode, Destination, Error, Message, Priority, Result, TimeToLive};
use tracing::debug;
use uuid::Uuid;

/// The producer contract shared by direct and pooled handles.
///
/// Calling code written against this trait cannot tell a pooled handle from a
/// direct one, except that `close` on a pooled handle leaves the underlying
/// resource alive.
pub trait Producer {
    /// Send with every parameter explicit. This is the canonical form the
    /// convenience sends resolve to; a `None` destination falls back to the
    /// producer's default destination.
    ///
    /// # Errors
    /// Propagates transmit failures from the underlying resource unchanged.
    fn send_full(
        &self,
        destination: Option<&Destination>,
        message: &Message,
        delivery_mode: DeliveryMode,
        priority: Priority,
        time_to_live: TimeToLive,
    ) -> Result<()>;

    /// Send to the default destination with the producer's current
    /// delivery configuration.
    ///
    /// # Errors
    /// Propagates transmit failures from the underlying resource unchanged.
    fn send(&self, message: &Message) -> Result<()> {
        self.send_full(None, message, self.delivery_mode(), self.priority(), self.time_to_live())
    }

    /// Send to an explicit destination with the producer's current
    /// delivery configuration.
    ///
    /// # Errors
    /// Propagates transmit failures from the underlying resource unchanged.
    fn send_to(&self, destination: &Destination, message: &Message) -> Result<()> {
        self.send_full(
            Some(destination),
            message,
            self.delivery_mode(),
            self.priority(),
            self.time_to_live(),
        )
    }

    /// Send to the default destination with explicit delivery parameters.
    /// The producer's own configuration is untouched by the overrides.
    ///
    /// # Errors
    /// Propagates transmit failures from the underlying resource unchanged.
    fn send_with(
        &self,
        message: &Message,
        delivery_mode: DeliveryMode,
        priority: Priority,
        time_to_live: TimeToLive,
    ) -> Result<()> {
        self.send_full(None, message, delivery_mode, priority, time_to_live)
    }

    /// The destination used when a send does not supply one.
    fn destination(&self) -> &Destination;

    /// Current default persistence policy.
    fn delivery_mode(&self) -> DeliveryMode;

    /// Set the default persistence policy.
    fn set_delivery_mode(&mut self, delivery_mode: DeliveryMode);

    /// Whether outgoing messages are stamped without an ID.
    fn suppress_message_id(&self) -> bool;

    /// Set message-ID suppression.
    fn set_suppress_message_id(&mut self, suppress: bool);

    /// Whether outgoing messages are stamped without a timestamp.
    fn suppress_timestamp(&self) -> bool;

    /// Set timestamp suppression.
    fn set_suppress_timestamp(&mut self, suppress: bool);

    /// Current default priority.
    fn priority(&self) -> Priority;

    /// Set the default priority.
    fn set_priority(&mut self, priority: Priority);

    /// Current default message lifetime.
    fn time_to_live(&self) -> TimeToLive;

    /// Set the default message lifetime.
    fn set_time_to_live(&mut self, time_to_live: TimeToLive);

    /// Close this handle.
    ///
    /// A direct handle invalidates its resource; a pooled handle leaves the
    /// shared resource untouched.
    ///
    /// # Errors
    /// Never fails for the implementations in this crate.
    fn close(&mut self) -> Result<()>;
}

/// The expensive, broker-bound producer resource.
///
/// A `CoreProducer` owns the transport link for one producer registration on
/// the broker. A pool manager typically keeps these in an `Arc` and hands out
/// [`PooledProducer`](crate::PooledProducer) wrappers over them; the mutex
/// guarding the transport lives here so that every wrapper sharing the
/// resource respects the same one-transmit-at-a-time exclusion.
pub struct CoreProducer {
    id: Uuid,
    destination: Destination,
    config: ProducerConfig,
    transport: Mutex<Box<dyn Transport>>,
    closed: AtomicBool,
}

impl CoreProducer {
    /// Create a producer resource bound to a destination and transport.
    #[must_use]
    pub fn new(
        destination: Destination,
        config: ProducerConfig,
        transport: Box<dyn Transport>,
    ) -> Self {
        let id = Uuid::new_v4();
        debug!(%id, %destination, "registered producer resource");
        Self { id, destination, config, transport: Mutex::new(transport), closed: AtomicBool::new(false) }
    }

    /// Read the resource's current delivery configuration.
    ///
    /// Used by pooled wrappers to seed their local configuration at wrap
    /// time.
    ///
    /// # Errors
    /// Returns [`Error::ResourceQuery`] once the pool has invalidated this
    /// resource.
    pub fn snapshot_config(&self) -> Result<ProducerConfig> {
        if self.is_closed() {
            return Err(Error::ResourceQuery {
                message: format!("producer resource {} is invalidated", self.id),
            });
        }
        Ok(self.config)
    }

    /// Transmit a message with fully resolved parameters.
    ///
    /// A `None` destination resolves to the resource's bound destination. The
    /// resource's own suppression flags decide whether the dispatch carries a
    /// message ID and timestamp. The transport lock is held across exactly
    /// the wire call.
    ///
    /// # Errors
    /// Returns [`Error::ResourceClosed`] when invalidated; transport failures
    /// pass through unchanged.
    pub fn transmit(
        &self,
        destination: Option<&Destination>,
        message: &Message,
        delivery_mode: DeliveryMode,
        priority: Priority,
        time_to_live: TimeToLive,
    ) -> Result<()> {
        if self.is_closed() {
            return Err(Error::ResourceClosed);
        }

        let dispatch = Dispatch {
            destination: destination.unwrap_or(&self.destination).clone(),
            message_id: (!self.config.suppress_message_id).then_some(message.id),
            timestamp: (!self.config.suppress_timestamp).then_some(message.timestamp),
            payload: message.payload.clone(),
            headers: message.headers.clone(),
            delivery_mode,
            priority,
            time_to_live,
        };

        let mut transport = self.transport.lock();
        transport.transmit(dispatch)
    }

    /// Invalidate this resource. Called by the pool manager when recycling;
    /// idempotent.
    pub fn invalidate(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            debug!(id = %self.id, "invalidated producer resource");
        }
    }

    /// Whether the pool has invalidated this resource.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Unique identifier of this resource registration.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }
}

impl Producer for CoreProducer {
    fn send_full(
        &self,
        destination: Option<&Destination>,
        message: &Message,
        delivery_mode: DeliveryMode,
        priority: Priority,
        time_to_live: TimeToLive,
    ) -> Result<()> {
        self.transmit(destination, message, delivery_mode, priority, time_to_live)
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
        self.invalidate();
        Ok(())
    }
}

impl fmt::Debug for CoreProducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreProducer")
            .field("id", &self.id)
            .field("destination", &self.destination)
            .field("config", &self.config)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for CoreProducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CoreProducer {{ id: {}, destination: {} }}", self.id, self.destination)
    }
}
