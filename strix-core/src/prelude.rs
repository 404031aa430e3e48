//! Common imports for convenient usage of Strix core types.

pub use crate::error::{Error, Result};
pub use crate::message::{Message, MessageBuilder, MessageId};
pub use crate::types::{DeliveryMode, Destination, Priority, TimeToLive, Timestamp};
