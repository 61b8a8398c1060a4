//! # Core Type Definitions
//!
//! Fundamental identifier types used throughout the notification bus.
//!
//! ## Key Types
//!
//! - [`SubscriberId`] - Unique identifier for a subscribing component
//! - [`MessageKind`] - Runtime tag identifying a concrete message type
//!
//! ## Design Principles
//!
//! - **Type Safety**: Wrapper types prevent ID confusion and accidental
//!   comparison of unrelated identifiers
//! - **Serialization**: `SubscriberId` supports JSON serialization so it can
//!   appear in logs, stats dumps, and diagnostics payloads
//! - **Performance**: `MessageKind` equality is a `TypeId` comparison

use crate::message::Message;
use serde::{Deserialize, Serialize};
use std::any::TypeId;
use uuid::Uuid;

/// Unique identifier for a subscriber in the notification bus.
///
/// This is a wrapper around UUID that provides type safety and ensures
/// subscriber IDs cannot be confused with other kinds of IDs in a host
/// application. A subscriber is whatever owns a registration: a view, a
/// scene controller, a gameplay system. The same `SubscriberId` is used to
/// tear all of its registrations down again.
///
/// # Examples
///
/// ```rust
/// use notify_bus::SubscriberId;
///
/// // Create a new random subscriber ID
/// let subscriber = SubscriberId::new();
///
/// // Parse from string
/// let subscriber = SubscriberId::from_str("550e8400-e29b-41d4-a716-446655440000")?;
///
/// // Convert to string for logging/display
/// println!("Subscriber: {}", subscriber);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriberId(pub Uuid);

impl SubscriberId {
    /// Creates a new random subscriber ID using UUID v4.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a subscriber ID from a string representation.
    ///
    /// # Returns
    ///
    /// Returns `Ok(SubscriberId)` if the string is a valid UUID, otherwise
    /// returns `Err(uuid::Error)` with details about the parsing failure.
    pub fn from_str(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl std::str::FromStr for SubscriberId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s)
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Runtime tag identifying one concrete message kind.
///
/// A kind is the dispatch key of the bus: every registration and every send
/// resolves to exactly one `MessageKind`. The tag pairs the compiler-assigned
/// [`TypeId`] (which drives equality and hashing) with the kind's stable name
/// (which drives logs and error messages). Two kinds compare equal iff they
/// are the same Rust type — there is no supertype matching.
///
/// # Examples
///
/// ```rust
/// use notify_bus::MessageKind;
///
/// let kind = MessageKind::of::<String>();
/// assert_eq!(kind.name(), "string");
/// assert_eq!(kind, MessageKind::of::<String>());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MessageKind {
    id: TypeId,
    name: &'static str,
}

impl MessageKind {
    /// Resolves the kind tag for a concrete message type.
    pub fn of<M: Message>() -> Self {
        Self {
            id: TypeId::of::<M>(),
            name: M::kind_name(),
        }
    }

    /// The stable name of this kind, used for logging and diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The underlying `TypeId` of the message type.
    pub fn type_id(&self) -> TypeId {
        self.id
    }
}

// Equality and hashing use only the TypeId; the name rides along for
// diagnostics and is not guaranteed globally unique.
impl PartialEq for MessageKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MessageKind {}

impl std::hash::Hash for MessageKind {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
