//! # Message Traits and Delivery Envelope
//!
//! This module defines the core delivery infrastructure of the bus: the
//! [`Message`] trait that marks a type as a sendable notification, the
//! [`Envelope`] that carries one message through a dispatch pass, and the
//! handler abstractions that subscribers register against.
//!
//! ## Design Principles
//!
//! - **Type Safety**: messages are strongly typed; the envelope only yields
//!   the payload back as its exact concrete type
//! - **Opacity**: subscribers see an [`Envelope`], never a bare `dyn Any`,
//!   so a kind mismatch is always a structured [`NotifyError::TypeMismatch`]
//!   rather than a silent `None`
//! - **Extensibility**: new message kinds are plain structs or enums plus a
//!   [`Message`] impl (or one line of [`declare_messages!`])
//!
//! [`declare_messages!`]: crate::declare_messages

use crate::error::NotifyError;
use crate::types::MessageKind;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;
use uuid::Uuid;

// ============================================================================
// Message Trait
// ============================================================================

/// Trait that all notification messages must implement.
///
/// Implementing `Message` is what makes a type a recognized message kind:
/// only `Message` types can be sent or subscribed to, so an "invalid kind"
/// can never reach the registry through the typed API. Messages must be
/// `Send + Sync` because the bus may be shared across threads, and `Debug`
/// so failed deliveries can be logged meaningfully.
///
/// For plain data types, [`declare_messages!`](crate::declare_messages)
/// generates the impl:
///
/// ```rust
/// use notify_bus::declare_messages;
///
/// #[derive(Debug, Clone)]
/// struct DamageTakenMsg {
///     amount: u32,
/// }
///
/// declare_messages!(DamageTakenMsg);
/// ```
pub trait Message: Send + Sync + Any + Debug {
    /// Returns the stable kind name used for routing diagnostics and logs.
    fn kind_name() -> &'static str
    where
        Self: Sized;

    /// Returns a reference to this message as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl Message for String {
    fn kind_name() -> &'static str {
        "string"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Message for Vec<u8> {
    fn kind_name() -> &'static str {
        "bytes"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Message for serde_json::Value {
    fn kind_name() -> &'static str {
        "json_value"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Delivery Envelope
// ============================================================================

/// Opaque wrapper around one message for the duration of a dispatch pass.
///
/// An envelope is handed to every subscriber of the message's kind. It
/// exposes exactly two things about its contents: an exact-kind predicate
/// ([`Envelope::is`]) and a type-checked accessor ([`Envelope::payload`]).
/// The accessor never falls back to a default value — asking for the wrong
/// kind is always a hard [`NotifyError::TypeMismatch`].
///
/// Cloning an envelope is cheap (the payload is behind an `Arc`), which is
/// how a subscriber retains a message beyond the dispatch that delivered it.
#[derive(Clone)]
pub struct Envelope {
    kind: MessageKind,
    payload: Arc<dyn Message>,
}

impl Envelope {
    /// Wraps a message value for delivery.
    pub fn new<M: Message>(message: M) -> Self {
        Self {
            kind: MessageKind::of::<M>(),
            payload: Arc::new(message),
        }
    }

    /// The kind tag of the wrapped message.
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Returns `true` iff the wrapped message is exactly of kind `M`.
    ///
    /// This is an exact `TypeId` comparison — there is no supertype or
    /// trait-object matching.
    pub fn is<M: Message>(&self) -> bool {
        self.kind == MessageKind::of::<M>()
    }

    /// Returns the payload as kind `M`, or fails if the envelope carries a
    /// different kind.
    ///
    /// # Returns
    ///
    /// Returns `Ok(&M)` when [`Envelope::is::<M>()`](Envelope::is) holds,
    /// otherwise `Err(NotifyError::TypeMismatch)` naming both the requested
    /// and the actual kind.
    pub fn payload<M: Message>(&self) -> Result<&M, NotifyError> {
        self.payload
            .as_any()
            .downcast_ref::<M>()
            .ok_or(NotifyError::TypeMismatch {
                expected: M::kind_name(),
                actual: self.kind.name(),
            })
    }
}

impl Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("kind", &self.kind.name())
            .field("payload", &self.payload)
            .finish()
    }
}

// ============================================================================
// Handler Abstractions
// ============================================================================

/// Trait for message handlers.
///
/// Most callers never implement this directly — the typed registration API
/// wraps a closure in a [`TypedMessageHandler`]. A manual impl is the escape
/// hatch for handlers that inspect the envelope themselves (for example a
/// debug tap that logs every kind it is registered under).
pub trait MessageHandler: Send + Sync {
    /// Handle one delivered envelope.
    fn handle(&self, envelope: &Envelope) -> Result<(), NotifyError>;

    /// Get handler name for logging and diagnostics.
    fn handler_name(&self) -> &str;

    /// Get the kind this handler expects to receive.
    fn expected_kind(&self) -> MessageKind;
}

/// Typed message handler that recovers the concrete payload before invoking
/// the wrapped closure.
///
/// The type check happens through [`Envelope::payload`], so a mis-routed
/// envelope surfaces as [`NotifyError::TypeMismatch`] rather than invoking
/// the closure with garbage.
pub struct TypedMessageHandler<M, F>
where
    M: Message,
    F: Fn(&M) -> Result<(), NotifyError> + Send + Sync + 'static,
{
    handler: F,
    name: String,
    _phantom: std::marker::PhantomData<fn(&M)>,
}

impl<M, F> TypedMessageHandler<M, F>
where
    M: Message,
    F: Fn(&M) -> Result<(), NotifyError> + Send + Sync + 'static,
{
    pub fn new(name: String, handler: F) -> Self {
        Self {
            handler,
            name,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<M, F> MessageHandler for TypedMessageHandler<M, F>
where
    M: Message,
    F: Fn(&M) -> Result<(), NotifyError> + Send + Sync + 'static,
{
    fn handle(&self, envelope: &Envelope) -> Result<(), NotifyError> {
        let payload = envelope.payload::<M>()?;
        (self.handler)(payload)
    }

    fn handler_name(&self) -> &str {
        &self.name
    }

    fn expected_kind(&self) -> MessageKind {
        MessageKind::of::<M>()
    }
}

// ============================================================================
// Built-in Session Lifecycle Messages
// ============================================================================

/// Sent by an embedding when a fresh session begins (after the registry has
/// been cleared and the first subscribers have re-registered).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStartedMsg {
    pub session_id: Uuid,
    pub timestamp: u64,
}

/// Sent by an embedding immediately before it clears the registry at a
/// session boundary, giving subscribers a chance to flush state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEndedMsg {
    pub session_id: Uuid,
    pub timestamp: u64,
}

crate::declare_messages!(SessionStartedMsg, SessionEndedMsg);
