//! # Notify Bus
//!
//! A synchronous, type-keyed publish/subscribe notification bus for
//! session-scoped game systems. Producers and subscribers never reference
//! each other directly — a message value is sent into the bus, the bus
//! resolves the value's concrete kind, and every subscriber registered for
//! that kind is invoked inline, in registration order, before `send`
//! returns.
//!
//! ## Core Features
//!
//! - **Type Safety**: message kinds are Rust types; a subscriber only ever
//!   sees payloads of the kind it registered for
//! - **Synchronous Delivery**: no queues, no background threads — dispatch
//!   runs on the caller's thread and finishes before `send` returns
//! - **Failure Isolation**: a callback that errors or panics is logged and
//!   counted without blocking delivery to the remaining subscribers
//! - **Explicit Lifecycle**: subscribers tear themselves down with
//!   [`NotifyBus::off`]/[`NotifyBus::off_all`], and embeddings reset the
//!   whole bus at session boundaries with [`NotifyBus::clear`]
//! - **Monitoring**: delivery counters via [`NotifyBus::stats`]
//!
//! ## Quick Start Example
//!
//! ```rust
//! use notify_bus::{declare_messages, NotifyBus, SubscriberId};
//!
//! #[derive(Debug, Clone)]
//! struct PlayerSpawnedMsg {
//!     name: String,
//! }
//!
//! declare_messages!(PlayerSpawnedMsg);
//!
//! let bus = NotifyBus::new();
//! let hud = SubscriberId::new();
//!
//! bus.on::<PlayerSpawnedMsg, _>(hud, |msg| {
//!     println!("spawned: {}", msg.name);
//!     Ok(())
//! })?;
//!
//! bus.send(PlayerSpawnedMsg { name: "p1".to_string() });
//!
//! // Owner teardown: remove every registration this subscriber holds.
//! bus.off_all(hud);
//! # Ok::<(), notify_bus::NotifyError>(())
//! ```
//!
//! ## Threading Model
//!
//! The registry tolerates concurrent mutation, but delivery itself has a
//! single logical thread: whichever thread calls `send` runs the callbacks.
//! Callbacks may re-enter the bus (unregister themselves or others, even
//! clear the whole registry) during a dispatch pass; the pass iterates a
//! snapshot and skips anything removed along the way.

// Core modules
pub mod bus;
pub mod error;
pub mod macros;
pub mod message;
pub mod registry;
pub mod types;
pub mod utils;

// Re-export commonly used items for convenience
pub use bus::{NotifyBus, NotifyBusStats};
pub use error::NotifyError;
pub use message::{
    Envelope, Message, MessageHandler, SessionEndedMsg, SessionStartedMsg, TypedMessageHandler,
};
pub use registry::{Registry, Subscription};
pub use types::{MessageKind, SubscriberId};
pub use utils::{create_notify_bus, current_timestamp};
