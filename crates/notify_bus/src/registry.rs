//! Subscriber registry: the kind → ordered subscriber list mapping.
//!
//! The registry is the only shared mutable state in the bus. It is backed by
//! a `DashMap` so producers and subscribers on different threads can mutate
//! it without external locking, with `SmallVec` values to keep the common
//! 1–4 subscribers-per-kind case off the heap. Lists preserve insertion
//! order, which is what gives dispatch its registration-order guarantee.

use crate::error::NotifyError;
use crate::message::MessageHandler;
use crate::types::{MessageKind, SubscriberId};
use dashmap::DashMap;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::warn;

/// One registered interest: the subscriber's identity plus the handler to
/// invoke for its kind.
#[derive(Clone)]
pub struct Subscription {
    pub id: SubscriberId,
    pub handler: Arc<dyn MessageHandler>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("handler", &self.handler.handler_name())
            .finish()
    }
}

/// Owns the mapping from message kind to its ordered subscriber list.
///
/// All mutation is pure in-memory bookkeeping; the registry never performs
/// I/O and never invokes handlers itself. Dispatch reads go through
/// [`Registry::snapshot`], which clones the list so a re-entrant
/// `unregister` during delivery cannot corrupt iteration.
pub struct Registry {
    entries: DashMap<MessageKind, SmallVec<[Subscription; 4]>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Appends a subscription to the list for `kind`, creating the list if
    /// absent.
    ///
    /// Two guards apply, both programmer-error checks that reject the call
    /// without mutating anything:
    ///
    /// - the handler must actually expect `kind` ([`NotifyError::InvalidKind`]);
    ///   the typed registration API cannot trip this, only hand-built
    ///   [`MessageHandler`] impls can
    /// - the (kind, subscriber) pair must not already be registered
    ///   ([`NotifyError::DuplicateRegistration`]), so one subscriber can
    ///   never be invoked twice for one send
    pub fn insert(
        &self,
        kind: MessageKind,
        subscriber: SubscriberId,
        handler: Arc<dyn MessageHandler>,
    ) -> Result<(), NotifyError> {
        let handler_kind = handler.expected_kind();
        if handler_kind != kind {
            warn!(
                "⚠️ Rejected registration of {} for '{}': handler expects '{}'",
                subscriber, kind, handler_kind
            );
            return Err(NotifyError::InvalidKind {
                registered: kind.name(),
                handler: handler_kind.name(),
            });
        }

        let mut subs = self.entries.entry(kind).or_default();
        if subs.iter().any(|s| s.id == subscriber) {
            warn!(
                "⚠️ Rejected duplicate registration of {} for '{}'",
                subscriber, kind
            );
            return Err(NotifyError::DuplicateRegistration {
                kind: kind.name(),
                subscriber,
            });
        }

        subs.push(Subscription {
            id: subscriber,
            handler,
        });
        Ok(())
    }

    /// Removes the matching entry if present.
    ///
    /// Returns `true` if an entry was removed. Absence is a no-op, not an
    /// error, so teardown paths can call this unconditionally.
    pub fn remove(&self, kind: MessageKind, subscriber: SubscriberId) -> bool {
        let removed = match self.entries.get_mut(&kind) {
            Some(mut entry) => {
                let subs = entry.value_mut();
                match subs.iter().position(|s| s.id == subscriber) {
                    Some(idx) => {
                        subs.remove(idx);
                        true
                    }
                    None => false,
                }
            }
            None => false,
        };

        if removed {
            // Drop the kind entry once its list empties so registered_kinds
            // reflects live interest only.
            self.entries.remove_if(&kind, |_, subs| subs.is_empty());
        }
        removed
    }

    /// Removes `subscriber` from every kind's list.
    ///
    /// Used when an owner is torn down with an unknown number of outstanding
    /// registrations. Returns the number of entries removed.
    pub fn remove_subscriber(&self, subscriber: SubscriberId) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, subs| {
            let before = subs.len();
            subs.retain(|s| s.id != subscriber);
            removed += before - subs.len();
            !subs.is_empty()
        });
        removed
    }

    /// Empties the entire table. Session-boundary reset.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Clones the subscriber list for `kind`, or `None` if nobody is
    /// registered. The clone is what dispatch iterates, so registry mutation
    /// during delivery never interleaves with iteration.
    pub fn snapshot(&self, kind: MessageKind) -> Option<SmallVec<[Subscription; 4]>> {
        self.entries.get(&kind).map(|entry| entry.value().clone())
    }

    /// Whether the (kind, subscriber) pair is currently registered.
    pub fn contains(&self, kind: MessageKind, subscriber: SubscriberId) -> bool {
        self.entries
            .get(&kind)
            .is_some_and(|entry| entry.iter().any(|s| s.id == subscriber))
    }

    /// All kinds with at least one subscriber.
    pub fn kinds(&self) -> Vec<MessageKind> {
        self.entries.iter().map(|entry| *entry.key()).collect()
    }

    /// Total number of registered subscriptions across all kinds.
    pub fn subscription_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.len()).sum()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
