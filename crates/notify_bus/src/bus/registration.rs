/// Subscriber registration and teardown methods
use super::core::NotifyBus;
use crate::error::NotifyError;
use crate::message::{Message, MessageHandler, TypedMessageHandler};
use crate::types::{MessageKind, SubscriberId};
use std::sync::Arc;
use tracing::{debug, info};

impl NotifyBus {
    /// Registers `subscriber` for messages of kind `M`.
    ///
    /// The callback receives the already type-checked payload; it never sees
    /// an envelope of the wrong kind. Subscribers for one kind are invoked
    /// in registration order on every send.
    ///
    /// Registering the same subscriber twice for the same kind is rejected
    /// with [`NotifyError::DuplicateRegistration`] — double delivery to one
    /// subscriber is always a caller bug here, never a feature.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use notify_bus::{declare_messages, NotifyBus, SubscriberId};
    ///
    /// #[derive(Debug, Clone)]
    /// struct LoginErrorMsg {
    ///     code: u32,
    /// }
    ///
    /// declare_messages!(LoginErrorMsg);
    ///
    /// let bus = NotifyBus::new();
    /// let view = SubscriberId::new();
    ///
    /// bus.on::<LoginErrorMsg, _>(view, |msg| {
    ///     println!("login failed with code {}", msg.code);
    ///     Ok(())
    /// })?;
    ///
    /// bus.send(LoginErrorMsg { code: 401 });
    /// # Ok::<(), notify_bus::NotifyError>(())
    /// ```
    pub fn on<M, F>(&self, subscriber: SubscriberId, handler: F) -> Result<(), NotifyError>
    where
        M: Message,
        F: Fn(&M) -> Result<(), NotifyError> + Send + Sync + 'static,
    {
        let kind = MessageKind::of::<M>();
        let handler_name = format!("{}::{}", subscriber, kind.name());
        let handler: Arc<dyn MessageHandler> =
            Arc::new(TypedMessageHandler::new(handler_name, handler));
        self.on_handler(kind, subscriber, handler)
    }

    /// Registers a hand-built [`MessageHandler`] under an explicit kind.
    ///
    /// This is the dynamic escape hatch for handlers that inspect the
    /// envelope themselves. Unlike [`on`](NotifyBus::on), the kind cannot be
    /// checked at compile time, so a handler whose
    /// [`expected_kind`](MessageHandler::expected_kind) disagrees with
    /// `kind` is rejected with [`NotifyError::InvalidKind`].
    pub fn on_handler(
        &self,
        kind: MessageKind,
        subscriber: SubscriberId,
        handler: Arc<dyn MessageHandler>,
    ) -> Result<(), NotifyError> {
        self.registry.insert(kind, subscriber, handler)?;
        self.stats.write().total_subscribers += 1;
        debug!("📝 Registered {} for '{}'", subscriber, kind);
        Ok(())
    }

    /// Unregisters `subscriber` from kind `M`.
    ///
    /// Returns `true` if a registration was removed. Calling this when the
    /// subscriber is not registered is a no-op, so owners can call it
    /// unconditionally during teardown. Takes effect for all future sends;
    /// a dispatch already in progress finishes against its snapshot, but a
    /// subscriber removed mid-pass is skipped rather than invoked.
    pub fn off<M: Message>(&self, subscriber: SubscriberId) -> bool {
        let kind = MessageKind::of::<M>();
        let removed = self.registry.remove(kind, subscriber);
        if removed {
            let mut stats = self.stats.write();
            stats.total_subscribers = stats.total_subscribers.saturating_sub(1);
            debug!("🗑️ Unregistered {} from '{}'", subscriber, kind);
        }
        removed
    }

    /// Unregisters `subscriber` from every kind it was registered against.
    ///
    /// The teardown sweep for owners with multiple outstanding
    /// registrations. Other subscribers of the same kinds are unaffected.
    /// Returns the number of registrations removed.
    pub fn off_all(&self, subscriber: SubscriberId) -> usize {
        let removed = self.registry.remove_subscriber(subscriber);
        if removed > 0 {
            let mut stats = self.stats.write();
            stats.total_subscribers = stats.total_subscribers.saturating_sub(removed);
            debug!("🗑️ Unregistered {} from {} kinds", subscriber, removed);
        }
        removed
    }

    /// Empties the entire registry.
    ///
    /// The session-boundary reset: after `clear` returns, no previously
    /// registered subscriber receives any further deliveries, and a fresh
    /// session starts with no stale subscribers.
    pub fn clear(&self) {
        let dropped = self.registry.subscription_count();
        self.registry.clear();
        self.stats.write().total_subscribers = 0;
        info!("🧹 Cleared notification registry ({} subscriptions dropped)", dropped);
    }

    /// All kinds that currently have at least one subscriber.
    pub fn registered_kinds(&self) -> Vec<MessageKind> {
        self.registry.kinds()
    }

    /// Total number of live subscriptions across all kinds.
    pub fn subscriber_count(&self) -> usize {
        self.registry.subscription_count()
    }
}
