/// Message dispatch
use super::core::NotifyBus;
use crate::message::{Envelope, Message};
use crate::types::MessageKind;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, error, trace};

impl NotifyBus {
    /// Delivers `message` to every subscriber currently registered for its
    /// kind, synchronously, in registration order, on the calling thread.
    ///
    /// Dispatch is fire-and-forget from the producer's perspective: there is
    /// no return value and per-subscriber failures never propagate back. A
    /// callback that returns an error or panics is logged and counted, and
    /// the remaining subscribers still receive the message.
    ///
    /// A kind with zero subscribers is a cheap no-op — most kinds have no
    /// listeners at any given moment.
    ///
    /// The subscriber list is snapshotted once at the start of the pass, so
    /// callbacks may freely call [`on`](NotifyBus::on), [`off`](NotifyBus::off),
    /// [`off_all`](NotifyBus::off_all), or [`clear`](NotifyBus::clear)
    /// re-entrantly. A subscriber removed earlier in the same pass is
    /// skipped; one added during the pass first hears the next send.
    pub fn send<M: Message>(&self, message: M) {
        let kind = MessageKind::of::<M>();
        let Some(subscriptions) = self.registry.snapshot(kind) else {
            trace!("No subscribers for '{}'", kind);
            return;
        };

        let envelope = Envelope::new(message);
        debug!("📤 Dispatching '{}' to {} subscribers", kind, subscriptions.len());

        let mut delivered: u64 = 0;
        let mut failed: u64 = 0;

        for subscription in subscriptions.iter() {
            // Honor re-entrant unregistration: once removed, a subscriber is
            // never invoked again in the same pass.
            if !self.registry.contains(kind, subscription.id) {
                continue;
            }

            match catch_unwind(AssertUnwindSafe(|| subscription.handler.handle(&envelope))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(e)) => {
                    failed += 1;
                    error!("❌ Handler {} failed: {}", subscription.handler.handler_name(), e);
                }
                Err(panic_info) => {
                    failed += 1;
                    let e = crate::NotifyError::HandlerPanicked(panic_message(panic_info));
                    error!("❌ Handler {} failed: {}", subscription.handler.handler_name(), e);
                }
            }
        }

        let mut stats = self.stats.write();
        stats.messages_sent += 1;
        stats.deliveries += delivered;
        stats.handler_failures += failed;
    }
}

/// Extracts a meaningful message from a panic payload.
fn panic_message(panic_info: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
