/// Core NotifyBus implementation
use super::stats::NotifyBusStats;
use crate::registry::Registry;
use parking_lot::RwLock;

/// The process-wide mediator between message producers and subscribers.
///
/// Producers call [`send`](NotifyBus::send); subscribers register interest
/// per kind through [`on`](NotifyBus::on) and tear it down again through
/// [`off`](NotifyBus::off) / [`off_all`](NotifyBus::off_all). Neither side
/// ever holds a reference to the other, giving N:M decoupling.
///
/// The bus is explicitly constructed and passed by handle (typically
/// `Arc<NotifyBus>`) rather than living behind an ambient global, so an
/// embedding controls exactly which systems share one bus and when its
/// lifetime ends. Delivery is synchronous: `send` runs every subscriber
/// callback inline on the calling thread before returning.
pub struct NotifyBus {
    /// Kind → ordered subscriber list mapping.
    pub(super) registry: Registry,
    /// Delivery counters for monitoring.
    pub(super) stats: RwLock<NotifyBusStats>,
}

impl std::fmt::Debug for NotifyBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyBus")
            .field("subscriptions", &self.registry.subscription_count())
            .field("kinds", &self.registry.kinds().len())
            .finish()
    }
}

impl NotifyBus {
    /// Creates a new bus with no registered subscribers.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            stats: RwLock::new(NotifyBusStats::default()),
        }
    }

    /// Gets the current delivery statistics.
    #[inline]
    pub fn stats(&self) -> NotifyBusStats {
        self.stats.read().clone()
    }
}

impl Default for NotifyBus {
    fn default() -> Self {
        Self::new()
    }
}
