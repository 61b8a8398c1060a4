//! Utility and factory functions

use crate::bus::NotifyBus;
use std::sync::Arc;

/// Returns the current Unix timestamp in seconds.
///
/// Built-in lifecycle messages ([`SessionStartedMsg`](crate::SessionStartedMsg),
/// [`SessionEndedMsg`](crate::SessionEndedMsg)) stamp themselves with this so
/// embeddings get consistent timestamps without each inventing their own.
///
/// # Panics
///
/// Panics if the system clock is set to a time before the Unix epoch.
pub fn current_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs()
}

/// Creates a new shared notification bus.
///
/// The primary factory for embeddings: the returned `Arc<NotifyBus>` is the
/// handle producers and subscribers are given instead of an ambient global,
/// so the embedding decides which systems share one bus and when its
/// lifetime ends.
pub fn create_notify_bus() -> Arc<NotifyBus> {
    Arc::new(NotifyBus::new())
}
