/// Statistics tracking for the notification bus
use serde::{Deserialize, Serialize};

/// Core notification bus statistics for monitoring delivery health.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct NotifyBusStats {
    /// Number of currently registered subscriptions
    pub total_subscribers: usize,
    /// Total number of messages sent since bus creation
    pub messages_sent: u64,
    /// Total number of successful handler invocations
    pub deliveries: u64,
    /// Total number of handler invocations that failed or panicked
    pub handler_failures: u64,
}
