/// Notification bus module - broken down into manageable components
mod core;
mod dispatch;
mod registration;
mod stats;

#[cfg(test)]
mod tests;

pub use self::core::NotifyBus;
pub use self::stats::NotifyBusStats;
