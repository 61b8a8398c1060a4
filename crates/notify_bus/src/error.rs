//! Error types for the notification bus

use crate::types::SubscriberId;

/// Errors that can occur during registration and delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// A dynamic handler was registered under a kind it does not handle.
    /// The registration is rejected and the registry is left untouched.
    #[error("Invalid kind registration: handler expects '{handler}' but was registered for '{registered}'")]
    InvalidKind {
        registered: &'static str,
        handler: &'static str,
    },

    /// The same subscriber was registered twice for the same kind.
    #[error("Subscriber {subscriber} is already registered for '{kind}'")]
    DuplicateRegistration {
        kind: &'static str,
        subscriber: SubscriberId,
    },

    /// An envelope accessor was asked for a kind the envelope does not carry.
    #[error("Type mismatch: expected '{expected}', envelope carries '{actual}'")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// A subscriber callback returned an error during delivery.
    #[error("Handler execution failed: {0}")]
    HandlerFailed(String),

    /// A subscriber callback panicked during delivery.
    #[error("Handler panicked: {0}")]
    HandlerPanicked(String),
}
