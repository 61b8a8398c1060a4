//! Macros for declaring message kinds

/// Implements [`Message`](crate::Message) for one or more plain types, using
/// the type name as the kind name.
///
/// # Usage
///
/// ```rust
/// use notify_bus::declare_messages;
///
/// #[derive(Debug, Clone)]
/// struct LoginErrorMsg {
///     code: u32,
/// }
///
/// #[derive(Debug, Clone)]
/// struct ShowLoginMsg;
///
/// declare_messages!(LoginErrorMsg, ShowLoginMsg);
/// ```
#[macro_export]
macro_rules! declare_messages {
    ($($msg_type:ty),* $(,)?) => {
        $(
            impl $crate::Message for $msg_type {
                fn kind_name() -> &'static str {
                    stringify!($msg_type)
                }

                fn as_any(&self) -> &dyn std::any::Any {
                    self
                }
            }
        )*
    };
}
