//! Adapters from [`Logger`](crate::Logger) to the `log` and `tracing` facades.

#[cfg(feature = "log")]
mod log;
#[cfg(feature = "tracing")]
mod tracing;

#[cfg(feature = "log")]
pub use self::log::{GlobalLog, LogBridge, to_log_level};
#[cfg(feature = "tracing")]
pub use self::tracing::TracingBridge;

/// Target used by both bridges unless overridden.
pub const DEFAULT_TARGET: &str = "typed_logging";
