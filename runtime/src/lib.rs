//! Runtime support for strongly-typed logging APIs.
//!
//! Declare a logging interface with [`logger_extensions`]:
//!
//! ```ignore
//! use typed_logging::{logger_extensions, logger_message};
//!
//! #[logger_extensions]
//! pub trait ILoggerExtensions {
//!     #[logger_message(0, Critical, "Could not open socket to `{hostName}`")]
//!     fn could_not_open_socket(&self, hostName: &str);
//! }
//! ```
//!
//! and log through any [`Logger`]: directly with the generated
//! `LoggerExtensionsExt` trait, or through the `LoggerExtensions` wrapper,
//! which implements `ILoggerExtensions` itself.
//!
//! Each call checks [`Logger::is_enabled`] first. When the level is enabled
//! the logger receives a [`Record`] whose fields and message borrow the call's
//! arguments; nothing is formatted unless the logger asks for it.
//!
//! # Features
//!
//! - `log` - [`bridge::LogBridge`], forwarding to the `log` crate
//! - `tracing` - [`bridge::TracingBridge`], forwarding to `tracing`

pub mod bridge;
mod event;
mod fields;
mod level;
mod logger;
mod record;
pub mod testing;
mod value;

pub use event::EventId;
pub use fields::{Field, FieldsDisplay, FieldsIter, LogFields};
pub use level::{Level, ParseLevelError};
pub use logger::{Logger, NullLogger};
pub use record::Record;
pub use value::{DebugValue, DisplayValue, FieldValue, ToFieldValue, debug, display};

pub use typed_logging_macros::{logger_extensions, logger_message};
