//! Logging interfaces exercised by the end-to-end tests.

use std::fmt;
use std::net::SocketAddr;
use std::path::Path;

use typed_logging::{FieldValue, ToFieldValue, logger_extensions};

#[logger_extensions]
#[allow(non_snake_case)]
pub trait ILoggerExtensions {
    /// Reports that a socket could not be opened.
    #[logger_message(0, Critical, "Could not open socket to `{hostName}`")]
    fn could_not_open_socket(&self, hostName: &str);
}

#[logger_extensions]
pub trait IServiceEvents {
    #[logger_message(1, Information, "Service {name} started on {address}")]
    fn started(&self, name: &str, address: SocketAddr);

    #[logger_message(2, Warning, "Retrying {operation} (attempt {attempt} of {max_attempts})")]
    fn retrying(&self, operation: &str, attempt: u32, max_attempts: u32);

    #[logger_message(3, Debug, "{{cache}} hit ratio {ratio} for {name}, {name} again")]
    fn cache_ratio(&self, name: &str, ratio: f64);

    #[logger_message(4, Trace, "Heartbeat")]
    fn heartbeat(&self);

    /// Status and path are logged as structured fields only.
    #[logger_message(5, Error, "Request failed")]
    fn request_failed(&self, status: u16, path: &str);

    #[logger_message(id = -1, level = Critical, message = "Shutting down: {reason}")]
    fn shutting_down(&self, reason: Option<&str>);

    #[logger_message(6, Information, "Handled {request} in {elapsed_ms}ms")]
    fn handled(&self, request: RequestId, elapsed_ms: u64);
}

#[logger_extensions(name = "StorageLog")]
pub(crate) trait IStorage {
    #[logger_message(10, Information, "Wrote {bytes} bytes to {path}")]
    fn wrote<'a>(&self, bytes: usize, path: &'a Path);

    #[logger_message(11, Debug, "Value of {type}")]
    fn typed(&self, r#type: &str);
}

/// Re-export of the runtime under another path.
pub mod rt {
    pub use typed_logging::*;
}

#[logger_extensions(crate = crate::interfaces::rt)]
pub trait IReexported {
    #[logger_message(30, Warning, "Through a re-export: {value}")]
    fn through_reexport(&self, value: i64);
}

/// The runtime under a `use` alias of the trait's own module.
pub mod aliased {
    pub use typed_logging as tl;

    #[tl::logger_extensions(crate = tl)]
    pub trait IAliased {
        #[logger_message(40, Warning, "Aliased {value}")]
        fn through_alias(&self, value: i64);
    }
}

/// The runtime through a `super::` path.
pub mod relative {
    #[typed_logging::logger_extensions(crate = super::rt)]
    pub trait IRelative {
        #[logger_message(41, Information, "Relative {value}")]
        fn through_super(&self, value: i64);
    }
}

/// A caller-defined field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{:04}", self.0)
    }
}

impl ToFieldValue for RequestId {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Display(self)
    }
}
