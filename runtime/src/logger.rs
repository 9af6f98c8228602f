use std::rc::Rc;
use std::sync::Arc;

use crate::level::Level;
use crate::record::Record;

/// A log sink.
///
/// Generated log methods call [`is_enabled`](Logger::is_enabled) first and
/// skip everything else, including capturing arguments, when it returns
/// false. Implementations must be safe to call from many threads at once if
/// they are shared between threads.
pub trait Logger {
    /// Returns true if events at `level` should be logged.
    fn is_enabled(&self, level: Level) -> bool;

    /// Logs one event.
    fn log(&self, record: &Record<'_>);
}

macro_rules! forward_logger {
    ($($ty:ty),*) => {
        $(
            impl<L: Logger + ?Sized> Logger for $ty {
                fn is_enabled(&self, level: Level) -> bool {
                    (**self).is_enabled(level)
                }

                fn log(&self, record: &Record<'_>) {
                    (**self).log(record)
                }
            }
        )*
    };
}

forward_logger!(&L, &mut L, Box<L>, Arc<L>, Rc<L>);

/// A logger that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn is_enabled(&self, _level: Level) -> bool {
        false
    }

    fn log(&self, _record: &Record<'_>) {}
}
