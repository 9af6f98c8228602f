use crate::fields::FieldsDisplay;
use crate::level::Level;
use crate::logger::Logger;
use crate::record::Record;

use super::DEFAULT_TARGET;

/// Sends events to the current `tracing` subscriber.
///
/// Each event carries `event_id`, `event_name`, `severity` and the rendered
/// `fields`, with the message as the event message. The target is
/// [`DEFAULT_TARGET`]. `Critical` maps to `tracing::Level::ERROR` and keeps its
/// name in `severity`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingBridge;

impl Logger for TracingBridge {
    fn is_enabled(&self, level: Level) -> bool {
        match level {
            Level::Trace => ::tracing::enabled!(target: DEFAULT_TARGET, ::tracing::Level::TRACE),
            Level::Debug => ::tracing::enabled!(target: DEFAULT_TARGET, ::tracing::Level::DEBUG),
            Level::Information => {
                ::tracing::enabled!(target: DEFAULT_TARGET, ::tracing::Level::INFO)
            }
            Level::Warning => ::tracing::enabled!(target: DEFAULT_TARGET, ::tracing::Level::WARN),
            Level::Error | Level::Critical => {
                ::tracing::enabled!(target: DEFAULT_TARGET, ::tracing::Level::ERROR)
            }
        }
    }

    fn log(&self, record: &Record<'_>) {
        let event = record.event_id();
        let event_id = event.id();
        let event_name = event.name();
        let severity = record.level().as_str();
        let fields = FieldsDisplay(record.fields());
        let message = record.message();

        macro_rules! emit {
            ($level:expr) => {
                ::tracing::event!(
                    target: DEFAULT_TARGET,
                    $level,
                    event_id,
                    event_name,
                    severity,
                    fields = %fields,
                    "{}",
                    message
                )
            };
        }

        match record.level() {
            Level::Trace => emit!(::tracing::Level::TRACE),
            Level::Debug => emit!(::tracing::Level::DEBUG),
            Level::Information => emit!(::tracing::Level::INFO),
            Level::Warning => emit!(::tracing::Level::WARN),
            Level::Error | Level::Critical => emit!(::tracing::Level::ERROR),
        }
    }
}
