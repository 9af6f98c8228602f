use crate::fields::LogFields;
use crate::level::Level;
use crate::logger::Logger;
use crate::record::Record;
use crate::value::FieldValue;

use super::DEFAULT_TARGET;

/// Forwards to the logger installed with `log::set_logger`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalLog;

impl ::log::Log for GlobalLog {
    fn enabled(&self, metadata: &::log::Metadata<'_>) -> bool {
        metadata.level() <= ::log::max_level() && ::log::logger().enabled(metadata)
    }

    fn log(&self, record: &::log::Record<'_>) {
        ::log::logger().log(record);
    }

    fn flush(&self) {
        ::log::logger().flush();
    }
}

/// Sends events to a `log::Log` implementation.
///
/// Messages are formatted as `[name(id)] message`, and every structured field
/// is attached as a key-value pair. `Critical` maps to `log::Level::Error` and
/// `Information` to `log::Level::Info`.
#[derive(Debug, Clone)]
pub struct LogBridge<L = GlobalLog> {
    inner: L,
    target: &'static str,
}

impl LogBridge<GlobalLog> {
    /// Bridges to the global `log` logger.
    pub fn global() -> Self {
        Self::new(GlobalLog)
    }
}

impl<L: ::log::Log> LogBridge<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            target: DEFAULT_TARGET,
        }
    }

    /// Overrides the `log` target.
    pub fn with_target(mut self, target: &'static str) -> Self {
        self.target = target;
        self
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

/// Maps a level onto the `log` crate's levels.
pub fn to_log_level(level: Level) -> ::log::Level {
    match level {
        Level::Trace => ::log::Level::Trace,
        Level::Debug => ::log::Level::Debug,
        Level::Information => ::log::Level::Info,
        Level::Warning => ::log::Level::Warn,
        Level::Error | Level::Critical => ::log::Level::Error,
    }
}

impl<L: ::log::Log> Logger for LogBridge<L> {
    fn is_enabled(&self, level: Level) -> bool {
        let metadata = ::log::Metadata::builder()
            .level(to_log_level(level))
            .target(self.target)
            .build();
        self.inner.enabled(&metadata)
    }

    fn log(&self, record: &Record<'_>) {
        let fields = KeyValues(record.fields());
        self.inner.log(
            &::log::Record::builder()
                .level(to_log_level(record.level()))
                .target(self.target)
                .module_path_static(Some(module_path!()))
                .args(format_args!("[{}] {}", record.event_id(), record.message()))
                .key_values(&fields)
                .build(),
        );
    }
}

/// Exposes a record's fields as `log` key-value pairs, in declaration order.
struct KeyValues<'a>(&'a dyn LogFields);

impl ::log::kv::Source for KeyValues<'_> {
    fn visit<'kvs>(
        &'kvs self,
        visitor: &mut dyn ::log::kv::VisitSource<'kvs>,
    ) -> Result<(), ::log::kv::Error> {
        for field in self.0.fields() {
            visitor.visit_pair(::log::kv::Key::from_str(field.name()), to_kv_value(field.value()))?;
        }
        Ok(())
    }

    fn count(&self) -> usize {
        self.0.len()
    }
}

fn to_kv_value(value: FieldValue<'_>) -> ::log::kv::Value<'_> {
    use ::log::kv::Value;

    match value {
        FieldValue::Str(v) => Value::from(v),
        FieldValue::I64(v) => Value::from(v),
        FieldValue::U64(v) => Value::from(v),
        FieldValue::I128(v) => Value::from(v),
        FieldValue::U128(v) => Value::from(v),
        FieldValue::F64(v) => Value::from(v),
        FieldValue::Bool(v) => Value::from(v),
        FieldValue::Char(v) => Value::from(v),
        FieldValue::Display(v) => Value::from_dyn_display(v),
        FieldValue::Debug(v) => Value::from_dyn_debug(v),
        // A lossy rendering would need an owned string; the message has it.
        FieldValue::Path(_) | FieldValue::None => Value::null(),
    }
}
