//! A logger that records events in memory, for tests.

use std::sync::{Mutex, PoisonError};

use crate::event::EventId;
use crate::level::Level;
use crate::logger::Logger;
use crate::record::Record;

/// One event captured by [`CapturingLogger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    pub level: Level,
    pub event_id: EventId,
    /// Field names with their rendered values, in declaration order.
    pub fields: Vec<(&'static str, String)>,
    /// The rendered message, unless the logger was built with
    /// [`CapturingLogger::structured_only`].
    pub message: Option<String>,
}

impl CapturedRecord {
    /// Returns the rendered value of a field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Records every enabled event. Safe to share between threads.
#[derive(Debug)]
pub struct CapturingLogger {
    min_level: Option<Level>,
    render: bool,
    records: Mutex<Vec<CapturedRecord>>,
}

impl Default for CapturingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl CapturingLogger {
    /// Captures events at every level.
    pub fn new() -> Self {
        Self {
            min_level: Some(Level::Trace),
            render: true,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Captures events at `level` and above.
    pub fn with_min_level(level: Level) -> Self {
        Self {
            min_level: Some(level),
            ..Self::new()
        }
    }

    /// Reports every level as disabled.
    pub fn disabled() -> Self {
        Self {
            min_level: None,
            ..Self::new()
        }
    }

    /// Captures fields but never renders the message.
    pub fn structured_only() -> Self {
        Self {
            render: false,
            ..Self::new()
        }
    }

    /// Returns a copy of the captured events.
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.lock().clone()
    }

    /// Removes and returns the captured events.
    pub fn take(&self) -> Vec<CapturedRecord> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<CapturedRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Logger for CapturingLogger {
    fn is_enabled(&self, level: Level) -> bool {
        self.min_level.is_some_and(|min| level >= min)
    }

    fn log(&self, record: &Record<'_>) {
        let captured = CapturedRecord {
            level: record.level(),
            event_id: record.event_id(),
            fields: record
                .fields()
                .fields()
                .map(|field| (field.name(), field.value().to_string()))
                .collect(),
            message: self.render.then(|| record.render()),
        };
        self.lock().push(captured);
    }
}
