use std::fmt;

use crate::event::EventId;
use crate::fields::LogFields;
use crate::level::Level;

/// One log event as handed to a [`Logger`](crate::Logger).
///
/// A record borrows everything from the call site. The message is rendered
/// only if a sink formats it.
#[derive(Clone, Copy)]
pub struct Record<'a> {
    level: Level,
    event_id: EventId,
    fields: &'a dyn LogFields,
    message: &'a dyn fmt::Display,
}

impl<'a> Record<'a> {
    pub fn new(
        level: Level,
        event_id: EventId,
        fields: &'a dyn LogFields,
        message: &'a dyn fmt::Display,
    ) -> Self {
        Self {
            level,
            event_id,
            fields,
            message,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    /// Structured fields, in parameter declaration order.
    pub fn fields(&self) -> &'a dyn LogFields {
        self.fields
    }

    /// The message, rendered lazily through `Display`.
    pub fn message(&self) -> &'a dyn fmt::Display {
        self.message
    }

    /// Renders the message into a new string.
    pub fn render(&self) -> String {
        self.message.to_string()
    }
}

impl fmt::Debug for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("level", &self.level)
            .field("event_id", &self.event_id)
            .field("fields", &self.fields.fields().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
