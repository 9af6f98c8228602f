use std::fmt;

/// Identifies one kind of log event: a numeric id plus the name of the
/// method that logs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId {
    id: i32,
    name: &'static str,
}

impl EventId {
    pub const fn new(id: i32, name: &'static str) -> Self {
        Self { id, name }
    }

    pub const fn id(&self) -> i32 {
        self.id
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// Formats as `name(id)`, e.g. `could_not_open_socket(0)`.
impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.id)
    }
}
