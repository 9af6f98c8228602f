//! Error type for malformed message templates.

use crate::error_fmt::ErrorFormat;

/// A malformed message template.
///
/// The only syntactic failure is a placeholder that is opened but never
/// closed; everything else is either literal text or a placeholder name the
/// validator checks against the method signature.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unterminated placeholder: `{{` at offset {opened_at} is never closed")]
pub struct TemplateError {
    /// Byte position where the parser gave up (the end of the template).
    pub position: usize,
    /// Byte position of the `{` that opened the placeholder.
    pub opened_at: usize,
}

impl TemplateError {
    /// Creates an "unterminated placeholder" error.
    pub fn unterminated_placeholder(position: usize, opened_at: usize) -> Self {
        Self {
            position,
            opened_at,
        }
    }

    /// Returns a suggested fix.
    pub fn suggestion(&self) -> &'static str {
        "add a closing `}` to the placeholder, or write `{{` for a literal brace"
    }

    fn error_format<'a>(&self, template: &'a str) -> ErrorFormat<'a> {
        ErrorFormat::new("unterminated placeholder", template, self.opened_at)
            .filename("message template")
            .annotation("placeholder opened here".to_string())
    }

    /// Formats the error against the template text, pointing at the opening brace.
    pub fn format(&self, template: &str) -> String {
        self.error_format(template).help(self.suggestion()).format()
    }

    /// Formats only the template line with a caret under the opening brace.
    pub fn snippet(&self, template: &str) -> String {
        self.error_format(template).snippet()
    }
}
