//! Violations and notes reported while generating a logging API.
//!
//! Every problem found in an interface is collected before anything is
//! reported, so a single build surfaces all of them at once.

use std::fmt;

use proc_macro2::{Span, TokenStream};

use crate::error_fmt::{ErrorFormat, SourceLocation};

/// The kind of violation that blocks generation of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// The input source is not valid Rust.
    InvalidSource,
    /// Malformed message template (unterminated placeholder).
    SyntaxError,
    /// Malformed `#[logger_extensions]` / `#[logger_message]` arguments.
    InvalidAttribute,
    /// The trait is generic, nested, or otherwise not a plain logging interface.
    InvalidInterfaceShape,
    /// A method is generic, returns a value, or is otherwise not a log method.
    InvalidMethodShape,
    /// Two or more methods declare the same event id.
    DuplicateEventId,
    /// A template placeholder names a parameter the method does not declare.
    UnknownPlaceholder,
}

impl ViolationKind {
    /// Returns the stable name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidSource => "InvalidSource",
            Self::SyntaxError => "SyntaxError",
            Self::InvalidAttribute => "InvalidAttribute",
            Self::InvalidInterfaceShape => "InvalidInterfaceShape",
            Self::InvalidMethodShape => "InvalidMethodShape",
            Self::DuplicateEventId => "DuplicateEventId",
            Self::UnknownPlaceholder => "UnknownPlaceholder",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule violation, with enough context to pinpoint the fix.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct Violation {
    /// The kind of violation.
    pub kind: ViolationKind,
    /// Name of the logging trait, empty when the source did not parse.
    pub interface: String,
    /// Offending method, if the violation is method-scoped.
    pub method: Option<String>,
    /// Offending parameter or placeholder name.
    pub subject: Option<String>,
    /// Human-readable description.
    pub message: String,
    /// Suggested fix.
    pub help: Option<String>,
    /// Preformatted context (e.g. a caret under the template offset).
    pub detail: Option<String>,
    /// Where the violation points in the input.
    pub span: Span,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            interface: String::new(),
            method: None,
            subject: None,
            message: message.into(),
            help: None,
            detail: None,
            span,
        }
    }

    /// Converts a parse error, keeping its span.
    pub fn from_syn(kind: ViolationKind, err: &syn::Error) -> Self {
        Self::new(kind, err.span(), err.to_string())
    }

    /// Sets the interface name.
    pub fn interface(mut self, interface: impl fmt::Display) -> Self {
        self.interface = interface.to_string();
        self
    }

    /// Sets the offending method.
    pub fn method(mut self, method: impl fmt::Display) -> Self {
        self.method = Some(method.to_string());
        self
    }

    /// Sets the offending parameter or placeholder name.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets the help text.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Sets preformatted detail text.
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    fn compile_message(&self) -> String {
        let mut msg = format!("{}: {}", self.kind, self.message);
        if let Some(detail) = &self.detail {
            msg.push('\n');
            msg.push_str(detail.trim_end());
        }
        if let Some(help) = &self.help {
            msg.push_str("\nhelp: ");
            msg.push_str(help);
        }
        msg
    }

    /// Converts this violation into a spanned compiler error.
    pub fn to_syn_error(&self) -> syn::Error {
        syn::Error::new(self.span, self.compile_message())
    }

    /// Formats this violation against the source it was found in.
    pub fn render(&self, source: &str, filename: &str) -> String {
        let start = self.span.start();
        let location = SourceLocation {
            line: start.line.max(1),
            column: start.column + 1,
        };
        let message = format!("{}: {}", self.kind, self.message);
        let mut out = ErrorFormat::at(&message, source, location)
            .filename(filename)
            .format();
        if let Some(detail) = &self.detail {
            out.push_str(detail);
            if !detail.ends_with('\n') {
                out.push('\n');
            }
        }
        if let Some(help) = &self.help {
            out.push_str(&format!("help: {help}\n"));
        }
        out
    }
}

/// A non-fatal observation. Emission proceeds regardless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Note {
    /// A parameter no placeholder references. It is still emitted as a
    /// structured field but does not appear in the rendered text.
    UnreferencedParameter {
        interface: String,
        method: String,
        parameter: String,
    },
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnreferencedParameter {
                interface,
                method,
                parameter,
            } => write!(
                f,
                "`{interface}::{method}`: parameter `{parameter}` is not referenced by the message template and is logged as a structured field only"
            ),
        }
    }
}

/// An ordered collection of violations.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    violations: Vec<Violation>,
}

impl Diagnostics {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Returns true when no violation was recorded.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns the violations in the order they were found.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Iterates over the violations.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Iterates over violations of one kind.
    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    /// Combines every violation into one compiler error, or `None` if empty.
    pub fn to_syn_error(&self) -> Option<syn::Error> {
        self.violations
            .iter()
            .map(Violation::to_syn_error)
            .reduce(|mut acc, err| {
                acc.combine(err);
                acc
            })
    }

    /// Expands to one `compile_error!` per violation.
    pub fn to_compile_error(&self) -> TokenStream {
        self.to_syn_error()
            .map(|err| err.to_compile_error())
            .unwrap_or_default()
    }

    /// Renders every violation against the source it was found in.
    pub fn render(&self, source: &str, filename: &str) -> String {
        self.violations
            .iter()
            .map(|v| v.render(source, filename))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.violations.len();
        write!(
            f,
            "{count} violation{}",
            if count == 1 { "" } else { "s" }
        )?;
        for violation in &self.violations {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}

impl From<Violation> for Diagnostics {
    fn from(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }
}

impl Extend<Violation> for Diagnostics {
    fn extend<T: IntoIterator<Item = Violation>>(&mut self, iter: T) {
        self.violations.extend(iter);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}
