//! rustc-style error formatting with source context.
//!
//! Used for template syntax errors (positions are byte offsets into the
//! template) and for rendering diagnostics against a whole source file
//! (positions come from span line/column pairs).

/// A line/column position, both 1-based. Columns count characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    /// Computes the location of a byte offset within `source`.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|pos| pos + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        Self { line, column }
    }
}

/// Configuration for formatting an error with source context.
pub struct ErrorFormat<'a> {
    /// The error message (e.g., "unterminated placeholder")
    message: &'a str,
    /// Source text the location refers to
    source: &'a str,
    location: SourceLocation,
    /// Filename to display
    filename: &'a str,
    /// Annotation printed after the caret
    annotation: Option<String>,
    /// Help text
    help: Option<&'a str>,
}

impl<'a> ErrorFormat<'a> {
    /// Creates a new error format pointing at a byte offset.
    pub fn new(message: &'a str, source: &'a str, position: usize) -> Self {
        Self::at(message, source, SourceLocation::from_offset(source, position))
    }

    /// Creates a new error format pointing at a line/column location.
    pub fn at(message: &'a str, source: &'a str, location: SourceLocation) -> Self {
        Self {
            message,
            source,
            location,
            filename: "input",
            annotation: None,
            help: None,
        }
    }

    /// Sets the filename.
    pub fn filename(mut self, filename: &'a str) -> Self {
        self.filename = filename;
        self
    }

    /// Sets the annotation.
    pub fn annotation(mut self, ann: String) -> Self {
        self.annotation = Some(ann);
        self
    }

    /// Sets the help text.
    pub fn help(mut self, help: &'a str) -> Self {
        self.help = Some(help);
        self
    }

    /// Formats the error with source context.
    ///
    /// Output format:
    /// ```text
    /// error: message
    ///  --> file:line:column
    ///   |
    /// N | source line content
    ///   |     ^ annotation
    /// help: suggestion
    /// ```
    pub fn format(&self) -> String {
        let SourceLocation { line, column } = self.location;
        let mut msg = format!("error: {}\n", self.message);
        msg.push_str(&format!(" --> {}:{}:{}\n", self.filename, line, column));
        msg.push_str(&self.snippet());

        if let Some(help) = self.help {
            msg.push_str(&format!("help: {help}\n"));
        }

        msg
    }

    /// Formats only the offending source line with a caret under the location.
    pub fn snippet(&self) -> String {
        let SourceLocation { line, column } = self.location;
        let Some(line_content) = self.source.lines().nth(line.saturating_sub(1)) else {
            return String::new();
        };

        let expanded = line_content.replace('\t', "    ");
        let caret_col: usize = line_content
            .chars()
            .take(column.saturating_sub(1))
            .map(|c| if c == '\t' { 4 } else { 1 })
            .sum();

        // Truncate long lines to show context around the error
        const MAX_LINE_LEN: usize = 80;
        const CONTEXT_CHARS: usize = 30;

        let chars: Vec<char> = expanded.chars().collect();
        let (display, caret) = if chars.len() > MAX_LINE_LEN {
            let start = caret_col.saturating_sub(CONTEXT_CHARS).min(chars.len());
            let end = (caret_col + CONTEXT_CHARS).min(chars.len());
            let prefix = if start > 0 { "..." } else { "" };
            let suffix = if end < chars.len() { "..." } else { "" };
            let snippet: String = chars[start..end].iter().collect();
            (
                format!("{prefix}{snippet}{suffix}"),
                caret_col - start + prefix.len(),
            )
        } else {
            (expanded, caret_col)
        };

        let width = line.to_string().len();
        let annotation = self.annotation.as_deref().unwrap_or("");
        let mut out = format!("{:>width$} |\n", "");
        out.push_str(&format!("{line:>width$} | {display}\n"));
        out.push_str(format!("{:>width$} | {:>caret$}^ {annotation}", "", "").trim_end());
        out.push('\n');
        out
    }
}
