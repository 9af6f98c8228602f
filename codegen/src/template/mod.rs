//! Message template parsing.
//!
//! A message template is literal text interleaved with named placeholders:
//!
//! - `{name}` - Placeholder bound to the log method parameter called `name`
//! - `{{` / `}}` - Escapes for literal braces
//!
//! A lone `}` passes through unchanged. The parser is purely syntactic: it
//! never looks at the method signature, so a placeholder naming an undeclared
//! parameter parses fine and is reported later by the validator.

mod errors;


pub use errors::TemplateError;

/// One piece of a parsed message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSegment {
    /// Text written verbatim, with brace escapes already resolved.
    Literal(String),
    /// A substitution point.
    Placeholder {
        /// Parameter name between the braces, exactly as written.
        name: String,
        /// Byte offset of the opening `{` in the template.
        position: usize,
    },
}

impl TemplateSegment {
    /// Returns the placeholder name, or `None` for literal text.
    pub fn placeholder_name(&self) -> Option<&str> {
        match self {
            Self::Placeholder { name, .. } => Some(name),
            Self::Literal(_) => None,
        }
    }
}

/// Parses a message template into an ordered sequence of segments.
///
/// An empty template yields a single empty literal. Adjacent literal text is
/// merged, so a template without placeholders yields exactly one literal.
pub fn parse_template(template: &str) -> Result<Vec<TemplateSegment>, TemplateError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        match c {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    literal.push('{');
                    continue;
                }

                let mut name = String::new();
                let mut closed = false;
                for (_, ec) in chars.by_ref() {
                    if ec == '}' {
                        closed = true;
                        break;
                    }
                    name.push(ec);
                }

                if !closed {
                    return Err(TemplateError::unterminated_placeholder(
                        template.len(),
                        position,
                    ));
                }

                if !literal.is_empty() {
                    segments.push(TemplateSegment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(TemplateSegment::Placeholder { name, position });
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                }
                literal.push('}');
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() || segments.is_empty() {
        segments.push(TemplateSegment::Literal(literal));
    }

    Ok(segments)
}

/// Iterates over the placeholder names of a parsed template, in template order.
pub fn placeholders(segments: &[TemplateSegment]) -> impl Iterator<Item = &str> {
    segments.iter().filter_map(TemplateSegment::placeholder_name)
}

/// Renders parsed segments, substituting each placeholder with `value(name)`.
///
/// Placeholders for which `value` returns `None` are rendered back in their
/// `{name}` form.
#[cfg(test)]
pub(crate) fn render<'a>(
    segments: &[TemplateSegment],
    mut value: impl FnMut(&str) -> Option<&'a str>,
) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            TemplateSegment::Literal(text) => out.push_str(text),
            TemplateSegment::Placeholder { name, .. } => match value(name) {
                Some(v) => out.push_str(v),
                None => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            },
        }
    }
    out
}
