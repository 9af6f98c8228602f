//! Structured descriptors of a logging interface.
//!
//! Descriptors are built fresh from a trait declaration, possibly describing
//! an invalid interface: the builder records raw facts (generics, return
//! types, receivers) and leaves judging them to the validator, which can then
//! report every problem with full context.

mod attr;
mod build;

#[cfg(test)]
mod tests;

use std::fmt;

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use syn::{Attribute, Generics, LitStr, Path, Signature, Type, Visibility};

use crate::template::TemplateSegment;

pub use attr::{
    ExtensionsArgs, MessageArgs, is_extensions_attr, is_message_attr, strip_helper_attributes,
};
pub use build::{InterfaceContext, build_interface};
pub(crate) use attr::attr_args;

/// Severity of a log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace,
    Debug,
    Information,
    Warning,
    Error,
    Critical,
}

impl Level {
    /// All levels, from least to most severe.
    pub const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Information,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    /// Returns the variant name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "Trace",
            Self::Debug => "Debug",
            Self::Information => "Information",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Critical => "Critical",
        }
    }

    /// Looks a level up by its variant name (case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Level::ALL.into_iter().find(|level| level.as_str() == name)
    }

    /// Generates the path to the matching runtime level.
    pub fn to_tokens_in(&self, runtime: &Path) -> TokenStream {
        let variant = Ident::new(self.as_str(), Span::call_site());
        quote!(#runtime::Level::#variant)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


/// One declared parameter of a log method.
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    /// Parameter name as declared.
    pub name: Ident,
    /// Declared type.
    pub ty: Type,
    /// Zero-based ordinal among the non-receiver parameters. Structured
    /// fields are emitted in this order.
    pub position: usize,
}

impl ParameterDescriptor {
    /// The name used for the structured field and for placeholder matching.
    pub fn field_name(&self) -> String {
        use syn::ext::IdentExt;
        self.name.unraw().to_string()
    }
}

/// One log method of an interface.
#[derive(Debug, Clone)]
pub struct LogMethodDescriptor {
    /// Method name.
    pub name: Ident,
    /// Declared numeric event id.
    pub event_id: i32,
    /// Span of the event id argument.
    pub event_id_span: Span,
    /// Severity the method logs at.
    pub level: Level,
    /// Raw message template.
    pub message: LitStr,
    /// Parsed message template.
    pub segments: Vec<TemplateSegment>,
    /// For every placeholder segment, in template order, the index into
    /// `parameters` it binds to. `None` marks an unknown placeholder.
    pub bindings: Vec<Option<usize>>,
    /// Declared parameters, excluding the receiver, in declaration order.
    pub parameters: Vec<ParameterDescriptor>,
    /// Full signature as declared.
    pub signature: Signature,
    /// Doc comments, transposed onto the generated extension method.
    pub docs: Vec<Attribute>,
    /// Span of a default body, if the declaration has one.
    pub default_body: Option<Span>,
}

impl LogMethodDescriptor {
    /// Iterates placeholder names paired with their bound parameter.
    pub fn placeholder_bindings(
        &self,
    ) -> impl Iterator<Item = (&str, Option<&ParameterDescriptor>)> {
        crate::template::placeholders(&self.segments)
            .zip(self.bindings.iter())
            .map(|(name, binding)| (name, binding.map(|index| &self.parameters[index])))
    }

    /// Returns true when at least one placeholder binds to `parameters[index]`.
    pub fn references(&self, index: usize) -> bool {
        self.bindings.contains(&Some(index))
    }
}

/// A logging interface: one trait and its log methods.
#[derive(Debug, Clone)]
pub struct LoggingInterfaceDescriptor {
    /// Trait name.
    pub name: Ident,
    /// Name of the generated wrapper type.
    pub companion: Ident,
    /// Trait visibility, inherited by generated items.
    pub vis: Visibility,
    /// Path of the runtime crate used by generated code.
    pub runtime_crate: Path,
    /// Trait generics, including any where clause.
    pub generics: Generics,
    /// Supertrait bounds.
    pub supertraits: Vec<Span>,
    /// `unsafe` or `auto` qualifiers.
    pub qualifiers: Vec<Span>,
    /// True when the trait is declared inside another item.
    pub nested: bool,
    /// Number of `#[logger_extensions]` annotations on the trait.
    pub trigger_count: usize,
    /// Trait items that are not methods.
    pub foreign_items: Vec<Span>,
    /// Log methods, in declaration order.
    pub methods: Vec<LogMethodDescriptor>,
}

impl LoggingInterfaceDescriptor {
    /// Finds a method by name.
    #[cfg(test)]
    pub(crate) fn method(&self, name: &str) -> Option<&LogMethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }
}
