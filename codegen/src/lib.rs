//! Code generation for strongly-typed logging APIs.
//!
//! A logging interface is a trait whose methods each describe one event:
//!
//! ```ignore
//! #[logger_extensions]
//! pub trait ILoggerExtensions {
//!     #[logger_message(0, Critical, "Could not open socket to `{hostName}`")]
//!     fn could_not_open_socket(&self, hostName: &str);
//! }
//! ```
//!
//! Generation runs in four stages:
//!
//! - [`template`] parses each message template into literals and placeholders.
//! - [`descriptor`] turns the trait into a structured description.
//! - [`validate`] checks the description and collects every violation.
//! - [`emit`] produces the companion items for an accepted description.
//!
//! The attribute macros in `typed_logging_macros` call [`expand_interface`];
//! build scripts call [`generate`] or [`generate_file`] on a whole source file.
//!
//! # Debugging
//!
//! Set `TYPED_LOGGING_DEBUG=1` while compiling (debug builds) to print every
//! attribute macro expansion to stderr.

pub mod config;
pub mod descriptor;
pub mod diagnostics;
pub mod emit;
pub mod error_fmt;
pub mod naming;
mod source;
pub mod template;
pub mod validate;

use proc_macro2::{Ident, TokenStream};
use quote::ToTokens;
use syn::ItemTrait;

pub use config::CodegenConfig;
pub use descriptor::{InterfaceContext, build_interface};
pub use diagnostics::{Diagnostics, Note, Violation, ViolationKind};
pub use source::{GenerateError, Generated, GeneratedInterface, generate, generate_file, generate_with_config};
pub use template::{TemplateError, TemplateSegment, parse_template};
pub use validate::{Accepted, Rejected, validate};

/// The expansion of one accepted logging interface.
#[derive(Debug, Clone)]
pub struct Expansion {
    /// The trait with the generator's helper attributes removed.
    pub interface: ItemTrait,
    /// Name of the generated wrapper type.
    pub companion_name: Ident,
    /// The companion items.
    pub companion: TokenStream,
    /// Non-fatal observations.
    pub notes: Vec<Note>,
}

impl ToTokens for Expansion {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.interface.to_tokens(tokens);
        tokens.extend(self.companion.clone());
    }
}

/// Builds, validates and emits one logging interface.
///
/// Builder and validator violations are reported together; if there are
/// any, nothing is emitted for the interface.
pub fn expand_interface(
    item: &ItemTrait,
    cx: &InterfaceContext<'_>,
) -> Result<Expansion, Diagnostics> {
    let (descriptor, built) = build_interface(item, cx);
    let mut diagnostics = Diagnostics::new();
    diagnostics.extend(built);

    let accepted = match validate(&descriptor) {
        Ok(accepted) => Some(accepted),
        Err(rejected) => {
            diagnostics.extend(rejected.violations);
            None
        }
    };

    match accepted {
        Some(accepted) if diagnostics.is_empty() => {
            let mut interface = item.clone();
            descriptor::strip_helper_attributes(&mut interface);
            Ok(Expansion {
                interface,
                companion_name: descriptor.companion.clone(),
                companion: emit::emit(&accepted),
                notes: accepted.notes().to_vec(),
            })
        }
        _ => {
            tracing::debug!(
                interface = %descriptor.name,
                violations = diagnostics.len(),
                "rejected logging interface"
            );
            Err(diagnostics)
        }
    }
}
