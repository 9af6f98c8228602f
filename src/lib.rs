//! Attribute macros that turn a logging trait into a strongly-typed logging API.
//!
//! ```ignore
//! use typed_logging::{logger_extensions, logger_message};
//!
//! #[logger_extensions]
//! pub trait ILoggerExtensions {
//!     #[logger_message(0, Critical, "Could not open socket to `{hostName}`")]
//!     fn could_not_open_socket(&self, hostName: &str);
//! }
//!
//! // Direct form, on any `Logger`:
//! logger.could_not_open_socket("example.org");
//!
//! // Wrapper form, implementing the trait itself:
//! let log = LoggerExtensions::new(logger);
//! log.could_not_open_socket("example.org");
//! ```
//!
//! Every problem in the trait is reported at once as spanned compile errors,
//! and nothing is generated for a trait with violations.
//!
//! # Debugging
//!
//! In debug builds, set `TYPED_LOGGING_DEBUG` to print each expansion to stderr.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{ToTokens, quote};
use syn::ItemTrait;
use typed_logging_codegen::descriptor::{is_extensions_attr, strip_helper_attributes};
use typed_logging_codegen::{CodegenConfig, InterfaceContext, expand_interface};


/// Generates the logging API of a trait.
///
/// Arguments (all optional):
///
/// - `"Name"` or `name = "Name"` - name of the generated wrapper type
/// - `crate = path` - path of the runtime crate, for re-exports
///
/// Each method must carry `#[logger_message(event_id, Level, "message")]`.
#[proc_macro_attribute]
pub fn logger_extensions(args: TokenStream, input: TokenStream) -> TokenStream {
    logger_extensions_impl(args.into(), input.into()).into()
}

/// Describes one log method. Only valid inside a `#[logger_extensions]` trait,
/// which consumes it.
#[proc_macro_attribute]
pub fn logger_message(_args: TokenStream, input: TokenStream) -> TokenStream {
    let input = TokenStream2::from(input);
    let error = syn::Error::new_spanned(
        &input,
        "`#[logger_message]` is only valid on methods of a `#[logger_extensions]` trait",
    )
    .to_compile_error();
    quote!(#error #input).into()
}

fn logger_extensions_impl(args: TokenStream2, input: TokenStream2) -> TokenStream2 {
    let item: ItemTrait = match syn::parse2(input) {
        Ok(item) => item,
        Err(err) => {
            return syn::Error::new(
                err.span(),
                format!("`#[logger_extensions]` applies to trait declarations: {err}"),
            )
            .to_compile_error();
        }
    };

    let config = CodegenConfig::default();
    let cx = InterfaceContext {
        args,
        nested: false,
        trigger_count: 1 + item.attrs.iter().filter(|a| is_extensions_attr(a)).count(),
        config: &config,
    };

    let output = match expand_interface(&item, &cx) {
        Ok(expansion) => expansion.into_token_stream(),
        Err(diagnostics) => {
            let mut stripped = item.clone();
            strip_helper_attributes(&mut stripped);
            let errors = diagnostics.to_compile_error();
            quote!(#stripped #errors)
        }
    };

    #[cfg(debug_assertions)]
    if CodegenConfig::debug_dump_requested() {
        eprintln!(
            "[TYPED_LOGGING_DEBUG] expansion of `{}`:\n{}",
            item.ident, output
        );
    }

    output
}
