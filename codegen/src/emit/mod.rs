//! Emits the companion items of a validated logging interface.
//!
//! For a trait `ILoggerExtensions` the emitter produces:
//!
//! - a hidden module with one event constant and one structured view per method,
//! - `LoggerExtensionsExt`, implemented for every `Logger` (the direct form),
//! - `LoggerExtensions<L>`, a wrapper implementing the trait itself,
//! - `LOGGER_EXTENSIONS_EVENTS`, the event ids in declaration order.
//!
//! Output depends only on the descriptor, so identical input yields
//! byte-identical output.

mod fields;


use proc_macro2::TokenStream;
use quote::quote;
use syn::{FnArg, Signature};

use crate::descriptor::{LogMethodDescriptor, LoggingInterfaceDescriptor};
use crate::naming;
use crate::validate::Accepted;

/// Generates the companion items for an accepted interface.
pub fn emit(accepted: &Accepted<'_>) -> TokenStream {
    let d = accepted.descriptor();
    let runtime = &d.runtime_crate;
    let vis = &d.vis;
    let trait_name = &d.name;
    let companion = &d.companion;
    let ext = naming::extension_trait_name(companion);
    let hidden = naming::hidden_module_name(companion);
    let events = naming::events_const_name(companion);
    let into_companion = naming::into_companion_name(companion);

    let (nested_runtime, glob_parent) = fields::nested_runtime(runtime);
    let modules = d
        .methods
        .iter()
        .map(|m| fields::method_module(m, &nested_runtime, glob_parent));
    let parent = glob_parent.then(|| {
        quote! {
            #[allow(unused_imports)]
            use super::*;
        }
    });
    let ext_methods = d.methods.iter().map(|m| extension_method(d, m));
    let wrapper_methods = d.methods.iter().map(|m| wrapper_method(&ext, m));
    let event_paths = d.methods.iter().map(|m| {
        let module = &m.name;
        quote!(#hidden::#module::EVENT)
    });

    let ext_doc = format!(
        " Logs the events of `{trait_name}` directly on any logger.\n\n Implemented for every `Logger`; call `{into_companion}` to obtain a `{trait_name}` implementation."
    );
    let companion_doc = format!(" A `{trait_name}` implementation that logs through a wrapped logger.");
    let events_doc = format!(" Event ids of `{trait_name}`, in declaration order.");

    tracing::debug!(
        interface = %trait_name,
        companion = %companion,
        methods = d.methods.len(),
        "emitting companion items"
    );

    quote! {
        #[doc(hidden)]
        #[allow(non_snake_case, non_camel_case_types)]
        mod #hidden {
            #parent

            #(#modules)*
        }

        #[doc = #ext_doc]
        #[allow(non_snake_case, dead_code)]
        #vis trait #ext: #runtime::Logger {
            #(#ext_methods)*

            /// Wraps this logger in a value implementing the logging trait.
            fn #into_companion(self) -> #companion<Self>
            where
                Self: ::core::marker::Sized,
            {
                #companion::new(self)
            }
        }

        impl<L: #runtime::Logger + ?::core::marker::Sized> #ext for L {}

        #[doc = #companion_doc]
        #[derive(Debug, Clone)]
        #[allow(dead_code)]
        #vis struct #companion<L> {
            logger: L,
        }

        #[allow(dead_code)]
        impl<L> #companion<L> {
            /// Wraps `logger`.
            #vis const fn new(logger: L) -> Self {
                Self { logger }
            }

            /// Returns the wrapped logger.
            #vis fn logger(&self) -> &L {
                &self.logger
            }

            /// Unwraps the logger.
            #vis fn into_inner(self) -> L {
                self.logger
            }
        }

        #[allow(non_snake_case)]
        impl<L: #runtime::Logger> #trait_name for #companion<L> {
            #(#wrapper_methods)*
        }

        #[doc = #events_doc]
        #[allow(dead_code)]
        #vis const #events: &[#runtime::EventId] = &[#(#event_paths),*];
    }
}

/// The direct form: checks the level, then hands a record to the logger.
/// Nothing is rendered or captured when the level is disabled.
fn extension_method(d: &LoggingInterfaceDescriptor, method: &LogMethodDescriptor) -> TokenStream {
    let runtime = &d.runtime_crate;
    let hidden = naming::hidden_module_name(&d.companion);
    let module = &method.name;
    let sig = plain_signature(&method.signature);
    let level = method.level.to_tokens_in(runtime);
    let docs = &method.docs;
    let summary = format!(
        " Event id `{}`, level `{}`.",
        method.event_id, method.level
    );
    let separator = (!docs.is_empty()).then(|| quote!(#[doc = ""]));

    let fields = if method.parameters.is_empty() {
        quote!(#hidden::#module::Fields)
    } else {
        let names = method.parameters.iter().map(|p| &p.name);
        let values = method.parameters.iter().map(|p| &p.name);
        quote!(#hidden::#module::Fields { #(#names: &#values),* })
    };

    quote! {
        #(#docs)*
        #separator
        #[doc = #summary]
        #sig {
            if !#runtime::Logger::is_enabled(self, #level) {
                return;
            }
            let __fields = #fields;
            #runtime::Logger::log(
                self,
                &#runtime::Record::new(#level, #hidden::#module::EVENT, &__fields, &__fields),
            );
        }
    }
}

/// The wrapper form: forwards to the direct form on the wrapped logger.
fn wrapper_method(ext: &syn::Ident, method: &LogMethodDescriptor) -> TokenStream {
    let sig = plain_signature(&method.signature);
    let name = &method.name;
    let args = method.parameters.iter().map(|p| &p.name);
    quote! {
        #sig {
            #ext::#name(&self.logger, #(#args),*)
        }
    }
}

/// The declared signature without parameter attributes.
fn plain_signature(sig: &Signature) -> Signature {
    let mut sig = sig.clone();
    for input in &mut sig.inputs {
        match input {
            FnArg::Receiver(receiver) => receiver.attrs.clear(),
            FnArg::Typed(pat_type) => pat_type.attrs.clear(),
        }
    }
    sig
}
