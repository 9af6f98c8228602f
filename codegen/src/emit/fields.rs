//! Per-method event constants and structured views.

use proc_macro2::{Ident, Literal, TokenStream};
use quote::{format_ident, quote};
use syn::{Path, ext::IdentExt, parse_quote};

use crate::descriptor::LogMethodDescriptor;
use crate::template::TemplateSegment;

/// Expands an event id as an `i32` expression. Negative ids are written as a
/// negated literal so `i32::MIN` stays representable.
pub(super) fn event_id_literal(id: i32) -> TokenStream {
    let magnitude = Literal::u64_unsuffixed(i64::from(id).unsigned_abs());
    if id < 0 {
        quote!(-#magnitude)
    } else {
        quote!(#magnitude)
    }
}

/// The runtime path as seen from a method module, two levels below the trait.
///
/// `self` and `super` paths are re-rooted. Other relative paths may name an
/// import of the trait's module, so the second value asks for glob imports of
/// each enclosing module.
pub(super) fn nested_runtime(runtime: &Path) -> (Path, bool) {
    if runtime.leading_colon.is_some() {
        return (runtime.clone(), false);
    }
    let Some(first) = runtime.segments.first() else {
        return (runtime.clone(), false);
    };
    if first.ident == "crate" || first.ident == "$crate" {
        (runtime.clone(), false)
    } else if first.ident == "self" {
        let rest = runtime.segments.iter().skip(1);
        (parse_quote!(super::super #(::#rest)*), false)
    } else if first.ident == "super" {
        (parse_quote!(super::super::#runtime), false)
    } else {
        (runtime.clone(), true)
    }
}

/// Generates the `mod <method> { EVENT, Fields }` item for one log method.
///
/// `Fields` is generic over every parameter type so borrowed arguments with
/// elided lifetimes can be captured without naming them.
pub(super) fn method_module(
    method: &LogMethodDescriptor,
    runtime: &Path,
    glob_parent: bool,
) -> TokenStream {
    let module = &method.name;
    let event_name = method.name.unraw().to_string();
    let event_id = event_id_literal(method.event_id);
    let display = display_body(method, runtime);

    let parent = glob_parent.then(|| {
        quote! {
            #[allow(unused_imports)]
            use super::*;
        }
    });
    let event = quote! {
        #parent

        pub const EVENT: #runtime::EventId = #runtime::EventId::new(#event_id, #event_name);
    };

    if method.parameters.is_empty() {
        return quote! {
            pub mod #module {
                #event

                pub struct Fields;

                impl #runtime::LogFields for Fields {
                    fn len(&self) -> usize {
                        0
                    }

                    fn field(&self, _index: usize) -> ::core::option::Option<#runtime::Field<'_>> {
                        ::core::option::Option::None
                    }
                }

                impl ::core::fmt::Display for Fields {
                    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                        #display
                    }
                }
            }
        };
    }

    let type_params: Vec<Ident> = (0..method.parameters.len())
        .map(|index| format_ident!("T{}", index))
        .collect();
    let field_idents: Vec<&Ident> = method.parameters.iter().map(|p| &p.name).collect();
    let field_names: Vec<String> = method.parameters.iter().map(|p| p.field_name()).collect();
    let indices = (0..method.parameters.len()).map(Literal::usize_unsuffixed);
    let count = Literal::usize_unsuffixed(method.parameters.len());

    quote! {
        pub mod #module {
            #event

            pub struct Fields<#(#type_params),*> {
                #(pub #field_idents: #type_params,)*
            }

            impl<#(#type_params: #runtime::ToFieldValue),*> #runtime::LogFields for Fields<#(#type_params),*> {
                fn len(&self) -> usize {
                    #count
                }

                fn field(&self, index: usize) -> ::core::option::Option<#runtime::Field<'_>> {
                    match index {
                        #(
                            #indices => ::core::option::Option::Some(#runtime::Field::new(
                                #field_names,
                                #runtime::ToFieldValue::to_field_value(&self.#field_idents),
                            )),
                        )*
                        _ => ::core::option::Option::None,
                    }
                }
            }

            impl<#(#type_params: #runtime::ToFieldValue),*> ::core::fmt::Display for Fields<#(#type_params),*> {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    #display
                }
            }
        }
    }
}

/// Writes literal text verbatim and each placeholder through its bound field.
fn display_body(method: &LogMethodDescriptor, runtime: &Path) -> TokenStream {
    let mut placeholder = 0usize;
    let mut writes = Vec::new();

    for segment in &method.segments {
        match segment {
            TemplateSegment::Literal(text) if text.is_empty() => {}
            TemplateSegment::Literal(text) => {
                let text = Literal::string(text);
                writes.push(quote!(f.write_str(#text)?;));
            }
            TemplateSegment::Placeholder { .. } => {
                let binding = method.bindings.get(placeholder).copied().flatten();
                placeholder += 1;
                // Unknown placeholders never reach emission; render them
                // back as written all the same.
                match binding.map(|index| &method.parameters[index].name) {
                    Some(field) => writes.push(quote! {
                        ::core::fmt::Display::fmt(
                            &#runtime::ToFieldValue::to_field_value(&self.#field),
                            f,
                        )?;
                    }),
                    None => {
                        let raw = Literal::string(&format!(
                            "{{{}}}",
                            segment.placeholder_name().unwrap_or_default()
                        ));
                        writes.push(quote!(f.write_str(#raw)?;));
                    }
                }
            }
        }
    }

    if writes.is_empty() {
        return quote!(f.write_str(""));
    }
    quote! {
        #(#writes)*
        ::core::result::Result::Ok(())
    }
}
