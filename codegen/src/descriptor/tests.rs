use super::build::bind_method;
use super::*;
use crate::config::CodegenConfig;
use crate::diagnostics::{Violation, ViolationKind};
use crate::template::parse_template;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{ItemTrait, TraitItemFn, parse_quote};

fn build(item: ItemTrait, args: TokenStream) -> (LoggingInterfaceDescriptor, Vec<Violation>) {
    let config = CodegenConfig::default();
    let cx = InterfaceContext {
        args,
        nested: false,
        trigger_count: 1,
        config: &config,
    };
    build_interface(&item, &cx)
}

#[test]
fn test_positional_message_args() {
    let args: MessageArgs =
        syn::parse2(quote!(0, Critical, "Could not open socket to `{hostName}`")).unwrap();
    assert_eq!(args.event_id, 0);
    assert_eq!(args.level, Level::Critical);
    assert_eq!(args.message.value(), "Could not open socket to `{hostName}`");
}

#[test]
fn test_named_message_args_in_any_order() {
    let args: MessageArgs =
        syn::parse2(quote!(message = "hi", level = Level::Warning, id = 7)).unwrap();
    assert_eq!(args.event_id, 7);
    assert_eq!(args.level, Level::Warning);
    assert_eq!(args.message.value(), "hi");
}

#[test]
fn test_mixed_message_args() {
    let args: MessageArgs = syn::parse2(quote!(3, level = Debug, message = "x")).unwrap();
    assert_eq!(args.event_id, 3);
    assert_eq!(args.level, Level::Debug);
}

#[test]
fn test_negative_event_id() {
    let args: MessageArgs = syn::parse2(quote!(-2147483648, Trace, "min")).unwrap();
    assert_eq!(args.event_id, i32::MIN);
}

#[test]
fn test_event_id_out_of_range() {
    let err = syn::parse2::<MessageArgs>(quote!(2147483648, Trace, "big")).unwrap_err();
    assert!(err.to_string().contains("i32"), "got: {err}");
}

#[test]
fn test_unknown_level() {
    let err = syn::parse2::<MessageArgs>(quote!(1, Fatal, "x")).unwrap_err();
    assert!(err.to_string().contains("unknown level `Fatal`"), "got: {err}");
}

#[test]
fn test_positional_after_named_is_rejected() {
    let err = syn::parse2::<MessageArgs>(quote!(id = 1, Trace, "x")).unwrap_err();
    assert!(err.to_string().contains("positional"), "got: {err}");
}

#[test]
fn test_missing_message() {
    let err = syn::parse2::<MessageArgs>(quote!(1, Trace)).unwrap_err();
    assert!(err.to_string().contains("missing message"), "got: {err}");
}

#[test]
fn test_duplicate_named_argument() {
    let err = syn::parse2::<MessageArgs>(quote!(1, Trace, "x", level = Debug)).unwrap_err();
    assert!(err.to_string().contains("more than once"), "got: {err}");
}

#[test]
fn test_extensions_args_forms() {
    let empty: ExtensionsArgs = syn::parse2(quote!()).unwrap();
    assert!(empty.name.is_none() && empty.runtime_crate.is_none());

    let positional: ExtensionsArgs = syn::parse2(quote!("AppLog")).unwrap();
    assert_eq!(positional.name.unwrap().value(), "AppLog");

    let both: ExtensionsArgs = syn::parse2(quote!(name = "AppLog", crate = my::rt)).unwrap();
    assert_eq!(both.name.unwrap().value(), "AppLog");
    let path = both.runtime_crate.unwrap();
    assert_eq!(quote!(#path).to_string(), "my :: rt");

    let quoted: ExtensionsArgs = syn::parse2(quote!(crate = "::other")).unwrap();
    let path = quoted.runtime_crate.unwrap();
    assert_eq!(quote!(#path).to_string(), ":: other");
}

#[test]
fn test_extensions_args_unknown_key() {
    let err = syn::parse2::<ExtensionsArgs>(quote!(prefix = "x")).unwrap_err();
    assert!(err.to_string().contains("unknown argument `prefix`"), "got: {err}");
}

#[test]
fn test_build_socket_interface() {
    let item: ItemTrait = parse_quote! {
        #[logger_extensions]
        pub trait ILoggerExtensions {
            /// Socket failure.
            #[logger_message(0, Critical, "Could not open socket to `{hostName}`")]
            fn could_not_open_socket(&self, hostName: &str);
        }
    };
    let (d, violations) = build(item, TokenStream::new());
    assert!(violations.is_empty());
    assert_eq!(d.name, "ILoggerExtensions");
    assert_eq!(d.companion, "LoggerExtensions");
    let runtime = &d.runtime_crate;
    assert_eq!(quote!(#runtime).to_string(), ":: typed_logging");

    let m = d.method("could_not_open_socket").unwrap();
    assert_eq!(m.event_id, 0);
    assert_eq!(m.level, Level::Critical);
    assert_eq!(m.parameters.len(), 1);
    assert_eq!(m.parameters[0].field_name(), "hostName");
    assert_eq!(m.bindings, vec![Some(0)]);
    assert_eq!(m.docs.len(), 1);
    assert!(m.default_body.is_none());
}

#[test]
fn test_companion_name_override() {
    let item: ItemTrait = parse_quote! {
        trait IApp {
            #[logger_message(1, Debug, "x")]
            fn x(&self);
        }
    };
    let (d, violations) = build(item, quote!("AppEvents"));
    assert!(violations.is_empty());
    assert_eq!(d.companion, "AppEvents");
}

#[test]
fn test_invalid_companion_override() {
    let item: ItemTrait = parse_quote! {
        trait IApp {}
    };
    let (d, violations) = build(item, quote!("not a name"));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].kind, ViolationKind::InvalidAttribute);
    assert_eq!(d.companion, "App");
}

#[test]
fn test_method_without_message_attr() {
    let item: ItemTrait = parse_quote! {
        trait IApp {
            fn plain(&self);
        }
    };
    let (d, violations) = build(item, TokenStream::new());
    assert!(d.methods.is_empty());
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].kind, ViolationKind::InvalidMethodShape);
    assert_eq!(violations[0].method.as_deref(), Some("plain"));
    assert_eq!(violations[0].interface, "IApp");
}

#[test]
fn test_template_syntax_error_is_reported() {
    let item: ItemTrait = parse_quote! {
        trait IApp {
            #[logger_message(1, Error, "broken {name")]
            fn broken(&self, name: &str);
        }
    };
    let (_, violations) = build(item, TokenStream::new());
    assert_eq!(violations.len(), 1);
    let v = &violations[0];
    assert_eq!(v.kind, ViolationKind::SyntaxError);
    assert!(v.detail.as_deref().unwrap_or_default().contains('^'));
    assert!(v.help.is_some());
}

#[test]
fn test_foreign_items_and_qualifiers_are_recorded() {
    let item: ItemTrait = parse_quote! {
        unsafe trait IApp: Send {
            type Output;
            const LIMIT: usize;
        }
    };
    let (d, violations) = build(item, TokenStream::new());
    assert!(violations.is_empty());
    assert_eq!(d.foreign_items.len(), 2);
    assert_eq!(d.qualifiers.len(), 1);
    assert_eq!(d.supertraits.len(), 1);
}

#[test]
fn test_bindings_repeat_and_skip() {
    let method: TraitItemFn = parse_quote! {
        fn moved(&self, from: &str, to: &str, attempt: u32);
    };
    let args: MessageArgs = syn::parse2(quote!(4, Information, "{to} <- {from} ({to}), {ghost}")).unwrap();
    let segments = parse_template(&args.message.value()).unwrap();
    let m = bind_method(&method, args, segments);
    assert_eq!(m.bindings, vec![Some(1), Some(0), Some(1), None]);
    assert!(m.references(0));
    assert!(m.references(1));
    assert!(!m.references(2));

    let pairs: Vec<_> = m
        .placeholder_bindings()
        .map(|(name, param)| (name.to_string(), param.map(|p| p.position)))
        .collect();
    assert_eq!(pairs[3], ("ghost".to_string(), None));
}

#[test]
fn test_raw_identifier_binds_unraw_name() {
    let method: TraitItemFn = parse_quote! {
        fn kind(&self, r#type: &str);
    };
    let args: MessageArgs = syn::parse2(quote!(5, Trace, "type={type}")).unwrap();
    let segments = parse_template(&args.message.value()).unwrap();
    let m = bind_method(&method, args, segments);
    assert_eq!(m.bindings, vec![Some(0)]);
    assert_eq!(m.parameters[0].field_name(), "type");
}

#[test]
fn test_level_tokens_use_runtime_path() {
    let runtime: syn::Path = parse_quote!(::typed_logging);
    let tokens = Level::Warning.to_tokens_in(&runtime).to_string();
    assert_eq!(tokens, ":: typed_logging :: Level :: Warning");
}
