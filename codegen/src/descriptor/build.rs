//! Builds descriptors from trait declarations.

use proc_macro2::{Ident, TokenStream};
use syn::{FnArg, ItemTrait, Pat, TraitItem, TraitItemFn, spanned::Spanned};

use super::attr::{ExtensionsArgs, MessageArgs, attr_args, is_message_attr};
use super::{LogMethodDescriptor, LoggingInterfaceDescriptor, ParameterDescriptor};
use crate::config::CodegenConfig;
use crate::diagnostics::{Violation, ViolationKind};
use crate::naming;
use crate::template::{TemplateSegment, parse_template};

/// Where and how a trait was found.
#[derive(Debug, Clone)]
pub struct InterfaceContext<'a> {
    /// Argument tokens of the triggering `#[logger_extensions]`.
    pub args: TokenStream,
    /// True when the trait is declared inside another item.
    pub nested: bool,
    /// Number of `#[logger_extensions]` annotations, including the trigger.
    pub trigger_count: usize,
    pub config: &'a CodegenConfig,
}

/// Builds the descriptor of one logging trait.
///
/// Problems that prevent a method descriptor from being built at all
/// (missing or malformed `#[logger_message]`, template syntax errors) are
/// returned alongside; those methods are left out of the descriptor. Every
/// other rule is left for the validator.
pub fn build_interface(
    item: &ItemTrait,
    cx: &InterfaceContext<'_>,
) -> (LoggingInterfaceDescriptor, Vec<Violation>) {
    let name = item.ident.clone();
    let mut violations = Vec::new();

    let args = match syn::parse2::<ExtensionsArgs>(cx.args.clone()) {
        Ok(args) => args,
        Err(err) => {
            violations.push(
                Violation::from_syn(ViolationKind::InvalidAttribute, &err).interface(&name),
            );
            ExtensionsArgs::default()
        }
    };

    let companion = match &args.name {
        Some(lit) => lit.parse::<Ident>().unwrap_or_else(|_| {
            violations.push(
                Violation::new(
                    ViolationKind::InvalidAttribute,
                    lit.span(),
                    format!("`{}` is not a valid type name", lit.value()),
                )
                .interface(&name),
            );
            naming::companion_name(&name)
        }),
        None => naming::companion_name(&name),
    };

    let runtime_crate = args
        .runtime_crate
        .unwrap_or_else(|| cx.config.runtime_crate.clone());

    let mut methods = Vec::new();
    let mut foreign_items = Vec::new();
    for trait_item in &item.items {
        match trait_item {
            TraitItem::Fn(method) => match build_method(method) {
                Ok(descriptor) => methods.push(descriptor),
                Err(violation) => violations.push(violation.interface(&name)),
            },
            other => foreign_items.push(other.span()),
        }
    }

    let qualifiers = item
        .unsafety
        .map(|token| token.span)
        .into_iter()
        .chain(item.auto_token.map(|token| token.span))
        .collect();

    tracing::debug!(
        interface = %name,
        companion = %companion,
        methods = methods.len(),
        rejected = violations.len(),
        "built logging interface descriptor"
    );

    let descriptor = LoggingInterfaceDescriptor {
        name,
        companion,
        vis: item.vis.clone(),
        runtime_crate,
        generics: item.generics.clone(),
        supertraits: item.supertraits.iter().map(|bound| bound.span()).collect(),
        qualifiers,
        nested: cx.nested,
        trigger_count: cx.trigger_count,
        foreign_items,
        methods,
    };

    (descriptor, violations)
}

fn build_method(method: &TraitItemFn) -> Result<LogMethodDescriptor, Violation> {
    let name = &method.sig.ident;
    let message_attrs: Vec<_> = method.attrs.iter().filter(|a| is_message_attr(a)).collect();

    let attr = match message_attrs.as_slice() {
        [] => {
            return Err(Violation::new(
                ViolationKind::InvalidMethodShape,
                name.span(),
                format!("method `{name}` has no `#[logger_message(...)]` attribute"),
            )
            .method(name)
            .help("annotate it with `#[logger_message(event_id, Level, \"message\")]`"));
        }
        [attr] => *attr,
        [_, second, ..] => {
            return Err(Violation::new(
                ViolationKind::InvalidMethodShape,
                second.span(),
                format!("method `{name}` carries more than one `#[logger_message]` attribute"),
            )
            .method(name));
        }
    };

    let args: MessageArgs = syn::parse2(attr_args(attr)).map_err(|err| {
        Violation::from_syn(ViolationKind::InvalidAttribute, &err).method(name)
    })?;

    let template = args.message.value();
    let segments = parse_template(&template).map_err(|err| {
        Violation::new(
            ViolationKind::SyntaxError,
            args.message.span(),
            format!("message template of `{name}`: {err}"),
        )
        .method(name)
        .detail(err.snippet(&template))
        .help(err.suggestion())
    })?;

    Ok(bind_method(method, args, segments))
}

/// Binds placeholders to parameters by exact name.
///
/// A binding is recorded, not consumed: several placeholders may bind the
/// same parameter, and parameters may stay unbound. Unknown names bind to
/// `None` and are reported by the validator.
pub(crate) fn bind_method(
    method: &TraitItemFn,
    args: MessageArgs,
    segments: Vec<TemplateSegment>,
) -> LogMethodDescriptor {
    let parameters: Vec<ParameterDescriptor> = method
        .sig
        .inputs
        .iter()
        .filter_map(|input| match input {
            FnArg::Typed(pat_type) => Some(pat_type),
            FnArg::Receiver(_) => None,
        })
        .enumerate()
        .filter_map(|(position, pat_type)| match &*pat_type.pat {
            Pat::Ident(pat)
                if pat.by_ref.is_none() && pat.mutability.is_none() && pat.subpat.is_none() =>
            {
                Some(ParameterDescriptor {
                    name: pat.ident.clone(),
                    ty: (*pat_type.ty).clone(),
                    position,
                })
            }
            _ => None,
        })
        .collect();

    let bindings = crate::template::placeholders(&segments)
        .map(|placeholder| {
            parameters
                .iter()
                .position(|param| param.field_name() == placeholder)
        })
        .collect();

    let docs = method
        .attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .cloned()
        .collect();

    tracing::trace!(
        method = %method.sig.ident,
        event_id = args.event_id,
        level = %args.level,
        parameters = parameters.len(),
        "bound log method"
    );

    LogMethodDescriptor {
        name: method.sig.ident.clone(),
        event_id: args.event_id,
        event_id_span: args.event_id_span,
        level: args.level,
        message: args.message,
        segments,
        bindings,
        parameters,
        signature: method.sig.clone(),
        docs,
        default_body: method
            .default
            .as_ref()
            .map(|body| body.brace_token.span.join()),
    }
}
