//! Structural and semantic checks over a logging interface descriptor.
//!
//! All violations are accumulated: a single pass reports every problem in the
//! interface. A non-empty result blocks emission for the whole interface.

use rustc_hash::{FxHashMap, FxHashSet};
use syn::{
    FnArg, GenericParam, Pat, ReturnType, Type, ext::IdentExt, spanned::Spanned, visit::Visit,
};

use crate::descriptor::{LogMethodDescriptor, LoggingInterfaceDescriptor};
use crate::diagnostics::{Diagnostics, Note, Violation, ViolationKind};
use crate::error_fmt::ErrorFormat;
use crate::naming;

/// A descriptor that passed validation. Only accepted descriptors can be emitted.
#[derive(Debug)]
pub struct Accepted<'a> {
    descriptor: &'a LoggingInterfaceDescriptor,
    notes: Vec<Note>,
}

impl<'a> Accepted<'a> {
    /// The validated descriptor.
    pub fn descriptor(&self) -> &'a LoggingInterfaceDescriptor {
        self.descriptor
    }

    /// Non-fatal observations.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}

/// A descriptor that failed validation.
#[derive(Debug)]
pub struct Rejected {
    pub violations: Diagnostics,
    pub notes: Vec<Note>,
}

/// Validates one logging interface.
pub fn validate(descriptor: &LoggingInterfaceDescriptor) -> Result<Accepted<'_>, Rejected> {
    let mut validator = Validator {
        descriptor,
        violations: Diagnostics::new(),
        notes: Vec::new(),
    };

    validator.check_interface();
    for method in &descriptor.methods {
        validator.check_method_shape(method);
        validator.check_placeholders(method);
        validator.note_unreferenced(method);
    }
    validator.check_event_ids();

    tracing::debug!(
        interface = %descriptor.name,
        violations = validator.violations.len(),
        notes = validator.notes.len(),
        "validated logging interface"
    );

    if validator.violations.is_empty() {
        Ok(Accepted {
            descriptor,
            notes: validator.notes,
        })
    } else {
        Err(Rejected {
            violations: validator.violations,
            notes: validator.notes,
        })
    }
}

struct Validator<'a> {
    descriptor: &'a LoggingInterfaceDescriptor,
    violations: Diagnostics,
    notes: Vec<Note>,
}

impl Validator<'_> {
    fn report(&mut self, violation: Violation) {
        self.violations
            .push(violation.interface(&self.descriptor.name));
    }

    fn interface_shape(&mut self, span: proc_macro2::Span, message: String) {
        self.report(Violation::new(
            ViolationKind::InvalidInterfaceShape,
            span,
            message,
        ));
    }

    fn method_shape(
        &mut self,
        method: &LogMethodDescriptor,
        span: proc_macro2::Span,
        message: String,
    ) {
        self.report(
            Violation::new(ViolationKind::InvalidMethodShape, span, message).method(&method.name),
        );
    }

    fn check_interface(&mut self) {
        let d = self.descriptor;
        let name = &d.name;

        if !d.generics.params.is_empty() {
            self.interface_shape(
                d.generics.params.span(),
                format!("logging trait `{name}` must not be generic"),
            );
        }
        if let Some(where_clause) = d
            .generics
            .where_clause
            .as_ref()
            .filter(|w| !w.predicates.is_empty())
        {
            self.interface_shape(
                where_clause.span(),
                format!("logging trait `{name}` must not have a where clause"),
            );
        }
        if d.nested {
            self.report(
                Violation::new(
                    ViolationKind::InvalidInterfaceShape,
                    name.span(),
                    format!("logging trait `{name}` must not be nested in another item"),
                )
                .help("declare the trait at the top level of the file"),
            );
        }
        if d.trigger_count > 1 {
            self.interface_shape(
                name.span(),
                format!("`#[logger_extensions]` is applied {} times to `{name}`", d.trigger_count),
            );
        }
        for &span in &d.supertraits {
            self.interface_shape(span, format!("logging trait `{name}` must not have supertraits"));
        }
        for &span in &d.qualifiers {
            self.interface_shape(
                span,
                format!("logging trait `{name}` must be a plain trait, not `unsafe` or `auto`"),
            );
        }
        for &span in &d.foreign_items {
            self.report(
                Violation::new(
                    ViolationKind::InvalidInterfaceShape,
                    span,
                    format!("logging trait `{name}` may only declare log methods"),
                )
                .help("move associated types, constants and macros to another trait"),
            );
        }

        let extension = naming::extension_trait_name(&d.companion);
        if d.companion == *name || extension == *name {
            self.interface_shape(
                d.companion.span(),
                format!("generated type name `{}` collides with the trait `{name}`", d.companion),
            );
        }
    }

    fn check_method_shape(&mut self, method: &LogMethodDescriptor) {
        let sig = &method.signature;
        let name = &method.name;

        let into_companion = naming::into_companion_name(&self.descriptor.companion);
        if name.unraw() == into_companion {
            self.report(
                Violation::new(
                    ViolationKind::InvalidMethodShape,
                    name.span(),
                    format!("log method `{name}` collides with the generated `{into_companion}`"),
                )
                .method(name)
                .help("rename the method or the generated type"),
            );
        }

        let generic = sig
            .generics
            .params
            .iter()
            .find(|param| !matches!(param, GenericParam::Lifetime(_)));
        if let Some(param) = generic {
            self.method_shape(
                method,
                param.span(),
                format!("log method `{name}` must not be generic"),
            );
        }
        if let Some(where_clause) = sig
            .generics
            .where_clause
            .as_ref()
            .filter(|w| !w.predicates.is_empty())
        {
            self.method_shape(
                method,
                where_clause.span(),
                format!("log method `{name}` must not have a where clause"),
            );
        }

        if let ReturnType::Type(_, ty) = &sig.output {
            let unit = matches!(&**ty, Type::Tuple(tuple) if tuple.elems.is_empty());
            if !unit {
                self.method_shape(
                    method,
                    ty.span(),
                    format!("log method `{name}` must return `()`"),
                );
            }
        }

        match sig.receiver() {
            Some(receiver)
                if receiver.reference.is_some()
                    && receiver.mutability.is_none()
                    && receiver.colon_token.is_none() => {}
            Some(receiver) => self.method_shape(
                method,
                receiver.span(),
                format!("log method `{name}` must take `&self`"),
            ),
            None => self.method_shape(
                method,
                name.span(),
                format!("log method `{name}` must take `&self`"),
            ),
        }

        let qualifiers = [
            sig.constness.map(|t| (t.span, "const")),
            sig.asyncness.map(|t| (t.span, "async")),
            sig.unsafety.map(|t| (t.span, "unsafe")),
            sig.abi.as_ref().map(|abi| (abi.extern_token.span, "extern")),
        ];
        for (span, qualifier) in qualifiers.into_iter().flatten() {
            self.method_shape(
                method,
                span,
                format!("log method `{name}` must not be `{qualifier}`"),
            );
        }
        if let Some(variadic) = &sig.variadic {
            self.method_shape(
                method,
                variadic.span(),
                format!("log method `{name}` must not be variadic"),
            );
        }

        if let Some(span) = method.default_body {
            self.report(
                Violation::new(
                    ViolationKind::InvalidMethodShape,
                    span,
                    format!("log method `{name}` must not have a body"),
                )
                .method(name)
                .help("the body is generated; declare the method with a trailing `;`"),
            );
        }

        for input in &sig.inputs {
            let FnArg::Typed(pat_type) = input else {
                continue;
            };
            match &*pat_type.pat {
                Pat::Ident(pat)
                    if pat.by_ref.is_none() && pat.mutability.is_none() && pat.subpat.is_none() =>
                {
                    if pat.ident.to_string().starts_with("__") {
                        self.report(
                            Violation::new(
                                ViolationKind::InvalidMethodShape,
                                pat.ident.span(),
                                format!(
                                    "parameter `{}` of `{name}` uses the reserved `__` prefix",
                                    pat.ident
                                ),
                            )
                            .method(name)
                            .subject(pat.ident.to_string()),
                        );
                    }
                }
                other => self.method_shape(
                    method,
                    other.span(),
                    format!("parameters of log method `{name}` must be plain identifiers"),
                ),
            }

            let mut finder = TypeShapeFinder::default();
            finder.visit_type(&pat_type.ty);
            if let Some(span) = finder.impl_trait {
                self.report(
                    Violation::new(
                        ViolationKind::InvalidMethodShape,
                        span,
                        format!("log method `{name}` must not be generic (`impl Trait` argument)"),
                    )
                    .method(name)
                    .help("take a concrete type or a `&dyn Trait` instead"),
                );
            }
            if let Some(span) = finder.self_type {
                self.report(
                    Violation::new(
                        ViolationKind::InvalidMethodShape,
                        span,
                        format!("parameters of log method `{name}` must not mention `Self`"),
                    )
                    .method(name)
                    .help("`Self` names a different type in each generated implementation"),
                );
            }
        }
    }

    fn check_placeholders(&mut self, method: &LogMethodDescriptor) {
        let template = method.message.value();
        let mut reported = FxHashSet::default();
        let unknown: Vec<(String, usize)> = method
            .segments
            .iter()
            .filter_map(|segment| match segment {
                crate::template::TemplateSegment::Placeholder { name, position } => {
                    Some((name.clone(), *position))
                }
                crate::template::TemplateSegment::Literal(_) => None,
            })
            .zip(method.bindings.iter())
            .filter(|(_, binding)| binding.is_none())
            .map(|(placeholder, _)| placeholder)
            .filter(|(name, _)| reported.insert(name.clone()))
            .collect();

        for (placeholder, position) in unknown {
            let snippet = ErrorFormat::new("unknown placeholder", &template, position)
                .annotation(format!("no parameter named `{placeholder}`"))
                .snippet();
            self.report(
                Violation::new(
                    ViolationKind::UnknownPlaceholder,
                    method.message.span(),
                    format!(
                        "placeholder `{{{placeholder}}}` in the message of `{}` does not match any parameter",
                        method.name
                    ),
                )
                .method(&method.name)
                .subject(placeholder.clone())
                .detail(snippet)
                .help(suggest_parameter(method, &placeholder)),
            );
        }
    }

    fn note_unreferenced(&mut self, method: &LogMethodDescriptor) {
        for (index, param) in method.parameters.iter().enumerate() {
            if !method.references(index) {
                self.notes.push(Note::UnreferencedParameter {
                    interface: self.descriptor.name.to_string(),
                    method: method.name.to_string(),
                    parameter: param.field_name(),
                });
            }
        }
    }

    fn check_event_ids(&mut self) {
        let descriptor = self.descriptor;
        let mut by_id: FxHashMap<i32, Vec<&LogMethodDescriptor>> = FxHashMap::default();
        let mut order = Vec::new();
        for method in &descriptor.methods {
            let methods = by_id.entry(method.event_id).or_default();
            if methods.is_empty() {
                order.push(method.event_id);
            }
            methods.push(method);
        }

        for id in order {
            let methods = &by_id[&id];
            if methods.len() < 2 {
                continue;
            }
            let names: Vec<String> = methods.iter().map(|m| m.name.to_string()).collect();
            let duplicate = methods[1];
            self.report(
                Violation::new(
                    ViolationKind::DuplicateEventId,
                    duplicate.event_id_span,
                    format!("event id {id} is declared by {}", name_list(&names)),
                )
                .method(&duplicate.name)
                .subject(names.join(", "))
                .help("give every log method of an interface its own event id"),
            );
        }
    }
}

fn name_list(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("`{n}`")).collect();
    match quoted.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} and {last}", rest.join(", ")),
        Some((last, _)) => last.clone(),
        None => String::new(),
    }
}

fn suggest_parameter(method: &LogMethodDescriptor, placeholder: &str) -> String {
    let wanted = placeholder.trim();
    let close = method.parameters.iter().find(|param| {
        let field = param.field_name();
        field == wanted || field.eq_ignore_ascii_case(wanted)
    });
    if let Some(param) = close {
        return format!("did you mean `{{{}}}`?", param.field_name());
    }
    if method.parameters.is_empty() {
        return format!(
            "`{}` declares no parameters; add one named `{wanted}` or remove the placeholder",
            method.name
        );
    }
    let names: Vec<String> = method.parameters.iter().map(|p| p.field_name()).collect();
    format!("declared parameters are {}", name_list(&names))
}

/// Finds the first `impl Trait` and the first `Self` in a parameter type.
#[derive(Default)]
struct TypeShapeFinder {
    impl_trait: Option<proc_macro2::Span>,
    self_type: Option<proc_macro2::Span>,
}

impl<'ast> Visit<'ast> for TypeShapeFinder {
    fn visit_type_impl_trait(&mut self, node: &'ast syn::TypeImplTrait) {
        self.impl_trait.get_or_insert(node.span());
    }

    fn visit_path(&mut self, node: &'ast syn::Path) {
        if let Some(first) = node.segments.first().filter(|s| s.ident == "Self") {
            self.self_type.get_or_insert(first.ident.span());
        }
        syn::visit::visit_path(self, node);
    }
}
