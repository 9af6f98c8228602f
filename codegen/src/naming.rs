//! Deterministic names for generated items.

use proc_macro2::Ident;
use quote::format_ident;
use syn::ext::IdentExt;

/// Derives the companion (wrapper) type name from the logging trait name.
///
/// `ILoggerExtensions` becomes `LoggerExtensions`. Names without the
/// interface-style `I` prefix get a `Logger` suffix instead, so the companion
/// never collides with the trait.
///
/// Only an `I` followed by an uppercase letter counts as that prefix, so
/// `Inventory` becomes `InventoryLogger` rather than `nventory`. Either branch
/// yields a name that differs from the trait's.
pub fn companion_name(interface: &Ident) -> Ident {
    let name = interface.unraw().to_string();
    let mut chars = name.chars();
    let stripped = match (chars.next(), chars.next()) {
        (Some('I'), Some(second)) if second.is_ascii_uppercase() => name[1..].to_string(),
        _ => format!("{name}Logger"),
    };
    format_ident!("{}", stripped, span = interface.span())
}

/// Name of the extension trait implemented for every logger.
pub fn extension_trait_name(companion: &Ident) -> Ident {
    format_ident!("{}Ext", companion)
}

/// Name of the hidden module holding event ids and structured views.
pub fn hidden_module_name(companion: &Ident) -> Ident {
    format_ident!("__{}", to_snake_case(&companion.unraw().to_string()))
}

/// Name of the public constant listing every event id of an interface.
pub fn events_const_name(companion: &Ident) -> Ident {
    format_ident!(
        "{}_EVENTS",
        to_snake_case(&companion.unraw().to_string()).to_ascii_uppercase()
    )
}

/// Name of the extension method that wraps a logger in the companion type.
pub fn into_companion_name(companion: &Ident) -> Ident {
    format_ident!("into_{}", to_snake_case(&companion.unraw().to_string()))
}

/// Converts `PascalCase` / `camelCase` to `snake_case`, keeping acronyms together
/// (`HTTPServerLog` -> `http_server_log`).
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                _ => false,
            };
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
