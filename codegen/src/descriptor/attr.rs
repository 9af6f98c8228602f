//! Argument parsing for `#[logger_extensions]` and `#[logger_message]`.

use proc_macro2::{Span, TokenStream};
use quote::ToTokens;
use syn::{
    Attribute, Ident, ItemTrait, LitInt, LitStr, Meta, Path, Token, TraitItem,
    parse::{Parse, ParseStream},
};

use super::Level;

/// Arguments of `#[logger_extensions]`.
///
/// Accepted forms: `()`, `("Name")`, `(name = "Name")`, `(crate = path)` and
/// combinations of the name with `crate`.
#[derive(Debug, Clone, Default)]
pub struct ExtensionsArgs {
    /// Overrides the generated companion type name.
    pub name: Option<LitStr>,
    /// Overrides the runtime crate path used by generated code.
    pub runtime_crate: Option<Path>,
}

impl Parse for ExtensionsArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = Self::default();

        if input.peek(LitStr) {
            args.name = Some(input.parse()?);
            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }

        while !input.is_empty() {
            if input.peek(Token![crate]) {
                let kw: Token![crate] = input.parse()?;
                input.parse::<Token![=]>()?;
                let path = if input.peek(LitStr) {
                    let lit: LitStr = input.parse()?;
                    lit.parse_with(Path::parse_mod_style)?
                } else {
                    input.call(Path::parse_mod_style)?
                };
                if args.runtime_crate.replace(path).is_some() {
                    return Err(syn::Error::new(kw.span, "duplicate `crate` argument"));
                }
            } else {
                let key: Ident = input.parse()?;
                if key != "name" {
                    return Err(syn::Error::new(
                        key.span(),
                        format!("unknown argument `{key}`; expected `name` or `crate`"),
                    ));
                }
                input.parse::<Token![=]>()?;
                let lit: LitStr = input.parse()?;
                if args.name.replace(lit).is_some() {
                    return Err(syn::Error::new(key.span(), "duplicate `name` argument"));
                }
            }

            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }

        Ok(args)
    }
}

/// Arguments of `#[logger_message]`.
///
/// Positional `(event_id, Level, "message")`, named
/// `(id = .., level = .., message = ..)`, or a positional prefix followed by
/// named arguments.
#[derive(Debug, Clone)]
pub struct MessageArgs {
    pub event_id: i32,
    pub event_id_span: Span,
    pub level: Level,
    pub message: LitStr,
}

impl Parse for MessageArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut event_id: Option<(i32, Span)> = None;
        let mut level: Option<Level> = None;
        let mut message: Option<LitStr> = None;
        let mut index = 0usize;
        let mut named = false;

        while !input.is_empty() {
            if input.peek(Ident) && input.peek2(Token![=]) {
                named = true;
                let key: Ident = input.parse()?;
                input.parse::<Token![=]>()?;
                match key.to_string().as_str() {
                    "id" | "event_id" => set_once(&mut event_id, parse_event_id(input)?, &key)?,
                    "level" => set_once(&mut level, parse_level(input)?, &key)?,
                    "message" => set_once(&mut message, input.parse()?, &key)?,
                    other => {
                        return Err(syn::Error::new(
                            key.span(),
                            format!(
                                "unknown argument `{other}`; expected `id`, `level`, or `message`"
                            ),
                        ));
                    }
                }
            } else {
                if named {
                    return Err(input.error("positional arguments must come before named arguments"));
                }
                match index {
                    0 => event_id = Some(parse_event_id(input)?),
                    1 => level = Some(parse_level(input)?),
                    2 => message = Some(input.parse()?),
                    _ => {
                        return Err(input.error(
                            "too many arguments; expected `(event_id, Level, \"message\")`",
                        ));
                    }
                }
                index += 1;
            }

            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }

        let (event_id, event_id_span) =
            event_id.ok_or_else(|| input.error("missing event id"))?;
        let level = level.ok_or_else(|| input.error("missing level"))?;
        let message = message.ok_or_else(|| input.error("missing message template"))?;

        Ok(Self {
            event_id,
            event_id_span,
            level,
            message,
        })
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, key: &Ident) -> syn::Result<()> {
    if slot.replace(value).is_some() {
        return Err(syn::Error::new(
            key.span(),
            format!("`{key}` is specified more than once"),
        ));
    }
    Ok(())
}

fn parse_event_id(input: ParseStream) -> syn::Result<(i32, Span)> {
    let negative = input.peek(Token![-]);
    if negative {
        input.parse::<Token![-]>()?;
    }
    let lit: LitInt = input.parse()?;
    let value: i64 = lit.base10_parse()?;
    let value = if negative { -value } else { value };
    let id = i32::try_from(value)
        .map_err(|_| syn::Error::new(lit.span(), "event id must fit in an `i32`"))?;
    Ok((id, lit.span()))
}

fn parse_level(input: ParseStream) -> syn::Result<Level> {
    let path: Path = input.parse()?;
    let name = path
        .segments
        .last()
        .map(|segment| segment.ident.to_string())
        .unwrap_or_default();
    Level::from_name(&name).ok_or_else(|| {
        syn::Error::new_spanned(
            &path,
            format!(
                "unknown level `{name}`; expected one of Trace, Debug, Information, Warning, Error, Critical"
            ),
        )
    })
}

fn last_segment_is(attr: &Attribute, name: &str) -> bool {
    attr.path()
        .segments
        .last()
        .is_some_and(|segment| segment.ident == name)
}

/// Returns true for `#[logger_extensions]` (under any path prefix).
pub fn is_extensions_attr(attr: &Attribute) -> bool {
    last_segment_is(attr, "logger_extensions")
}

/// Returns true for `#[logger_message]` (under any path prefix).
pub fn is_message_attr(attr: &Attribute) -> bool {
    last_segment_is(attr, "logger_message")
}

/// Returns the argument tokens of an attribute: the list contents, the value
/// of a `name = value` form, or nothing for a bare path.
pub(crate) fn attr_args(attr: &Attribute) -> TokenStream {
    match &attr.meta {
        Meta::Path(_) => TokenStream::new(),
        Meta::List(list) => list.tokens.clone(),
        Meta::NameValue(nv) => nv.value.to_token_stream(),
    }
}

/// Removes the generator's helper attributes so the trait can be emitted as
/// plain Rust.
pub fn strip_helper_attributes(item: &mut ItemTrait) {
    item.attrs.retain(|attr| !is_extensions_attr(attr));
    for trait_item in &mut item.items {
        if let TraitItem::Fn(method) = trait_item {
            method.attrs.retain(|attr| !is_message_attr(attr));
        }
    }
}
