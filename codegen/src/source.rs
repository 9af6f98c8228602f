//! Build-step entry points: rewrite a whole Rust source file.
//!
//! Every top-level trait annotated with `#[logger_extensions]` is replaced in
//! place by the stripped trait followed by its companion items. All other
//! items pass through unchanged. Annotated traits nested inside other items
//! are reported, since the generated items could not be named from outside.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use quote::ToTokens;
use syn::{File, Item, ItemTrait, visit::Visit};

use crate::config::{CodegenConfig, GENERATED_HEADER};
use crate::descriptor::{InterfaceContext, attr_args, is_extensions_attr};
use crate::diagnostics::{Diagnostics, Note, Violation, ViolationKind};
use crate::expand_interface;

/// The result of a successful generation run.
#[derive(Debug, Clone)]
pub struct Generated {
    /// The rewritten, pretty-printed source.
    pub source: String,
    /// Interfaces found, in source order.
    pub interfaces: Vec<GeneratedInterface>,
    /// Non-fatal observations.
    pub notes: Vec<Note>,
}

/// One interface processed by [`generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedInterface {
    /// Name of the logging trait.
    pub interface: String,
    /// Name of the generated wrapper type.
    pub companion: String,
}

/// Errors of [`generate_file`].
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    /// The rendered diagnostics, ready to print from a build script.
    #[error("{} rejected ({diagnostics})\n{rendered}", path.display())]
    Rejected {
        path: PathBuf,
        diagnostics: Diagnostics,
        rendered: String,
    },
}

/// Generates companion items for every logging interface in `source`, using
/// the default configuration.
pub fn generate(source: &str) -> Result<Generated, Diagnostics> {
    generate_with_config(source, &CodegenConfig::default())
}

/// Generates companion items for every logging interface in `source`.
///
/// Either every interface is accepted and the whole file is emitted, or no
/// output is produced and every violation found in the file is returned.
pub fn generate_with_config(
    source: &str,
    config: &CodegenConfig,
) -> Result<Generated, Diagnostics> {
    let file = syn::parse_file(source).map_err(|err| {
        Diagnostics::from(
            Violation::from_syn(ViolationKind::InvalidSource, &err)
                .help("the input must be a complete, syntactically valid Rust source file"),
        )
    })?;

    let mut diagnostics = Diagnostics::new();
    let mut notes = Vec::new();
    let mut interfaces = Vec::new();
    let mut items = Vec::with_capacity(file.items.len());

    for item in file.items {
        match item {
            Item::Trait(item_trait) if item_trait.attrs.iter().any(is_extensions_attr) => {
                let cx = context(&item_trait, false, config);
                match expand_interface(&item_trait, &cx) {
                    Ok(expansion) => {
                        interfaces.push(GeneratedInterface {
                            interface: item_trait.ident.to_string(),
                            companion: expansion.companion_name.to_string(),
                        });
                        notes.extend(expansion.notes);
                        items.push(Item::Trait(expansion.interface));
                        items.push(Item::Verbatim(expansion.companion));
                    }
                    Err(violations) => diagnostics.extend(violations),
                }
            }
            other => {
                let mut nested = NestedInterfaces::default();
                nested.visit_item(&other);
                for item_trait in nested.found {
                    let cx = context(&item_trait, true, config);
                    if let Err(violations) = expand_interface(&item_trait, &cx) {
                        diagnostics.extend(violations);
                    }
                }
                items.push(other);
            }
        }
    }

    tracing::debug!(
        interfaces = interfaces.len(),
        violations = diagnostics.len(),
        notes = notes.len(),
        "processed source file"
    );

    if !diagnostics.is_empty() {
        return Err(diagnostics);
    }

    let output = File {
        shebang: file.shebang,
        attrs: file.attrs,
        items,
    };
    let printed = pretty_print(&output)?;
    let source = if config.header {
        format!("{GENERATED_HEADER}\n{printed}")
    } else {
        printed
    };

    Ok(Generated {
        source,
        interfaces,
        notes,
    })
}

/// Reads `input`, generates, and writes the result to `output`.
///
/// Intended for build scripts: on rejection the error carries the
/// diagnostics rendered against the input file.
pub fn generate_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &CodegenConfig,
) -> Result<Generated, GenerateError> {
    let input = input.as_ref();
    let output = output.as_ref();

    let source = fs::read_to_string(input).map_err(|source| GenerateError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let generated = generate_with_config(&source, config).map_err(|diagnostics| {
        let rendered = diagnostics.render(&source, &input.display().to_string());
        GenerateError::Rejected {
            path: input.to_path_buf(),
            diagnostics,
            rendered,
        }
    })?;

    fs::write(output, &generated.source).map_err(|source| GenerateError::Write {
        path: output.to_path_buf(),
        source,
    })?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        interfaces = generated.interfaces.len(),
        "generated logging companions"
    );

    Ok(generated)
}

fn context<'a>(item: &ItemTrait, nested: bool, config: &'a CodegenConfig) -> InterfaceContext<'a> {
    let mut triggers = item.attrs.iter().filter(|attr| is_extensions_attr(attr));
    let args = triggers.next().map(attr_args).unwrap_or_default();
    InterfaceContext {
        args,
        nested,
        trigger_count: 1 + triggers.count(),
        config,
    }
}

/// Re-parses the assembled file so `prettyplease` sees companion items as
/// real syntax rather than opaque tokens.
fn pretty_print(file: &File) -> Result<String, Diagnostics> {
    let reparsed: File = syn::parse2(file.to_token_stream()).map_err(|err| {
        Diagnostics::from(
            Violation::from_syn(ViolationKind::InvalidSource, &err)
                .help("the generated items failed to parse; this is a generator bug"),
        )
    })?;
    Ok(prettyplease::unparse(&reparsed))
}

/// Collects annotated traits declared inside other items.
#[derive(Default)]
struct NestedInterfaces {
    found: Vec<ItemTrait>,
}

impl<'ast> Visit<'ast> for NestedInterfaces {
    fn visit_item_trait(&mut self, node: &'ast ItemTrait) {
        if node.attrs.iter().any(is_extensions_attr) {
            self.found.push(node.clone());
        }
        syn::visit::visit_item_trait(self, node);
    }
}
