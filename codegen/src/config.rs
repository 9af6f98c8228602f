//! Generator configuration.

use syn::{Path, parse_quote};

/// Environment variable that makes the attribute macro print its expansion.
pub const DEBUG_ENV: &str = "TYPED_LOGGING_DEBUG";

/// Header placed at the top of generated source files.
pub const GENERATED_HEADER: &str =
    "// @generated by typed_logging_codegen from a logging interface description. Do not edit.\n";

/// Configuration for code generation.
#[derive(Debug, Clone)]
pub struct CodegenConfig {
    /// Path of the runtime crate generated code refers to. A
    /// `#[logger_extensions(crate = ...)]` argument takes precedence.
    pub runtime_crate: Path,
    /// Whether `generate` prefixes its output with [`GENERATED_HEADER`].
    pub header: bool,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            runtime_crate: parse_quote!(::typed_logging),
            header: true,
        }
    }
}

impl CodegenConfig {
    /// Sets the runtime crate path.
    pub fn runtime_crate(mut self, path: Path) -> Self {
        self.runtime_crate = path;
        self
    }

    /// Enables or disables the generated-file header.
    pub fn header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Returns true when expansion dumps were requested via [`DEBUG_ENV`].
    pub fn debug_dump_requested() -> bool {
        std::env::var_os(DEBUG_ENV).is_some()
    }
}
