//! Python adapter
//!
//! Supported target forms:
//!
//! - `module:func`
//! - `module:Class.method`
//! - `file.py:func`
//! - `file.py:Class.method`
//!
//! File targets are resolved by reading and parsing the file. Module
//! targets are resolved through a [`SymbolResolver`], by default the
//! static [`ModuleResolver`].

mod locate;
pub mod module_path;
pub mod module_resolver;
pub(crate) mod parsing;
pub(crate) mod utils;

#[cfg(test)]
mod tests;

use crate::definition::first_doc_line;
use crate::summary::{TargetKind, TargetSummary};
use crate::symbol::{ResolveFailure, SymbolResolver};
use crate::validated::{ResolvedPayload, SourceDefinition, ValidatedTarget};
use crate::{Adapter, AdapterDescriptor};
use carron_core::{AdapterError, Config, ParsedTarget, SourceKind};
use parsing::ParsedSource;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, warn};

pub use module_resolver::ModuleResolver;

/// Extensions that mark a locator as a Python file
pub const PYTHON_FILE_EXTENSIONS: &[&str] = &["py"];

inventory::submit! {
    AdapterDescriptor {
        name: "python",
        extensions: PYTHON_FILE_EXTENSIONS,
        factory: create_python_adapter,
    }
}

fn create_python_adapter(config: &Config) -> Box<dyn Adapter> {
    Box::new(PythonAdapter::new(&config.python))
}

/// Resolves Python targets by parsing files or resolving modules
pub struct PythonAdapter {
    resolver: Box<dyn SymbolResolver>,
}

impl PythonAdapter {
    /// Adapter resolving modules on the configured search paths
    pub fn new(config: &carron_core::PythonConfig) -> Self {
        Self::with_resolver(Box::new(ModuleResolver::from_config(config)))
    }

    /// Adapter using a custom symbol resolver for module targets
    pub fn with_resolver(resolver: Box<dyn SymbolResolver>) -> Self {
        Self { resolver }
    }

    /// Read and parse a file-backed target's source
    fn load_file(path: &str) -> Result<ParsedSource, AdapterError> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AdapterError::target_resolution(format!("File not found: {path}")),
            _ => AdapterError::target_resolution(format!("Failed to read {path}: {e}")),
        })?;

        let source = String::from_utf8(bytes).map_err(|e| {
            let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
            let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
            AdapterError::invalid_source(
                path,
                format!("(unicode error) source is not valid UTF-8: {}", e.utf8_error()),
                line,
            )
        })?;

        ParsedSource::parse(source)
            .map_err(|issue| AdapterError::invalid_source(path, issue.message, issue.line))
    }

    fn summarize_file(&self, target: &ParsedTarget) -> Result<TargetSummary, AdapterError> {
        let parsed = Self::load_file(target.locator())?;

        match locate::find_definition(parsed.root(), target, parsed.source()) {
            Ok(node) => {
                let definition =
                    utils::build_definition(node, target.class_name(), parsed.source());
                Ok(TargetSummary {
                    found: true,
                    importable: false,
                    kind: file_target_kind(target),
                    signature: Some(definition.parameter_names_signature()),
                    short_doc: first_doc_line(definition.docstring.as_deref()),
                    diagnostics: Vec::new(),
                })
            }
            Err(e) => {
                warn!("Target {target} not found: {e}");
                Ok(TargetSummary::not_found(false, e.to_string()))
            }
        }
    }

    fn summarize_module(&self, target: &ParsedTarget) -> TargetSummary {
        let symbol = match self.resolver.resolve_symbol(
            target.locator(),
            target.class_name(),
            target.attribute_name(),
        ) {
            Ok(symbol) => symbol,
            Err(ResolveFailure::Import(message)) => {
                warn!("Import of '{}' failed: {message}", target.locator());
                return TargetSummary::not_found(false, format!("Import failed: {message}"));
            }
            Err(ResolveFailure::Attribute(message)) => {
                warn!("Symbol '{}' not found: {message}", target.qualified_name());
                return TargetSummary::not_found(true, format!("Symbol not found: {message}"));
            }
        };

        match self.resolver.describe_symbol(&symbol) {
            Ok(description) => TargetSummary {
                found: true,
                importable: true,
                kind: if target.is_method() {
                    TargetKind::Method
                } else {
                    description.kind
                },
                signature: description.signature,
                short_doc: description.doc,
                diagnostics: Vec::new(),
            },
            Err(e) => {
                debug!("Could not describe '{}': {e}", target.qualified_name());
                TargetSummary {
                    found: true,
                    importable: true,
                    kind: if target.is_method() {
                        TargetKind::Method
                    } else {
                        TargetKind::Unknown
                    },
                    signature: None,
                    short_doc: None,
                    diagnostics: vec![format!("Signature unavailable: {e}")],
                }
            }
        }
    }
}

impl Adapter for PythonAdapter {
    fn name(&self) -> &'static str {
        "python"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        PYTHON_FILE_EXTENSIONS
    }

    fn summarize(&self, target: &ParsedTarget) -> Result<TargetSummary, AdapterError> {
        debug!("Summarizing {} target {target}", target.source_kind());
        match target.source_kind() {
            SourceKind::File => self.summarize_file(target),
            SourceKind::Module => Ok(self.summarize_module(target)),
        }
    }

    fn validate(&self, target: &ParsedTarget) -> Result<ValidatedTarget, AdapterError> {
        debug!("Validating {} target {target}", target.source_kind());

        if target.source_kind() == SourceKind::File {
            let parsed = Self::load_file(target.locator())?;
            let node = locate::find_definition(parsed.root(), target, parsed.source())?;
            let definition = utils::build_definition(node, target.class_name(), parsed.source());
            return Ok(ValidatedTarget::new(
                target.clone(),
                ResolvedPayload::Syntax(SourceDefinition {
                    path: PathBuf::from(target.locator()),
                    definition,
                }),
            ));
        }

        let symbol = self
            .resolver
            .resolve_symbol(
                target.locator(),
                target.class_name(),
                target.attribute_name(),
            )
            .map_err(|failure| match failure {
                ResolveFailure::Import(message) => AdapterError::target_resolution(format!(
                    "Failed to import module '{}': {message}",
                    target.locator()
                )),
                ResolveFailure::Attribute(message) => AdapterError::target_resolution(format!(
                    "Symbol '{}' not found in module '{}': {message}",
                    target.qualified_name(),
                    target.locator()
                )),
            })?;

        Ok(ValidatedTarget::new(
            target.clone(),
            ResolvedPayload::Symbol(symbol),
        ))
    }
}

fn file_target_kind(target: &ParsedTarget) -> TargetKind {
    if target.is_method() {
        TargetKind::Method
    } else {
        TargetKind::Function
    }
}
