//! Symbol resolution capability
//!
//! Import-backed targets are resolved through a [`SymbolResolver`] rather
//! than through language runtime primitives, so adapters stay free of
//! subprocesses and new resolution strategies can be swapped in.

use crate::definition::Definition;
use crate::summary::TargetKind;
use std::path::{Path, PathBuf};
use strum::{AsRefStr, Display};
use thiserror::Error;

/// What a resolved name is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum SymbolKind {
    Function,
    Class,
    /// Function defined in a class body
    Method,
    /// Any other binding: assignments and imports
    Value,
}

/// A name resolved inside a module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    module: String,
    origin: PathBuf,
    qualified_name: String,
    kind: SymbolKind,
    definition: Option<Definition>,
    docstring: Option<String>,
}

impl Symbol {
    pub fn new(
        module: impl Into<String>,
        origin: impl Into<PathBuf>,
        qualified_name: impl Into<String>,
        kind: SymbolKind,
    ) -> Self {
        Self {
            module: module.into(),
            origin: origin.into(),
            qualified_name: qualified_name.into(),
            kind,
            definition: None,
            docstring: None,
        }
    }

    /// Attach the callable definition backing this symbol
    ///
    /// For classes this is the `__init__` method.
    pub fn with_definition(mut self, definition: Definition) -> Self {
        self.definition = Some(definition);
        self
    }

    pub fn with_docstring(mut self, docstring: Option<String>) -> Self {
        self.docstring = docstring;
        self
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// Source file of the defining module
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn definition(&self) -> Option<&Definition> {
        self.definition.as_ref()
    }

    pub fn docstring(&self) -> Option<&str> {
        self.docstring.as_deref()
    }
}

/// Why a symbol could not be resolved
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveFailure {
    /// The module itself could not be loaded
    #[error("{0}")]
    Import(String),

    /// The module loaded but the attribute chain did not resolve
    #[error("{0}")]
    Attribute(String),
}

/// Why a resolved symbol could not be described
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescribeError {
    #[error("'{0}' is not callable")]
    NotCallable(String),

    #[error("no signature found for '{0}'")]
    NoSignature(String),
}

/// Introspected facts about a symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolDescription {
    pub kind: TargetKind,
    pub signature: Option<String>,
    pub doc: Option<String>,
}

/// Resolves `module:qualname` pairs to symbols and describes them
pub trait SymbolResolver: Send + Sync {
    /// Resolve `attribute` in `module`, going through `class_name` when given
    fn resolve_symbol(
        &self,
        module: &str,
        class_name: Option<&str>,
        attribute: &str,
    ) -> Result<Symbol, ResolveFailure>;

    /// Introspect a resolved symbol
    fn describe_symbol(&self, symbol: &Symbol) -> Result<SymbolDescription, DescribeError>;
}
