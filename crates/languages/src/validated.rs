//! Strictly validated targets

use crate::definition::Definition;
use crate::symbol::Symbol;
use carron_core::ParsedTarget;
use std::path::{Path, PathBuf};

/// A definition located by parsing a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDefinition {
    pub path: PathBuf,
    pub definition: Definition,
}

/// What a target resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedPayload {
    /// File-backed target: the definition node from the parsed file
    Syntax(SourceDefinition),
    /// Import-backed target: the symbol returned by the resolver
    Symbol(Symbol),
}

impl ResolvedPayload {
    /// The definition behind the target, when it has one
    pub fn definition(&self) -> Option<&Definition> {
        match self {
            Self::Syntax(source) => Some(&source.definition),
            Self::Symbol(symbol) => symbol.definition(),
        }
    }

    /// File the target was resolved from
    pub fn origin(&self) -> &Path {
        match self {
            Self::Syntax(source) => &source.path,
            Self::Symbol(symbol) => symbol.origin(),
        }
    }
}

/// A target that passed strict validation
///
/// Only adapters in this crate can build one, and only with a complete
/// payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTarget {
    target: ParsedTarget,
    payload: ResolvedPayload,
}

impl ValidatedTarget {
    pub(crate) fn new(target: ParsedTarget, payload: ResolvedPayload) -> Self {
        Self { target, payload }
    }

    pub fn target(&self) -> &ParsedTarget {
        &self.target
    }

    pub fn payload(&self) -> &ResolvedPayload {
        &self.payload
    }
}
