//! Language adapters for carron
//!
//! An adapter turns a parsed target into either a best-effort
//! [`TargetSummary`] or a strictly [`ValidatedTarget`]. Adapters never
//! write files or spawn processes.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use carron_core::{AdapterError, Config, Error, ParsedTarget, Result, TargetRef};

pub mod common;
pub mod definition;
pub mod python;
pub mod summary;
pub mod symbol;
pub mod validated;

pub use definition::{Definition, Parameter, ParameterKind};
pub use python::{ModuleResolver, PythonAdapter};
pub use summary::{TargetKind, TargetSummary};
pub use symbol::{
    DescribeError, ResolveFailure, Symbol, SymbolDescription, SymbolKind, SymbolResolver,
};
pub use validated::{ResolvedPayload, SourceDefinition, ValidatedTarget};

/// Resolves targets for one language
pub trait Adapter: Send + Sync {
    /// Registry name of the adapter
    fn name(&self) -> &'static str;

    /// Extensions marking a locator as a source file
    fn file_extensions(&self) -> &'static [&'static str];

    /// Parse a raw target for this language
    fn parse(&self, target: &TargetRef) -> std::result::Result<ParsedTarget, AdapterError> {
        ParsedTarget::parse(target, self.file_extensions())
    }

    /// Best-effort summary
    ///
    /// Recoverable lookup failures are reported through the summary's
    /// diagnostics. Only a missing or syntactically invalid source file
    /// is an error.
    fn summarize(&self, target: &ParsedTarget)
        -> std::result::Result<TargetSummary, AdapterError>;

    /// Strict validation; any resolution failure is an error
    fn validate(&self, target: &ParsedTarget)
        -> std::result::Result<ValidatedTarget, AdapterError>;
}

/// Adapter descriptor for automatic registration
pub struct AdapterDescriptor {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    pub factory: fn(&Config) -> Box<dyn Adapter>,
}

inventory::collect!(AdapterDescriptor);

/// Create the adapter registered under `name`
pub fn create_adapter(name: &str, config: &Config) -> Result<Box<dyn Adapter>> {
    let name_lower = name.to_lowercase();

    inventory::iter::<AdapterDescriptor>
        .into_iter()
        .find(|descriptor| descriptor.name == name_lower)
        .map(|descriptor| (descriptor.factory)(config))
        .ok_or_else(|| {
            Error::config(format!(
                "No adapter registered for language '{name}'. Available: {}",
                available_adapters().join(", ")
            ))
        })
}

/// Names of all registered adapters
pub fn available_adapters() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = inventory::iter::<AdapterDescriptor>
        .into_iter()
        .map(|descriptor| descriptor.name)
        .collect();
    names.sort_unstable();
    names
}
