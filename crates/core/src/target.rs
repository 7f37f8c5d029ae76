//! Target string parsing
//!
//! A target names a function or method to generate tests for. It has the
//! form `<locator>:<qualname>` where the locator is either a source file
//! (`pkg/utils.py`) or a dotted module path (`pkg.utils`), and the qualname
//! is either a bare name (`parse`) or a single `Class.method` pair.

use crate::error::AdapterError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use strum::{AsRefStr, Display as StrumDisplay};

/// Separator between the locator and the qualified name
pub const LOCATOR_SEPARATOR: char = ':';

/// Separator between a class name and its attribute
pub const QUALNAME_SEPARATOR: char = '.';

/// Raw target string as supplied by the caller. No validation is performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetRef {
    raw: String,
}

impl TargetRef {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for TargetRef {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for TargetRef {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

/// How the locator of a target is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, StrumDisplay, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceKind {
    /// Locator is a source file, resolved by parsing it
    File,
    /// Locator is a module path, resolved through the module system
    Module,
}

/// A target split into its locator and qualified name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedTarget {
    raw: String,
    locator: String,
    source_kind: SourceKind,
    qualified_name: String,
    class_name: Option<String>,
    attribute_name: String,
}

impl ParsedTarget {
    /// Parse a raw target
    ///
    /// `file_extensions` lists the host language's source extensions without
    /// the leading dot; a locator ending in one of them is file-backed.
    pub fn parse(target: &TargetRef, file_extensions: &[&str]) -> Result<Self, AdapterError> {
        let raw = target.as_str();

        let Some((locator, qualname)) = raw.split_once(LOCATOR_SEPARATOR) else {
            return Err(AdapterError::target_parse(
                "Target must be in form 'module:qualname' or 'file.py:qualname'",
            ));
        };

        let locator = locator.trim();
        let qualname = qualname.trim();

        if locator.is_empty() || qualname.is_empty() {
            return Err(AdapterError::target_parse(
                "Target must have non-empty locator and qualname",
            ));
        }

        let (class_name, attribute_name) = match qualname.split_once(QUALNAME_SEPARATOR) {
            None => (None, qualname),
            Some((class_name, attribute_name)) => {
                if class_name.is_empty()
                    || attribute_name.is_empty()
                    || attribute_name.contains(QUALNAME_SEPARATOR)
                {
                    return Err(AdapterError::target_parse(
                        "Only 'Class.method' qualnames are supported",
                    ));
                }
                (Some(class_name.to_string()), attribute_name)
            }
        };

        let source_kind = if has_extension(locator, file_extensions) {
            SourceKind::File
        } else {
            SourceKind::Module
        };

        Ok(Self {
            raw: raw.to_string(),
            locator: locator.to_string(),
            source_kind,
            qualified_name: qualname.to_string(),
            class_name,
            attribute_name: attribute_name.to_string(),
        })
    }

    /// The raw string this target was parsed from
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// File path or module path
    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn source_kind(&self) -> SourceKind {
        self.source_kind
    }

    /// Either `name` or `Class.name`
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    pub fn is_method(&self) -> bool {
        self.class_name.is_some()
    }
}

impl Display for ParsedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.locator, self.qualified_name)
    }
}

fn has_extension(locator: &str, file_extensions: &[&str]) -> bool {
    file_extensions.iter().any(|ext| {
        locator
            .strip_suffix(ext)
            .is_some_and(|stem| stem.ends_with('.') && stem.len() > 1)
    })
}
