//! Best-effort target summaries

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// What kind of callable a target turned out to be
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TargetKind {
    Function,
    Method,
    #[default]
    Unknown,
}

/// Best-effort description of a target
///
/// Built even when resolution fails; unresolved targets have `found` unset,
/// their fields degraded to unknown values and the reason in `diagnostics`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSummary {
    pub found: bool,
    /// Whether the target's module could be imported
    ///
    /// Always false for file-backed targets, which are parsed, not imported.
    pub importable: bool,
    pub kind: TargetKind,
    pub signature: Option<String>,
    /// First line of the docstring
    pub short_doc: Option<String>,
    pub diagnostics: Vec<String>,
}

impl TargetSummary {
    /// Summary of a target that could not be resolved
    pub fn not_found(importable: bool, diagnostic: impl Into<String>) -> Self {
        Self {
            found: false,
            importable,
            kind: TargetKind::Unknown,
            signature: None,
            short_doc: None,
            diagnostics: vec![diagnostic.into()],
        }
    }
}
