//! Input handed to a forge

use carron_core::TargetRef;
use carron_languages::{TargetSummary, ValidatedTarget};

/// Everything a forge may use to generate artifacts for one target
///
/// Forges never resolve targets themselves; whatever the pipeline learned
/// about the target is carried here.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    pub target: TargetRef,
    pub summary: Option<TargetSummary>,
    pub validated: Option<ValidatedTarget>,
}

impl GenerationContext {
    pub fn new(target: impl Into<TargetRef>) -> Self {
        Self {
            target: target.into(),
            summary: None,
            validated: None,
        }
    }

    pub fn with_summary(mut self, summary: TargetSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_validated(mut self, validated: ValidatedTarget) -> Self {
        self.validated = Some(validated);
        self
    }
}
