//! Generated test artifacts

use serde::{Deserialize, Serialize};

/// A single generated file, not yet written to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    /// Path relative to the output root
    pub relative_path: String,
    /// File content, written verbatim
    pub content: String,
}

impl GeneratedArtifact {
    pub fn new(relative_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            content: content.into(),
        }
    }
}

/// Artifacts produced by a single forge run, with human readable diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub artifacts: Vec<GeneratedArtifact>,
    pub diagnostics: Vec<String>,
}

impl GenerationResult {
    pub fn new(artifacts: Vec<GeneratedArtifact>) -> Self {
        Self {
            artifacts,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_diagnostic(mut self, diagnostic: impl Into<String>) -> Self {
        self.diagnostics.push(diagnostic.into());
        self
    }
}
