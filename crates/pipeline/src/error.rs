//! Pipeline error types

use carron_core::AdapterError;
use carron_forges::ForgeKind;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code for targets rejected before generation
pub const EXIT_ABORTED: u8 = 2;

/// Exit code when the runner could not be started
pub const EXIT_RUNNER_LAUNCH: u8 = 127;

/// Reasons a pipeline run stops early
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The target failed to parse or validate; nothing was generated
    #[error(transparent)]
    Aborted(#[from] AdapterError),

    #[error("No forge registered for '{0}'")]
    ForgeUnavailable(ForgeKind),

    #[error("Invalid artifact path '{0}': must be relative and stay inside the output directory")]
    InvalidArtifactPath(String),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to launch test runner '{program}': {source}")]
    RunnerLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Test runner failed for {} ({status})", .path.display())]
    RunnerFailed {
        path: PathBuf,
        /// Rendered exit status
        status: String,
        /// Exit code, if the runner exited normally
        code: Option<i32>,
    },
}

impl PipelineError {
    /// Whether the run stopped before any artifact was generated
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted(_))
    }

    /// Process exit code for this failure
    ///
    /// A failing runner's own exit code is passed through when it fits.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Aborted(_) => EXIT_ABORTED,
            Self::RunnerLaunch { .. } => EXIT_RUNNER_LAUNCH,
            Self::RunnerFailed { code, .. } => code
                .and_then(|code| u8::try_from(code).ok())
                .filter(|code| *code != 0)
                .unwrap_or(1),
            Self::ForgeUnavailable(_) | Self::InvalidArtifactPath(_) | Self::Write { .. } => 1,
        }
    }
}
