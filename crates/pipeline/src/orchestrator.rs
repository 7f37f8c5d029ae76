//! The gated generation pipeline
//!
//! A run moves through `Parsed -> Validated -> Generated -> Written` and
//! ends in `Emitted`, `Checked` or `Executed` depending on the execution
//! mode. Parse and validation failures abort the run before anything is
//! generated or written.

use crate::error::PipelineError;
use crate::runner::TestRunner;
use crate::writer::ArtifactWriter;
use carron_core::{Config, ExecutionMode, TargetRef};
use carron_forges::{create_forge, plan, ForgeKind, GenerationContext};
use carron_languages::{create_adapter, Adapter};
use serde::Serialize;
use std::path::PathBuf;
use strum::{AsRefStr, Display};
use tracing::{debug, info, warn};

/// Pipeline states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    Parsed,
    Validated,
    Generated,
    Written,
    Emitted,
    Checked,
    Executed,
    /// Parse or validation failed
    Aborted,
}

impl Stage {
    /// Terminal state reached after writing in `mode`
    pub fn after_write(mode: ExecutionMode) -> Self {
        match mode {
            ExecutionMode::Emit => Self::Emitted,
            ExecutionMode::Check => Self::Checked,
            ExecutionMode::Run => Self::Executed,
        }
    }
}

/// One invocation of the pipeline
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    pub target: TargetRef,
    /// Forge to use; the planner decides when unset
    pub forge: Option<ForgeKind>,
    pub mode: ExecutionMode,
    pub output_dir: PathBuf,
}

impl PipelineRequest {
    /// Request using the configured output directory and mode
    pub fn from_config(target: impl Into<TargetRef>, config: &Config) -> Self {
        Self {
            target: target.into(),
            forge: None,
            mode: config.pipeline.mode,
            output_dir: PathBuf::from(&config.pipeline.output_dir),
        }
    }

    pub fn with_forge(mut self, forge: ForgeKind) -> Self {
        self.forge = Some(forge);
        self
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub final_stage: Stage,
    pub forge: ForgeKind,
    pub written: Vec<PathBuf>,
    /// Forge diagnostics
    pub diagnostics: Vec<String>,
}

/// Runs targets through resolution, generation, writing and execution
pub struct Pipeline {
    adapter: Box<dyn Adapter>,
    runner: TestRunner,
}

impl Pipeline {
    pub fn new(adapter: Box<dyn Adapter>, runner: TestRunner) -> Self {
        Self { adapter, runner }
    }

    /// Pipeline using the configured language adapter and runner
    pub fn from_config(config: &Config) -> carron_core::Result<Self> {
        let adapter = create_adapter(&config.pipeline.language, config)?;
        Ok(Self::new(adapter, TestRunner::new(&config.runner)))
    }

    /// Run a request to completion
    ///
    /// An `Err` means the run stopped early; [`PipelineError::is_aborted`]
    /// tells whether it stopped before generation.
    pub fn run(&self, request: &PipelineRequest) -> Result<PipelineReport, PipelineError> {
        let target = &request.target;

        let parsed = self.adapter.parse(target).inspect_err(|e| abort(target, e))?;
        debug!("{target}: {}", Stage::Parsed);

        let validated = self.adapter.validate(&parsed).inspect_err(|e| abort(target, e))?;
        debug!("{target}: {}", Stage::Validated);

        let summary = self.adapter.summarize(&parsed).inspect_err(|e| abort(target, e))?;
        for diagnostic in &summary.diagnostics {
            warn!("{target}: {diagnostic}");
        }

        let forge_kind = request.forge.unwrap_or_else(|| plan(target).forge);
        let forge = create_forge(forge_kind).ok_or(PipelineError::ForgeUnavailable(forge_kind))?;
        let context = GenerationContext::new(target.clone())
            .with_summary(summary)
            .with_validated(validated);
        let result = forge.generate(&context);
        debug!(
            "{target}: {} {} artifact(s) with {forge_kind}",
            Stage::Generated,
            result.artifacts.len()
        );
        for diagnostic in &result.diagnostics {
            warn!("{target}: {diagnostic}");
        }

        let written = ArtifactWriter::new(&request.output_dir).write_all(&result.artifacts)?;
        debug!("{target}: {}", Stage::Written);

        if request.mode.invokes_runner() {
            // Stop at the first failing artifact
            for path in &written {
                self.runner.invoke(request.mode, path)?;
            }
        }

        let final_stage = Stage::after_write(request.mode);
        info!("{target}: {final_stage}");

        Ok(PipelineReport {
            final_stage,
            forge: forge_kind,
            written,
            diagnostics: result.diagnostics,
        })
    }
}

fn abort(target: &TargetRef, error: &carron_core::AdapterError) {
    debug!("{target}: {} ({error})", Stage::Aborted);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_stage_per_mode() {
        assert_eq!(Stage::after_write(ExecutionMode::Emit), Stage::Emitted);
        assert_eq!(Stage::after_write(ExecutionMode::Check), Stage::Checked);
        assert_eq!(Stage::after_write(ExecutionMode::Run), Stage::Executed);
    }

    #[test]
    fn test_request_from_config() {
        let mut config = Config::default();
        config.pipeline.mode = ExecutionMode::Check;

        let request = PipelineRequest::from_config("m:f", &config);
        assert_eq!(request.mode, ExecutionMode::Check);
        assert_eq!(request.output_dir, PathBuf::from("tests/generated"));
        assert_eq!(request.forge, None);

        let request = request
            .with_forge(ForgeKind::Diff)
            .with_mode(ExecutionMode::Emit)
            .with_output_dir("out");
        assert_eq!(request.forge, Some(ForgeKind::Diff));
        assert_eq!(request.mode, ExecutionMode::Emit);
        assert_eq!(request.output_dir, PathBuf::from("out"));
    }
}
