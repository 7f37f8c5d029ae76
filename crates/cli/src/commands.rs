//! Command handlers

use anyhow::{Context, Result};
use carron_core::{Config, ExecutionMode, TargetRef};
use carron_forges::{plan, ForgeKind};
use carron_pipeline::{Pipeline, PipelineRequest};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

/// Arguments shared by every pipeline command
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub target: String,
    /// Overrides `pipeline.output_dir`
    pub output: Option<PathBuf>,
    /// Overrides `pipeline.mode`
    pub mode: Option<ExecutionMode>,
}

impl RunOptions {
    fn request(&self, config: &Config, forge: Option<ForgeKind>) -> PipelineRequest {
        let mut request = PipelineRequest::from_config(self.target.as_str(), config);
        if let Some(output) = &self.output {
            request = request.with_output_dir(output);
        }
        if let Some(mode) = self.mode {
            request = request.with_mode(mode);
        }
        if let Some(forge) = forge {
            request = request.with_forge(forge);
        }
        request
    }
}

/// Print the planner decision, then run the pipeline with it if `apply` is set
pub fn suggest(config: &Config, options: &RunOptions, apply: bool) -> Result<ExitCode> {
    let decision = plan(&TargetRef::from(options.target.as_str()));
    let json = decision
        .to_json()
        .context("Failed to serialize planner decision")?;
    println!("{json}");

    if !apply {
        return Ok(ExitCode::SUCCESS);
    }
    generate(config, options, Some(decision.forge))
}

/// Run the full pipeline, with a fixed forge or the planner's choice
pub fn generate(config: &Config, options: &RunOptions, forge: Option<ForgeKind>) -> Result<ExitCode> {
    let pipeline = Pipeline::from_config(config).context("Failed to set up pipeline")?;
    let request = options.request(config, forge);

    match pipeline.run(&request) {
        Ok(report) => {
            debug!(
                "Finished {} with {} forge, {} file(s) written",
                report.final_stage,
                report.forge,
                report.written.len()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}
