//! Configuration module for carron
//!
//! Configuration is loaded from TOML files and environment variables and
//! passed to the pipeline as an explicit record. CLI flags override it.

mod defaults;
mod loading;


use crate::error::{Error, Result};
use crate::mode::ExecutionMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use defaults::*;

/// Name of the per-project configuration file
pub const PROJECT_CONFIG_FILE: &str = "carron.toml";

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.carron/config.toml` and holds user
/// preferences that apply across all projects.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".carron").join("config.toml"))
}

/// Main configuration structure for carron
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Pipeline defaults
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// External test runner
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Python adapter settings
    #[serde(default)]
    pub python: PythonConfig,
}

/// Defaults applied when a command does not override them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory generated tests are written under
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// What to do with artifacts once written
    #[serde(default)]
    pub mode: ExecutionMode,

    /// Adapter used to resolve targets
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            mode: ExecutionMode::default(),
            language: default_language(),
        }
    }
}

/// External test runner invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Program to execute
    #[serde(default = "default_runner_program")]
    pub program: String,

    /// Arguments placed before the artifact path in `check` mode
    #[serde(default = "default_check_args")]
    pub check_args: Vec<String>,

    /// Arguments placed before the artifact path in `run` mode
    #[serde(default)]
    pub run_args: Vec<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            program: default_runner_program(),
            check_args: default_check_args(),
            run_args: Vec::new(),
        }
    }
}

/// Python module resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonConfig {
    /// Roots searched, in order, when resolving module targets
    #[serde(default = "default_search_paths")]
    pub search_paths: Vec<String>,

    /// Append the entries of `PYTHONPATH` to `search_paths`
    #[serde(default = "default_use_pythonpath")]
    pub use_pythonpath: bool,
}

impl Default for PythonConfig {
    fn default() -> Self {
        Self {
            search_paths: default_search_paths(),
            use_pythonpath: default_use_pythonpath(),
        }
    }
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.output_dir.trim().is_empty() {
            return Err(Error::config("pipeline.output_dir must not be empty"));
        }

        if !SUPPORTED_LANGUAGES.contains(&self.pipeline.language.as_str()) {
            return Err(Error::config(format!(
                "Unsupported language '{}'. Valid options: {}",
                self.pipeline.language,
                SUPPORTED_LANGUAGES.join(", ")
            )));
        }

        if self.runner.program.trim().is_empty() {
            return Err(Error::config("runner.program must not be empty"));
        }

        Ok(())
    }
}
