//! Configuration loading from files and environment variables

use crate::error::{Error, Result, ResultExt};
use config::{Config as ConfigLib, ConfigBuilder as LibConfigBuilder, Environment, File};
use std::path::Path;
use tracing::debug;

use super::defaults::*;
use super::{global_config_path, Config, PROJECT_CONFIG_FILE};

/// Helper to set a config default with consistent error mapping
fn set_config_default<T: Into<config::Value>>(
    builder: LibConfigBuilder<config::builder::DefaultState>,
    key: &str,
    value: T,
) -> Result<LibConfigBuilder<config::builder::DefaultState>> {
    builder
        .set_default(key, value)
        .map_err(|e| Error::config(format!("Failed to set {key} default: {e}")))
}

impl Config {
    /// Loads configuration from TOML files with environment variable overrides
    ///
    /// Files that do not exist are skipped. Environment variables are
    /// prefixed with `CARRON_` and use double underscores for nested values,
    /// e.g. `CARRON_RUNNER__PROGRAM=pytest`.
    pub fn from_files(paths: &[&Path]) -> Result<Self> {
        let builder = ConfigLib::builder();

        // config crate doesn't apply serde defaults for missing sections
        let builder = set_config_default(builder, "pipeline.output_dir", default_output_dir())?;
        let builder = set_config_default(builder, "pipeline.mode", DEFAULT_MODE)?;
        let builder = set_config_default(builder, "pipeline.language", default_language())?;
        let builder = set_config_default(builder, "runner.program", default_runner_program())?;
        let builder = set_config_default(builder, "runner.check_args", default_check_args())?;
        let builder = set_config_default(builder, "runner.run_args", Vec::<String>::new())?;
        let builder = set_config_default(builder, "python.search_paths", default_search_paths())?;
        let mut builder =
            set_config_default(builder, "python.use_pythonpath", default_use_pythonpath())?;

        for path in paths {
            if path.exists() {
                debug!("Loading configuration from {}", path.display());
                builder = builder.add_source(File::from(*path));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("CARRON")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build config")?;

        config
            .try_deserialize()
            .context("Failed to deserialize config")
    }

    /// Loads configuration from a single file plus environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_files(&[path])
    }

    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Load layered configuration
    ///
    /// Precedence (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Global file (~/.carron/config.toml)
    /// 3. `carron.toml` in the working directory, or the custom --config path
    /// 4. Environment variables (CARRON_*)
    ///
    /// An explicit path that does not exist is an error.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let global = global_config_path().ok();
        let project = match config_path {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::config(format!(
                        "Config file not found: {}",
                        p.display()
                    )));
                }
                p.to_path_buf()
            }
            None => Path::new(PROJECT_CONFIG_FILE).to_path_buf(),
        };

        let mut paths: Vec<&Path> = Vec::new();
        if let Some(global) = global.as_deref() {
            paths.push(global);
        }
        paths.push(&project);

        let config = Self::from_files(&paths)?;
        config.validate()?;
        Ok(config)
    }
}
