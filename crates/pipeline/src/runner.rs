//! Invoking the external test runner

use crate::error::PipelineError;
use carron_core::{ExecutionMode, RunnerConfig};
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Runs a test runner program against generated files
#[derive(Debug, Clone)]
pub struct TestRunner {
    program: String,
    check_args: Vec<String>,
    run_args: Vec<String>,
}

impl TestRunner {
    pub fn new(config: &RunnerConfig) -> Self {
        Self {
            program: config.program.clone(),
            check_args: config.check_args.clone(),
            run_args: config.run_args.clone(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments for a mode, or None if the mode does not run anything
    pub fn args_for(&self, mode: ExecutionMode, path: &Path) -> Option<Vec<String>> {
        let leading = match mode {
            ExecutionMode::Emit => return None,
            ExecutionMode::Check => &self.check_args,
            ExecutionMode::Run => &self.run_args,
        };

        let mut args = leading.clone();
        args.push(path.display().to_string());
        Some(args)
    }

    /// Run the runner on one file, blocking until it exits
    ///
    /// The runner inherits stdout and stderr.
    pub fn invoke(&self, mode: ExecutionMode, path: &Path) -> Result<(), PipelineError> {
        let Some(args) = self.args_for(mode, path) else {
            debug!("Mode {mode} does not invoke the runner");
            return Ok(());
        };

        info!("Running {} {}", self.program, args.join(" "));
        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|source| PipelineError::RunnerLaunch {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(PipelineError::RunnerFailed {
                path: path.to_path_buf(),
                status: status.to_string(),
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_arguments() {
        let runner = TestRunner::new(&RunnerConfig::default());
        let path = Path::new("tests/generated/test_m_f.py");

        assert_eq!(runner.program(), "pytest");
        assert_eq!(runner.args_for(ExecutionMode::Emit, path), None);
        assert_eq!(
            runner.args_for(ExecutionMode::Check, path).unwrap(),
            vec!["--collect-only", "-q", "tests/generated/test_m_f.py"]
        );
        assert_eq!(
            runner.args_for(ExecutionMode::Run, path).unwrap(),
            vec!["tests/generated/test_m_f.py"]
        );
    }

    #[test]
    fn test_missing_program_is_launch_error() {
        let runner = TestRunner::new(&RunnerConfig {
            program: "carron-no-such-runner".to_string(),
            check_args: Vec::new(),
            run_args: Vec::new(),
        });

        let err = runner
            .invoke(ExecutionMode::Run, Path::new("test_x.py"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::RunnerLaunch { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_reported() {
        let passing = TestRunner::new(&RunnerConfig {
            program: "true".to_string(),
            check_args: Vec::new(),
            run_args: Vec::new(),
        });
        assert!(passing.invoke(ExecutionMode::Check, Path::new("x.py")).is_ok());

        let failing = TestRunner::new(&RunnerConfig {
            program: "false".to_string(),
            check_args: Vec::new(),
            run_args: Vec::new(),
        });
        let err = failing
            .invoke(ExecutionMode::Run, Path::new("x.py"))
            .unwrap_err();
        let PipelineError::RunnerFailed { code, .. } = err else {
            panic!("expected runner failure, got {err:?}");
        };
        assert_eq!(code, Some(1));
    }
}
