//! Default values and functions for configuration

// Default constants
pub(crate) const DEFAULT_OUTPUT_DIR: &str = "tests/generated";
pub(crate) const DEFAULT_MODE: &str = "emit";
pub(crate) const DEFAULT_LANGUAGE: &str = "python";
pub(crate) const DEFAULT_RUNNER_PROGRAM: &str = "pytest";

/// Languages with a registered adapter
pub(crate) const SUPPORTED_LANGUAGES: &[&str] = &["python"];

pub(crate) fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

pub(crate) fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

pub(crate) fn default_runner_program() -> String {
    DEFAULT_RUNNER_PROGRAM.to_string()
}

pub(crate) fn default_check_args() -> Vec<String> {
    vec!["--collect-only".to_string(), "-q".to_string()]
}

pub(crate) fn default_search_paths() -> Vec<String> {
    vec![".".to_string()]
}

pub(crate) fn default_use_pythonpath() -> bool {
    true
}
