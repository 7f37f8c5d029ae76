//! Core types for the carron test-generation pipeline
//!
//! This crate provides the foundational pieces shared by every other crate:
//!
//! - **Targets**: parsing of `locator:qualname` target strings
//! - **Artifacts**: generated files and forge results
//! - **Naming**: stable file names for generated tests
//! - **Configuration**: layered configuration loading
//! - **Error handling**: the adapter error taxonomy and a unified error type

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod artifact;
pub mod config;
pub mod error;
pub mod mode;
pub mod naming;
pub mod target;

// Re-export main types for convenience
pub use artifact::{GeneratedArtifact, GenerationResult};
pub use config::{Config, PipelineConfig, PythonConfig, RunnerConfig};
pub use error::{AdapterError, Error, Result, ResultExt};
pub use mode::ExecutionMode;
pub use naming::generated_test_filename;
pub use target::{ParsedTarget, SourceKind, TargetRef};
