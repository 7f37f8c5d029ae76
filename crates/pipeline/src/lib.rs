//! Orchestration of carron pipeline runs
//!
//! Resolves a target through a language adapter, generates artifacts with a
//! forge, writes them and optionally hands them to the test runner.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod error;
pub mod orchestrator;
pub mod runner;
pub mod writer;

pub use error::PipelineError;
pub use orchestrator::{Pipeline, PipelineReport, PipelineRequest, Stage};
pub use runner::TestRunner;
pub use writer::ArtifactWriter;
