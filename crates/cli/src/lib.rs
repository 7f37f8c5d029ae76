//! Library interface for the carron CLI
//!
//! Command handlers live here so the binary stays a thin argument parser.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod commands;

pub use commands::{generate, suggest, RunOptions};
