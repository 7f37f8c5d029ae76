//! carron - generate tests for Python functions and methods
//!
//! This binary provides the command-line interface for the carron pipeline.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use carron::{generate, suggest, RunOptions};
use carron_core::config::Config;
use carron_core::ExecutionMode;
use carron_forges::ForgeKind;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "carron")]
#[command(about = "Generate, check and run tests for Python targets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print which forge the planner would use for a target
    Suggest {
        #[command(flatten)]
        run: RunArgs,

        /// Also run the pipeline with the suggested forge
        #[arg(long)]
        apply: bool,
    },
    /// Generate tests with the planner's forge
    Test(RunArgs),
    /// Generate property tests for a function or method
    Prop(RunArgs),
    /// Generate difference tests
    Diff(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Target as 'module:qualname' or 'path/to/file.py:qualname'
    target: String,

    /// Directory generated tests are written to
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// What to do after writing: emit, check or run
    #[arg(long, value_name = "MODE")]
    mode: Option<ExecutionMode>,
}

impl From<RunArgs> for RunOptions {
    fn from(args: RunArgs) -> Self {
        Self {
            target: args.target,
            output: args.output,
            mode: args.mode,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Suggest { run, apply } => suggest(&config, &run.into(), apply),
        Commands::Test(run) => generate(&config, &run.into(), None),
        Commands::Prop(run) => generate(&config, &run.into(), Some(ForgeKind::Prop)),
        Commands::Diff(run) => generate(&config, &run.into(), Some(ForgeKind::Diff)),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    Config::load(path).context("Failed to load configuration")
}

/// Initialize logging system
///
/// Logs go to stderr; stdout is reserved for decisions and runner output.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!("carron={level}"))
        .with_writer(std::io::stderr)
        .init();
}
