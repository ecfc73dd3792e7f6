//! CLI module for the QA runner
//!
//! ## Commands
//!
//! - (no subcommand) - run the suite: pinned install, then each target in order
//! - `list` - print the resolved test targets in execution order
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits, so the
//! failing step's exit code reaches the shell unchanged.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::exec::ProcessExecutor;
use crate::suite::{DEFAULT_PIP, DEFAULT_PYTHON, SuitePlan, TE_PATH_ENV};
use crate::version::VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// QA entrypoint for the TransformerEngine distributed test suites
#[derive(Parser, Debug)]
#[command(name = "te-qa")]
#[command(version = VERSION)]
#[command(about = "Run the TransformerEngine distributed QA suite", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base path of the test-suite tree (takes precedence over TE_PATH)
    #[arg(long, value_name = "DIR")]
    pub base_path: Option<PathBuf>,

    /// Print the commands that would run, without executing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the pinned pytest install (externally provisioned environment)
    #[arg(long)]
    pub skip_install: bool,

    /// Python interpreter used to invoke pytest
    #[arg(long, value_name = "BIN", default_value = DEFAULT_PYTHON)]
    pub python: String,

    /// pip binary used for the pinned install
    #[arg(long, value_name = "BIN", default_value = DEFAULT_PIP)]
    pub pip: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved test targets in execution order
    List,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let plan = resolve_plan(&cli);

    match cli.command {
        Some(Command::List) => commands::list_targets(&plan),
        None => {
            let mut executor = ProcessExecutor;
            commands::run_suite(&plan, &mut executor, cli.dry_run)
        }
    }
}

/// Build the suite plan from CLI flags and the process environment.
fn resolve_plan(cli: &Cli) -> SuitePlan {
    let te_path = env::var(TE_PATH_ENV).ok();

    SuitePlan::resolve(cli.base_path.as_deref(), te_path.as_deref())
        .with_python(cli.python.clone())
        .with_pip(cli.pip.clone())
        .skip_install(cli.skip_install)
}

// ============================================================================
// Tests
// ============================================================================
