//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use crate::exec::StepExecutor;
use crate::suite::SuitePlan;

use super::{CliError, CliResult, ExitCode};

/// Run the QA suite: the pinned install, then each target in order.
///
/// Fail-fast: the first step that exits non-zero stops the sequence and its
/// exit code becomes the process exit code. The tests' own output streams
/// through the executor untouched; nothing is aggregated here.
///
/// With `dry_run`, the rendered command lines are printed in order and
/// nothing executes.
pub fn run_suite(plan: &SuitePlan, executor: &mut dyn StepExecutor, dry_run: bool) -> CliResult<ExitCode> {
    for step in plan.steps() {
        if dry_run {
            println!("{}", step.command);
            continue;
        }

        tracing::info!(step = %step.label(), "running");

        let status = executor
            .execute(&step.command)
            .map_err(|e| CliError::failure(format!("Error running step `{}`: {}", step.label(), e)))?;

        if !status.is_success() {
            // The failing step already reported on the inherited streams;
            // our job is to stop and surface its exit code unchanged.
            tracing::error!(step = %step.label(), code = status.exit_code(), "step failed");
            return Err(CliError::new("", ExitCode(status.exit_code())));
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Print the resolved target paths in execution order.
pub fn list_targets(plan: &SuitePlan) -> CliResult<ExitCode> {
    for path in plan.target_paths() {
        println!("{}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Tests
// ============================================================================
