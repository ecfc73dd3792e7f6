//! Step execution boundary.
//!
//! Orchestration in `cli::commands` drives a [`StepExecutor`]; the default
//! implementation spawns the real process with inherited stdio so pytest's
//! own output reaches the caller untouched. The trait seam keeps the
//! fail-fast logic testable without a Python toolchain on the host.

use std::process::Command;

use thiserror::Error;

use crate::suite::CommandSpec;

/// Errors raised when a step cannot be launched at all.
///
/// A step that launches and exits non-zero is not an error at this layer;
/// that is a [`StepStatus`] the orchestrator turns into the process exit
/// code.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Terminal status of an executed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepStatus {
    success: bool,
    exit_code: i32,
}

impl StepStatus {
    pub fn from_exit_code(code: i32) -> Self {
        Self {
            success: code == 0,
            exit_code: code,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Exit code to propagate to the shell, unchanged.
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }
}

impl From<std::process::ExitStatus> for StepStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        let exit_code = match status.code() {
            Some(code) => code,
            // Killed by a signal: report 128+n, as a shell would.
            None => {
                #[cfg(unix)]
                {
                    use std::os::unix::process::ExitStatusExt;
                    status.signal().map_or(1, |sig| 128 + sig)
                }
                #[cfg(not(unix))]
                {
                    1
                }
            }
        };

        Self {
            success: status.success(),
            exit_code,
        }
    }
}

/// Run one step and report how it ended.
pub trait StepExecutor {
    fn execute(&mut self, command: &CommandSpec) -> Result<StepStatus, StepError>;
}

/// Spawns the command with inherited stdio and blocks until it exits.
pub struct ProcessExecutor;

impl StepExecutor for ProcessExecutor {
    fn execute(&mut self, command: &CommandSpec) -> Result<StepStatus, StepError> {
        // `status()` inherits stdin/stdout/stderr, which is the contract:
        // the tests under execution stream directly to the caller.
        let status = Command::new(&command.program)
            .args(&command.args)
            .status()
            .map_err(|source| StepError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        Ok(status.into())
    }
}

// ============================================================================
// Tests
// ============================================================================
