//! Suite plan: the fixed QA sequence and how it is resolved.
//!
//! The plan is pure data. Base-path resolution (flag over `TE_PATH` over the
//! default) and command rendering happen here; nothing in this module touches
//! the process table or the filesystem. Execution lives in [`crate::exec`].

use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the default base path.
pub const TE_PATH_ENV: &str = "TE_PATH";

/// Base path used when `TE_PATH` is unset or empty.
pub const DEFAULT_BASE_PATH: &str = "/opt/transformerengine";

/// Exact pytest version installed before the suite runs.
pub const PYTEST_VERSION: &str = "8.2.1";

/// Default Python interpreter used to invoke pytest.
pub const DEFAULT_PYTHON: &str = "python3";

/// Default pip binary used for the pinned install.
pub const DEFAULT_PIP: &str = "pip3";

/// The six test modules, relative to the base path, in execution order.
///
/// The ordering is part of the contract: callers watching the streamed pytest
/// output rely on it to tell how far a failing run got.
pub const TEST_TARGETS: [&str; 6] = [
    "tests/pytorch/distributed/test_numerics.py",
    "tests/pytorch/distributed/test_comm_gemm_overlap.py",
    "tests/pytorch/distributed/test_fusible_ops.py",
    "tests/pytorch/distributed/test_fusible_ops_with_userbuffers.py",
    "tests/pytorch/distributed/test_torch_fsdp2.py",
    "tests/pytorch/fused_attn/test_fused_attn_with_cp.py",
];

/// An external command, fully rendered and ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// What a step is, for logging and labelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// The pinned pytest install.
    Install,
    /// One of the test targets (0-based index into [`TEST_TARGETS`]).
    Target(usize),
}

/// A single step of the suite: its kind and the command that realizes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub kind: StepKind,
    pub command: CommandSpec,
}

impl Step {
    /// Short human-readable label for logs.
    pub fn label(&self) -> String {
        match self.kind {
            StepKind::Install => format!("install pytest=={}", PYTEST_VERSION),
            StepKind::Target(i) => TEST_TARGETS.get(i).copied().unwrap_or("<unknown>").to_string(),
        }
    }
}

/// The resolved QA suite: where the test tree lives and how to invoke it.
#[derive(Debug, Clone)]
pub struct SuitePlan {
    base_path: PathBuf,
    python: String,
    pip: String,
    skip_install: bool,
}

impl SuitePlan {
    /// Resolve a plan from an explicit override and the `TE_PATH` value.
    ///
    /// Precedence: explicit override, then a non-empty `TE_PATH`, then
    /// [`DEFAULT_BASE_PATH`]. An empty `TE_PATH` counts as unset. The path is
    /// not validated; a bad path surfaces as a pytest failure, not ours.
    pub fn resolve(base_path_override: Option<&Path>, te_path: Option<&str>) -> Self {
        let base_path = match base_path_override {
            Some(path) => path.to_path_buf(),
            None => te_path
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BASE_PATH)),
        };

        Self {
            base_path,
            python: DEFAULT_PYTHON.to_string(),
            pip: DEFAULT_PIP.to_string(),
            skip_install: false,
        }
    }

    /// Override the Python interpreter used to invoke pytest.
    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    /// Override the pip binary used for the pinned install.
    pub fn with_pip(mut self, pip: impl Into<String>) -> Self {
        self.pip = pip.into();
        self
    }

    /// Omit the install step (externally provisioned environments).
    pub fn skip_install(mut self, skip: bool) -> Self {
        self.skip_install = skip;
        self
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Absolute paths of the targets under the resolved base path, in order.
    pub fn target_paths(&self) -> Vec<PathBuf> {
        TEST_TARGETS.iter().map(|rel| self.base_path.join(rel)).collect()
    }

    /// The ordered steps: the pinned install (unless skipped), then each
    /// target once.
    pub fn steps(&self) -> Vec<Step> {
        let mut steps = Vec::with_capacity(1 + TEST_TARGETS.len());

        if !self.skip_install {
            steps.push(Step {
                kind: StepKind::Install,
                command: CommandSpec {
                    program: self.pip.clone(),
                    args: vec!["install".to_string(), format!("pytest=={}", PYTEST_VERSION)],
                },
            });
        }

        for (i, path) in self.target_paths().into_iter().enumerate() {
            steps.push(Step {
                kind: StepKind::Target(i),
                command: CommandSpec {
                    program: self.python.clone(),
                    args: vec![
                        "-m".to_string(),
                        "pytest".to_string(),
                        "-v".to_string(),
                        "-s".to_string(),
                        path.display().to_string(),
                    ],
                },
            });
        }

        steps
    }
}

// ============================================================================
// Tests
// ============================================================================
