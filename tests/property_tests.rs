//! Property-based tests for the QA runner
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use std::path::Path;

use proptest::prelude::*;

use te_qa_runner::cli::commands::run_suite;
use te_qa_runner::exec::{StepError, StepExecutor, StepStatus};
use te_qa_runner::suite::{CommandSpec, DEFAULT_BASE_PATH, SuitePlan, TEST_TARGETS};

/// Executor that records every command and returns scripted exit codes
/// (missing entries default to success).
struct ScriptedExecutor {
    codes: Vec<i32>,
    invoked: Vec<CommandSpec>,
}

impl ScriptedExecutor {
    fn new(codes: &[i32]) -> Self {
        Self {
            codes: codes.to_vec(),
            invoked: Vec::new(),
        }
    }
}

impl StepExecutor for ScriptedExecutor {
    fn execute(&mut self, command: &CommandSpec) -> Result<StepStatus, StepError> {
        let code = self.codes.get(self.invoked.len()).copied().unwrap_or(0);
        self.invoked.push(command.clone());
        Ok(StepStatus::from_exit_code(code))
    }
}

proptest! {
    /// Property: any non-empty TE_PATH value wins over the default, and the
    /// resolved path is used verbatim.
    #[test]
    fn nonempty_env_value_overrides_default(value in "[A-Za-z0-9/_.-]{1,48}") {
        let plan = SuitePlan::resolve(None, Some(&value));
        prop_assert_eq!(plan.base_path(), Path::new(&value));
    }

    /// Property: an explicit override beats whatever TE_PATH holds.
    #[test]
    fn explicit_override_beats_env(env_value in proptest::option::of("[A-Za-z0-9/_.-]{0,48}")) {
        let plan = SuitePlan::resolve(Some(Path::new("/from/flag")), env_value.as_deref());
        prop_assert_eq!(plan.base_path(), Path::new("/from/flag"));
    }

    /// Property: whatever the base path, every target command is rendered
    /// under it, in the fixed order.
    #[test]
    fn all_targets_share_the_resolved_base(value in "[A-Za-z0-9_-]{1,16}") {
        let base = format!("/srv/{}", value);
        let plan = SuitePlan::resolve(None, Some(&base));
        let paths = plan.target_paths();
        prop_assert_eq!(paths.len(), TEST_TARGETS.len());
        for (path, rel) in paths.iter().zip(TEST_TARGETS) {
            prop_assert_eq!(path, &Path::new(&base).join(rel));
        }
    }

    /// Property: the first failing step aborts the sequence and its exit code
    /// is propagated unchanged, wherever it sits and whatever the code is.
    #[test]
    fn fail_fast_propagates_the_failing_code(position in 0usize..7, code in 1i32..=255) {
        let mut codes = vec![0; position];
        codes.push(code);

        let mut executor = ScriptedExecutor::new(&codes);
        let result = run_suite(&SuitePlan::resolve(None, None), &mut executor, false);

        let err = result.expect_err("a failing step must abort the run");
        prop_assert_eq!(err.exit_code.0, code);
        prop_assert_eq!(executor.invoked.len(), position + 1);
    }

    /// Property: an all-zero script always runs the whole sequence and
    /// succeeds, regardless of base path.
    #[test]
    fn passing_suite_always_exits_zero(value in "[A-Za-z0-9/_-]{1,32}") {
        let mut executor = ScriptedExecutor::new(&[]);
        let plan = SuitePlan::resolve(None, Some(&value));
        let result = run_suite(&plan, &mut executor, false);
        prop_assert!(result.is_ok());
        prop_assert_eq!(executor.invoked.len(), 1 + TEST_TARGETS.len());
    }
}

// Keep the default-path literal pinned outside proptest as well; it is part
// of the observable contract.
#[test]
fn default_base_path_literal() {
    assert_eq!(DEFAULT_BASE_PATH, "/opt/transformerengine");
}
