#![forbid(unsafe_code)]
//! TransformerEngine distributed QA runner.
//!
//! Installs a pinned pytest and drives the six distributed test modules in a
//! fixed order, stopping at the first failure and exiting with that step's
//! exit code. The test modules themselves are external: this crate only
//! resolves where they live (`TE_PATH`, default `/opt/transformerengine`)
//! and invokes pytest on them with output passed through untouched.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod exec;
pub mod suite;
pub mod version;

pub use exec::{ProcessExecutor, StepError, StepExecutor, StepStatus};
pub use suite::{CommandSpec, Step, StepKind, SuitePlan};
