//! sls-jshint core library.
//!
//! Lints the Lambda functions of a Serverless project with JSHint.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Project-root discovery, tool config and linter option overrides.
//! - `project`: Read-only project model loaded from the project manifests.
//! - `resolve`: Which functions an invocation targets.
//! - `engine`: Lint engine adapter around the external `jshint`.
//! - `lint`: Sequential, fail-fast lint runner.
//! - `models`: Function descriptors, diagnostics and reports.
//! - `output`: Human/JSON printers.
//! - `error`: Error taxonomy and exit codes.
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod lint;
pub mod models;
pub mod output;
pub mod project;
pub mod resolve;

pub use error::{Error, Result};
