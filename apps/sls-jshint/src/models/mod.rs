//! Shared data models: function descriptors, diagnostics and lint reports.

pub mod function;
pub mod manifest;

pub use function::FunctionDescriptor;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single linter finding.
pub struct Diagnostic {
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    pub reason: String,
    /// Engine code such as `W116`, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Diagnostic {
    pub fn new(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            column: None,
            reason: reason.into(),
            code: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Passed,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
/// Findings of the first function that failed.
pub struct Failure {
    pub function: String,
    pub file: String,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Serialize)]
/// Outcome of one lint invocation.
pub struct LintReport {
    pub status: Status,
    /// Functions linted, in order; the failing one is last.
    pub functions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
}

impl LintReport {
    pub fn passed(functions: Vec<String>) -> Self {
        Self {
            status: Status::Passed,
            functions,
            failure: None,
        }
    }

    pub fn failed(functions: Vec<String>, failure: Failure) -> Self {
        Self {
            status: Status::Failed,
            functions,
            failure: Some(failure),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.status == Status::Passed
    }

    /// Diagnostics of the failing function, empty when clean.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.failure
            .as_ref()
            .map(|f| f.diagnostics.as_slice())
            .unwrap_or_default()
    }
}
