//! Error taxonomy and process exit codes.

use std::path::PathBuf;

/// Failures that abort a `function jshint` invocation.
///
/// Lint findings are not represented here: a run that found problems still
/// completes and yields a failed [`crate::models::LintReport`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A function named on the command line does not exist in the project.
    #[error("Function {name} does not exist in your project")]
    NotFound { name: String },

    /// An explicitly named function targets a runtime other than the supported one.
    #[error("JSHint doesn't support runtimes other than \"{supported}\" (function {name} uses \"{runtime}\")")]
    UnsupportedRuntime {
        name: String,
        runtime: String,
        supported: String,
    },

    /// Resolution produced nothing to lint.
    #[error("No {runtime} functions found by jshint")]
    EmptySelection { runtime: String },

    /// A function's source file could not be read.
    #[error("cannot read {}: {}", .path.display(), .source)]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Project layout missing or a manifest is invalid.
    #[error("project error: {message}")]
    Project {
        message: String,
        path: Option<PathBuf>,
    },

    /// The lint engine could not be run or failed without reporting findings.
    #[error("linter error: {0}")]
    Engine(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// No lint findings
    Success = 0,
    /// The linter reported findings
    LintFailed = 1,
    /// Resolution, project or input error
    UsageError = 2,
    /// Lint engine failure
    EngineError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::NotFound { .. }
            | Error::UnsupportedRuntime { .. }
            | Error::EmptySelection { .. }
            | Error::FileRead { .. }
            | Error::Project { .. } => ExitCode::UsageError,
            Error::Engine(_) => ExitCode::EngineError,
        }
    }
}
