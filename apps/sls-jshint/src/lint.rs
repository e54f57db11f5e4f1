//! Lint runner: sequential, fail-fast linting of resolved functions.
//!
//! Functions are linted one at a time in input order. The first function with
//! findings ends the run; later functions are not read.

use crate::config::{self, Effective};
use crate::engine::Linter;
use crate::error::{Error, Result};
use crate::models::{Failure, FunctionDescriptor, LintReport};
use crate::project::Project;
use crate::resolve::{resolve, ResolutionRequest};
use serde_json::{Map, Value as Json};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
/// Per-invocation inputs shared by every lint call.
pub struct LintSettings {
    /// Source file extension, without the dot.
    pub extension: String,
    /// Baseline options with the project override merged in.
    pub options: Map<String, Json>,
}

impl LintSettings {
    /// Load the override file once and merge it over the baseline.
    pub fn load(rcfile: &Path, extension: &str) -> Self {
        Self {
            extension: extension.to_string(),
            options: config::lint_options(rcfile),
        }
    }
}

/// Lint `functions` in order, stopping at the first with findings.
pub fn run_lint<L>(
    linter: &mut L,
    functions: &[&FunctionDescriptor],
    settings: &LintSettings,
) -> Result<LintReport>
where
    L: Linter + ?Sized,
{
    let mut checked = Vec::with_capacity(functions.len());
    for func in functions {
        let file = func.source_path(&settings.extension);
        tracing::debug!(function = %func.name, file = %file.display(), "linting");
        let source = fs::read_to_string(&file).map_err(|source| Error::FileRead {
            path: file.clone(),
            source,
        })?;
        checked.push(func.name.clone());

        let diagnostics = linter.run(&file, &source, &settings.options)?;
        if !diagnostics.is_empty() {
            tracing::debug!(function = %func.name, count = diagnostics.len(), "findings");
            return Ok(LintReport::failed(
                checked,
                Failure {
                    function: func.name.clone(),
                    file: file.to_string_lossy().to_string(),
                    diagnostics,
                },
            ));
        }
    }
    Ok(LintReport::passed(checked))
}

/// Full `function jshint` pipeline: load the project, resolve, lint.
pub fn lint_project<L>(
    eff: &Effective,
    req: &ResolutionRequest,
    linter: &mut L,
) -> Result<LintReport>
where
    L: Linter + ?Sized,
{
    let project = Project::load(&eff.project_root)?;
    let functions = resolve(&project, req, &eff.runtime)?;
    let settings = LintSettings::load(&eff.rcfile_path(), &eff.extension);
    run_lint(linter, &functions, &settings)
}
