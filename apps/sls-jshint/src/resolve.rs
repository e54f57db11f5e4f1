//! Function resolution: which functions an invocation lints.
//!
//! Policy, first match wins:
//! 1. `--all`: every function on the supported runtime.
//! 2. No names: functions scoped to the invoking directory, or every
//!    function when none is in scope; both filtered to the supported runtime.
//! 3. Names: exact lookup of each; unknown names and unsupported runtimes
//!    abort resolution.
//!
//! An empty selection is an error in every branch.

use crate::error::{Error, Result};
use crate::models::FunctionDescriptor;
use crate::project::ProjectModel;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
/// Raw selection parameters of one invocation.
pub struct ResolutionRequest {
    pub names: Vec<String>,
    pub all: bool,
    pub cwd: PathBuf,
}

/// Resolve `req` against `project`, keeping only `runtime` functions.
pub fn resolve<'p, P>(
    project: &'p P,
    req: &ResolutionRequest,
    runtime: &str,
) -> Result<Vec<&'p FunctionDescriptor>>
where
    P: ProjectModel + ?Sized,
{
    let funcs = select(project, req, runtime)?;
    if funcs.is_empty() {
        return Err(Error::EmptySelection {
            runtime: runtime.to_string(),
        });
    }
    for f in &funcs {
        tracing::debug!(function = %f.name, root = %f.root.display(), "selected");
    }
    Ok(funcs)
}

fn select<'p, P>(
    project: &'p P,
    req: &ResolutionRequest,
    runtime: &str,
) -> Result<Vec<&'p FunctionDescriptor>>
where
    P: ProjectModel + ?Sized,
{
    let supported = |f: &&FunctionDescriptor| f.runtime == runtime;

    if req.all {
        return Ok(project.functions().iter().filter(supported).collect());
    }

    if req.names.is_empty() {
        let scoped: Vec<_> = project
            .functions()
            .iter()
            .filter(|f| f.is_scoped_to(&req.cwd))
            .collect();
        if scoped.is_empty() {
            tracing::debug!(cwd = %req.cwd.display(), "no function in scope; using all functions");
            return Ok(project.functions().iter().filter(supported).collect());
        }
        return Ok(scoped.into_iter().filter(supported).collect());
    }

    req.names
        .iter()
        .map(|name| {
            let f = project
                .function(name)
                .ok_or_else(|| Error::NotFound { name: name.clone() })?;
            if f.runtime != runtime {
                return Err(Error::UnsupportedRuntime {
                    name: f.name.clone(),
                    runtime: f.runtime.clone(),
                    supported: runtime.to_string(),
                });
            }
            Ok(f)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::Project;

    fn project() -> Project {
        Project::new(
            "/prj",
            vec![
                FunctionDescriptor::new("a", "nodejs", "/prj/nodejs/a", "a/handler.handler"),
                FunctionDescriptor::new("b", "nodejs", "/prj/nodejs/b", "b/handler.handler"),
                FunctionDescriptor::new("py", "python2.7", "/prj/python/py", "py/handler.handler"),
                FunctionDescriptor::new("c", "nodejs", "/prj/other/c", "c/index.handler"),
            ],
        )
    }

    fn names(fs: &[&FunctionDescriptor]) -> Vec<String> {
        fs.iter().map(|f| f.name.clone()).collect()
    }

    fn req(names: &[&str], all: bool, cwd: &str) -> ResolutionRequest {
        ResolutionRequest {
            names: names.iter().map(|s| s.to_string()).collect(),
            all,
            cwd: PathBuf::from(cwd),
        }
    }

    #[test]
    fn test_all_ignores_cwd_and_names() {
        let p = project();
        for cwd in ["/prj", "/prj/nodejs/a", "/elsewhere"] {
            let got = resolve(&p, &req(&[], true, cwd), "nodejs").unwrap();
            assert_eq!(names(&got), vec!["a", "b", "c"]);
        }
        let got = resolve(&p, &req(&["a"], true, "/prj"), "nodejs").unwrap();
        assert_eq!(names(&got), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_cwd_scoping() {
        let p = project();
        let got = resolve(&p, &req(&[], false, "/prj/nodejs"), "nodejs").unwrap();
        assert_eq!(names(&got), vec!["a", "b"]);
        let got = resolve(&p, &req(&[], false, "/prj/nodejs/b/lib"), "nodejs").unwrap();
        assert_eq!(names(&got), vec!["b"]);
    }

    #[test]
    fn test_cwd_outside_any_function_falls_back_to_all() {
        let p = project();
        let got = resolve(&p, &req(&[], false, "/somewhere/else"), "nodejs").unwrap();
        assert_eq!(names(&got), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_cwd_scope_with_only_unsupported_runtime_is_empty() {
        let p = project();
        let err = resolve(&p, &req(&[], false, "/prj/python"), "nodejs").unwrap_err();
        assert!(matches!(err, Error::EmptySelection { .. }));
    }

    #[test]
    fn test_names_in_given_order() {
        let p = project();
        let got = resolve(&p, &req(&["c", "a"], false, "/prj/nodejs/b"), "nodejs").unwrap();
        assert_eq!(names(&got), vec!["c", "a"]);
    }

    #[test]
    fn test_unknown_name_fails() {
        let p = project();
        let err = resolve(&p, &req(&["a", "missing"], false, "/prj"), "nodejs").unwrap_err();
        match err {
            Error::NotFound { name } => assert_eq!(name, "missing"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_named_unsupported_runtime_fails() {
        let p = project();
        let err = resolve(&p, &req(&["py"], false, "/prj"), "nodejs").unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedRuntime { ref runtime, .. } if runtime == "python2.7"
        ));
    }

    #[test]
    fn test_empty_project_is_empty_selection() {
        let p = Project::new("/prj", Vec::new());
        let err = resolve(&p, &req(&[], false, "/prj"), "nodejs").unwrap_err();
        assert_eq!(err.to_string(), "No nodejs functions found by jshint");
        let err = resolve(&p, &req(&[], true, "/prj"), "nodejs").unwrap_err();
        assert!(matches!(err, Error::EmptySelection { .. }));
    }
}
