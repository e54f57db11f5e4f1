//! Function descriptors as exposed by the project model.

use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One deployable function: name, runtime tag, root directory and handler.
pub struct FunctionDescriptor {
    pub name: String,
    pub runtime: String,
    pub root: PathBuf,
    /// Handler reference, e.g. `hello/handler.handler`.
    pub handler: String,
}

impl FunctionDescriptor {
    pub fn new(
        name: impl Into<String>,
        runtime: impl Into<String>,
        root: impl Into<PathBuf>,
        handler: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            runtime: runtime.into(),
            root: root.into(),
            handler: handler.into(),
        }
    }

    /// Module part of the handler: last `/` segment, cut at the first `.`.
    pub fn handler_module(&self) -> &str {
        let last = self.handler.rsplit('/').next().unwrap_or_default();
        last.split('.').next().unwrap_or_default()
    }

    /// Source file for this function, with the given extension (no dot).
    pub fn source_path(&self, extension: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", self.handler_module(), extension))
    }

    /// Whether this function is in scope for an invocation from `cwd`.
    ///
    /// True when `cwd` is the function root or one of its ancestors, or when
    /// `cwd` lies inside the function root.
    pub fn is_scoped_to(&self, cwd: &Path) -> bool {
        self.root.starts_with(cwd) || cwd.starts_with(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_path_uses_last_handler_segment() {
        let f = FunctionDescriptor::new(
            "valid",
            "nodejs",
            "/prj/nodejs/valid",
            "valid/handler.handler",
        );
        assert_eq!(f.handler_module(), "handler");
        assert_eq!(f.source_path("js"), PathBuf::from("/prj/nodejs/valid/handler.js"));
    }

    #[test]
    fn source_path_without_directory_prefix() {
        let f = FunctionDescriptor::new("a", "nodejs", "/prj/a", "index.main.inner");
        assert_eq!(f.source_path("js"), PathBuf::from("/prj/a/index.js"));
    }

    #[test]
    fn scope_matches_both_directions() {
        let f = FunctionDescriptor::new("a", "nodejs", "/prj/nodejs/a", "handler.handler");
        assert!(f.is_scoped_to(Path::new("/prj")));
        assert!(f.is_scoped_to(Path::new("/prj/nodejs")));
        assert!(f.is_scoped_to(Path::new("/prj/nodejs/a")));
        assert!(f.is_scoped_to(Path::new("/prj/nodejs/a/lib")));
        assert!(!f.is_scoped_to(Path::new("/prj/python")));
        // component-wise, not string prefix
        assert!(!f.is_scoped_to(Path::new("/prj/node")));
    }
}
