//! Read-only project model.
//!
//! The core only needs three queries from the host project: its root, every
//! function, and lookup by name. `ProjectModel` captures them; `Project` is the
//! implementation backed by a Serverless 0.x directory layout.

use crate::config::DEFAULT_RUNTIME;
use crate::error::{Error, Result};
use crate::models::manifest::{
    ComponentManifest, FunctionManifest, ProjectManifest, COMPONENT_FILE, FUNCTION_FILE,
    PROJECT_FILE,
};
use crate::models::FunctionDescriptor;
use glob::{glob, Pattern};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Queries the resolver runs against a project.
pub trait ProjectModel {
    fn root(&self) -> &Path;

    /// All functions, in a stable order.
    fn functions(&self) -> &[FunctionDescriptor];

    fn function(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.functions().iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    functions: Vec<FunctionDescriptor>,
}

impl Project {
    /// Build a project from already-known functions.
    pub fn new(root: impl Into<PathBuf>, functions: Vec<FunctionDescriptor>) -> Self {
        Self {
            root: root.into(),
            functions,
        }
    }

    /// Load the project rooted at `root` from its manifests.
    pub fn load(root: &Path) -> Result<Self> {
        let project_path = root.join(PROJECT_FILE);
        if !project_path.is_file() {
            return Err(Error::Project {
                message: format!(
                    "not a Serverless project: {} not found in {}",
                    PROJECT_FILE,
                    root.display()
                ),
                path: Some(root.to_path_buf()),
            });
        }
        let manifest: ProjectManifest = fs::read_to_string(&project_path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .ok_or_else(|| Error::Project {
                message: format!("invalid {}", project_path.display()),
                path: Some(project_path.clone()),
            })?;

        let manifests = discover_function_manifests(root)?;
        // Parse in parallel, but report the first failure in path order.
        let functions = manifests
            .par_iter()
            .map(|path| load_function(root, path))
            .collect::<Vec<_>>()
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        let mut seen = HashSet::new();
        for f in &functions {
            if !seen.insert(f.name.as_str()) {
                return Err(Error::Project {
                    message: format!("duplicate function name '{}'", f.name),
                    path: Some(f.root.clone()),
                });
            }
        }
        tracing::debug!(
            project = manifest.name.as_deref().unwrap_or("<unnamed>"),
            root = %root.display(),
            count = functions.len(),
            "loaded project"
        );
        Ok(Self::new(root, functions))
    }
}

impl ProjectModel for Project {
    fn root(&self) -> &Path {
        &self.root
    }

    fn functions(&self) -> &[FunctionDescriptor] {
        &self.functions
    }
}

fn is_skipped(root: &Path, path: &Path) -> bool {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components().any(|c| match c {
        Component::Normal(s) => {
            let s = s.to_string_lossy();
            s == "node_modules" || s.starts_with('.')
        }
        _ => false,
    })
}

/// Function manifest paths under `root`, sorted.
fn discover_function_manifests(root: &Path) -> Result<Vec<PathBuf>> {
    // The root is literal; only the suffix is a pattern.
    let pattern = format!(
        "{}/**/{}",
        Pattern::escape(&root.to_string_lossy()),
        FUNCTION_FILE
    );
    let entries = glob(&pattern).map_err(|e| Error::Project {
        message: format!("invalid search pattern '{}': {}", pattern, e),
        path: Some(root.to_path_buf()),
    })?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|p| !is_skipped(root, p))
        .collect();
    paths.sort();
    Ok(paths)
}

fn load_function(root: &Path, manifest_path: &Path) -> Result<FunctionDescriptor> {
    let invalid = |message: String| Error::Project {
        message,
        path: Some(manifest_path.to_path_buf()),
    };
    let s = fs::read_to_string(manifest_path)
        .map_err(|e| invalid(format!("cannot read {}: {}", manifest_path.display(), e)))?;
    let manifest: FunctionManifest = serde_json::from_str(&s)
        .map_err(|e| invalid(format!("invalid {}: {}", manifest_path.display(), e)))?;

    let dir = manifest_path.parent().unwrap_or(root).to_path_buf();
    let name = match manifest.name {
        Some(n) => n,
        None => dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| invalid("function has no name".to_string()))?,
    };
    let runtime = manifest
        .runtime
        .or_else(|| component_runtime(root, &dir))
        .unwrap_or_else(|| DEFAULT_RUNTIME.to_string());

    Ok(FunctionDescriptor {
        name,
        runtime,
        root: dir,
        handler: manifest.handler,
    })
}

/// Runtime of the nearest `s-component.json` between `dir` and `root`.
fn component_runtime(root: &Path, dir: &Path) -> Option<String> {
    dir.ancestors()
        .skip(1)
        .take_while(|p| p.starts_with(root))
        .find_map(|p| {
            let s = fs::read_to_string(p.join(COMPONENT_FILE)).ok()?;
            match serde_json::from_str::<ComponentManifest>(&s) {
                Ok(c) => c.runtime,
                Err(e) => {
                    tracing::warn!(path = %p.display(), "ignoring invalid component manifest: {e}");
                    None
                }
            }
        })
}
