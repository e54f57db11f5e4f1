//! Configuration discovery and effective settings resolution.
//!
//! Two files are involved, both optional and both read from the project root:
//! - `sls-jshint.toml|yaml|yml`: tool settings merged with CLI flags into an
//!   `Effective` config.
//! - `.jshintrc` (name configurable): JSON object of linter options merged
//!   over the baseline `{"node": true}`.
//!
//! Defaults:
//! - `runtime`: `nodejs`
//! - `extension`: `js`
//! - `rcfile`: `.jshintrc`
//! - `output`: `human`
//! - `command`: `["jshint"]`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::models::manifest::PROJECT_FILE;
use serde::Deserialize;
use serde_json::{Map, Value as Json};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_TOML: &str = "sls-jshint.toml";
const CONFIG_YAML: [&str; 2] = ["sls-jshint.yaml", "sls-jshint.yml"];

pub const DEFAULT_RUNTIME: &str = "nodejs";
pub const DEFAULT_EXTENSION: &str = "js";
pub const DEFAULT_RCFILE: &str = ".jshintrc";
pub const DEFAULT_OUTPUT: &str = "human";
pub const DEFAULT_COMMAND: &str = "jshint";

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `sls-jshint.toml|yaml`.
pub struct ToolConfig {
    /// Supported runtime tag.
    pub runtime: Option<String>,
    /// Source file extension, without the dot.
    pub extension: Option<String>,
    /// Override file name, relative to the project root.
    pub rcfile: Option<String>,
    pub output: Option<String>,
    /// Linter command and leading arguments, e.g. `["npx", "jshint"]`.
    pub command: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub project_root: PathBuf,
    pub runtime: String,
    pub extension: String,
    pub rcfile: String,
    pub output: String,
    pub command: Vec<String>,
}

impl Effective {
    pub fn rcfile_path(&self) -> PathBuf {
        self.project_root.join(&self.rcfile)
    }
}

fn has_marker(dir: &Path) -> bool {
    dir.join(PROJECT_FILE).exists()
        || dir.join(CONFIG_TOML).exists()
        || CONFIG_YAML.iter().any(|name| dir.join(name).exists())
}

/// Walk upward from `start` to detect the project root.
///
/// Stops at the first directory holding `s-project.json` or a tool config
/// file; falls back to `start` when none is found.
pub fn detect_project_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if has_marker(cur) {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `ToolConfig` from `sls-jshint.toml` or `sls-jshint.yaml|yml` if present.
///
/// An unreadable or invalid file is reported and treated as absent.
pub fn load_config(root: &Path) -> Option<ToolConfig> {
    let toml_path = root.join(CONFIG_TOML);
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        return match toml::from_str::<ToolConfig>(&s) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                tracing::warn!(path = %toml_path.display(), "ignoring invalid config: {e}");
                None
            }
        };
    }
    for yml in CONFIG_YAML {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            return match serde_yaml::from_str::<ToolConfig>(&s) {
                Ok(cfg) => Some(cfg),
                Err(e) => {
                    tracing::warn!(path = %p.display(), "ignoring invalid config: {e}");
                    None
                }
            };
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// `start` is the directory discovery begins from, normally the current
/// directory or `--project-root`.
pub fn resolve_effective(
    start: &Path,
    cli_output: Option<&str>,
    cli_command: Option<&str>,
) -> Effective {
    let start = absolute(start);
    let project_root = detect_project_root(&start);
    let cfg = load_config(&project_root).unwrap_or_default();

    let runtime = cfg
        .runtime
        .unwrap_or_else(|| DEFAULT_RUNTIME.to_string());
    let extension = cfg
        .extension
        .map(|e| e.trim_start_matches('.').to_string())
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    let rcfile = cfg.rcfile.unwrap_or_else(|| DEFAULT_RCFILE.to_string());
    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    // A CLI command is split on whitespace; config form is already a list.
    let command = cli_command
        .map(|c| c.split_whitespace().map(str::to_string).collect::<Vec<_>>())
        .or(cfg.command)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| vec![DEFAULT_COMMAND.to_string()]);

    Effective {
        project_root,
        runtime,
        extension,
        rcfile,
        output,
        command,
    }
}

/// Canonical form of `path`, or the path joined to the current directory
/// when it cannot be canonicalized.
pub fn absolute(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    })
}

/// Baseline linter options applied before any project override.
pub fn baseline_options() -> Map<String, Json> {
    let mut m = Map::new();
    m.insert("node".to_string(), Json::Bool(true));
    m
}

/// Load the project override file as a JSON object.
///
/// Missing, unreadable, malformed or non-object content yields an empty map.
pub fn load_override(path: &Path) -> Map<String, Json> {
    let s = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            tracing::debug!(path = %path.display(), "no override config: {e}");
            return Map::new();
        }
    };
    match serde_json::from_str::<Json>(&s) {
        Ok(Json::Object(m)) => m,
        Ok(_) => {
            tracing::warn!(path = %path.display(), "override config is not a JSON object; ignoring");
            Map::new()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "override config is not valid JSON; ignoring: {e}");
            Map::new()
        }
    }
}

/// Deep-merge `over` into `base`: objects merge key-wise, anything else replaces.
pub fn merge_options(base: &mut Map<String, Json>, over: Map<String, Json>) {
    for (k, v) in over {
        let v = match (base.get_mut(&k), v) {
            (Some(Json::Object(dst)), Json::Object(src)) => {
                merge_options(dst, src);
                continue;
            }
            (_, v) => v,
        };
        base.insert(k, v);
    }
}

/// Baseline options with the override file at `rcfile` merged on top.
pub fn lint_options(rcfile: &Path) -> Map<String, Json> {
    let mut opts = baseline_options();
    merge_options(&mut opts, load_override(rcfile));
    opts
}
