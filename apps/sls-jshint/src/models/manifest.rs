//! On-disk manifest schemas of a Serverless 0.x project.
//!
//! - `s-project.json` marks the project root.
//! - `s-component.json` groups functions and carries their default runtime.
//! - `s-function.json` declares one function.
//!
//! Unknown keys are ignored; only what linting needs is modeled.

use serde::Deserialize;

pub const PROJECT_FILE: &str = "s-project.json";
pub const COMPONENT_FILE: &str = "s-component.json";
pub const FUNCTION_FILE: &str = "s-function.json";

#[derive(Debug, Default, Deserialize)]
/// Root project manifest.
pub struct ProjectManifest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
/// Component manifest; only the runtime is inherited by functions.
pub struct ComponentManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub runtime: Option<String>,
}

#[derive(Debug, Deserialize)]
/// Function manifest.
pub struct FunctionManifest {
    /// Defaults to the directory name when absent.
    #[serde(default)]
    pub name: Option<String>,
    pub handler: String,
    /// Overrides the component runtime when present.
    #[serde(default)]
    pub runtime: Option<String>,
}
