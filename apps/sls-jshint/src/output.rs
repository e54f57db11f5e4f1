//! Output rendering for the lint command.
//!
//! Supports `human` (default) and `json` outputs. Human output follows the
//! classic plugin wording; JSON serializes the `LintReport` as is.

use crate::models::LintReport;
use owo_colors::OwoColorize;
use serde_json::Value as JsonVal;
use std::path::Path;

pub const SUCCESS_MESSAGE: &str = "Success! - No linting errors found.";
pub const FAILURE_MESSAGE: &str = "Error! - Linting errors found.";

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn stderr_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if stderr_colors() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

/// Human lines for `res`, without trailing newlines.
///
/// `root` shortens the failing file path for display when possible.
pub fn compose_lint_human(res: &LintReport, root: Option<&Path>, color: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let Some(failure) = res.failure.as_ref() else {
        lines.push(if color {
            SUCCESS_MESSAGE.green().bold().to_string()
        } else {
            SUCCESS_MESSAGE.to_string()
        });
        return lines;
    };

    lines.push(if color {
        FAILURE_MESSAGE.red().bold().to_string()
    } else {
        FAILURE_MESSAGE.to_string()
    });
    let file = root
        .and_then(|r| pathdiff::diff_paths(&failure.file, r))
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| failure.file.clone());
    let location = format!("{} ({})", failure.function, file);
    lines.push(if color {
        location.bright_black().to_string()
    } else {
        location
    });
    for d in &failure.diagnostics {
        let line = format!("Line {}: {}", d.line, d.reason);
        lines.push(if color { line.red().to_string() } else { line });
    }
    lines
}

/// Compose lint JSON object (pure); serialization errors are returned.
pub fn compose_lint_json(res: &LintReport) -> serde_json::Result<JsonVal> {
    serde_json::to_value(res)
}

/// Print lint results in the requested format.
pub fn print_lint(res: &LintReport, output: &str, root: Option<&Path>) {
    match output {
        "json" => match compose_lint_json(res).and_then(|v| serde_json::to_string_pretty(&v)) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{} cannot render report: {}", error_prefix(), e),
        },
        _ => {
            for line in compose_lint_human(res, root, use_colors(output)) {
                println!("{}", line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Diagnostic, Failure};

    fn failed() -> LintReport {
        LintReport::failed(
            vec!["a".into(), "invalidFunction".into()],
            Failure {
                function: "invalidFunction".into(),
                file: "/prj/nodejs/invalidFunction/handler.js".into(),
                diagnostics: vec![
                    Diagnostic::new(4, "Expected '===' and instead saw '=='."),
                    Diagnostic {
                        line: 9,
                        column: Some(2),
                        reason: "Missing semicolon.".into(),
                        code: Some("W033".into()),
                    },
                ],
            },
        )
    }

    #[test]
    fn test_human_success() {
        let lines = compose_lint_human(&LintReport::passed(vec!["a".into()]), None, false);
        assert_eq!(lines, vec![SUCCESS_MESSAGE]);
    }

    #[test]
    fn test_human_failure_lists_each_diagnostic() {
        let lines = compose_lint_human(&failed(), Some(Path::new("/prj")), false);
        assert_eq!(
            lines,
            vec![
                FAILURE_MESSAGE,
                "invalidFunction (nodejs/invalidFunction/handler.js)",
                "Line 4: Expected '===' and instead saw '=='.",
                "Line 9: Missing semicolon.",
            ]
        );
    }

    #[test]
    fn test_compose_lint_json_shape() {
        let out = compose_lint_json(&failed()).unwrap();
        assert_eq!(out["status"], "failed");
        assert_eq!(out["functions"][1], "invalidFunction");
        assert_eq!(out["failure"]["diagnostics"][0]["line"], 4);
        assert!(out["failure"]["diagnostics"][0].get("column").is_none());
        assert_eq!(out["failure"]["diagnostics"][1]["code"], "W033");

        let out = compose_lint_json(&LintReport::passed(vec!["a".into()])).unwrap();
        assert_eq!(out["status"], "passed");
        assert!(out.get("failure").is_none());
    }

    #[test]
    fn test_printed_json_is_the_report() {
        let report = failed();
        let printed: JsonVal =
            serde_json::from_str(&serde_json::to_string_pretty(&report).unwrap()).unwrap();
        assert!(!printed.is_null());
        assert_eq!(printed, compose_lint_json(&report).unwrap());
    }
}
