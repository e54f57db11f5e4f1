//! Lint engine adapter.
//!
//! JSHint reports findings through a shared, non-reentrant result buffer.
//! `Linter` narrows that to a one-shot call returning the findings; taking
//! `&mut self` keeps calls on one engine strictly sequential.

use crate::error::{Error, Result};
use crate::models::Diagnostic;
use regex::Regex;
use serde_json::{Map, Value as Json};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::OnceLock;

/// A static analyzer for one source text at a time.
pub trait Linter {
    /// Lint `source` with `options`; `path` names the file for reporting only.
    fn run(
        &mut self,
        path: &Path,
        source: &str,
        options: &Map<String, Json>,
    ) -> Result<Vec<Diagnostic>>;
}

/// Runs the external `jshint` executable once per source text.
#[derive(Debug, Clone)]
pub struct JshintProcess {
    program: String,
    args: Vec<String>,
}

impl JshintProcess {
    /// `command` is the executable followed by any leading arguments.
    pub fn new(command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| Error::Engine("empty linter command".into()))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl Linter for JshintProcess {
    fn run(
        &mut self,
        path: &Path,
        source: &str,
        options: &Map<String, Json>,
    ) -> Result<Vec<Diagnostic>> {
        let engine_err = |what: &str, e: &dyn std::fmt::Display| {
            Error::Engine(format!("{} ({}): {}", what, self.program, e))
        };

        let mut cfg = tempfile::Builder::new()
            .prefix("sls-jshint-")
            .suffix(".json")
            .tempfile()
            .map_err(|e| engine_err("cannot create config file", &e))?;
        serde_json::to_writer(&mut cfg, options)
            .map_err(|e| engine_err("cannot write config file", &e))?;
        cfg.flush()
            .map_err(|e| engine_err("cannot write config file", &e))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg("--config")
            .arg(cfg.path())
            .arg("--reporter=unix")
            .arg("--verbose")
            .arg("--filename")
            .arg(path)
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| engine_err("cannot start linter", &e))?;

        // Feed stdin from a separate thread so a chatty child cannot deadlock us.
        let writer = child.stdin.take().map(|mut stdin| {
            let text = source.to_owned();
            std::thread::spawn(move || stdin.write_all(text.as_bytes()))
        });
        let output = child
            .wait_with_output()
            .map_err(|e| engine_err("linter did not finish", &e))?;
        if let Some(handle) = writer {
            match handle.join() {
                Ok(Ok(())) => {}
                // The engine may stop reading early; its exit status decides.
                Ok(Err(e)) => tracing::debug!("linter closed stdin early: {e}"),
                Err(_) => return Err(Error::Engine("stdin writer panicked".into())),
            }
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let diagnostics = parse_unix_report(&stdout);
        tracing::debug!(
            file = %path.display(),
            status = ?output.status.code(),
            count = diagnostics.len(),
            "linter finished"
        );

        // Any failing status must come with findings, including 2.
        if diagnostics.is_empty() && !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr.trim();
            let detail = if detail.is_empty() { stdout.trim() } else { detail };
            return Err(Error::Engine(format!(
                "{} exited with {}: {}",
                self.program, output.status, detail
            )));
        }
        Ok(diagnostics)
    }
}

fn unix_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^.*?:(\d+):(\d+): (.*?)(?: \(([EWI]\d{3})\))?$")
            .expect("reporter pattern is valid")
    })
}

/// Parse `file:line:col: reason (code)` lines; summary lines are skipped.
pub fn parse_unix_report(stdout: &str) -> Vec<Diagnostic> {
    let re = unix_line_re();
    stdout
        .lines()
        .filter_map(|line| {
            let caps = re.captures(line.trim_end())?;
            Some(Diagnostic {
                line: caps[1].parse().ok()?,
                column: caps[2].parse().ok(),
                reason: caps[3].to_string(),
                code: caps.get(4).map(|m| m.as_str().to_string()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_unix_report() {
        let out = "handler.js:3:9: Expected '===' and instead saw '=='. (W116)\n\
                   handler.js:7:1: Missing semicolon.\n\
                   \n\
                   2 errors\n";
        let d = parse_unix_report(out);
        assert_eq!(d.len(), 2);
        assert_eq!(d[0].line, 3);
        assert_eq!(d[0].column, Some(9));
        assert_eq!(d[0].reason, "Expected '===' and instead saw '=='.");
        assert_eq!(d[0].code.as_deref(), Some("W116"));
        assert_eq!(d[1].line, 7);
        assert_eq!(d[1].reason, "Missing semicolon.");
        assert_eq!(d[1].code, None);
    }

    #[test]
    fn test_parse_keeps_colons_in_path_and_reason() {
        let d = parse_unix_report("C:/prj/a.js:12:4: Bad option: 'foo'.\n");
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].line, 12);
        assert_eq!(d[0].reason, "Bad option: 'foo'.");
    }

    #[test]
    fn test_empty_command_is_rejected() {
        assert!(matches!(JshintProcess::new(&[]), Err(Error::Engine(_))));
    }

    #[test]
    fn test_missing_executable_is_engine_error() {
        let mut linter = JshintProcess::new(&["sls-jshint-no-such-binary".to_string()]).unwrap();
        let err = linter
            .run(Path::new("a.js"), "var a = 1;\n", &Map::new())
            .unwrap_err();
        assert!(matches!(err, Error::Engine(_)));
    }

    #[cfg(unix)]
    fn fake_jshint(dir: &Path, body: &str) -> Vec<String> {
        let script = dir.join("fake-jshint.sh");
        fs::write(&script, body).unwrap();
        vec!["sh".to_string(), script.to_string_lossy().to_string()]
    }

    #[cfg(unix)]
    #[test]
    fn test_process_reports_findings_and_receives_options() {
        let dir = tempdir().unwrap();
        let seen = dir.path().join("seen.json");
        // $2 is the config path; the source arrives on stdin.
        let body = format!(
            "cp \"$2\" '{}'\ncat > /dev/null\n\
             echo \"stdin:2:7: Expected '===' and instead saw '=='. (W116)\"\n\
             echo\necho '1 error'\nexit 2\n",
            seen.display()
        );
        let mut linter = JshintProcess::new(&fake_jshint(dir.path(), &body)).unwrap();
        let mut opts = Map::new();
        opts.insert("node".into(), Json::Bool(true));

        let d = linter
            .run(Path::new("handler.js"), "var a;\nif (a == 1) {}\n", &opts)
            .unwrap();
        assert_eq!(d, vec![Diagnostic {
            line: 2,
            column: Some(7),
            reason: "Expected '===' and instead saw '=='.".into(),
            code: Some("W116".into()),
        }]);
        let written: Json = serde_json::from_str(&fs::read_to_string(&seen).unwrap()).unwrap();
        assert_eq!(written, serde_json::json!({"node": true}));
    }

    #[cfg(unix)]
    #[test]
    fn test_process_clean_run() {
        let dir = tempdir().unwrap();
        let mut linter =
            JshintProcess::new(&fake_jshint(dir.path(), "cat > /dev/null\nexit 0\n")).unwrap();
        let d = linter
            .run(Path::new("handler.js"), "var a = 1;\n", &Map::new())
            .unwrap();
        assert!(d.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_process_failure_without_findings() {
        let dir = tempdir().unwrap();
        let mut linter = JshintProcess::new(&fake_jshint(
            dir.path(),
            "cat > /dev/null\necho 'ERROR: bad config' >&2\nexit 1\n",
        ))
        .unwrap();
        let err = linter
            .run(Path::new("handler.js"), "var a = 1;\n", &Map::new())
            .unwrap_err();
        assert!(err.to_string().contains("bad config"));
    }

    #[cfg(unix)]
    #[test]
    fn test_findings_status_with_unparseable_output_is_engine_error() {
        let dir = tempdir().unwrap();
        let mut linter = JshintProcess::new(&fake_jshint(
            dir.path(),
            "cat > /dev/null\necho 'something went sideways'\nexit 2\n",
        ))
        .unwrap();
        let err = linter
            .run(Path::new("handler.js"), "var a = 1;\n", &Map::new())
            .unwrap_err();
        assert!(matches!(err, Error::Engine(_)));
        assert!(err.to_string().contains("something went sideways"));
    }
}
