//! sls-jshint CLI binary entry point.
//! Resolves functions, lints them and prints the report.

use clap::Parser;
use sls_jshint::cli::{Cli, Commands, FunctionCmd, JshintArgs};
use sls_jshint::engine::JshintProcess;
use sls_jshint::error::ExitCode;
use sls_jshint::resolve::ResolutionRequest;
use sls_jshint::{config, lint, output};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("SLS_JSHINT_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let code = match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            ExitCode::Success
        }
        Commands::Function {
            cmd: FunctionCmd::Jshint(args),
        } => function_jshint(args),
    };
    std::process::exit(code as i32);
}

fn function_jshint(args: JshintArgs) -> ExitCode {
    let cwd = match std::env::current_dir() {
        Ok(d) => config::absolute(&d),
        Err(e) => {
            eprintln!("{} cannot determine current directory: {}", output::error_prefix(), e);
            return ExitCode::UsageError;
        }
    };
    let start = args
        .project_root
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| cwd.clone());
    let eff = config::resolve_effective(&start, args.output.as_deref(), args.command.as_deref());
    tracing::debug!(root = %eff.project_root.display(), runtime = %eff.runtime, "effective config");

    let req = ResolutionRequest {
        names: args.names,
        all: args.all,
        cwd,
    };
    let result = JshintProcess::new(&eff.command)
        .and_then(|mut linter| lint::lint_project(&eff, &req, &mut linter));
    match result {
        Ok(report) => {
            output::print_lint(&report, &eff.output, Some(&eff.project_root));
            if report.is_clean() {
                ExitCode::Success
            } else {
                ExitCode::LintFailed
            }
        }
        Err(e) => {
            eprintln!("{} {}", output::error_prefix(), e);
            ExitCode::from(&e)
        }
    }
}
