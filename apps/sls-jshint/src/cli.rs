//! CLI argument parsing via `clap`.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sls-jshint",
    version,
    about = "JSHint for Serverless functions",
    long_about = "sls-jshint — detects errors and potential problems in the Lambda functions of a Serverless project.\n\nConfiguration precedence: CLI > sls-jshint.toml > defaults.",
    after_help = "Examples:\n  sls-jshint function jshint\n  sls-jshint function jshint hello goodbye\n  sls-jshint function jshint --all --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current sls-jshint version.")]
    Version,
    /// Function-scoped actions
    Function {
        #[command(subcommand)]
        cmd: FunctionCmd,
    },
}

#[derive(Subcommand)]
/// Subcommands for `sls-jshint function`
pub enum FunctionCmd {
    /// Lint functions with JSHint
    #[command(
        about = "Detects errors and potential problems in your Lambda function",
        long_about = "Lint the source of one or more functions with JSHint.\n\nWithout names or --all, lints the functions under the current directory, or every function when none is there.",
        after_help = "Examples:\n  sls-jshint function jshint hello\n  sls-jshint function jshint -a"
    )]
    Jshint(JshintArgs),
}

#[derive(Args, Debug, Default)]
pub struct JshintArgs {
    #[arg(help = "One or multiple function names")]
    pub names: Vec<String>,
    #[arg(short = 'a', long, action = clap::ArgAction::SetTrue, help = "Lint all functions")]
    pub all: bool,
    #[arg(long, help = "Project root (default: discovered from current dir)")]
    pub project_root: Option<String>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(long, help = "Linter command (default: jshint)")]
    pub command: Option<String>,
}
