//! # pkgstatus CLI entry point
//!
//! Parses command-line arguments, installs the tracing subscriber, and
//! dispatches to the lint handler.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pkgstatus_cli::lint::{run_lint, LintArgs};

/// Lint the package status file against the repository file.
///
/// Checks that both files list the same packages and that every package
/// declares a valid visibility, plus a valid maturity and importance when
/// it is public.
#[derive(Parser, Debug)]
#[command(name = "pkgstatus", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    lint: LintArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        package_status = %cli.lint.package_status.display(),
        repository = %cli.lint.repository.display(),
        "pkgstatus starting"
    );

    match run_lint(&cli.lint) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
