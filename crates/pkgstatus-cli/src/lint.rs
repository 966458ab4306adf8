//! # Lint Handler
//!
//! Loads the package status and repository files, runs the validator, and
//! maps the outcome to output and an exit code.
//!
//! Exit codes: 0 when the files are consistent, 1 on a validation failure,
//! 2 on an operational error (unreadable or malformed YAML). Usage errors,
//! including a path that is not a regular file, are rejected by clap before
//! this handler runs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use pkgstatus_core::{validate, PackageStatusDocument, RepositoryDocument};

/// Printed on stdout when both files pass.
pub const VALID_MESSAGE: &str = "Package status file is valid!";

/// Positional arguments for a lint run.
#[derive(Args, Debug)]
pub struct LintArgs {
    /// File with all package statuses.
    #[arg(value_name = "PACKAGE_STATUS", value_parser = existing_file)]
    pub package_status: PathBuf,

    /// Repository file with all packages listed with dependencies.
    #[arg(value_name = "REPOSITORY", value_parser = existing_file)]
    pub repository: PathBuf,
}

/// Accept only paths that name an existing regular file.
pub fn existing_file(arg: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(arg);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("{arg} is not a file"))
    }
}

/// Execute a lint run.
///
/// Returns the process exit code for a completed check. Load failures are
/// returned as errors with the offending file attached as context.
pub fn run_lint(args: &LintArgs) -> Result<u8> {
    let package_status = load_status(&args.package_status)?;
    let repository = load_repository(&args.repository)?;

    match validate(&package_status, &repository) {
        Ok(report) => {
            tracing::info!(
                packages = report.packages,
                public = report.public,
                private = report.private,
                "validation passed"
            );
            println!("{VALID_MESSAGE}");
            Ok(0)
        }
        Err(failure) => {
            tracing::debug!(?failure, "validation failed");
            eprintln!("{failure}");
            Ok(1)
        }
    }
}

fn load_status(path: &Path) -> Result<PackageStatusDocument> {
    PackageStatusDocument::load(path)
        .with_context(|| format!("failed to load package status file {}", path.display()))
}

fn load_repository(path: &Path) -> Result<RepositoryDocument> {
    RepositoryDocument::load(path)
        .with_context(|| format!("failed to load repository file {}", path.display()))
}
