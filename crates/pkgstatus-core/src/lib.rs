//! # pkgstatus-core — Package Status Linting
//!
//! Checks that a package status file and a repository file agree with each
//! other. The status file carries per-package metadata (visibility, maturity,
//! importance); the repository file lists each package's dependencies.
//!
//! ## Modules
//!
//! - [`status`] — the `Visibility`, `Maturity` and `Importance` enumerations
//!   and the untrusted [`StatusRecord`].
//! - [`document`] — YAML loading of both files into ordered documents.
//! - [`validate`] — the single validation pass.
//! - [`error`] — load-time error types.
//!
//! ## Crate Policy
//!
//! - No process side effects: nothing here prints or exits. The CLI crate
//!   turns a [`ValidationFailure`] into output and an exit code.
//! - No `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod status;
pub mod validate;

pub use document::{PackageName, PackageStatusDocument, RepositoryDocument};
pub use error::{DocumentError, UnknownVariant};
pub use status::{Importance, MalformedField, Maturity, StatusField, StatusRecord, Visibility};
pub use validate::{validate, RecordError, ValidationFailure, ValidationReport};
