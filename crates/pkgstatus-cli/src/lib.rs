//! # pkgstatus-cli — Package Status Linter
//!
//! Provides the `pkgstatus` command-line interface:
//!
//! ```bash
//! pkgstatus package_status.yaml repository.yaml
//! pkgstatus -vv package_status.yaml repository.yaml
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handler in [`lint`].
//! - Validation rules live in `pkgstatus-core`; nothing here inspects
//!   package records.

pub mod lint;
