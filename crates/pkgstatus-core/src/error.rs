//! # Error Types
//!
//! Structured errors for loading and checking the two input documents,
//! built with `thiserror`. Validation failures live in
//! [`crate::validate`]; this module covers everything that happens before
//! validation can start.

use std::path::PathBuf;

use thiserror::Error;

use crate::status::StatusField;

/// A string that does not name any variant of a status enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("\"{value}\" is not a valid {field}")]
pub struct UnknownVariant {
    /// The enumeration that rejected the value.
    pub field: StatusField,
    /// The rejected text.
    pub value: String,
}

/// Errors raised while turning a YAML file into a package document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("failed to read {}", .path.display())]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The text is not well-formed YAML.
    #[error("malformed YAML")]
    Parse(#[from] serde_yaml::Error),

    /// The top-level value is something other than a mapping.
    #[error("top-level value must be a mapping of package names, found {found}")]
    NotAMapping {
        /// Kind of value found instead.
        found: &'static str,
    },

    /// A package name is a sequence, mapping, null or tagged value.
    #[error("package names must be scalars, found {found} key")]
    UnsupportedKey {
        /// Kind of key found.
        found: &'static str,
    },

    /// The same package name appears twice.
    #[error("package {0} is listed more than once")]
    DuplicatePackage(String),
}
