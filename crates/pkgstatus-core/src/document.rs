//! # Package Documents
//!
//! Loads the package status file and the repository file from YAML into
//! [`PackageStatusDocument`] and [`RepositoryDocument`].
//!
//! Both files are mappings keyed by package name. Entry order follows the
//! source file, so per-record errors are reported in the order a reader
//! sees the packages. Merge keys (`<<: *anchor`) are resolved before any
//! entry is read. An empty file (or one containing only `null`) is an empty
//! document; any other non-mapping top level is rejected.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::Path;

use serde_yaml::Value;

use crate::error::DocumentError;
use crate::status::StatusRecord;

/// A package name as written in a YAML key.
///
/// The key's YAML type is part of its identity: `1` and `"1"` name
/// different packages.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PackageName {
    /// A string key.
    Text(String),
    /// A numeric key, in its YAML textual form.
    Number(String),
    /// A boolean key.
    Bool(bool),
}

impl PackageName {
    fn from_key(key: &Value) -> Result<Self, DocumentError> {
        match key {
            Value::String(s) => Ok(Self::Text(s.clone())),
            Value::Number(n) => Ok(Self::Number(n.to_string())),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            other => Err(DocumentError::UnsupportedKey { found: kind(other) }),
        }
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) | Self::Number(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for PackageName {
    fn from(name: &str) -> Self {
        Self::Text(name.to_string())
    }
}

impl From<String> for PackageName {
    fn from(name: String) -> Self {
        Self::Text(name)
    }
}

/// Per-package status metadata, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageStatusDocument {
    entries: Vec<(PackageName, StatusRecord)>,
}

impl PackageStatusDocument {
    /// Parse a package status document from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, DocumentError> {
        let entries = package_entries(text)?
            .into_iter()
            .map(|(name, value)| (name, StatusRecord::from_value(&value)))
            .collect();
        Ok(Self { entries })
    }

    /// Read and parse a package status file.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let doc = Self::from_yaml_str(&read(path)?)?;
        tracing::debug!(path = %path.display(), packages = doc.len(), "loaded package status file");
        Ok(doc)
    }

    /// Build a document from records, rejecting repeated names.
    pub fn from_records<I, S>(records: I) -> Result<Self, DocumentError>
    where
        I: IntoIterator<Item = (S, StatusRecord)>,
        S: Into<PackageName>,
    {
        let entries: Vec<(PackageName, StatusRecord)> =
            records.into_iter().map(|(n, r)| (n.into(), r)).collect();
        ensure_unique(entries.iter().map(|(n, _)| n))?;
        Ok(Self { entries })
    }

    /// Number of packages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document lists no packages.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate packages in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&PackageName, &StatusRecord)> {
        self.entries.iter().map(|(n, r)| (n, r))
    }

    /// The set of package names.
    pub fn package_names(&self) -> BTreeSet<&PackageName> {
        self.entries.iter().map(|(n, _)| n).collect()
    }
}

/// The packages listed in the repository file.
///
/// Dependency data is parsed for well-formedness and then dropped; only the
/// key set takes part in validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepositoryDocument {
    packages: Vec<PackageName>,
}

impl RepositoryDocument {
    /// Parse a repository document from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, DocumentError> {
        let packages = package_entries(text)?
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        Ok(Self { packages })
    }

    /// Read and parse a repository file.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let doc = Self::from_yaml_str(&read(path)?)?;
        tracing::debug!(path = %path.display(), packages = doc.len(), "loaded repository file");
        Ok(doc)
    }

    /// Build a document from package names, rejecting repeated names.
    pub fn from_packages<I, S>(packages: I) -> Result<Self, DocumentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<PackageName>,
    {
        let packages: Vec<PackageName> = packages.into_iter().map(Into::into).collect();
        ensure_unique(packages.iter())?;
        Ok(Self { packages })
    }

    /// Number of packages.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether the document lists no packages.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// The set of package names.
    pub fn package_names(&self) -> BTreeSet<&PackageName> {
        self.packages.iter().collect()
    }
}

fn read(path: &Path) -> Result<String, DocumentError> {
    std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse YAML text into `(package name, value)` pairs in file order.
fn package_entries(text: &str) -> Result<Vec<(PackageName, Value)>, DocumentError> {
    let mut root: Value = serde_yaml::from_str(text)?;
    root.apply_merge()?;

    let map = match root {
        Value::Mapping(map) => map,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(DocumentError::NotAMapping {
                found: kind(&other),
            })
        }
    };

    let mut entries = Vec::with_capacity(map.len());
    for (key, value) in map {
        entries.push((PackageName::from_key(&key)?, value));
    }
    ensure_unique(entries.iter().map(|(n, _)| n))?;
    Ok(entries)
}

fn ensure_unique<'a>(names: impl Iterator<Item = &'a PackageName>) -> Result<(), DocumentError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(DocumentError::DuplicatePackage(name.to_string()));
        }
    }
    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}
