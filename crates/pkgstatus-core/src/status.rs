//! # Status Enumerations and Records
//!
//! Defines the three closed enumerations a package status entry is checked
//! against ([`Visibility`], [`Maturity`], [`Importance`]) and the untrusted
//! [`StatusRecord`] read from the package status file.
//!
//! ## Untrusted input
//!
//! A record keeps the raw YAML value of each field. The typed accessors
//! (`visibility()`, `maturity()`, `importance()`) treat a missing field, a
//! non-string value and an unknown string identically: all three come back
//! as a [`MalformedField`] carrying the rendered raw value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::UnknownVariant;

/// Whether a package is exposed publicly or kept private.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Published package; maturity and importance are mandatory.
    Public,
    /// Internal package; maturity and importance are not checked.
    Private,
}

impl Visibility {
    /// All accepted visibility values.
    pub fn all() -> &'static [Visibility] {
        &[Self::Public, Self::Private]
    }

    /// The value as spelled in the status file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

/// Lifecycle stage of a public package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Maturity {
    Experimental,
    Stable,
    Deprecated,
}

impl Maturity {
    /// All accepted maturity values.
    pub fn all() -> &'static [Maturity] {
        &[Self::Experimental, Self::Stable, Self::Deprecated]
    }

    /// The value as spelled in the status file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Experimental => "experimental",
            Self::Stable => "stable",
            Self::Deprecated => "deprecated",
        }
    }
}

/// Priority tier of a public package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    Medium,
    High,
}

impl Importance {
    /// All accepted importance values.
    pub fn all() -> &'static [Importance] {
        &[Self::Low, Self::Medium, Self::High]
    }

    /// The value as spelled in the status file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

macro_rules! impl_status_enum {
    ($ty:ident, $field:expr) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::all()
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| UnknownVariant {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }
    };
}

impl_status_enum!(Visibility, StatusField::Visibility);
impl_status_enum!(Maturity, StatusField::Maturity);
impl_status_enum!(Importance, StatusField::Importance);

/// The fields of a status record that are subject to enumeration checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusField {
    Visibility,
    Maturity,
    Importance,
}

impl StatusField {
    /// The key used for this field in the status file.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Visibility => "visibility",
            Self::Maturity => "maturity",
            Self::Importance => "importance",
        }
    }
}

impl fmt::Display for StatusField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A status field whose value is missing, not a string, or not one of the
/// accepted values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedField {
    /// Which field was rejected.
    pub field: StatusField,
    /// The raw value, rendered for display (`None` when absent).
    pub value: String,
}

impl fmt::Display for MalformedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Malformed {}: {}", self.field, self.value)
    }
}

/// One entry of the package status file.
///
/// Fields hold whatever the file contained. Nothing is rejected at load
/// time; enumeration checks happen through the typed accessors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusRecord {
    visibility: Option<Value>,
    maturity: Option<Value>,
    importance: Option<Value>,
}

impl StatusRecord {
    /// Build a record from string fields.
    pub fn new(visibility: Option<&str>, maturity: Option<&str>, importance: Option<&str>) -> Self {
        let text = |v: Option<&str>| v.map(|s| Value::String(s.to_string()));
        Self {
            visibility: text(visibility),
            maturity: text(maturity),
            importance: text(importance),
        }
    }

    /// Build a record from the YAML value attached to a package name.
    ///
    /// A value that is not a mapping yields a record with every field absent.
    /// Unknown keys are ignored.
    pub fn from_value(value: &Value) -> Self {
        let Value::Mapping(map) = value else {
            return Self::default();
        };
        let get = |field: StatusField| map.get(field.key()).cloned();
        Self {
            visibility: get(StatusField::Visibility),
            maturity: get(StatusField::Maturity),
            importance: get(StatusField::Importance),
        }
    }

    /// The declared visibility, if it is one of the accepted values.
    pub fn visibility(&self) -> Result<Visibility, MalformedField> {
        parse_field(StatusField::Visibility, self.visibility.as_ref())
    }

    /// The declared maturity, if it is one of the accepted values.
    pub fn maturity(&self) -> Result<Maturity, MalformedField> {
        parse_field(StatusField::Maturity, self.maturity.as_ref())
    }

    /// The declared importance, if it is one of the accepted values.
    pub fn importance(&self) -> Result<Importance, MalformedField> {
        parse_field(StatusField::Importance, self.importance.as_ref())
    }
}

fn parse_field<T: FromStr>(field: StatusField, raw: Option<&Value>) -> Result<T, MalformedField> {
    match raw {
        Some(Value::String(s)) => s.parse().map_err(|_| MalformedField {
            field,
            value: s.clone(),
        }),
        other => Err(MalformedField {
            field,
            value: render_value(other),
        }),
    }
}

/// Render a raw YAML value for an error message.
///
/// A top-level string renders verbatim. Everything else uses `repr`-style
/// notation: absent values and null as `None`, booleans as `True`/`False`,
/// strings nested in collections quoted, e.g. `['low', None]`, `{'a': 1}`.
pub fn render_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        None => "None".to_string(),
        Some(other) => repr(other),
    }
}

fn repr(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.is_nan() => "nan".to_string(),
            Some(f) if n.is_f64() && f.is_infinite() => {
                let sign = if f > 0.0 { "" } else { "-" };
                format!("{sign}inf")
            }
            _ => n.to_string(),
        },
        Value::String(s) => quote(s),
        Value::Sequence(items) => {
            let items: Vec<String> = items.iter().map(repr).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Mapping(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", repr(k), repr(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, repr(&tagged.value)),
    }
}

/// Quote a string the way a `repr` does: single quotes unless the text
/// contains a single quote and no double quote.
fn quote(s: &str) -> String {
    let delim = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}
