//! # Status/Repository Validation
//!
//! Checks a [`PackageStatusDocument`] against a [`RepositoryDocument`] in
//! two steps:
//!
//! 1. **Key-set reconciliation.** Both documents must name exactly the same
//!    packages. Any difference fails the run with a single
//!    [`ValidationFailure::KeySetMismatch`] and no record is inspected.
//! 2. **Record checks.** Every status record is checked in file order. A bad
//!    visibility is reported alone; public packages additionally need a valid
//!    maturity and importance, each reported independently. All problems are
//!    collected into one [`ValidationFailure::MalformedRecords`].
//!
//! Validation is pure: the inputs are borrowed and nothing is printed.

use thiserror::Error;

use crate::document::{PackageStatusDocument, RepositoryDocument};
use crate::status::{MalformedField, StatusRecord, Visibility};

/// Summary of a successful validation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Total packages checked.
    pub packages: usize,
    /// Packages declared public.
    pub public: usize,
    /// Packages declared private.
    pub private: usize,
}

/// A single rejected field on a single package.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{package}: {field}")]
pub struct RecordError {
    /// Package the field belongs to.
    pub package: String,
    /// The rejected field and its raw value.
    pub field: MalformedField,
}

/// Why a pair of documents failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    /// The documents disagree on which packages exist. Both lists are sorted;
    /// at least one is non-empty.
    #[error("{}", key_set_report(.only_in_status, .only_in_repository))]
    KeySetMismatch {
        only_in_status: Vec<String>,
        only_in_repository: Vec<String>,
    },

    /// One or more records hold values outside the accepted enumerations,
    /// in discovery order.
    #[error("{}", record_report(.0))]
    MalformedRecords(Vec<RecordError>),
}

fn key_set_report(only_in_status: &[String], only_in_repository: &[String]) -> String {
    let mut lines = Vec::with_capacity(2);
    if !only_in_status.is_empty() {
        lines.push(format!(
            "packages present in the status file but absent from the repository file: {}",
            only_in_status.join(", ")
        ));
    }
    if !only_in_repository.is_empty() {
        lines.push(format!(
            "packages present in the repository file but absent from the status file: {}",
            only_in_repository.join(", ")
        ));
    }
    lines.join("\n")
}

fn record_report(errors: &[RecordError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validate a package status document against a repository document.
///
/// # Errors
///
/// [`ValidationFailure::KeySetMismatch`] if the package sets differ (record
/// checks are skipped), otherwise [`ValidationFailure::MalformedRecords`] if
/// any record is malformed.
pub fn validate(
    package_status: &PackageStatusDocument,
    repository: &RepositoryDocument,
) -> Result<ValidationReport, ValidationFailure> {
    check_key_sets(package_status, repository)?;

    let mut report = ValidationReport::default();
    let mut errors = Vec::new();

    for (package, record) in package_status.iter() {
        report.packages += 1;
        match check_record(record) {
            Ok(Visibility::Public) => report.public += 1,
            Ok(Visibility::Private) => report.private += 1,
            Err(fields) => {
                for field in fields {
                    tracing::debug!(package = %package, field = %field.field, value = %field.value, "malformed status field");
                    errors.push(RecordError {
                        package: package.to_string(),
                        field,
                    });
                }
            }
        }
    }

    if errors.is_empty() {
        tracing::info!(
            packages = report.packages,
            public = report.public,
            private = report.private,
            "package status records are well-formed"
        );
        Ok(report)
    } else {
        tracing::info!(errors = errors.len(), "package status records are malformed");
        Err(ValidationFailure::MalformedRecords(errors))
    }
}

fn check_key_sets(
    package_status: &PackageStatusDocument,
    repository: &RepositoryDocument,
) -> Result<(), ValidationFailure> {
    let status_names = package_status.package_names();
    let repository_names = repository.package_names();

    let only_in_status = sorted_names(status_names.difference(&repository_names));
    let only_in_repository = sorted_names(repository_names.difference(&status_names));

    tracing::debug!(
        status = status_names.len(),
        repository = repository_names.len(),
        only_in_status = only_in_status.len(),
        only_in_repository = only_in_repository.len(),
        "reconciled package sets"
    );

    if only_in_status.is_empty() && only_in_repository.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailure::KeySetMismatch {
            only_in_status,
            only_in_repository,
        })
    }
}

fn sorted_names<T: ToString>(names: impl Iterator<Item = T>) -> Vec<String> {
    let mut names: Vec<String> = names.map(|n| n.to_string()).collect();
    names.sort();
    names
}

/// Check one record, returning its visibility or every malformed field.
///
/// A malformed visibility is returned on its own: maturity and importance
/// are only meaningful once the package is known to be public.
fn check_record(record: &StatusRecord) -> Result<Visibility, Vec<MalformedField>> {
    let visibility = record.visibility().map_err(|e| vec![e])?;
    if visibility == Visibility::Private {
        return Ok(visibility);
    }

    let errors: Vec<MalformedField> = [
        record.maturity().err(),
        record.importance().err(),
    ]
    .into_iter()
    .flatten()
    .collect();

    if errors.is_empty() {
        Ok(visibility)
    } else {
        Err(errors)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn valid_record() -> impl Strategy<Value = StatusRecord> {
        prop_oneof![
            Just(StatusRecord::new(Some("private"), None, None)),
            (
                prop::sample::select(vec!["experimental", "stable", "deprecated"]),
                prop::sample::select(vec!["low", "medium", "high"]),
            )
                .prop_map(|(m, i)| StatusRecord::new(Some("public"), Some(m), Some(i))),
        ]
    }

    proptest! {
        /// Matching key sets with well-formed records always pass.
        #[test]
        fn matching_well_formed_documents_pass(
            records in prop::collection::btree_map("[a-z][a-z0-9_-]{0,12}", valid_record(), 0..16)
        ) {
            let repository = RepositoryDocument::from_packages(records.keys().rev().cloned()).unwrap();
            let status = PackageStatusDocument::from_records(records).unwrap();
            let report = validate(&status, &repository);
            prop_assert!(report.is_ok(), "unexpected failure: {:?}", report.err());
            let report = report.unwrap();
            prop_assert_eq!(report.packages, report.public + report.private);
        }

        /// Private packages never fail on maturity or importance.
        #[test]
        fn private_packages_are_exempt(
            maturity in proptest::option::of("[a-zA-Z]{0,10}"),
            importance in proptest::option::of("[a-zA-Z]{0,10}"),
        ) {
            let record = StatusRecord::new(Some("private"), maturity.as_deref(), importance.as_deref());
            let status = PackageStatusDocument::from_records([("pkg", record)]).unwrap();
            let repository = RepositoryDocument::from_packages(["pkg"]).unwrap();
            prop_assert!(validate(&status, &repository).is_ok());
        }

        /// Any name on only one side is reported and no record errors appear.
        #[test]
        fn extra_status_package_gates_record_checks(
            shared in prop::collection::btree_set("[a-m]{1,6}", 0..8),
            extra in "[n-z]{1,6}",
        ) {
            let mut records: Vec<(String, StatusRecord)> = shared
                .iter()
                .map(|n| (n.clone(), StatusRecord::new(Some("bogus"), None, None)))
                .collect();
            records.push((extra.clone(), StatusRecord::default()));
            let status = PackageStatusDocument::from_records(records).unwrap();
            let repository = RepositoryDocument::from_packages(shared.iter().cloned()).unwrap();

            let failure = validate(&status, &repository).unwrap_err();
            prop_assert_eq!(
                failure,
                ValidationFailure::KeySetMismatch {
                    only_in_status: vec![extra],
                    only_in_repository: vec![],
                }
            );
        }
    }
}
