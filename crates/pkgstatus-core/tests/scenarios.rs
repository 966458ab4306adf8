//! End-to-end checks from YAML text through validation.
//!
//! Each test loads both documents from inline YAML exactly as they would
//! appear on disk and asserts on the rendered failure message.

use pkgstatus_core::{validate, PackageStatusDocument, RepositoryDocument, ValidationFailure};

fn run(status: &str, repository: &str) -> Result<(), String> {
    let status = PackageStatusDocument::from_yaml_str(status).expect("status parses");
    let repository = RepositoryDocument::from_yaml_str(repository).expect("repository parses");
    validate(&status, &repository).map(|_| ()).map_err(|e| e.to_string())
}

const REPOSITORY_A: &str = "\
pkgA:
  libfoo: \"1.2\"
  libbar: \"3.0\"
";

#[test]
fn public_package_with_valid_metadata_passes() {
    let status = "\
pkgA:
  visibility: public
  maturity: stable
  importance: high
";
    assert_eq!(run(status, REPOSITORY_A), Ok(()));
}

#[test]
fn disjoint_packages_reported_on_both_sides() {
    let status = "pkgA:\n  visibility: private\n";
    let repository = "pkgB:\n  libfoo: \"1.0\"\n";
    let msg = run(status, repository).unwrap_err();
    assert_eq!(
        msg,
        "packages present in the status file but absent from the repository file: pkgA\n\
         packages present in the repository file but absent from the status file: pkgB"
    );
}

#[test]
fn private_package_without_maturity_passes() {
    assert_eq!(run("pkgA:\n  visibility: private\n", REPOSITORY_A), Ok(()));
}

#[test]
fn bogus_maturity_is_reported() {
    let status = "\
pkgA:
  visibility: public
  maturity: bogus
  importance: low
";
    assert_eq!(
        run(status, REPOSITORY_A),
        Err("pkgA: Malformed maturity: bogus".to_string())
    );
}

#[test]
fn bogus_visibility_is_the_only_line() {
    let status = "\
pkgA:
  visibility: bogus
  maturity: also-bogus
";
    assert_eq!(
        run(status, REPOSITORY_A),
        Err("pkgA: Malformed visibility: bogus".to_string())
    );
}

#[test]
fn key_mismatch_hides_malformed_records() {
    let status = "\
A:
  visibility: public
  maturity: stable
  importance: low
B:
  visibility: 42
";
    let status = PackageStatusDocument::from_yaml_str(status).unwrap();
    let repository = RepositoryDocument::from_yaml_str("A: {}\n").unwrap();
    let failure = validate(&status, &repository).unwrap_err();
    match failure {
        ValidationFailure::KeySetMismatch {
            only_in_status,
            only_in_repository,
        } => {
            assert_eq!(only_in_status, vec!["B".to_string()]);
            assert!(only_in_repository.is_empty());
        }
        other => panic!("expected key-set mismatch, got {other:?}"),
    }
}

#[test]
fn full_report_lists_every_problem_in_file_order() {
    let status = "\
core:
  visibility: public
  maturity: stable
  importance: high
tools:
  visibility: public
  importance: extreme
legacy:
  visibility: internal
  maturity: deprecated
scratch:
  visibility: private
  maturity: whatever
empty:
";
    let repository = "core: {}\ntools: {}\nlegacy: {}\nscratch: {}\nempty: {}\n";
    assert_eq!(
        run(status, repository),
        Err("tools: Malformed maturity: None\n\
             tools: Malformed importance: extreme\n\
             legacy: Malformed visibility: internal\n\
             empty: Malformed visibility: None"
            .to_string())
    );
}

#[test]
fn record_inheriting_through_merge_key_passes() {
    let status = "\
base: &base
  visibility: private
derived:
  <<: *base
";
    assert_eq!(run(status, "base: {}\nderived: {}\n"), Ok(()));
}

#[test]
fn public_defaults_shared_through_anchor() {
    let status = "\
defaults: &public
  visibility: public
  maturity: stable
  importance: medium
pkgA:
  <<: *public
  maturity: experimental
pkgB:
  <<: *public
  importance: vital
";
    let repository = "defaults: {}\npkgA: {}\npkgB: {}\n";
    assert_eq!(
        run(status, repository),
        Err("pkgB: Malformed importance: vital".to_string())
    );
}

#[test]
fn numeric_status_key_does_not_match_string_repository_key() {
    let msg = run("1:\n  visibility: private\n", "\"1\": {}\n").unwrap_err();
    assert_eq!(
        msg,
        "packages present in the status file but absent from the repository file: 1\n\
         packages present in the repository file but absent from the status file: 1"
    );
}

#[test]
fn numeric_keys_match_each_other() {
    assert_eq!(run("1:\n  visibility: private\n", "1: {}\n"), Ok(()));
}
