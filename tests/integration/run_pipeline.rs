//! Pipeline-level tests: validation ordering, failure cleanliness, and
//! the writer-only-after-success guarantee.

use super::support::*;
use clap::Parser;
use genrun::cli::{Cli, RunContext};
use genrun::driver;
use genrun::error::HarnessError;
use genrun::properties::BuildProperties;
use genrun::writer::write_artifacts;
use tempfile::TempDir;

#[test]
fn test_output_directory_exists_before_any_module_load() {
    let temp = TempDir::new().unwrap();
    // Any existing file passes path validation; loading happens later.
    let stub_module = temp.path().join("stub.so");
    std::fs::write(&stub_module, "not a real module").unwrap();
    let out = temp.path().join("out");

    let cli = Cli::try_parse_from([
        "genrun",
        stub_module.to_str().unwrap(),
        out.to_str().unwrap(),
    ])
    .unwrap();

    let context = RunContext::new(&cli).unwrap();
    assert!(out.is_dir(), "validation must create the output directory");

    // The stub is not a loadable module, so execution fails at the load
    // stage; the directory stays present and empty.
    let err = context.execute().unwrap_err();
    assert!(matches!(err, HarnessError::ModuleLoadFailed { .. }));
    assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
}

#[test]
fn test_missing_module_fails_before_directory_creation() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("never-created");

    let cli = Cli::try_parse_from(["genrun", "/no/such/module.so", out.to_str().unwrap()])
        .unwrap();

    let err = RunContext::new(&cli).unwrap_err();
    assert!(matches!(err, HarnessError::ModuleNotFound(_)));
    assert!(!out.exists());
}

#[test]
fn test_generator_failure_writes_no_files() {
    let out = TempDir::new().unwrap();

    let result = driver::execute(
        &FailingGenerator,
        &BuildProperties::default(),
        &[],
        &fake_manifest(),
    );

    // The writer only runs after a successful driver result.
    if let Ok(run) = result {
        write_artifacts(out.path(), &run.artifacts, "FailingGenerator").unwrap();
        panic!("failing generator unexpectedly succeeded");
    }

    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_successful_run_reports_count_and_writes_files() {
    let out = TempDir::new().unwrap();

    let run = driver::execute(
        &DuplicateNameGenerator,
        &BuildProperties::default(),
        &[],
        &fake_manifest(),
    )
    .unwrap();

    let count = write_artifacts(out.path(), &run.artifacts, "DuplicateNameGenerator").unwrap();
    assert_eq!(count, 2);

    // Same final name twice: last write wins on disk.
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 1);
    assert_eq!(
        std::fs::read_to_string(out.path().join("dup.g.txt")).unwrap(),
        "two"
    );
}
