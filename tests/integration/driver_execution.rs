//! Driver execution tests: single-pass invocation, output diffing,
//! diagnostic ordering, and failure propagation.

use super::support::*;
use genrun::driver;
use genrun::error::HarnessError;
use genrun::plugin::{Generator, GeneratorContext, GeneratorError, Severity};
use genrun::properties::{parse_property_args, BuildProperties};
use genrun::text::AdditionalText;
use genrun::writer::write_artifacts;
use tempfile::TempDir;

fn props(args: &[&str]) -> BuildProperties {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let (props, warnings) = parse_property_args(&args);
    assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
    props
}

#[test]
fn test_hello_scenario_produces_one_artifact() {
    let result = driver::execute(
        &HelloGenerator,
        &props(&["greeting=hi"]),
        &[],
        &fake_manifest(),
    )
    .unwrap();

    assert_eq!(result.artifacts.len(), 1);
    assert_eq!(result.artifacts[0].name.as_deref(), Some("hello.g.txt"));
    assert_eq!(result.artifacts[0].content, "hi");
    assert!(result.diagnostics.is_empty());

    let out = TempDir::new().unwrap();
    let count = write_artifacts(out.path(), &result.artifacts, "HelloGenerator").unwrap();
    assert_eq!(count, 1);
    assert_eq!(
        std::fs::read_to_string(out.path().join("hello.g.txt")).unwrap(),
        "hi"
    );
}

#[test]
fn test_property_lookup_is_case_insensitive_for_generators() {
    struct UppercaseLookupGenerator;

    impl Generator for UppercaseLookupGenerator {
        fn name(&self) -> &str {
            "UppercaseLookupGenerator"
        }

        fn execute(&self, ctx: &mut GeneratorContext) -> Result<(), GeneratorError> {
            let value = ctx
                .option("BUILD_PROPERTY.GREETING")
                .unwrap_or("missing")
                .to_string();
            ctx.add_source("case.g.txt", value);
            Ok(())
        }
    }

    let result = driver::execute(
        &UppercaseLookupGenerator,
        &props(&["Greeting=hello"]),
        &[],
        &fake_manifest(),
    )
    .unwrap();

    assert_eq!(result.artifacts[0].content, "hello");
}

#[test]
fn test_zero_artifacts_still_reports_diagnostics() {
    let result = driver::execute(
        &SilentGenerator,
        &BuildProperties::default(),
        &[],
        &fake_manifest(),
    )
    .unwrap();

    assert!(result.artifacts.is_empty());
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].message, "nothing to do");
}

#[test]
fn test_failing_generator_propagates_whole() {
    let err = driver::execute(
        &FailingGenerator,
        &BuildProperties::default(),
        &[],
        &fake_manifest(),
    )
    .unwrap_err();

    match err {
        HarnessError::GeneratorFailed(message) => {
            assert!(message.contains("This generator always fails"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_identically_named_outputs_both_surface() {
    let result = driver::execute(
        &DuplicateNameGenerator,
        &BuildProperties::default(),
        &[],
        &fake_manifest(),
    )
    .unwrap();

    assert_eq!(result.artifacts.len(), 2);
    assert_eq!(result.artifacts[0].name.as_deref(), Some("dup.g.txt"));
    assert_eq!(result.artifacts[1].name.as_deref(), Some("dup.g.txt"));
    assert_eq!(result.artifacts[0].content, "one");
    assert_eq!(result.artifacts[1].content, "two");
}

#[test]
fn test_artifact_order_matches_production_order() {
    struct OrderedGenerator;

    impl Generator for OrderedGenerator {
        fn name(&self) -> &str {
            "OrderedGenerator"
        }

        fn execute(&self, ctx: &mut GeneratorContext) -> Result<(), GeneratorError> {
            ctx.add_source("z_last_name.g.txt", "first produced");
            ctx.add_source("a_first_name.g.txt", "second produced");
            Ok(())
        }
    }

    let result = driver::execute(
        &OrderedGenerator,
        &BuildProperties::default(),
        &[],
        &fake_manifest(),
    )
    .unwrap();

    // Production order, never name order.
    assert_eq!(result.artifacts[0].name.as_deref(), Some("z_last_name.g.txt"));
    assert_eq!(result.artifacts[1].name.as_deref(), Some("a_first_name.g.txt"));
}

#[test]
fn test_nameless_outputs_survive_with_resolution_notes_first() {
    let result = driver::execute(
        &NamelessGenerator,
        &BuildProperties::default(),
        &[],
        &fake_manifest(),
    )
    .unwrap();

    assert_eq!(result.artifacts.len(), 2);
    assert!(result.artifacts.iter().all(|a| a.name.is_none()));

    // Compilation-attached resolution notes precede the generator's own
    // diagnostics.
    assert_eq!(result.diagnostics.len(), 3);
    assert_eq!(result.diagnostics[0].severity, Severity::Info);
    assert!(result.diagnostics[0].message.contains("no hint name"));
    assert!(result.diagnostics[1].message.contains("no hint name"));
    assert_eq!(result.diagnostics[2].message, "emitted two nameless sources");
}

#[test]
fn test_harness_is_deterministic_across_runs() {
    let properties = props(&["greeting=stable"]);

    let first = driver::execute(&HelloGenerator, &properties, &[], &fake_manifest()).unwrap();
    let second = driver::execute(&HelloGenerator, &properties, &[], &fake_manifest()).unwrap();

    assert_eq!(first.artifacts.len(), second.artifacts.len());
    for (a, b) in first.artifacts.iter().zip(second.artifacts.iter()) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.content, b.content);
    }
}

#[test]
fn test_additional_text_flows_through_to_artifacts() {
    let temp = TempDir::new().unwrap();
    let aux = temp.path().join("notes.txt");
    std::fs::write(&aux, "auxiliary content").unwrap();

    let texts = vec![AdditionalText::new(&aux)];
    let result = driver::execute(
        &AuxCopyGenerator,
        &BuildProperties::default(),
        &texts,
        &fake_manifest(),
    )
    .unwrap();

    assert_eq!(result.artifacts.len(), 1);
    assert_eq!(result.artifacts[0].name.as_deref(), Some("notes.txt.g.txt"));
    assert_eq!(result.artifacts[0].content, "auxiliary content");
}

#[test]
fn test_unreadable_additional_text_fails_the_run() {
    let temp = TempDir::new().unwrap();
    let texts = vec![AdditionalText::new(temp.path().join("absent.txt"))];

    let err = driver::execute(
        &AuxCopyGenerator,
        &BuildProperties::default(),
        &texts,
        &fake_manifest(),
    )
    .unwrap_err();

    assert!(matches!(err, HarnessError::GeneratorFailed(_)));
}
