//! End-to-end generation passes against an in-memory sink

use codegen_output::{
    CommitOutcome, Location, MemorySink, Output, OutputConfig, OutputError, Severity,
    SinkError, TrimTrailingWhitespace,
};
use pretty_assertions::assert_eq;

const MANIFEST: &str = "META-INF/services/com.acme.Plugin";

fn manifest_lines(sink: &MemorySink) -> Vec<String> {
    sink.contents(Location::ClassOutput, MANIFEST)
        .expect("manifest should be written")
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_fresh_source_written_once() {
    let mut sink = MemorySink::new();
    let mut output =
        Output::new(&mut sink, OutputConfig::default()).with_rewrite(TrimTrailingWhitespace);

    let outcome = output
        .bind_source("com.acme", "Foo", |out| {
            out.out("package com.acme;  \n");
            out.out("class Foo {}\n");
        })
        .unwrap();
    output.finish().unwrap();

    assert_eq!(outcome, CommitOutcome::Written);
    assert_eq!(sink.paths(Location::SourceOutput), vec!["com/acme/Foo.java"]);
    assert_eq!(
        sink.contents(Location::SourceOutput, "com/acme/Foo.java").as_deref(),
        Some("package com.acme;\nclass Foo {}\n")
    );
}

#[test]
fn test_identical_regeneration_is_a_warning() {
    let mut sink = MemorySink::new();
    sink.seed_generated(Location::SourceOutput, "com/acme/Foo.java", "class Foo {}\n");

    let mut output = Output::new(&mut sink, OutputConfig::default());
    let outcome = output
        .bind_source("com.acme", "Foo", |out| out.out("class Foo {}\n"))
        .unwrap();
    let summary = output.finish().unwrap();

    assert_eq!(outcome, CommitOutcome::Regenerated);
    assert_eq!(summary.sources_regenerated, 1);
    assert!(!sink.diagnostics().has_errors());
    assert_eq!(sink.diagnostics().with_severity(Severity::Warning).count(), 1);
}

#[test]
fn test_different_content_is_a_collision() {
    let mut sink = MemorySink::new();
    sink.seed_generated(Location::SourceOutput, "com/acme/Foo.java", "class Foo {}\n");

    let mut output = Output::new(&mut sink, OutputConfig::default());
    let outcome = output
        .bind_source("com.acme", "Foo", |out| out.out("class Foo { int x; }\n"))
        .unwrap();
    output.finish().unwrap();

    assert_eq!(outcome, CommitOutcome::Collision);
    let errors: Vec<_> = sink.diagnostics().with_severity(Severity::Error).collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("com.acme.Foo"));
    assert!(errors[0].message.contains("collision"));
}

#[test]
fn test_same_name_in_other_package_is_separate() {
    let mut sink = MemorySink::new();
    let mut output = Output::new(&mut sink, OutputConfig::default());

    output
        .bind_source("com.acme", "Foo", |out| out.out("a"))
        .unwrap();
    output
        .bind_source("org.other", "Foo", |out| out.out("b"))
        .unwrap();
    output.finish().unwrap();

    assert!(sink.diagnostics().is_empty());
    assert_eq!(
        sink.paths(Location::SourceOutput),
        vec!["com/acme/Foo.java", "org/other/Foo.java"]
    );
}

#[test]
fn test_contributions_from_many_call_sites() {
    let mut sink = MemorySink::new();
    let mut output = Output::new(&mut sink, OutputConfig::default());

    output
        .bind_service("com.acme.Plugin", |out| out.out("a\nb"))
        .unwrap();
    output
        .bind_source("com.acme", "Unrelated", |out| out.out("class Unrelated {}"))
        .unwrap();
    output
        .bind_service("com.acme.Plugin", |out| out.out("b\nc"))
        .unwrap();
    output.finish().unwrap();

    assert_eq!(manifest_lines(&sink), vec!["a", "b", "c"]);
}

#[test]
fn test_later_round_merges_with_prior_manifest() {
    let mut sink = MemorySink::new();
    sink.seed(Location::ClassOutput, MANIFEST, "x\n#comment\n\ny\n");

    let mut output = Output::new(&mut sink, OutputConfig::default());
    output
        .bind_service("com.acme.Plugin", |out| out.out("y\nz"))
        .unwrap();
    output.finish().unwrap();

    assert_eq!(manifest_lines(&sink), vec!["x", "y", "z"]);
}

#[test]
fn test_manifest_accumulates_across_passes() {
    let mut sink = MemorySink::new();

    {
        let mut output = Output::new(&mut sink, OutputConfig::default());
        output
            .bind_service("com.acme.Plugin", |out| out.out("com.acme.First"))
            .unwrap();
        output.finish().unwrap();
    }

    sink.next_pass();

    {
        let mut output = Output::new(&mut sink, OutputConfig::default());
        output
            .bind_service("com.acme.Plugin", |out| {
                out.out("com.acme.Second\ncom.acme.First")
            })
            .unwrap();
        output.finish().unwrap();
    }

    assert_eq!(
        manifest_lines(&sink),
        vec!["com.acme.First", "com.acme.Second"]
    );
}

#[test]
fn test_locked_manifest_aborts_finish() {
    let mut sink = MemorySink::new();
    sink.seed_generated(Location::ClassOutput, MANIFEST, "x\n");

    let mut output = Output::new(&mut sink, OutputConfig::default());
    output
        .bind_service("com.acme.Plugin", |out| out.out("y"))
        .unwrap();
    let result = output.finish();

    assert!(matches!(
        result,
        Err(OutputError::Sink(SinkError::DestinationExists { .. }))
    ));
}

#[test]
fn test_source_files_survive_a_failed_finalize() {
    let mut sink = MemorySink::new();
    sink.seed_generated(Location::ClassOutput, MANIFEST, "");

    let mut output = Output::new(&mut sink, OutputConfig::default());
    output
        .bind_source("com.acme", "Foo", |out| out.out("class Foo {}"))
        .unwrap();
    output
        .bind_service("com.acme.Plugin", |out| out.out("com.acme.Foo"))
        .unwrap();
    assert!(output.finish().is_err());

    assert_eq!(
        sink.contents(Location::SourceOutput, "com/acme/Foo.java").as_deref(),
        Some("class Foo {}")
    );
}
