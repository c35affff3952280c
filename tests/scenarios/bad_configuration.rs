//! Test: malformed configurations fail before any stage executes

use crate::helpers::*;
use chap::core::{config::ConfigError, ResolveError};
use chap::execution::RunError;
use chap::logging::LogLevel;

fn run_failing(yaml: &str) -> (RunError, Recorder, String) {
    let recorder = Recorder::new();
    let registry = recording_registry("grp", &["A", "B"], &recorder);
    let (logging, log) = capture_logging(LogLevel::Info);

    let err = run_yaml(yaml, false, &registry, &logging).unwrap_err();
    (err, recorder, log.contents())
}

#[test]
fn test_identifier_without_dot() {
    let (err, recorder, log) = run_failing("pipeline: [grp.A, foo]\n");

    assert!(matches!(
        err,
        RunError::Config(ConfigError::InvalidStageId { index: 1, ref name }) if name == "foo"
    ));
    assert!(recorder.calls().is_empty());
    assert!(!log.contains("Executing"));
}

#[test]
fn test_identifier_with_two_dots() {
    let (err, recorder, _log) = run_failing("pipeline: [a.b.c, grp.A]\n");

    assert!(matches!(
        err,
        RunError::Config(ConfigError::InvalidStageId { index: 0, ref name }) if name == "a.b.c"
    ));
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_unknown_group() {
    let (err, recorder, log) = run_failing("pipeline: [grp.A, other.A]\n");

    assert!(matches!(err, RunError::Resolve(ResolveError::UnknownGroup(ref g)) if g == "other"));
    assert!(recorder.calls().is_empty());
    assert!(log.contains("Loaded grp.A"));
    assert!(!log.contains("Executing"));
}

#[test]
fn test_unknown_stage() {
    let (err, recorder, _log) = run_failing("pipeline: [grp.A, grp.Nope, grp.B]\n");

    assert!(matches!(
        err,
        RunError::Resolve(ResolveError::UnknownStage { ref stage, .. }) if stage == "Nope"
    ));
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_non_boolean_interactive() {
    let (err, recorder, _log) = run_failing("pipeline:\n  - grp.A: {interactive: 1}\n");

    assert!(matches!(err, RunError::Config(ConfigError::InvalidInteractive { .. })));
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_unparseable_yaml() {
    let (err, recorder, _log) = run_failing("pipeline: [grp.A\n");

    assert!(matches!(err, RunError::Config(ConfigError::Parse(_))));
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_scalar_options_name_the_entry() {
    let (err, recorder, _log) = run_failing("pipeline:\n  - grp.B\n  - grp.A: 5\n");

    assert!(matches!(
        err,
        RunError::Config(ConfigError::InvalidOptions { index: 1, ref name, .. }) if name == "grp.A"
    ));
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_numeric_entry_names_the_index() {
    let (err, recorder, _log) = run_failing("pipeline: [grp.A, 5]\n");

    assert!(matches!(err, RunError::Config(ConfigError::InvalidEntry { index: 1, .. })));
    assert!(err.to_string().contains("Pipeline entry 1"));
    assert!(recorder.calls().is_empty());
}
