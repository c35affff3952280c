//! Test: built-in readers, processors and writers chained together

use crate::helpers::*;
use chap::core::{PipelineError, StageError, StageRegistry};
use chap::execution::RunError;
use chap::logging::LogLevel;

#[test]
fn test_yaml_to_json_through_print() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.yaml");
    let output = dir.path().join("output.json");
    std::fs::write(&input, "scan:\n  energy: 60\n  frames: [1, 2]\n").unwrap();

    let yaml = format!(
        r#"
pipeline:
  - common.YAMLReader:
      filename: {}
      schema: ScanConfig
  - common.PrintProcessor
  - common.JSONWriter:
      filename: {}
"#,
        input.display(),
        output.display()
    );

    let registry = StageRegistry::with_builtins();
    let (logging, _log) = capture_logging(LogLevel::Info);
    let outcome = run_yaml(&yaml, false, &registry, &logging).unwrap();

    assert_eq!(outcome.data.len(), 1);
    assert_eq!(outcome.data[0].schema.as_deref(), Some("ScanConfig"));

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written, serde_json::json!({"scan": {"energy": 60, "frames": [1, 2]}}));
}

#[test]
fn test_writer_failure_stops_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.json");
    let output = dir.path().join("exists.yaml");
    std::fs::write(&input, "{\"a\": 1}").unwrap();
    std::fs::write(&output, "old").unwrap();

    let yaml = format!(
        "pipeline:\n  - common.JSONReader:\n      filename: {}\n  - common.YAMLWriter:\n      filename: {}\n",
        input.display(),
        output.display()
    );

    let registry = StageRegistry::with_builtins();
    let (logging, _log) = capture_logging(LogLevel::Info);
    let err = run_yaml(&yaml, false, &registry, &logging).unwrap_err();

    match err {
        RunError::Pipeline(PipelineError::StageFailed { index, stage, source }) => {
            assert_eq!(index, 1);
            assert_eq!(stage, "YAMLWriter");
            assert!(matches!(source, StageError::Exists(_)));
        }
        other => panic!("Expected StageFailed, got {:?}", other),
    }
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "old");
}
