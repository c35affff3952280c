//! Test: every component logs through one handler at one level

use crate::helpers::*;
use chap::core::StageRegistry;
use chap::execution::Runner;
use chap::logging::LogLevel;
use chap::PipelineConfig;

#[test]
fn test_stages_and_pipeline_share_handler_and_level() {
    let recorder = Recorder::new();
    let registry = recording_registry("grp", &["A", "B"], &recorder);
    let (logging, _log) = capture_logging(LogLevel::Debug);

    let config = PipelineConfig::from_yaml("pipeline: [grp.A, grp.B]").unwrap();
    let runner = Runner::new(&registry, &logging);
    let mut pipeline = runner.assemble(&config, false).unwrap();

    assert!(pipeline.logger().context().shares_handler(&logging));
    assert_eq!(pipeline.logger().level(), LogLevel::Debug);
    assert!(runner.logger().context().shares_handler(&logging));
    for stage in pipeline.stages() {
        assert!(stage.logger().context().shares_handler(&logging));
        assert_eq!(stage.logger().level(), LogLevel::Debug);
    }

    pipeline.execute().unwrap();
    for call in recorder.calls() {
        assert!(call.logger.context().shares_handler(pipeline.logger().context()));
    }
}

#[test]
fn test_uniform_format_across_components() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.json");
    std::fs::write(&input, "[1, 2, 3]").unwrap();
    let yaml = format!(
        "pipeline:\n  - common.JSONReader:\n      filename: {}\n",
        input.display()
    );

    let registry = StageRegistry::with_builtins();
    let (logging, log) = capture_logging(LogLevel::Info);
    run_yaml(&yaml, false, &registry, &logging).unwrap();

    let log = log.contents();
    for name in ["runner", "Pipeline", "JSONReader"] {
        assert!(
            log.contains(&format!("{:<20}: ", name)),
            "missing padded entry for {} in:\n{}",
            name,
            log
        );
    }
}

#[test]
fn test_level_filters_every_component() {
    let recorder = Recorder::new();
    let registry = recording_registry("grp", &["A"], &recorder);
    let (logging, log) = capture_logging(LogLevel::Error);

    run_yaml("pipeline: [grp.A]", false, &registry, &logging).unwrap();

    assert_eq!(recorder.calls().len(), 1);
    assert!(log.contents().is_empty());
}
