//! Integration tests for protocol runs through the application layer.

use osmodry::cli::{
    OutputArgs, OutputMode, cmd_init, cmd_reference, execute_protocol, resolve_protocol,
};
use osmodry::config::ProtocolConfig;
use osmodry::plot::{MOISTURE_CHART, WEIGHT_CHART};
use osmodry_core::{ProcessError, Stage};
use std::path::Path;

const QUIET: OutputMode = OutputMode {
    json: false,
    quiet: true,
};

const JSON: OutputMode = OutputMode {
    json: true,
    quiet: true,
};

fn protocol_writing_to(dir: &Path, file: &str) -> ProtocolConfig {
    let mut config = ProtocolConfig::default();
    config.output.path = dir.join(file);
    config
}

// =============================================================================
// RUN
// =============================================================================

#[test]
fn default_protocol_writes_reference_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = protocol_writing_to(dir.path(), "log.csv");

    let report = execute_protocol(&config, QUIET).expect("run");

    let text = std::fs::read_to_string(&report.export_path).expect("read");
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "Process,Time(h),Condition,Weight(g),Moisture(%),Weight Loss(g),Moisture Loss(%)"
    );
    assert_eq!(lines[2], "Drying,11.00,60.00,97.91,87.90,0.59,0.60");
    assert_eq!(report.session.stage_count(), 2);
    assert_eq!(report.checksum.len(), 64);
    assert!(report.charts.is_empty());
}

#[test]
fn json_format_and_charts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = protocol_writing_to(dir.path(), "log.json");
    config.output.format = "json".to_string();
    config.output.plot_dir = Some(dir.path().join("charts"));
    config.stages.push(Stage::drying(70.0, 3.0));

    let report = execute_protocol(&config, QUIET).expect("run");

    let bytes = std::fs::read(&report.export_path).expect("read");
    let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(value.as_array().map(Vec::len), Some(3));
    assert_eq!(value[2]["time_elapsed_at_end"], 14.0);

    assert_eq!(report.charts.len(), 2);
    assert!(dir.path().join("charts").join(WEIGHT_CHART).exists());
    assert!(dir.path().join("charts").join(MOISTURE_CHART).exists());
}

#[test]
fn repeated_runs_produce_identical_exports() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = execute_protocol(&protocol_writing_to(dir.path(), "a.csv"), QUIET).expect("run");
    let second = execute_protocol(&protocol_writing_to(dir.path(), "b.csv"), QUIET).expect("run");

    assert_eq!(first.checksum, second.checksum);
    assert_eq!(
        std::fs::read(&first.export_path).expect("read"),
        std::fs::read(&second.export_path).expect("read")
    );
}

#[test]
fn protocol_without_stages_reports_empty_history() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = protocol_writing_to(dir.path(), "log.csv");
    config.stages.clear();

    let result = execute_protocol(&config, QUIET);

    assert!(matches!(result, Err(ProcessError::EmptyHistory)));
    assert!(!dir.path().join("log.csv").exists());
}

#[test]
fn overflowing_protocol_fails_instead_of_hanging() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = protocol_writing_to(dir.path(), "log.csv");
    config.stages = vec![Stage::osmosis(1e308, 10.0), Stage::drying(60.0, 5.0)];
    config.output.plot_dir = Some(dir.path().join("charts"));

    let result = execute_protocol(&config, QUIET);
    assert!(matches!(result, Err(ProcessError::RenderError(_))));

    let text = std::fs::read_to_string(dir.path().join("log.csv")).expect("read");
    assert!(!text.contains("inf"));
    assert!(!text.contains("NaN"));
}

#[test]
fn stage_that_overflows_state_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = protocol_writing_to(dir.path(), "log.csv");
    config.stages = vec![Stage::osmosis(1e308, 1e300)];

    assert!(matches!(
        execute_protocol(&config, QUIET),
        Err(ProcessError::NonFiniteResult { .. })
    ));
    assert!(!dir.path().join("log.csv").exists());
}

// =============================================================================
// REFERENCE
// =============================================================================

#[test]
fn reference_section_by_name() {
    assert!(cmd_reference(Some("microbial"), QUIET).is_ok());
    assert!(cmd_reference(Some("2"), JSON).is_ok());
    assert!(cmd_reference(None, QUIET).is_ok());
}

#[test]
fn unknown_reference_section_rejected() {
    assert!(matches!(
        cmd_reference(Some("texture"), QUIET),
        Err(ProcessError::ConfigError(_))
    ));
}

// =============================================================================
// PROTOCOL FILES
// =============================================================================

#[test]
fn init_then_resolve_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("protocol.toml");

    cmd_init(&path, false).expect("init");
    let config = resolve_protocol(Some(&path), None, None, &[], &OutputArgs::default())
        .expect("resolve");

    assert_eq!(config, ProtocolConfig::default());
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("protocol.toml");
    std::fs::write(&path, "# mine").expect("write");

    assert!(matches!(
        cmd_init(&path, false),
        Err(ProcessError::ConfigError(_))
    ));
    assert!(cmd_init(&path, true).is_ok());
}

#[test]
fn command_line_overrides_protocol_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("protocol.toml");
    std::fs::write(
        &path,
        r#"
[sample]
initial_weight = 80.0
initial_moisture = 92.0

[[stages]]
kind = "osmosis"
brix = 60.0
hours = 4.0
"#,
    )
    .expect("write");

    let output = OutputArgs {
        output: Some(dir.path().join("out.json")),
        format: Some("json".to_string()),
        plot: None,
    };
    let config = resolve_protocol(
        Some(&path),
        None,
        Some(85.0),
        &["osmosis:40:2".to_string(), "drying:65:4".to_string()],
        &output,
    )
    .expect("resolve");

    assert_eq!(config.sample.initial_weight, 80.0);
    assert_eq!(config.sample.initial_moisture, 85.0);
    assert_eq!(
        config.stages,
        vec![Stage::osmosis(40.0, 2.0), Stage::drying(65.0, 4.0)]
    );
    assert_eq!(config.output.format, "json");
}

#[test]
fn malformed_protocol_file_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("protocol.toml");
    std::fs::write(&path, "[sample\ninitial_weight = ").expect("write");

    assert!(matches!(
        resolve_protocol(Some(&path), None, None, &[], &OutputArgs::default()),
        Err(ProcessError::ConfigError(_))
    ));
}
