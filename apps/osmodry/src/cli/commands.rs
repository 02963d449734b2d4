//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::OutputArgs;
use super::prompt::{Prompter, collect_protocol};
use crate::config::{ProtocolConfig, parse_stage_spec};
use crate::plot::render_charts;
use osmodry_core::{ProcessError, ReferenceSection, Session, Trajectory, export, export_checksum};
use std::path::{Path, PathBuf};

/// How results are shown on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputMode {
    /// Print one JSON document instead of text.
    pub json: bool,
    /// Skip per-stage progress lines.
    pub quiet: bool,
}

// =============================================================================
// PATH VALIDATION
// =============================================================================

/// Validate an output path.
///
/// The parent directory must exist; the returned path has a canonical
/// parent and the original file name.
fn validate_output_path(path: &Path) -> Result<PathBuf, ProcessError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        ProcessError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(ProcessError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| ProcessError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// PROTOCOL RESOLUTION
// =============================================================================

/// Merge a protocol file (or the default protocol) with command-line overrides.
///
/// Stage flags replace the protocol's stages entirely.
pub fn resolve_protocol(
    protocol: Option<&Path>,
    weight: Option<f64>,
    moisture: Option<f64>,
    stages: &[String],
    output: &OutputArgs,
) -> Result<ProtocolConfig, ProcessError> {
    let mut config = match protocol {
        Some(path) => {
            tracing::info!("Loading protocol from {:?}", path);
            ProtocolConfig::load(path)?
        }
        None => ProtocolConfig::default(),
    };

    if let Some(weight) = weight {
        config.sample.initial_weight = weight;
    }
    if let Some(moisture) = moisture {
        config.sample.initial_moisture = moisture;
    }
    if !stages.is_empty() {
        config.stages = stages
            .iter()
            .map(|spec| parse_stage_spec(spec))
            .collect::<Result<_, _>>()?;
    }
    apply_output_args(&mut config, output);

    config.validate()?;
    Ok(config)
}

fn apply_output_args(config: &mut ProtocolConfig, output: &OutputArgs) {
    if let Some(path) = &output.output {
        config.output.path = path.clone();
    }
    if let Some(format) = &output.format {
        config.output.format = format.clone();
    }
    if let Some(dir) = &output.plot {
        config.output.plot_dir = Some(dir.clone());
    }
}

// =============================================================================
// RUN COMMAND
// =============================================================================

/// Everything a finished run produced.
#[derive(Debug)]
pub struct RunReport {
    pub session: Session,
    pub export_path: PathBuf,
    pub checksum: String,
    pub charts: Vec<PathBuf>,
}

/// Apply the protocol, write the export and charts.
///
/// Progress lines go to stdout unless `mode` is quiet or JSON.
pub fn execute_protocol(
    config: &ProtocolConfig,
    mode: OutputMode,
) -> Result<RunReport, ProcessError> {
    let format = config.output.export_format()?;
    let export_path = validate_output_path(&config.output.path)?;

    let mut session = config.build_session()?;
    tracing::debug!(
        weight = session.state().weight(),
        moisture = session.state().moisture(),
        "Session started"
    );

    for stage in &config.stages {
        let outcome = session.apply(stage)?;
        tracing::debug!(
            kind = %outcome.entry.stage_kind,
            weight_loss = outcome.loss.weight_loss,
            moisture_loss = outcome.loss.moisture_loss,
            "Stage applied"
        );
        if !mode.quiet && !mode.json {
            println!("{}", outcome.entry);
        }
    }

    let data = export(session.history(), format)?;
    std::fs::write(&export_path, &data)
        .map_err(|e| ProcessError::IoError(format!("Write file: {}", e)))?;
    tracing::info!(
        "Process log saved to {:?} ({} bytes, {})",
        export_path,
        data.len(),
        format
    );

    let charts = match &config.output.plot_dir {
        Some(dir) => {
            let trajectory = Trajectory::from_history(session.history())?;
            let charts = render_charts(&trajectory, dir)?;
            tracing::info!("Charts written to {:?}", dir);
            charts
        }
        None => Vec::new(),
    };

    Ok(RunReport {
        session,
        export_path,
        checksum: export_checksum(&data),
        charts,
    })
}

fn print_report(report: &RunReport, mode: OutputMode) {
    let state = report.session.state();

    if mode.json {
        let output = serde_json::json!({
            "stages": report.session.stage_count(),
            "initial_weight": state.initial_weight(),
            "initial_moisture": state.initial_moisture(),
            "final_weight": state.weight(),
            "final_moisture": state.moisture(),
            "elapsed_hours": state.elapsed_hours(),
            "history": report.session.history(),
            "output": report.export_path.to_string_lossy(),
            "checksum": report.checksum,
            "charts": report.charts.iter().map(|p| p.to_string_lossy()).collect::<Vec<_>>()
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return;
    }

    println!();
    println!("Process Summary");
    println!("===============");
    println!("Stages:        {}", report.session.stage_count());
    println!("Elapsed:       {} h", state.elapsed_hours());
    println!(
        "Weight:        {:.2} g -> {:.2} g ({:.2} g lost)",
        state.initial_weight(),
        state.weight(),
        state.total_weight_loss()
    );
    println!(
        "Moisture:      {:.2} % -> {:.2} % ({:.2} points lost)",
        state.initial_moisture(),
        state.moisture(),
        state.total_moisture_loss()
    );
    println!();
    println!("Process log saved to {:?}", report.export_path);
    println!("Checksum: {}", report.checksum);
    for chart in &report.charts {
        println!("Chart:    {:?}", chart);
    }
}

/// Run a resolved protocol.
pub fn cmd_run(config: &ProtocolConfig, mode: OutputMode) -> Result<(), ProcessError> {
    tracing::info!(
        "Running protocol: {} stage(s) on {} g sample",
        config.stages.len(),
        config.sample.initial_weight
    );

    let report = execute_protocol(config, mode)?;
    print_report(&report, mode);
    Ok(())
}

// =============================================================================
// INTERACTIVE COMMAND
// =============================================================================

/// Ask for every parameter on the console, then run.
pub fn cmd_interactive(output: &OutputArgs, mode: OutputMode) -> Result<(), ProcessError> {
    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());

    let mut config = collect_protocol(&mut prompter)?;
    apply_output_args(&mut config, output);
    config.validate()?;

    cmd_run(&config, mode)
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Write the default protocol file.
pub fn cmd_init(output: &Path, force: bool) -> Result<(), ProcessError> {
    if output.exists() && !force {
        return Err(ProcessError::ConfigError(
            "Protocol file already exists. Use --force to overwrite.".to_string(),
        ));
    }

    let path = validate_output_path(output)?;
    let text = ProtocolConfig::default().to_toml_string()?;
    std::fs::write(&path, text)
        .map_err(|e| ProcessError::IoError(format!("Write file: {}", e)))?;

    println!("Initialized default protocol at {:?}", path);
    Ok(())
}

// =============================================================================
// REFERENCE COMMAND
// =============================================================================

fn print_table(rows: &[Vec<String>]) {
    let columns = rows.first().map(Vec::len).unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            rows.iter()
                .filter_map(|r| r.get(c))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
            .collect();
        println!("  {}", line.join("  ").trim_end());
    }
}

/// Show one or all reference datasets.
pub fn cmd_reference(section: Option<&str>, mode: OutputMode) -> Result<(), ProcessError> {
    let sections = match section {
        Some(name) => vec![name.parse::<ReferenceSection>()?],
        None => ReferenceSection::ALL.to_vec(),
    };

    if mode.json {
        let mut output = serde_json::Map::new();
        for s in &sections {
            output.insert(s.title().to_string(), s.to_json()?);
        }
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    for s in &sections {
        println!();
        println!("{}:", s.title());
        print_table(&s.to_rows());
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
