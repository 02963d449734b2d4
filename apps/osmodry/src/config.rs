//! # Protocol Configuration
//!
//! A protocol file describes one sample and the ordered stages to apply:
//!
//! ```toml
//! [sample]
//! initial_weight = 100.0
//! initial_moisture = 90.0
//!
//! [[stages]]
//! kind = "osmosis"
//! brix = 50.0
//! hours = 6.0
//!
//! [[stages]]
//! kind = "drying"
//! temperature = 60.0
//! hours = 5.0
//!
//! [output]
//! path = "banana_pseudostem_log.csv"
//! format = "csv"
//! ```
//!
//! Every section is optional; missing values fall back to the defaults of
//! the standard candy protocol.

use osmodry_core::{ExportFormat, ProcessError, Session, Stage};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Maximum protocol file size (1 MB).
const MAX_PROTOCOL_FILE_SIZE: u64 = 1024 * 1024;

/// Default export file name.
pub const DEFAULT_OUTPUT: &str = "banana_pseudostem_log.csv";

/// Default protocol file name written by `init`.
pub const DEFAULT_PROTOCOL_FILE: &str = "protocol.toml";

// =============================================================================
// SECTIONS
// =============================================================================

/// The sample entering the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    /// Grams.
    pub initial_weight: f64,
    /// Percent.
    pub initial_moisture: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            initial_weight: 100.0,
            initial_moisture: 90.0,
        }
    }
}

/// Where and how results are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Export file.
    pub path: PathBuf,
    /// "csv" or "json".
    pub format: String,
    /// Directory for SVG charts; charts are skipped when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT),
            format: ExportFormat::Csv.to_string(),
            plot_dir: None,
        }
    }
}

impl OutputConfig {
    /// Parsed export format.
    pub fn export_format(&self) -> Result<ExportFormat, ProcessError> {
        self.format.parse()
    }
}

// =============================================================================
// PROTOCOL
// =============================================================================

/// A complete processing protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    pub sample: SampleConfig,
    pub stages: Vec<Stage>,
    pub output: OutputConfig,
}

impl Default for ProtocolConfig {
    /// 100 g at 90 %, osmosis in 50 °Brix for 6 h, then drying at 60 °C for 5 h.
    fn default() -> Self {
        Self {
            sample: SampleConfig::default(),
            stages: vec![Stage::osmosis(50.0, 6.0), Stage::drying(60.0, 5.0)],
            output: OutputConfig::default(),
        }
    }
}

impl ProtocolConfig {
    /// Parse a protocol from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ProcessError> {
        toml::from_str(text).map_err(|e| ProcessError::ConfigError(e.to_string()))
    }

    /// Load a protocol file.
    pub fn load(path: &Path) -> Result<Self, ProcessError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            ProcessError::IoError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_PROTOCOL_FILE_SIZE {
            return Err(ProcessError::ConfigError(format!(
                "Protocol file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_PROTOCOL_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path)
            .map_err(|e| ProcessError::IoError(format!("Read protocol: {}", e)))?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, ProcessError> {
        toml::to_string_pretty(self).map_err(|e| ProcessError::SerializationError(e.to_string()))
    }

    /// Fresh session for this protocol's sample (no stages applied).
    pub fn build_session(&self) -> Result<Session, ProcessError> {
        Session::new(self.sample.initial_weight, self.sample.initial_moisture)
    }

    /// Check everything that can be checked before running.
    pub fn validate(&self) -> Result<(), ProcessError> {
        self.build_session()?;
        for stage in &self.stages {
            stage.validate()?;
        }
        self.output.export_format()?;
        Ok(())
    }
}

// =============================================================================
// STAGE SPECS (command line)
// =============================================================================

/// Parse `osmosis:BRIX:HOURS` or `drying:TEMPERATURE:HOURS`.
///
/// `o` and `d` are accepted as short kinds.
pub fn parse_stage_spec(spec: &str) -> Result<Stage, ProcessError> {
    let parts: Vec<&str> = spec.split(':').map(str::trim).collect();
    let &[kind, condition, hours] = parts.as_slice() else {
        return Err(ProcessError::ConfigError(format!(
            "Invalid stage '{}'. Use KIND:CONDITION:HOURS, e.g. osmosis:50:6",
            spec
        )));
    };

    let number = |field: &str, text: &str| {
        text.parse::<f64>().map_err(|_| {
            ProcessError::ConfigError(format!("Invalid {} '{}' in stage '{}'", field, text, spec))
        })
    };

    let stage = match kind.to_ascii_lowercase().as_str() {
        "osmosis" | "o" => Stage::osmosis(number("brix", condition)?, number("hours", hours)?),
        "drying" | "d" => Stage::drying(number("temperature", condition)?, number("hours", hours)?),
        other => {
            return Err(ProcessError::ConfigError(format!(
                "Unknown stage kind '{}'. Use: osmosis, drying",
                other
            )));
        }
    };
    stage.validate()?;
    Ok(stage)
}

// =============================================================================
// TESTS
// =============================================================================
