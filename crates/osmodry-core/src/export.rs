//! # History Export
//!
//! Flattens a [`HistoryLog`] into a table with one row per stage.
//!
//! | Column            | Source                 |
//! |-------------------|------------------------|
//! | Process           | `stage_kind`           |
//! | Time(h)           | `time_elapsed_at_end`  |
//! | Condition         | `condition`            |
//! | Weight(g)         | `weight_after`         |
//! | Moisture(%)       | `moisture_after`       |
//! | Weight Loss(g)    | `weight_loss`          |
//! | Moisture Loss(%)  | `moisture_loss`        |
//!
//! Numeric cells are written with exactly two decimals. Exporting the same
//! log twice yields byte-identical output.

use crate::history::HistoryLog;
use crate::{HistoryEntry, ProcessError};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

// =============================================================================
// FORMAT
// =============================================================================

/// Column headers, in export order.
pub const COLUMNS: [&str; 7] = [
    "Process",
    "Time(h)",
    "Condition",
    "Weight(g)",
    "Moisture(%)",
    "Weight Loss(g)",
    "Moisture Loss(%)",
];

/// Supported export encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Comma-separated table with a header row.
    #[default]
    Csv,
    /// Pretty-printed JSON array of entries.
    Json,
}

impl ExportFormat {
    /// Conventional file extension.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ProcessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(ProcessError::ConfigError(format!(
                "Unknown export format: {}. Use: csv, json",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// =============================================================================
// PROCESS TABLE
// =============================================================================

/// The history rendered as rows of text cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessTable {
    rows: Vec<[String; 7]>,
}

fn format_cell(value: f64) -> String {
    format!("{:.2}", value)
}

fn row_for(entry: &HistoryEntry) -> [String; 7] {
    [
        entry.stage_kind.name().to_string(),
        format_cell(entry.time_elapsed_at_end),
        format_cell(entry.condition),
        format_cell(entry.weight_after),
        format_cell(entry.moisture_after),
        format_cell(entry.weight_loss),
        format_cell(entry.moisture_loss),
    ]
}

impl ProcessTable {
    /// Build the table. Fails with `EmptyHistory` if no stage was applied.
    pub fn from_history(history: &HistoryLog) -> Result<Self, ProcessError> {
        if history.is_empty() {
            return Err(ProcessError::EmptyHistory);
        }
        Ok(Self {
            rows: history.iter().map(row_for).collect(),
        })
    }

    /// Column headers.
    #[must_use]
    pub fn header(&self) -> &'static [&'static str; 7] {
        &COLUMNS
    }

    /// Data rows in log order.
    #[must_use]
    pub fn rows(&self) -> &[[String; 7]] {
        &self.rows
    }

    /// Write the header and all rows as CSV.
    pub fn write_csv<W: Write>(&self, sink: W) -> Result<(), ProcessError> {
        let mut writer = csv::Writer::from_writer(sink);
        writer
            .write_record(COLUMNS)
            .map_err(|e| ProcessError::SerializationError(e.to_string()))?;
        for row in &self.rows {
            writer
                .write_record(row)
                .map_err(|e| ProcessError::SerializationError(e.to_string()))?;
        }
        writer
            .flush()
            .map_err(|e| ProcessError::IoError(e.to_string()))
    }

    /// CSV bytes of the whole table.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>, ProcessError> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(buffer)
    }
}

// =============================================================================
// EXPORT ENTRY POINTS
// =============================================================================

/// Serialize the history as a pretty JSON array.
pub fn export_json(history: &HistoryLog) -> Result<Vec<u8>, ProcessError> {
    if history.is_empty() {
        return Err(ProcessError::EmptyHistory);
    }
    serde_json::to_vec_pretty(history).map_err(|e| ProcessError::SerializationError(e.to_string()))
}

/// Serialize the history in the requested format.
pub fn export(history: &HistoryLog, format: ExportFormat) -> Result<Vec<u8>, ProcessError> {
    match format {
        ExportFormat::Csv => ProcessTable::from_history(history)?.to_csv_bytes(),
        ExportFormat::Json => export_json(history),
    }
}

/// BLAKE3 hex digest of exported bytes.
#[cfg(feature = "crypto-hash")]
#[must_use]
pub fn export_checksum(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

// =============================================================================
// TESTS
// =============================================================================
