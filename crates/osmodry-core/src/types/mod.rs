//! # Core Type Definitions
//!
//! This module contains the shared types of the osmodry stage engine:
//! - Stage identification (`StageKind`)
//! - Recorded snapshots (`HistoryEntry`)
//! - Error types (`ProcessError`)
//! - Snapshot rounding (`round2`)
//!
//! ## Precision
//!
//! Sample state is always carried at full `f64` precision. Only the values
//! written into a `HistoryEntry` are rounded, and they are never fed back
//! into later computations.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// ROUNDING
// =============================================================================

/// Number of decimal places kept in recorded snapshots.
pub const SNAPSHOT_DECIMALS: i32 = 2;

/// Round a value to two decimal places, halves away from zero.
///
/// Magnitudes too large to scale have no fractional part and are returned
/// unchanged.
#[must_use]
pub fn round2(value: f64) -> f64 {
    let scale = 10f64.powi(SNAPSHOT_DECIMALS);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

// =============================================================================
// STAGE KIND
// =============================================================================

/// The treatment applied during one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageKind {
    /// Immersion in a sugar solution; condition is the solution Brix.
    Osmosis,
    /// Hot-air drying; condition is the temperature in °C.
    Drying,
}

impl StageKind {
    /// Get the process name as written in exports.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            StageKind::Osmosis => "Osmosis",
            StageKind::Drying => "Drying",
        }
    }

    /// Unit of the stage's condition parameter.
    #[must_use]
    pub fn condition_label(&self) -> &'static str {
        match self {
            StageKind::Osmosis => "Brix",
            StageKind::Drying => "°C",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// HISTORY ENTRY
// =============================================================================

/// One completed stage: its condition and the resulting sample snapshot.
///
/// Entries are immutable once created. All magnitudes except
/// `time_elapsed_at_end` and `condition` are rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The treatment applied.
    pub stage_kind: StageKind,
    /// Cumulative elapsed hours after this stage.
    pub time_elapsed_at_end: f64,
    /// Brix for osmosis, temperature (°C) for drying.
    pub condition: f64,
    /// Sample weight after the stage (g).
    pub weight_after: f64,
    /// Moisture content after the stage (%).
    pub moisture_after: f64,
    /// Weight removed by this stage (g).
    pub weight_loss: f64,
    /// Moisture removed by this stage (percentage points).
    pub moisture_loss: f64,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] Time: {:?}h, Weight: {:?}g, Moisture: {:?}%",
            self.stage_kind, self.time_elapsed_at_end, self.weight_after, self.moisture_after
        )
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while processing a sample.
///
/// - No silent failures
/// - A rejected stage never mutates the session
/// - The engine never panics; every failure is reported to the caller
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The session could not be constructed from the given sample values.
    #[error("Invalid construction input: {0}")]
    InvalidConstructionInput(String),

    /// A stage was requested with a zero or negative duration.
    #[error("Stage duration must be positive, got {0} h")]
    NonPositiveDuration(f64),

    /// A stage parameter was NaN or infinite.
    #[error("Stage parameter '{name}' must be finite, got {value}")]
    NonFiniteParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A stage would drive the sample to a NaN or infinite value.
    #[error("Stage result '{quantity}' is not finite ({value}); stage rejected")]
    NonFiniteResult {
        /// Name of the quantity that overflowed.
        quantity: &'static str,
        /// The value it would have taken.
        value: f64,
    },

    /// Export or plotting was requested before any stage was applied.
    #[error("Process history is empty; apply at least one stage first")]
    EmptyHistory,

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// A chart could not be drawn.
    #[error("Render error: {0}")]
    RenderError(String),

    /// A configuration file or flag could not be interpreted.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(97.909), 97.91);
        assert_eq!(round2(0.591), 0.59);
        assert_eq!(round2(1.5), 1.5);
        assert_eq!(round2(-0.125), -0.13);
    }

    #[test]
    fn round2_passes_huge_values_through() {
        assert_eq!(round2(-5e306), -5e306);
        assert_eq!(round2(f64::MAX), f64::MAX);
        assert!(round2(-5e306).is_finite());
    }

    #[test]
    fn stage_kind_names() {
        assert_eq!(StageKind::Osmosis.name(), "Osmosis");
        assert_eq!(StageKind::Drying.to_string(), "Drying");
        assert_eq!(StageKind::Drying.condition_label(), "°C");
    }

    #[test]
    fn entry_display_is_progress_line() {
        let entry = HistoryEntry {
            stage_kind: StageKind::Osmosis,
            time_elapsed_at_end: 6.0,
            condition: 50.0,
            weight_after: 98.5,
            moisture_after: 88.5,
            weight_loss: 1.5,
            moisture_loss: 1.5,
        };
        assert_eq!(
            entry.to_string(),
            "[Osmosis] Time: 6.0h, Weight: 98.5g, Moisture: 88.5%"
        );
    }

    #[test]
    fn error_messages_name_the_problem() {
        let err = ProcessError::NonPositiveDuration(-2.0);
        assert!(err.to_string().contains("-2"));

        let err = ProcessError::NonFiniteParameter {
            name: "brix",
            value: f64::NAN,
        };
        assert!(err.to_string().contains("brix"));

        let err = ProcessError::NonFiniteResult {
            quantity: "weight",
            value: f64::NEG_INFINITY,
        };
        assert!(err.to_string().contains("weight"));
    }

    #[test]
    fn progress_line_keeps_float_form() {
        let entry = HistoryEntry {
            stage_kind: StageKind::Drying,
            time_elapsed_at_end: 11.0,
            condition: 60.0,
            weight_after: 97.91,
            moisture_after: 87.9,
            weight_loss: 0.59,
            moisture_loss: 0.6,
        };
        assert_eq!(
            entry.to_string(),
            "[Drying] Time: 11.0h, Weight: 97.91g, Moisture: 87.9%"
        );
    }
}
