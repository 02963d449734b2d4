//! # Trajectory Extraction
//!
//! Pulls the two time series a report needs out of the history:
//! weight vs. elapsed time and moisture vs. elapsed time. Values are the
//! recorded (rounded) snapshots, so charts agree with the exported table.

use crate::ProcessError;
use crate::history::HistoryLog;
use serde::Serialize;

const RELATIVE_SPAN_FLOOR: f64 = 1e-9;

/// Inclusive value range of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

impl Bounds {
    fn of(values: &[f64]) -> Option<Self> {
        let first = *values.first()?;
        Some(values.iter().fold(
            Self {
                min: first,
                max: first,
            },
            |acc, &v| Self {
                min: acc.min.min(v),
                max: acc.max.max(v),
            },
        ))
    }

    /// Distance between the ends.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Widen a degenerate or tight range so it can be drawn on an axis.
    ///
    /// A span that vanishes next to the magnitude of its ends is treated
    /// as a single point.
    #[must_use]
    pub fn padded(self, fraction: f64) -> Self {
        let span = self.span();
        let magnitude = self.min.abs().max(self.max.abs());
        let pad = if span > magnitude * RELATIVE_SPAN_FLOOR {
            span * fraction
        } else {
            magnitude.max(1.0) * fraction
        };
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }
}

/// Columns of the history needed for plotting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    /// Cumulative elapsed hours at the end of each stage.
    pub times: Vec<f64>,
    /// Weight after each stage (g).
    pub weights: Vec<f64>,
    /// Moisture content after each stage (%).
    pub moistures: Vec<f64>,
}

impl Trajectory {
    /// Extract the series.
    ///
    /// Fails with `EmptyHistory` if no stage was applied and with
    /// `NonFiniteResult` if any recorded point is NaN or infinite.
    pub fn from_history(history: &HistoryLog) -> Result<Self, ProcessError> {
        if history.is_empty() {
            return Err(ProcessError::EmptyHistory);
        }
        for entry in history {
            let points = [
                ("time_elapsed_at_end", entry.time_elapsed_at_end),
                ("weight_after", entry.weight_after),
                ("moisture_after", entry.moisture_after),
            ];
            if let Some(&(quantity, value)) = points.iter().find(|(_, v)| !v.is_finite()) {
                return Err(ProcessError::NonFiniteResult { quantity, value });
            }
        }
        Ok(Self {
            times: history.iter().map(|e| e.time_elapsed_at_end).collect(),
            weights: history.iter().map(|e| e.weight_after).collect(),
            moistures: history.iter().map(|e| e.moisture_after).collect(),
        })
    }

    /// Number of points in each series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false; construction requires at least one stage.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// `(time, weight)` points.
    #[must_use]
    pub fn weight_series(&self) -> Vec<(f64, f64)> {
        self.times
            .iter()
            .copied()
            .zip(self.weights.iter().copied())
            .collect()
    }

    /// `(time, moisture)` points.
    #[must_use]
    pub fn moisture_series(&self) -> Vec<(f64, f64)> {
        self.times
            .iter()
            .copied()
            .zip(self.moistures.iter().copied())
            .collect()
    }

    /// Range of the time axis.
    pub fn time_bounds(&self) -> Result<Bounds, ProcessError> {
        Bounds::of(&self.times).ok_or(ProcessError::EmptyHistory)
    }

    /// Range of the weight axis.
    pub fn weight_bounds(&self) -> Result<Bounds, ProcessError> {
        Bounds::of(&self.weights).ok_or(ProcessError::EmptyHistory)
    }

    /// Range of the moisture axis.
    pub fn moisture_bounds(&self) -> Result<Bounds, ProcessError> {
        Bounds::of(&self.moistures).ok_or(ProcessError::EmptyHistory)
    }
}
