//! # Sample State
//!
//! The physical state of one sample over its lifetime.
//!
//! State is only mutated through [`crate::Session`]; outside the crate it is
//! read-only. Values are never rounded here.

use crate::ProcessError;
use crate::stage::StageLoss;
use serde::{Deserialize, Serialize};

/// Current weight, moisture and elapsed time of a sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleState {
    initial_weight: f64,
    initial_moisture: f64,
    weight: f64,
    moisture: f64,
    elapsed_hours: f64,
}

impl SampleState {
    /// Create a fresh sample.
    ///
    /// The initial weight must be finite and positive; the moisture content
    /// must be finite but is otherwise not range-checked.
    pub fn new(initial_weight: f64, initial_moisture: f64) -> Result<Self, ProcessError> {
        if !initial_weight.is_finite() || initial_weight <= 0.0 {
            return Err(ProcessError::InvalidConstructionInput(format!(
                "initial weight must be a positive number of grams, got {}",
                initial_weight
            )));
        }
        if !initial_moisture.is_finite() {
            return Err(ProcessError::InvalidConstructionInput(format!(
                "initial moisture content must be finite, got {}",
                initial_moisture
            )));
        }

        Ok(Self {
            initial_weight,
            initial_moisture,
            weight: initial_weight,
            moisture: initial_moisture,
            elapsed_hours: 0.0,
        })
    }

    /// Apply one stage's deltas.
    ///
    /// Nothing changes unless the deltas and every resulting value are finite.
    pub(crate) fn apply(&mut self, loss: &StageLoss, hours: f64) -> Result<(), ProcessError> {
        let weight = self.weight - loss.weight_loss;
        let moisture = self.moisture - loss.moisture_loss;
        let elapsed_hours = self.elapsed_hours + hours;

        let results = [
            ("weight_loss", loss.weight_loss),
            ("moisture_loss", loss.moisture_loss),
            ("weight", weight),
            ("moisture", moisture),
            ("elapsed_hours", elapsed_hours),
        ];
        if let Some(&(quantity, value)) = results.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ProcessError::NonFiniteResult { quantity, value });
        }

        self.weight = weight;
        self.moisture = moisture;
        self.elapsed_hours = elapsed_hours;
        Ok(())
    }

    /// Weight the sample started with (g).
    #[must_use]
    pub fn initial_weight(&self) -> f64 {
        self.initial_weight
    }

    /// Moisture content the sample started with (%).
    #[must_use]
    pub fn initial_moisture(&self) -> f64 {
        self.initial_moisture
    }

    /// Current weight (g).
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Current moisture content (%).
    #[must_use]
    pub fn moisture(&self) -> f64 {
        self.moisture
    }

    /// Total hours of treatment applied so far.
    #[must_use]
    pub fn elapsed_hours(&self) -> f64 {
        self.elapsed_hours
    }

    /// Grams lost since construction.
    #[must_use]
    pub fn total_weight_loss(&self) -> f64 {
        self.initial_weight - self.weight
    }

    /// Moisture points lost since construction.
    #[must_use]
    pub fn total_moisture_loss(&self) -> f64 {
        self.initial_moisture - self.moisture
    }
}
