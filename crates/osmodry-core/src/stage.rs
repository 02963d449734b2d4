//! # Stage Processor
//!
//! Pure loss formulas for the two treatment kinds.
//!
//! | Stage   | Moisture loss (points)              |
//! |---------|-------------------------------------|
//! | Osmosis | `0.05 * brix * (hours / 10)`        |
//! | Drying  | `(temperature / 100) * (hours / 5)` |
//!
//! In both cases the weight loss is the same fraction of the *current*
//! weight: `weight * moisture_loss / 100`. Successive stages therefore
//! compound off the updated weight, never the initial one.
//!
//! ## Input policy
//!
//! Durations must be finite and strictly positive. Brix and temperature
//! must be finite but may be zero or negative; such stages produce a zero
//! or negative loss (an apparent gain) and are recorded as-is.

use crate::{ProcessError, StageKind};
use serde::{Deserialize, Serialize};

/// Osmosis moisture-loss coefficient per °Brix.
pub const OSMOSIS_RATE: f64 = 0.05;

/// Osmosis reference duration (h).
pub const OSMOSIS_REFERENCE_HOURS: f64 = 10.0;

/// Drying temperature divisor (°C).
pub const DRYING_TEMPERATURE_SCALE: f64 = 100.0;

/// Drying reference duration (h).
pub const DRYING_REFERENCE_HOURS: f64 = 5.0;

// =============================================================================
// STAGE
// =============================================================================

/// A single treatment and its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Stage {
    /// Osmotic dehydration in a sugar solution.
    Osmosis {
        /// Sugar concentration of the solution (°Brix).
        brix: f64,
        /// Immersion time (h).
        hours: f64,
    },
    /// Hot-air drying.
    Drying {
        /// Air temperature (°C).
        temperature: f64,
        /// Drying time (h).
        hours: f64,
    },
}

/// Deltas produced by one stage, at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StageLoss {
    /// Grams removed.
    pub weight_loss: f64,
    /// Moisture percentage points removed.
    pub moisture_loss: f64,
}

impl Stage {
    /// Build an osmosis stage.
    #[must_use]
    pub const fn osmosis(brix: f64, hours: f64) -> Self {
        Self::Osmosis { brix, hours }
    }

    /// Build a drying stage.
    #[must_use]
    pub const fn drying(temperature: f64, hours: f64) -> Self {
        Self::Drying { temperature, hours }
    }

    /// The kind of treatment.
    #[must_use]
    pub fn kind(&self) -> StageKind {
        match self {
            Stage::Osmosis { .. } => StageKind::Osmosis,
            Stage::Drying { .. } => StageKind::Drying,
        }
    }

    /// Stage duration in hours.
    #[must_use]
    pub fn hours(&self) -> f64 {
        match *self {
            Stage::Osmosis { hours, .. } | Stage::Drying { hours, .. } => hours,
        }
    }

    /// Brix for osmosis, temperature for drying.
    #[must_use]
    pub fn condition(&self) -> f64 {
        match *self {
            Stage::Osmosis { brix, .. } => brix,
            Stage::Drying { temperature, .. } => temperature,
        }
    }

    /// Check the stage parameters against the input policy.
    pub fn validate(&self) -> Result<(), ProcessError> {
        let condition_name = match self {
            Stage::Osmosis { .. } => "brix",
            Stage::Drying { .. } => "temperature",
        };
        let condition = self.condition();
        if !condition.is_finite() {
            return Err(ProcessError::NonFiniteParameter {
                name: condition_name,
                value: condition,
            });
        }

        let hours = self.hours();
        if !hours.is_finite() {
            return Err(ProcessError::NonFiniteParameter {
                name: "hours",
                value: hours,
            });
        }
        if hours <= 0.0 {
            return Err(ProcessError::NonPositiveDuration(hours));
        }
        Ok(())
    }

    /// Moisture percentage points removed by this stage.
    #[must_use]
    pub fn moisture_loss(&self) -> f64 {
        match *self {
            Stage::Osmosis { brix, hours } => {
                OSMOSIS_RATE * brix * (hours / OSMOSIS_REFERENCE_HOURS)
            }
            Stage::Drying { temperature, hours } => {
                (temperature / DRYING_TEMPERATURE_SCALE) * (hours / DRYING_REFERENCE_HOURS)
            }
        }
    }

    /// Deltas this stage produces on a sample of `current_weight` grams.
    #[must_use]
    pub fn losses(&self, current_weight: f64) -> StageLoss {
        let moisture_loss = self.moisture_loss();
        StageLoss {
            weight_loss: current_weight * (moisture_loss / 100.0),
            moisture_loss,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn osmosis_formula() {
        let loss = Stage::osmosis(50.0, 6.0).losses(100.0);
        assert!((loss.moisture_loss - 1.5).abs() < EPS);
        assert!((loss.weight_loss - 1.5).abs() < EPS);
    }

    #[test]
    fn drying_formula() {
        let loss = Stage::drying(60.0, 5.0).losses(98.5);
        assert!((loss.moisture_loss - 0.6).abs() < EPS);
        assert!((loss.weight_loss - 0.591).abs() < EPS);
    }

    #[test]
    fn weight_loss_scales_with_current_weight() {
        let stage = Stage::drying(70.0, 3.0);
        let heavy = stage.losses(200.0);
        let light = stage.losses(100.0);
        assert_eq!(heavy.moisture_loss, light.moisture_loss);
        assert!((heavy.weight_loss - 2.0 * light.weight_loss).abs() < EPS);
    }

    #[test]
    fn zero_duration_rejected() {
        let result = Stage::drying(60.0, 0.0).validate();
        assert!(matches!(result, Err(ProcessError::NonPositiveDuration(h)) if h == 0.0));
    }

    #[test]
    fn negative_duration_rejected() {
        let result = Stage::osmosis(50.0, -1.0).validate();
        assert!(matches!(result, Err(ProcessError::NonPositiveDuration(_))));
    }

    #[test]
    fn non_finite_parameters_rejected() {
        let result = Stage::osmosis(f64::NAN, 1.0).validate();
        assert!(matches!(
            result,
            Err(ProcessError::NonFiniteParameter { name: "brix", .. })
        ));

        let result = Stage::drying(60.0, f64::INFINITY).validate();
        assert!(matches!(
            result,
            Err(ProcessError::NonFiniteParameter { name: "hours", .. })
        ));
    }

    #[test]
    fn negative_temperature_is_an_apparent_gain() {
        let stage = Stage::drying(-20.0, 5.0);
        assert!(stage.validate().is_ok());
        let loss = stage.losses(100.0);
        assert!(loss.moisture_loss < 0.0);
        assert!(loss.weight_loss < 0.0);
    }

    #[test]
    fn accessors() {
        let stage = Stage::osmosis(45.0, 4.0);
        assert_eq!(stage.kind(), StageKind::Osmosis);
        assert_eq!(stage.hours(), 4.0);
        assert_eq!(stage.condition(), 45.0);
    }
}
