//! # Session Module
//!
//! A Session owns one sample and its process history.
//!
//! Each stage call is a single transition:
//! 1. validate the stage parameters
//! 2. compute the deltas from the current (full-precision) state
//! 3. mutate the sample, unless a resulting value would not be finite
//! 4. append exactly one history entry
//!
//! A rejected stage stops at step 1 or 3 before anything changes, so the
//! session is always in a consistent state between calls.

use crate::history::HistoryLog;
use crate::sample::SampleState;
use crate::stage::{Stage, StageLoss};
use crate::{HistoryEntry, ProcessError};

/// Result of one applied stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutcome {
    /// The entry appended to the history (rounded snapshot).
    pub entry: HistoryEntry,
    /// The unrounded deltas applied to the sample.
    pub loss: StageLoss,
}

/// One sample under treatment, plus the record of what was done to it.
#[derive(Debug, Clone)]
pub struct Session {
    state: SampleState,
    history: HistoryLog,
}

impl Session {
    /// Start a session for a sample of the given weight (g) and moisture (%).
    pub fn new(initial_weight: f64, initial_moisture: f64) -> Result<Self, ProcessError> {
        Ok(Self::with_state(SampleState::new(
            initial_weight,
            initial_moisture,
        )?))
    }

    /// Start a session from an already validated sample.
    #[must_use]
    pub fn with_state(state: SampleState) -> Self {
        Self {
            state,
            history: HistoryLog::new(),
        }
    }

    // =========================================================================
    // STAGES
    // =========================================================================

    /// Immerse the sample in a `brix` °Brix solution for `hours`.
    pub fn apply_osmosis(&mut self, brix: f64, hours: f64) -> Result<StageOutcome, ProcessError> {
        self.apply(&Stage::osmosis(brix, hours))
    }

    /// Dry the sample at `temperature` °C for `hours`.
    pub fn apply_drying(
        &mut self,
        temperature: f64,
        hours: f64,
    ) -> Result<StageOutcome, ProcessError> {
        self.apply(&Stage::drying(temperature, hours))
    }

    /// Apply any stage.
    pub fn apply(&mut self, stage: &Stage) -> Result<StageOutcome, ProcessError> {
        stage.validate()?;

        let loss = stage.losses(self.state.weight());
        self.state.apply(&loss, stage.hours())?;

        let entry = HistoryEntry::record(stage.kind(), stage.condition(), &self.state, &loss);
        self.history.push(entry.clone());

        Ok(StageOutcome { entry, loss })
    }

    /// Apply stages in order, stopping at the first rejected one.
    ///
    /// Stages before the rejected one remain applied.
    pub fn apply_all(&mut self, stages: &[Stage]) -> Result<Vec<StageOutcome>, ProcessError> {
        stages.iter().map(|stage| self.apply(stage)).collect()
    }

    // =========================================================================
    // ACCESS
    // =========================================================================

    /// Current sample state.
    #[must_use]
    pub fn state(&self) -> &SampleState {
        &self.state
    }

    /// Recorded stages.
    #[must_use]
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Number of stages applied.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.history.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
