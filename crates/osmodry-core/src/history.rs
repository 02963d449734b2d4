//! # History Log
//!
//! Append-only record of completed stages, in application order.
//!
//! Entries can only be added by the session that owns the log; readers
//! (export, reporting) get shared access only.

use crate::sample::SampleState;
use crate::stage::StageLoss;
use crate::types::round2;
use crate::{HistoryEntry, StageKind};
use serde::Serialize;

impl HistoryEntry {
    /// Snapshot a sample right after a stage was applied.
    #[must_use]
    pub fn record(kind: StageKind, condition: f64, state: &SampleState, loss: &StageLoss) -> Self {
        Self {
            stage_kind: kind,
            time_elapsed_at_end: state.elapsed_hours(),
            condition,
            weight_after: round2(state.weight()),
            moisture_after: round2(state.moisture()),
            weight_loss: round2(loss.weight_loss),
            moisture_loss: round2(loss.moisture_loss),
        }
    }
}

/// Ordered sequence of [`HistoryEntry`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Iterate entries in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    /// Number of recorded stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True before any stage has been applied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }
}

impl<'a> IntoIterator for &'a HistoryLog {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_rounds_snapshot_values_only() {
        let mut state = SampleState::new(98.5, 88.5).expect("valid");
        let loss = StageLoss {
            weight_loss: 0.591,
            moisture_loss: 0.6,
        };
        state.apply(&loss, 5.0).expect("apply");

        let entry = HistoryEntry::record(StageKind::Drying, 60.0, &state, &loss);

        assert_eq!(entry.weight_after, 97.91);
        assert_eq!(entry.weight_loss, 0.59);
        assert_eq!(entry.moisture_loss, 0.6);
        assert_eq!(entry.time_elapsed_at_end, 5.0);
        // State itself keeps full precision
        assert!((state.weight() - 97.909).abs() < 1e-9);
    }

    #[test]
    fn push_preserves_order() {
        let state = SampleState::new(10.0, 50.0).expect("valid");
        let mut log = HistoryLog::new();
        assert!(log.is_empty());

        log.push(HistoryEntry::record(
            StageKind::Osmosis,
            40.0,
            &state,
            &StageLoss::default(),
        ));
        log.push(HistoryEntry::record(
            StageKind::Drying,
            55.0,
            &state,
            &StageLoss::default(),
        ));

        assert_eq!(log.len(), 2);
        let kinds: Vec<_> = log.iter().map(|e| e.stage_kind).collect();
        assert_eq!(kinds, vec![StageKind::Osmosis, StageKind::Drying]);
        assert_eq!(log.last().map(|e| e.condition), Some(55.0));
    }
}
