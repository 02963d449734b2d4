//! # Property-Based Tests
//!
//! Invariants of the stage engine checked over random stage sequences.

use osmodry_core::{ExportFormat, Session, Stage, export, round2};
use proptest::collection::vec;
use proptest::prelude::*;

fn stage_strategy() -> impl Strategy<Value = Stage> {
    prop_oneof![
        (0.0f64..80.0, 0.1f64..24.0).prop_map(|(brix, hours)| Stage::osmosis(brix, hours)),
        (20.0f64..110.0, 0.1f64..12.0)
            .prop_map(|(temperature, hours)| Stage::drying(temperature, hours)),
    ]
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Current weight and moisture equal the initial values minus every
    /// applied loss, subtracted in application order.
    #[test]
    fn state_equals_initial_minus_losses(
        weight in 1.0f64..1000.0,
        moisture in 0.0f64..100.0,
        stages in vec(stage_strategy(), 0..12)
    ) {
        let mut session = Session::new(weight, moisture).expect("session");
        let outcomes = session.apply_all(&stages).expect("apply");

        let expected_weight = outcomes.iter().fold(weight, |w, o| w - o.loss.weight_loss);
        let expected_moisture = outcomes.iter().fold(moisture, |m, o| m - o.loss.moisture_loss);

        prop_assert_eq!(session.state().weight(), expected_weight);
        prop_assert_eq!(session.state().moisture(), expected_moisture);
    }

    /// One history entry per stage call, in call order.
    #[test]
    fn history_length_and_order_follow_calls(stages in vec(stage_strategy(), 0..12)) {
        let mut session = Session::new(100.0, 90.0).expect("session");
        session.apply_all(&stages).expect("apply");

        prop_assert_eq!(session.history().len(), stages.len());
        for (entry, stage) in session.history().iter().zip(&stages) {
            prop_assert_eq!(entry.stage_kind, stage.kind());
            prop_assert_eq!(entry.condition, stage.condition());
        }
    }

    /// Elapsed time is the running sum of stage durations, whatever the kinds.
    #[test]
    fn elapsed_time_is_sum_of_durations(stages in vec(stage_strategy(), 1..12)) {
        let mut session = Session::new(100.0, 90.0).expect("session");
        session.apply_all(&stages).expect("apply");

        let total = stages.iter().fold(0.0, |t, s| t + s.hours());
        prop_assert_eq!(session.state().elapsed_hours(), total);
        prop_assert_eq!(
            session.history().last().map(|e| e.time_elapsed_at_end),
            Some(total)
        );
    }

    /// Logged magnitudes are the computed values rounded to two decimals.
    #[test]
    fn logged_values_are_rounded_snapshots(stages in vec(stage_strategy(), 1..8)) {
        let mut session = Session::new(250.0, 85.0).expect("session");
        let mut weight = 250.0;
        let mut moisture = 85.0;

        for stage in &stages {
            let outcome = session.apply(stage).expect("apply");
            weight -= outcome.loss.weight_loss;
            moisture -= outcome.loss.moisture_loss;

            prop_assert_eq!(outcome.entry.weight_after, round2(weight));
            prop_assert_eq!(outcome.entry.moisture_after, round2(moisture));
            prop_assert_eq!(outcome.entry.weight_loss, round2(outcome.loss.weight_loss));
            prop_assert_eq!(outcome.entry.moisture_loss, round2(outcome.loss.moisture_loss));
        }
    }

    /// Positive conditions never increase weight or moisture.
    #[test]
    fn positive_conditions_are_monotone(stages in vec(stage_strategy(), 1..12)) {
        let mut session = Session::new(100.0, 90.0).expect("session");
        let mut previous = (session.state().weight(), session.state().moisture());

        for stage in &stages {
            session.apply(stage).expect("apply");
            let current = (session.state().weight(), session.state().moisture());
            prop_assert!(current.0 <= previous.0);
            prop_assert!(current.1 <= previous.1);
            previous = current;
        }
    }

    /// Export reads do not change the table.
    #[test]
    fn export_is_idempotent(stages in vec(stage_strategy(), 1..8)) {
        let mut session = Session::new(100.0, 90.0).expect("session");
        session.apply_all(&stages).expect("apply");

        let first = export(session.history(), ExportFormat::Csv).expect("export");
        let second = export(session.history(), ExportFormat::Csv).expect("export");
        prop_assert_eq!(first, second);
    }

    /// Non-positive durations are rejected without touching the session.
    #[test]
    fn non_positive_duration_rejected(hours in -100.0f64..=0.0, drying in any::<bool>()) {
        let mut session = Session::new(100.0, 90.0).expect("session");
        let stage = if drying { Stage::drying(60.0, hours) } else { Stage::osmosis(50.0, hours) };

        prop_assert!(session.apply(&stage).is_err());
        prop_assert_eq!(session.history().len(), 0);
        prop_assert_eq!(session.state().weight(), 100.0);
    }
}
