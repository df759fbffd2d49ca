//! Comprehensive property-based tests for pre-commit hook
//!
//! This test suite covers the core invariants of ritmo using property-based
//! testing with proptest. Designed to run under 30 seconds as a pre-commit
//! quality gate.
//!
//! Core invariants tested:
//! 1. Time arithmetic bounds and no-panic guarantees
//! 2. Conservation of totals across grouping
//! 3. Hours floor applies only to degenerate envelopes
//! 4. Ranking is non-increasing in the active rate
//! 5. Aggregation is idempotent
//! 6. Filtering returns an order-preserving subset

use proptest::prelude::*;

use ritmo::clock::{elapsed_hours, time_to_decimal_hours};
use ritmo::config::GoalPolicy;
use ritmo::filter::RowFilter;
use ritmo::row::TaskRow;
use ritmo::stats::{aggregate_rows, MetricMode, MIN_HOURS_FLOOR};

fn task_row(
    worker: String,
    branch: String,
    date: String,
    volume: u64,
    visits: u64,
    start: String,
    end: String,
) -> TaskRow {
    TaskRow {
        worker_id: worker.clone(),
        worker_name: Some(worker),
        branch_id: branch,
        line: "MERCEARIA".to_string(),
        team: None,
        volume_count: volume,
        visit_count: visits,
        date_started: date,
        time_start: start,
        time_end: end,
    }
}

/// Strategy for valid zero-padded HH:MM:SS strings.
fn time_string() -> impl Strategy<Value = String> {
    (0u32..24, 0u32..60, 0u32..60).prop_map(|(h, m, s)| format!("{h:02}:{m:02}:{s:02}"))
}

/// Strategy for a small pool of worker ids so rows collide on workers.
fn worker_id() -> impl Strategy<Value = String> {
    "[A-E]".prop_map(|s| s.to_string())
}

fn row_strategy() -> impl Strategy<Value = TaskRow> {
    (
        worker_id(),
        "[12][0-9]{2}",
        "2024-01-0[1-9]",
        0u64..2000,
        0u64..500,
        time_string(),
        time_string(),
    )
        .prop_map(|(worker, branch, date, volume, visits, start, end)| {
            task_row(worker, branch, date, volume, visits, start, end)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_time_to_decimal_never_panics(s in ".{0,16}") {
        // Property: arbitrary garbage never panics and never goes negative.
        let hours = time_to_decimal_hours(&s);
        prop_assert!(hours >= 0.0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_times_decode_within_a_day(s in time_string()) {
        let hours = time_to_decimal_hours(&s);
        prop_assert!((0.0..24.0).contains(&hours));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_elapsed_hours_bounded(start in time_string(), end in time_string()) {
        // Property: any single-wraparound window spans [0, 24] hours.
        let elapsed = elapsed_hours(&start, &end);
        prop_assert!((0.0..=24.0).contains(&elapsed));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_conservation_of_totals(rows in prop::collection::vec(row_strategy(), 0..60)) {
        // Property: grouping never invents or loses volume/visits.
        let aggregates = aggregate_rows(&rows, &GoalPolicy::flat(120), MetricMode::Volume);

        let row_volume: u64 = rows.iter().map(|r| r.volume_count).sum();
        let agg_volume: u64 = aggregates.iter().map(|a| a.total_volume).sum();
        prop_assert_eq!(row_volume, agg_volume);

        let row_visits: u64 = rows.iter().map(|r| r.visit_count).sum();
        let agg_visits: u64 = aggregates.iter().map(|a| a.total_visits).sum();
        prop_assert_eq!(row_visits, agg_visits);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_hours_positive_and_floor_only_when_degenerate(
        rows in prop::collection::vec(row_strategy(), 1..40)
    ) {
        let aggregates = aggregate_rows(&rows, &GoalPolicy::flat(120), MetricMode::Volume);

        for aggregate in &aggregates {
            prop_assert!(aggregate.hours_worked > 0.0);

            let span = elapsed_hours(&aggregate.earliest_start, &aggregate.latest_end);
            if span > 0.0 {
                // True span survives untouched.
                prop_assert_eq!(aggregate.hours_worked, span);
            } else {
                // Degenerate envelope gets the floor.
                prop_assert_eq!(aggregate.hours_worked, MIN_HOURS_FLOOR);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_ranking_non_increasing(
        rows in prop::collection::vec(row_strategy(), 0..60),
        visits_mode in any::<bool>(),
    ) {
        let mode = if visits_mode { MetricMode::Visits } else { MetricMode::Volume };
        let aggregates = aggregate_rows(&rows, &GoalPolicy::flat(120), mode);

        for pair in aggregates.windows(2) {
            prop_assert!(pair[0].rate(mode) >= pair[1].rate(mode));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(60))]

    #[test]
    fn prop_aggregation_idempotent(rows in prop::collection::vec(row_strategy(), 0..40)) {
        let goals = GoalPolicy::flat(120);
        let first = aggregate_rows(&rows, &goals, MetricMode::Volume);
        let second = aggregate_rows(&rows, &goals, MetricMode::Volume);
        prop_assert_eq!(first, second);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_each_row_lands_in_exactly_one_aggregate(
        rows in prop::collection::vec(row_strategy(), 0..60)
    ) {
        let aggregates = aggregate_rows(&rows, &GoalPolicy::flat(120), MetricMode::Volume);

        // One aggregate per distinct worker id, no duplicates.
        let mut ids: Vec<&str> = aggregates.iter().map(|a| a.worker_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), aggregates.len());

        let mut distinct: Vec<&str> = rows.iter().map(|r| r.worker_id.as_str()).collect();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(distinct.len(), aggregates.len());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_filter_returns_order_preserving_subset(
        rows in prop::collection::vec(row_strategy(), 0..60),
        branch in "[12][0-9]{2}",
    ) {
        let filter = RowFilter::all().with_branch(branch.clone());
        let kept = filter.apply(&rows);

        // Every survivor matches, and survivors appear in input order.
        prop_assert!(kept.iter().all(|r| r.branch_id == branch));

        let mut cursor = 0;
        for survivor in &kept {
            let position = rows[cursor..]
                .iter()
                .position(|r| r == survivor)
                .map(|p| cursor + p);
            prop_assert!(position.is_some(), "survivor not found in input order");
            cursor = position.unwrap() + 1;
        }
    }
}
