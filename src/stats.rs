//! Per-worker aggregation for ranked productivity summaries
//!
//! The heart of the engine: fold filtered task rows into one aggregate
//! per worker, derive elapsed hours from the worker's shift envelope,
//! compute per-hour rates, classify against the goal, and rank.
//! Aggregates are rebuilt wholesale on every pass - there is no
//! incremental update path.

use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::clock;
use crate::config::GoalPolicy;
use crate::row::TaskRow;

/// Hours substituted when a worker's shift envelope collapses to zero
/// or is missing data. Keeps every rate division defined; the original
/// dashboard shipped with this rule and reports depend on it.
pub const MIN_HOURS_FLOOR: f64 = 1.0;

/// Which per-hour rate drives ranking and goal classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MetricMode {
    /// Rank by volume moved per hour.
    Volume,
    /// Rank by addresses visited per hour.
    Visits,
}

/// Classification of a worker's active rate against the goal target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalStatus {
    #[serde(rename = "ABOVE")]
    Above,
    #[serde(rename = "BELOW")]
    Below,
}

/// One worker's aggregated productivity within a filtered row set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerAggregate {
    pub worker_id: String,
    pub worker_name: String,
    pub branch_id: String,
    pub line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    pub total_volume: u64,
    pub total_visits: u64,
    /// Earliest task start observed for this worker (`HH:MM:SS`).
    pub earliest_start: String,
    /// Latest task end observed for this worker (`HH:MM:SS`).
    pub latest_end: String,
    /// Decimal hours spanned by the envelope, floored to
    /// [`MIN_HOURS_FLOOR`] when the computed span is not positive.
    pub hours_worked: f64,
    pub volume_per_hour: u64,
    pub visits_per_hour: u64,
    pub goal_target: u64,
    pub percent_of_goal: u64,
    pub status: GoalStatus,
}

impl WorkerAggregate {
    /// The rate the given mode ranks and classifies by.
    pub fn rate(&self, mode: MetricMode) -> u64 {
        match mode {
            MetricMode::Volume => self.volume_per_hour,
            MetricMode::Visits => self.visits_per_hour,
        }
    }
}

/// Running per-worker partial built up while folding rows.
#[derive(Debug, Clone)]
struct PartialAggregate {
    worker_id: String,
    worker_name: String,
    branch_id: String,
    line: String,
    team: Option<String>,
    total_volume: u64,
    total_visits: u64,
    earliest_start: String,
    latest_end: String,
}

impl PartialAggregate {
    fn seed(row: &TaskRow) -> Self {
        Self {
            worker_id: row.worker_id.clone(),
            worker_name: row.display_name().to_string(),
            branch_id: row.branch_id.clone(),
            line: row.line.clone(),
            team: row.team.clone(),
            total_volume: 0,
            total_visits: 0,
            earliest_start: row.time_start.clone(),
            latest_end: row.time_end.clone(),
        }
    }
}

/// Folds task rows into per-worker partial aggregates.
///
/// Identity fields come from the first row seen for each worker; the
/// shift envelope widens with every row. String min/max on the times is
/// valid because the format is fixed-width zero-padded `HH:MM:SS`.
#[derive(Debug, Default)]
pub struct WorkerTracker {
    partials: HashMap<String, PartialAggregate>,
    /// First-seen order, so ties keep input order through the final sort.
    order: Vec<String>,
}

impl WorkerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one row into its worker's partial aggregate.
    pub fn record(&mut self, row: &TaskRow) {
        let partial = match self.partials.entry(row.worker_id.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.order.push(row.worker_id.clone());
                entry.insert(PartialAggregate::seed(row))
            }
        };

        partial.total_volume += row.volume_count;
        partial.total_visits += row.visit_count;

        if row.time_start < partial.earliest_start {
            partial.earliest_start = row.time_start.clone();
        }
        if row.time_end > partial.latest_end {
            partial.latest_end = row.time_end.clone();
        }
    }

    /// Number of distinct workers folded so far.
    pub fn worker_count(&self) -> usize {
        self.order.len()
    }

    /// Finalize every partial into a [`WorkerAggregate`] and rank the
    /// result descending by the active rate. The sort is stable, so
    /// equal rates keep first-seen order.
    pub fn finalize(mut self, goals: &GoalPolicy, mode: MetricMode) -> Vec<WorkerAggregate> {
        let order = std::mem::take(&mut self.order);
        let mut aggregates: Vec<WorkerAggregate> = order
            .iter()
            .filter_map(|id| self.partials.remove(id))
            .map(|partial| finalize_partial(partial, goals, mode))
            .collect();

        aggregates.sort_by(|a, b| b.rate(mode).cmp(&a.rate(mode)));
        aggregates
    }
}

fn finalize_partial(
    partial: PartialAggregate,
    goals: &GoalPolicy,
    mode: MetricMode,
) -> WorkerAggregate {
    let span = clock::elapsed_hours(&partial.earliest_start, &partial.latest_end);
    let hours_worked = if span > 0.0 { span } else { MIN_HOURS_FLOOR };

    let volume_per_hour = rate_per_hour(partial.total_volume, hours_worked);
    let visits_per_hour = rate_per_hour(partial.total_visits, hours_worked);

    let goal_target = goals.target_for(&partial.branch_id, &partial.line);
    let active_rate = match mode {
        MetricMode::Volume => volume_per_hour,
        MetricMode::Visits => visits_per_hour,
    };

    let percent_of_goal = if goal_target == 0 {
        0
    } else {
        ((active_rate as f64 / goal_target as f64) * 100.0).round() as u64
    };
    let status = if active_rate >= goal_target {
        GoalStatus::Above
    } else {
        GoalStatus::Below
    };

    WorkerAggregate {
        worker_id: partial.worker_id,
        worker_name: partial.worker_name,
        branch_id: partial.branch_id,
        line: partial.line,
        team: partial.team,
        total_volume: partial.total_volume,
        total_visits: partial.total_visits,
        earliest_start: partial.earliest_start,
        latest_end: partial.latest_end,
        hours_worked,
        volume_per_hour,
        visits_per_hour,
        goal_target,
        percent_of_goal,
        status,
    }
}

/// Nearest-integer rate. Integer rounding is the display contract the
/// dashboard settled on; see DESIGN.md for the rounding decision.
fn rate_per_hour(total: u64, hours: f64) -> u64 {
    (total as f64 / hours).round() as u64
}

/// Fold, finalize, and rank in one call.
///
/// Pure given its inputs: identical rows, goals, and mode always produce
/// the identical ranked list.
pub fn aggregate_rows(
    rows: &[TaskRow],
    goals: &GoalPolicy,
    mode: MetricMode,
) -> Vec<WorkerAggregate> {
    let mut tracker = WorkerTracker::new();
    for row in rows {
        tracker.record(row);
    }
    tracker.finalize(goals, mode)
}
