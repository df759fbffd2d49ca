//! Team-level derived views over the ranked aggregates
//!
//! Everything the dashboard's KPI cards, top-5 panel, evolution chart,
//! and filter pickers consume: totals, the team's mean rate, above/below
//! goal counts, the leading slice of the ranking, a per-day series, and
//! the distinct filterable values present in a row set.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::row::TaskRow;
use crate::stats::{GoalStatus, MetricMode, WorkerAggregate};

/// Headline KPIs across every worker in a pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub total_volume: u64,
    pub total_visits: u64,
    pub worker_count: usize,
    /// Nearest-integer mean of the active-mode per-worker rates.
    pub avg_rate_per_hour: u64,
    /// Nearest-integer mean of the per-worker percent-of-goal values.
    pub percent_of_goal: u64,
    pub above_goal: usize,
    pub below_goal: usize,
}

/// Summarize a ranked aggregate list. Empty input yields all zeros.
pub fn summarize(aggregates: &[WorkerAggregate], mode: MetricMode) -> TeamSummary {
    let total_volume = aggregates.iter().map(|a| a.total_volume).sum();
    let total_visits = aggregates.iter().map(|a| a.total_visits).sum();
    let above_goal = aggregates
        .iter()
        .filter(|a| a.status == GoalStatus::Above)
        .count();

    let (avg_rate_per_hour, percent_of_goal) = if aggregates.is_empty() {
        (0, 0)
    } else {
        let rate_sum: u64 = aggregates.iter().map(|a| a.rate(mode)).sum();
        let percent_sum: u64 = aggregates.iter().map(|a| a.percent_of_goal).sum();
        (
            mean_rounded(rate_sum, aggregates.len()),
            mean_rounded(percent_sum, aggregates.len()),
        )
    };

    TeamSummary {
        total_volume,
        total_visits,
        worker_count: aggregates.len(),
        avg_rate_per_hour,
        percent_of_goal,
        above_goal,
        below_goal: aggregates.len() - above_goal,
    }
}

fn mean_rounded(sum: u64, count: usize) -> u64 {
    (sum as f64 / count as f64).round() as u64
}

/// Leading slice of an already-ranked aggregate list.
pub fn top_n(aggregates: &[WorkerAggregate], n: usize) -> &[WorkerAggregate] {
    &aggregates[..n.min(aggregates.len())]
}

/// One point of the per-day evolution series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: String,
    pub volume: u64,
    pub visits: u64,
}

/// Per-date volume/visit totals over a row set, ascending by date.
pub fn daily_series(rows: &[TaskRow]) -> Vec<DailyPoint> {
    let mut by_date: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for row in rows {
        let entry = by_date.entry(row.date_key()).or_insert((0, 0));
        entry.0 += row.volume_count;
        entry.1 += row.visit_count;
    }

    by_date
        .into_iter()
        .map(|(date, (volume, visits))| DailyPoint {
            date: date.to_string(),
            volume,
            visits,
        })
        .collect()
}

/// Distinct filterable values present in a raw row set, for populating
/// branch/line/worker pickers. Sorted and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub branches: Vec<String>,
    pub lines: Vec<String>,
    pub workers: Vec<String>,
}

impl FilterOptions {
    pub fn collect(rows: &[TaskRow]) -> Self {
        let mut branches = BTreeSet::new();
        let mut lines = BTreeSet::new();
        let mut workers = BTreeSet::new();

        for row in rows {
            if !row.branch_id.is_empty() {
                branches.insert(row.branch_id.clone());
            }
            if !row.line.is_empty() {
                lines.insert(row.line.clone());
            }
            if let Some(name) = row.worker_name.as_deref() {
                if !name.trim().is_empty() {
                    workers.insert(name.to_string());
                }
            }
        }

        Self {
            branches: branches.into_iter().collect(),
            lines: lines.into_iter().collect(),
            workers: workers.into_iter().collect(),
        }
    }
}
