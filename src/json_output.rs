//! JSON report format
//!
//! Machine-readable rendering of one dashboard pass: the active mode,
//! the team summary, the ranked worker aggregates, and the per-day
//! evolution series. This is the payload front ends bind to.

use serde::{Deserialize, Serialize};

use crate::session::DashboardState;
use crate::stats::{MetricMode, WorkerAggregate};
use crate::summary::{daily_series, DailyPoint, TeamSummary};

/// Full report for one aggregation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub mode: MetricMode,
    pub summary: TeamSummary,
    pub workers: Vec<WorkerAggregate>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub daily: Vec<DailyPoint>,
}

impl JsonReport {
    /// Build a report from a session snapshot, optionally limited to
    /// the top `limit` ranked workers.
    pub fn from_state(state: &DashboardState, limit: Option<usize>) -> Self {
        let workers = match limit {
            Some(n) => state.aggregates[..n.min(state.aggregates.len())].to_vec(),
            None => state.aggregates.clone(),
        };

        Self {
            mode: state.mode,
            summary: state.summary.clone(),
            workers,
            daily: daily_series(&state.filter.apply(&state.rows)),
        }
    }

    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
