//! Fixed-width table rendering for terminals
//!
//! The human-readable default output: a ranked worker table with a
//! team-summary footer, aligned the way ops people expect to scan it.

use crate::stats::{GoalStatus, MetricMode, WorkerAggregate};
use crate::summary::TeamSummary;

/// Render the ranked table plus summary footer.
pub fn render_table(
    aggregates: &[WorkerAggregate],
    summary: &TeamSummary,
    mode: MetricMode,
) -> String {
    let mut out = String::new();

    if aggregates.is_empty() {
        out.push_str("No rows matched the active filters.\n");
        return out;
    }

    let name_width = aggregates
        .iter()
        .map(|a| a.worker_name.len())
        .chain(std::iter::once("worker".len()))
        .max()
        .unwrap_or(6);

    out.push_str(&format!(
        "{:>4} {:<name_width$} {:>6} {:>10} {:>8} {:>7} {:>6} {:>6} {:>5} {:>6} {:<6}\n",
        "rank",
        "worker",
        "branch",
        "line",
        "volume",
        "visits",
        "hours",
        rate_header(mode),
        "goal",
        "%goal",
        "status",
    ));
    out.push_str(&format!(
        "{} {} {} {} {} {} {} {} {} {} {}\n",
        "-".repeat(4),
        "-".repeat(name_width),
        "-".repeat(6),
        "-".repeat(10),
        "-".repeat(8),
        "-".repeat(7),
        "-".repeat(6),
        "-".repeat(6),
        "-".repeat(5),
        "-".repeat(6),
        "-".repeat(6),
    ));

    for (index, aggregate) in aggregates.iter().enumerate() {
        out.push_str(&format!(
            "{:>4} {:<name_width$} {:>6} {:>10} {:>8} {:>7} {:>6.2} {:>6} {:>5} {:>5}% {:<6}\n",
            index + 1,
            aggregate.worker_name,
            aggregate.branch_id,
            truncate(&aggregate.line, 10),
            aggregate.total_volume,
            aggregate.total_visits,
            aggregate.hours_worked,
            aggregate.rate(mode),
            aggregate.goal_target,
            aggregate.percent_of_goal,
            status_label(aggregate.status),
        ));
    }

    out.push('\n');
    out.push_str(&format!(
        "workers: {}   volume: {}   visits: {}   avg {}: {}   above goal: {}   below: {}\n",
        summary.worker_count,
        summary.total_volume,
        summary.total_visits,
        rate_header(mode),
        summary.avg_rate_per_hour,
        summary.above_goal,
        summary.below_goal,
    ));

    out
}

fn rate_header(mode: MetricMode) -> &'static str {
    match mode {
        MetricMode::Volume => "vol/h",
        MetricMode::Visits => "vis/h",
    }
}

fn status_label(status: GoalStatus) -> &'static str {
    match status {
        GoalStatus::Above => "ABOVE",
        GoalStatus::Below => "BELOW",
    }
}

fn truncate(value: &str, max: usize) -> String {
    if value.len() <= max {
        value.to_string()
    } else {
        value.chars().take(max).collect()
    }
}
