//! CSV export for worker aggregates
//!
//! Spreadsheet-bound serialization of the ranked aggregate rows,
//! restricted to a caller-chosen column subset (the dashboard's export
//! button lets users drop columns before downloading).

use anyhow::{bail, Result};

use crate::stats::{GoalStatus, WorkerAggregate};

/// One exportable column of a worker aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateColumn {
    WorkerId,
    Worker,
    Branch,
    Line,
    Team,
    Volume,
    Visits,
    Hours,
    VolumeRate,
    VisitRate,
    Goal,
    PercentOfGoal,
    Status,
}

impl AggregateColumn {
    /// Every column, in the default export order.
    pub fn all() -> Vec<Self> {
        vec![
            Self::Worker,
            Self::Branch,
            Self::Line,
            Self::Volume,
            Self::Visits,
            Self::Hours,
            Self::VolumeRate,
            Self::VisitRate,
            Self::Goal,
            Self::PercentOfGoal,
            Self::Status,
        ]
    }

    /// Parse a comma-separated column list like `worker,volume,hours`.
    pub fn parse_list(spec: &str) -> Result<Vec<Self>> {
        let mut columns = Vec::new();
        for part in spec.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            columns.push(Self::parse(part)?);
        }
        if columns.is_empty() {
            bail!("column list is empty: {spec:?}");
        }
        Ok(columns)
    }

    fn parse(key: &str) -> Result<Self> {
        Ok(match key.to_ascii_lowercase().as_str() {
            "worker_id" => Self::WorkerId,
            "worker" => Self::Worker,
            "branch" => Self::Branch,
            "line" => Self::Line,
            "team" => Self::Team,
            "volume" => Self::Volume,
            "visits" => Self::Visits,
            "hours" => Self::Hours,
            "volume_hour" => Self::VolumeRate,
            "visits_hour" => Self::VisitRate,
            "goal" => Self::Goal,
            "percent" => Self::PercentOfGoal,
            "status" => Self::Status,
            other => bail!(
                "unknown column: {other}. Known columns: worker_id, worker, branch, line, \
                 team, volume, visits, hours, volume_hour, visits_hour, goal, percent, status"
            ),
        })
    }

    /// Header label for this column.
    pub fn header(&self) -> &'static str {
        match self {
            Self::WorkerId => "worker_id",
            Self::Worker => "worker",
            Self::Branch => "branch",
            Self::Line => "line",
            Self::Team => "team",
            Self::Volume => "volume",
            Self::Visits => "visits",
            Self::Hours => "hours",
            Self::VolumeRate => "volume_hour",
            Self::VisitRate => "visits_hour",
            Self::Goal => "goal",
            Self::PercentOfGoal => "percent",
            Self::Status => "status",
        }
    }

    /// Cell value for one aggregate.
    pub fn value(&self, aggregate: &WorkerAggregate) -> String {
        match self {
            Self::WorkerId => aggregate.worker_id.clone(),
            Self::Worker => aggregate.worker_name.clone(),
            Self::Branch => aggregate.branch_id.clone(),
            Self::Line => aggregate.line.clone(),
            Self::Team => aggregate.team.clone().unwrap_or_default(),
            Self::Volume => aggregate.total_volume.to_string(),
            Self::Visits => aggregate.total_visits.to_string(),
            Self::Hours => format!("{:.2}", aggregate.hours_worked),
            Self::VolumeRate => aggregate.volume_per_hour.to_string(),
            Self::VisitRate => aggregate.visits_per_hour.to_string(),
            Self::Goal => aggregate.goal_target.to_string(),
            Self::PercentOfGoal => aggregate.percent_of_goal.to_string(),
            Self::Status => match aggregate.status {
                GoalStatus::Above => "ABOVE".to_string(),
                GoalStatus::Below => "BELOW".to_string(),
            },
        }
    }
}

/// CSV export over a chosen column subset.
#[derive(Debug, Clone)]
pub struct CsvExport {
    columns: Vec<AggregateColumn>,
}

impl CsvExport {
    pub fn new(columns: Vec<AggregateColumn>) -> Self {
        Self { columns }
    }

    /// Header row for the chosen columns.
    fn header(&self) -> String {
        self.columns
            .iter()
            .map(|c| c.header().to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Escape a CSV field (handle commas, quotes, newlines).
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn format_row(&self, aggregate: &WorkerAggregate) -> String {
        self.columns
            .iter()
            .map(|c| Self::escape_field(&c.value(aggregate)))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Render the full CSV document.
    pub fn to_csv(&self, aggregates: &[WorkerAggregate]) -> String {
        let mut output = String::new();
        output.push_str(&self.header());
        output.push('\n');

        for aggregate in aggregates {
            output.push_str(&self.format_row(aggregate));
            output.push('\n');
        }

        output
    }
}

impl Default for CsvExport {
    fn default() -> Self {
        Self::new(AggregateColumn::all())
    }
}
