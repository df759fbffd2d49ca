//! Seeded synthetic row generator
//!
//! Development and demo backend: fabricates task rows shaped exactly
//! like the live store's, spread over the recent calendar window, with
//! shift windows that occasionally cross midnight. A fixed seed makes
//! every fetch reproducible, which the integration tests lean on.

use chrono::{Days, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::MockConfig;
use crate::filter::RowFilter;
use crate::row::TaskRow;
use crate::source::{RowQuery, RowSource, SourceError};

const WORKERS: &[&str] = &[
    "JOAO SILVA",
    "MARIA SANTOS",
    "PEDRO OLIVEIRA",
    "ANA SOUZA",
    "CARLOS LIMA",
    "FERNANDA COSTA",
    "LUCAS PEREIRA",
    "JULIA RODRIGUES",
];

const BRANCHES: &[&str] = &["101", "102", "464"];

const LINES: &[&str] = &["MERCEARIA", "PERECIVEIS", "FLV", "ALTO GIRO"];

const TEAMS: &[&str] = &["TURNO A", "TURNO B"];

/// Synthetic [`RowSource`] backed by a seeded RNG.
pub struct MockSource {
    config: MockConfig,
}

impl MockSource {
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }

    /// Generate the full synthetic row set for one fetch.
    fn generate(&self) -> Vec<TaskRow> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let today = Local::now().date_naive();

        (0..self.config.rows)
            .map(|_| self.generate_row(&mut rng, today))
            .collect()
    }

    fn generate_row(&self, rng: &mut StdRng, today: NaiveDate) -> TaskRow {
        let worker_index = rng.gen_range(0..WORKERS.len());
        let days_back = if self.config.days_back == 0 {
            0
        } else {
            rng.gen_range(0..=self.config.days_back)
        };
        let date = today
            .checked_sub_days(Days::new(u64::from(days_back)))
            .unwrap_or(today);

        // Most shifts sit inside the working day; roughly one in twelve
        // is a night shift that wraps past midnight.
        let (time_start, time_end) = if rng.gen_bool(1.0 / 12.0) {
            let start_hour = rng.gen_range(21..24);
            let end_hour = rng.gen_range(0..4);
            (
                format!("{start_hour:02}:00:00"),
                format!("{end_hour:02}:30:00"),
            )
        } else {
            let start_hour = rng.gen_range(6..=16);
            let duration = rng.gen_range(1..=4);
            let start_minute = rng.gen_range(0..60);
            (
                format!("{start_hour:02}:{start_minute:02}:00"),
                format!("{:02}:{start_minute:02}:00", (start_hour + duration).min(23)),
            )
        };

        TaskRow {
            worker_id: (1000 + worker_index).to_string(),
            worker_name: Some(WORKERS[worker_index].to_string()),
            branch_id: BRANCHES[rng.gen_range(0..BRANCHES.len())].to_string(),
            line: LINES[rng.gen_range(0..LINES.len())].to_string(),
            team: Some(TEAMS[rng.gen_range(0..TEAMS.len())].to_string()),
            volume_count: rng.gen_range(50..250),
            visit_count: rng.gen_range(10..60),
            date_started: date.format("%Y-%m-%d").to_string(),
            time_start,
            time_end,
        }
    }
}

impl RowSource for MockSource {
    fn fetch_rows(&self, query: &RowQuery) -> Result<Vec<TaskRow>, SourceError> {
        let rows = self.generate();

        // Honor the store-side query the same way the live backend
        // would, so both sources are interchangeable under test.
        let mut filter = RowFilter::all();
        if let Some(date) = &query.date {
            filter = match date.clone() {
                crate::filter::DateSelector::Exact(d) => filter.with_exact_date(d),
                crate::filter::DateSelector::Range { start, end } => {
                    filter.with_date_range(start, end)
                }
            };
        }
        if let Some(branch) = &query.branch {
            filter = filter.with_branch(branch.clone());
        }
        if let Some(needle) = &query.worker_contains {
            filter = filter.with_worker_contains(needle.clone());
        }

        let rows = filter.apply(&rows);
        tracing::debug!(rows = rows.len(), "mock source fetch complete");
        Ok(rows)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(rows: usize, seed: u64) -> MockSource {
        MockSource::new(MockConfig {
            rows,
            seed: Some(seed),
            days_back: 7,
        })
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = source(50, 42).fetch_rows(&RowQuery::default()).unwrap();
        let b = source(50, 42).fetch_rows(&RowQuery::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = source(50, 1).fetch_rows(&RowQuery::default()).unwrap();
        let b = source(50, 2).fetch_rows(&RowQuery::default()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_row_shape_matches_store_contract() {
        let rows = source(30, 7).fetch_rows(&RowQuery::default()).unwrap();
        assert_eq!(rows.len(), 30);

        for row in &rows {
            assert!(row.worker_id.starts_with("10"));
            assert!(row.worker_name.is_some());
            assert!(BRANCHES.contains(&row.branch_id.as_str()));
            assert!(LINES.contains(&row.line.as_str()));
            assert_eq!(row.date_key().len(), 10);
            assert_eq!(row.time_start.len(), 8);
            assert_eq!(row.time_end.len(), 8);
            assert!(row.volume_count >= 50 && row.volume_count < 250);
        }
    }

    #[test]
    fn test_branch_query_prefilters() {
        let query = RowQuery {
            branch: Some("101".to_string()),
            ..RowQuery::default()
        };
        let rows = source(80, 3).fetch_rows(&query).unwrap();
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| r.branch_id == "101"));
    }

    #[test]
    fn test_worker_query_prefilters() {
        let query = RowQuery {
            worker_contains: Some("SILVA".to_string()),
            ..RowQuery::default()
        };
        let rows = source(80, 3).fetch_rows(&query).unwrap();
        assert!(!rows.is_empty());
        assert!(rows
            .iter()
            .all(|r| r.worker_name.as_deref() == Some("JOAO SILVA")));
    }

    #[test]
    fn test_some_shifts_cross_midnight() {
        let rows = source(500, 11).fetch_rows(&RowQuery::default()).unwrap();
        let overnight = rows
            .iter()
            .filter(|r| r.time_end < r.time_start)
            .count();
        assert!(overnight > 0, "expected some overnight shifts in 500 rows");
    }
}
