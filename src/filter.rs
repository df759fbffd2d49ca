//! Row filtering for dashboard criteria
//!
//! Supports the two filtering modes the dashboard runs in:
//! - exact-date mode: one report day, branch/line narrowed by pickers
//!   (the `"all"` sentinel disables a picker)
//! - range mode: an inclusive `[from, to]` date window plus a
//!   case-insensitive worker-name search
//!
//! Worker search accepts either a plain substring or a `/REGEX/` pattern.

use anyhow::{bail, Result};
use regex::RegexBuilder;

use crate::row::TaskRow;

/// Sentinel picker value meaning "no constraint".
pub const ALL: &str = "all";

/// Which calendar dates a row must fall on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateSelector {
    /// Row date must equal this `YYYY-MM-DD` exactly.
    Exact(String),
    /// Row date must fall within the inclusive window. An open side is
    /// unbounded. Lexicographic comparison is valid: all dates share the
    /// zero-padded `YYYY-MM-DD` shape after truncation.
    Range {
        start: Option<String>,
        end: Option<String>,
    },
}

/// Worker-name criterion.
#[derive(Debug, Clone)]
pub enum WorkerMatch {
    /// Case-insensitive substring (both sides uppercased).
    Contains(String),
    /// Case-insensitive regular expression.
    Pattern(regex::Regex),
}

/// Filter criteria applied to raw task rows.
///
/// A row survives only if every active predicate accepts it; inactive
/// predicates accept everything. Survivor order is the input order.
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    date: Option<DateSelector>,
    branch: Option<String>,
    line: Option<String>,
    worker: Option<WorkerMatch>,
}

impl RowFilter {
    /// A filter that keeps every row.
    pub fn all() -> Self {
        Self::default()
    }

    /// Require an exact report date (`YYYY-MM-DD`).
    pub fn with_exact_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(DateSelector::Exact(date.into()));
        self
    }

    /// Require the row date to fall inside an inclusive window.
    pub fn with_date_range(
        mut self,
        start: Option<impl Into<String>>,
        end: Option<impl Into<String>>,
    ) -> Self {
        self.date = Some(DateSelector::Range {
            start: start.map(Into::into),
            end: end.map(Into::into),
        });
        self
    }

    /// Constrain to one branch. The `"all"` sentinel (any case) and the
    /// empty string leave the branch unconstrained.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = active_picker(branch.into());
        self
    }

    /// Constrain to one work line, with the same sentinel rules.
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line = active_picker(line.into());
        self
    }

    /// Case-insensitive worker-name substring search.
    pub fn with_worker_contains(mut self, needle: impl Into<String>) -> Self {
        let needle = needle.into();
        self.worker = if needle.trim().is_empty() {
            None
        } else {
            Some(WorkerMatch::Contains(needle.trim().to_uppercase()))
        };
        self
    }

    /// Case-insensitive worker-name regex search.
    pub fn with_worker_pattern(mut self, pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| anyhow::anyhow!("invalid worker pattern /{pattern}/: {e}"))?;
        self.worker = Some(WorkerMatch::Pattern(regex));
        Ok(self)
    }

    /// Parse a worker argument: `/REGEX/` compiles as a pattern,
    /// anything else is a substring search.
    pub fn with_worker_arg(self, arg: &str) -> Result<Self> {
        let trimmed = arg.trim();
        if trimmed.len() >= 2 && trimmed.starts_with('/') && trimmed.ends_with('/') {
            let inner = &trimmed[1..trimmed.len() - 1];
            if inner.is_empty() {
                bail!("empty worker pattern: //");
            }
            self.with_worker_pattern(inner)
        } else {
            Ok(self.with_worker_contains(trimmed))
        }
    }

    /// Whether a single row passes every active predicate.
    pub fn matches(&self, row: &TaskRow) -> bool {
        let date_ok = match &self.date {
            None => true,
            Some(DateSelector::Exact(date)) => row.date_key() == date,
            Some(DateSelector::Range { start, end }) => {
                let key = row.date_key();
                start.as_deref().map_or(true, |s| key >= s)
                    && end.as_deref().map_or(true, |e| key <= e)
            }
        };
        if !date_ok {
            return false;
        }

        if let Some(branch) = &self.branch {
            if row.branch_id != *branch {
                return false;
            }
        }

        if let Some(line) = &self.line {
            if row.line != *line {
                return false;
            }
        }

        match &self.worker {
            None => true,
            Some(WorkerMatch::Contains(needle)) => {
                row.display_name().to_uppercase().contains(needle)
            }
            Some(WorkerMatch::Pattern(regex)) => regex.is_match(row.display_name()),
        }
    }

    /// Filter a slice of rows, preserving input order.
    pub fn apply(&self, rows: &[TaskRow]) -> Vec<TaskRow> {
        rows.iter().filter(|r| self.matches(r)).cloned().collect()
    }

    /// Active date selector, if any.
    pub fn date(&self) -> Option<&DateSelector> {
        self.date.as_ref()
    }

    /// Active branch constraint, if any.
    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    /// Active line constraint, if any.
    pub fn line(&self) -> Option<&str> {
        self.line.as_deref()
    }

    /// Active worker substring, when the worker criterion is a substring.
    /// Regex patterns are engine-side only and never pushed to a store.
    pub fn worker_contains(&self) -> Option<&str> {
        match &self.worker {
            Some(WorkerMatch::Contains(needle)) => Some(needle),
            _ => None,
        }
    }
}

fn active_picker(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
        None
    } else {
        Some(trimmed.to_string())
    }
}
