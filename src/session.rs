//! Dashboard session: snapshot state and the refresh pipeline
//!
//! Replaces the shared-mutable-dashboard-object pattern with explicit
//! snapshots: every refresh runs fetch -> filter -> aggregate ->
//! summarize and replaces the whole state, or leaves it untouched on
//! failure. Nothing is ever patched in place.
//!
//! Fetches are issued under monotonically increasing tickets. Completing
//! a fetch whose ticket has been superseded is a no-op, so a slow stale
//! response can never overwrite the result of a newer filter change.

use crate::config::GoalPolicy;
use crate::filter::RowFilter;
use crate::row::TaskRow;
use crate::source::{RowQuery, RowSource, SourceError};
use crate::stats::{aggregate_rows, MetricMode, WorkerAggregate};
use crate::summary::{summarize, TeamSummary};

/// One immutable snapshot of everything the dashboard shows.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub filter: RowFilter,
    pub mode: MetricMode,
    /// Raw working set from the last applied fetch (pre-engine-filter).
    pub rows: Vec<TaskRow>,
    /// Ranked aggregates derived from the filtered working set.
    pub aggregates: Vec<WorkerAggregate>,
    pub summary: TeamSummary,
}

/// Ticket identifying one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// What a completed fetch did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The snapshot was replaced with the fetched rows.
    Applied,
    /// A newer fetch had been issued; this completion was dropped.
    Superseded,
}

/// Owns the row source, the goal policy, and the current snapshot.
pub struct DashboardSession {
    source: Box<dyn RowSource>,
    goals: GoalPolicy,
    state: DashboardState,
    issued_seq: u64,
}

impl DashboardSession {
    pub fn new(
        source: Box<dyn RowSource>,
        goals: GoalPolicy,
        filter: RowFilter,
        mode: MetricMode,
    ) -> Self {
        let state = DashboardState {
            filter,
            mode,
            rows: Vec::new(),
            aggregates: Vec::new(),
            summary: summarize(&[], mode),
        };
        Self {
            source,
            goals,
            state,
            issued_seq: 0,
        }
    }

    /// The current snapshot.
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Fetch and rebuild the snapshot in one synchronous step.
    ///
    /// On fetch failure the previous snapshot is kept intact and the
    /// error is returned - replace-or-keep-previous, never half-updated.
    pub fn refresh(&mut self) -> Result<FetchOutcome, SourceError> {
        let ticket = self.begin_fetch();
        let result = self.source.fetch_rows(&self.query());
        self.complete_fetch(ticket, result)
    }

    /// Issue a fetch ticket. Every issued ticket supersedes all earlier
    /// ones, applied or not.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued_seq += 1;
        FetchTicket(self.issued_seq)
    }

    /// Complete a fetch issued earlier.
    ///
    /// A stale ticket is dropped regardless of whether it carried rows
    /// or an error; only the newest issued fetch may touch the snapshot.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<TaskRow>, SourceError>,
    ) -> Result<FetchOutcome, SourceError> {
        if ticket.0 != self.issued_seq {
            tracing::debug!(
                ticket = ticket.0,
                newest = self.issued_seq,
                "dropping superseded fetch result"
            );
            return Ok(FetchOutcome::Superseded);
        }

        let rows = result?;
        tracing::debug!(source = self.source.name(), rows = rows.len(), "fetch applied");
        self.state.rows = rows;
        self.recompute();
        Ok(FetchOutcome::Applied)
    }

    /// Replace the filter criteria and re-run the whole pipeline.
    pub fn set_filter(&mut self, filter: RowFilter) -> Result<FetchOutcome, SourceError> {
        self.state.filter = filter;
        self.refresh()
    }

    /// Switch the active rate metric. Presentation-only: re-ranks and
    /// re-summarizes the held working set without touching the store.
    pub fn set_mode(&mut self, mode: MetricMode) {
        self.state.mode = mode;
        self.recompute();
    }

    /// Replace the goal policy and re-derive the snapshot.
    pub fn set_goals(&mut self, goals: GoalPolicy) {
        self.goals = goals;
        self.recompute();
    }

    /// Store-side query derived from the active filter. Regex worker
    /// patterns and line constraints are engine-side only.
    fn query(&self) -> RowQuery {
        RowQuery::from_filter(&self.state.filter)
    }

    /// Derive aggregates and summary from the held raw rows. The sort
    /// happens inside [`aggregate_rows`] on every call; nothing is
    /// cached between passes.
    fn recompute(&mut self) {
        let filtered = self.state.filter.apply(&self.state.rows);
        self.state.aggregates = aggregate_rows(&filtered, &self.goals, self.state.mode);
        self.state.summary = summarize(&self.state.aggregates, self.state.mode);
    }
}
