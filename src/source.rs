//! Row store capability
//!
//! The engine never talks to a concrete store; it talks to a
//! [`RowSource`]. Two implementations exist - the seeded synthetic
//! generator and the live PostgREST client - and [`build_source`] picks
//! one from configuration at construction time. A source may narrow the
//! result server-side using the [`RowQuery`] it receives, but the engine
//! always re-filters, so returning a superset is always correct.

use thiserror::Error;

use crate::config::{SourceConfig, SourceKind};
use crate::filter::DateSelector;
use crate::mock_source::MockSource;
use crate::rest_source::RestSource;
use crate::row::TaskRow;

/// Failures surfaced by a row source. The engine never retries; a
/// failed fetch aborts the whole pass and the caller decides what next.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("source configuration error: {0}")]
    Config(String),

    #[error("row store returned HTTP {status}")]
    Http { status: u16 },

    #[error("row store transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("row store payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Store-side filter descriptor handed to a fetch.
///
/// Only criteria a store can realistically push down: calendar dates,
/// one branch, a worker-name substring. Line filtering and regex worker
/// patterns stay engine-side.
#[derive(Debug, Clone, Default)]
pub struct RowQuery {
    pub date: Option<DateSelector>,
    pub branch: Option<String>,
    pub worker_contains: Option<String>,
}

impl RowQuery {
    /// Derive the push-down query from engine filter criteria. Regex
    /// worker patterns and line constraints stay engine-side.
    pub fn from_filter(filter: &crate::filter::RowFilter) -> Self {
        Self {
            date: filter.date().cloned(),
            branch: filter.branch().map(str::to_string),
            worker_contains: filter.worker_contains().map(str::to_string),
        }
    }
}

/// A queryable supplier of raw task rows.
pub trait RowSource {
    /// Fetch rows matching the query, or fail the pass.
    fn fetch_rows(&self, query: &RowQuery) -> Result<Vec<TaskRow>, SourceError>;

    /// Short backend label for logs.
    fn name(&self) -> &'static str;
}

/// Construct the configured row source.
pub fn build_source(config: &SourceConfig) -> Result<Box<dyn RowSource>, SourceError> {
    tracing::debug!(kind = ?config.kind, "building row source");

    match config.kind {
        SourceKind::Mock => Ok(Box::new(MockSource::new(config.mock.clone()))),
        SourceKind::Rest => Ok(Box::new(RestSource::new(config.rest.clone())?)),
    }
}
