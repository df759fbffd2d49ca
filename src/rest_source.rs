//! Live row store client
//!
//! Thin blocking client for a PostgREST-style endpoint (the production
//! deployment fronts its Postgres row table with one). Filter criteria
//! translate to `column=op.value` query pairs; the response is a JSON
//! array of legacy-named rows that deserializes straight into
//! [`TaskRow`]. No retries, no pagination - a failed request fails the
//! whole pass and the caller decides.

use std::time::Duration;

use crate::config::RestConfig;
use crate::filter::DateSelector;
use crate::row::TaskRow;
use crate::source::{RowQuery, RowSource, SourceError};

/// Store columns the push-down filters target.
const DATE_COLUMN: &str = "DTAINICIO";
const BRANCH_COLUMN: &str = "NROEMPRESA";
const WORKER_COLUMN: &str = "PRODUTIVO";

/// [`RowSource`] backed by a PostgREST-style HTTP endpoint.
pub struct RestSource {
    client: reqwest::blocking::Client,
    config: RestConfig,
}

impl RestSource {
    pub fn new(config: RestConfig) -> Result<Self, SourceError> {
        if config.base_url.trim().is_empty() {
            return Err(SourceError::Config(
                "rest source requires source.rest.base_url".to_string(),
            ));
        }
        if config.table.trim().is_empty() {
            return Err(SourceError::Config(
                "rest source requires source.rest.table".to_string(),
            ));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.table
        )
    }

    /// Translate a [`RowQuery`] into PostgREST query pairs.
    fn query_pairs(query: &RowQuery) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), "*".to_string())];

        match &query.date {
            None => {}
            Some(DateSelector::Exact(date)) => {
                pairs.push((DATE_COLUMN.to_string(), format!("eq.{date}")));
            }
            Some(DateSelector::Range { start, end }) => {
                if let Some(start) = start {
                    pairs.push((DATE_COLUMN.to_string(), format!("gte.{start}")));
                }
                if let Some(end) = end {
                    pairs.push((DATE_COLUMN.to_string(), format!("lte.{end}")));
                }
            }
        }

        if let Some(branch) = &query.branch {
            pairs.push((BRANCH_COLUMN.to_string(), format!("eq.{branch}")));
        }

        if let Some(needle) = &query.worker_contains {
            pairs.push((WORKER_COLUMN.to_string(), format!("ilike.*{needle}*")));
        }

        pairs
    }
}

impl RowSource for RestSource {
    fn fetch_rows(&self, query: &RowQuery) -> Result<Vec<TaskRow>, SourceError> {
        let url = self.endpoint();
        let pairs = Self::query_pairs(query);
        tracing::debug!(%url, filters = pairs.len() - 1, "fetching rows");

        let mut request = self.client.get(&url).query(&pairs);
        if !self.config.api_key.is_empty() {
            request = request
                .header("apikey", &self.config.api_key)
                .header("Authorization", format!("Bearer {}", self.config.api_key));
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        let rows: Vec<TaskRow> = serde_json::from_str(&body)?;
        tracing::debug!(rows = rows.len(), "row store fetch complete");
        Ok(rows)
    }

    fn name(&self) -> &'static str {
        "rest"
    }
}
