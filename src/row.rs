//! Task row input records
//!
//! One `TaskRow` per completed work task, as delivered by the row store.
//! The legacy store speaks uppercase Portuguese column names; serde
//! aliases map them onto the Rust field names so production payloads
//! deserialize unmodified. All count and identifier fields are parsed
//! leniently - dirty rows degrade to zeros, they never abort a fetch.

use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder shown for rows that arrive without a worker name.
pub const UNKNOWN_WORKER: &str = "UNKNOWN";

/// A single raw task row from the row store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRow {
    /// Opaque worker identifier; the aggregation grouping key.
    #[serde(alias = "CODPRODUTIVO", deserialize_with = "de_id", default)]
    pub worker_id: String,

    /// Worker display name; absent rows surface as [`UNKNOWN_WORKER`].
    #[serde(alias = "PRODUTIVO", default)]
    pub worker_name: Option<String>,

    /// Operating unit. Numeric in the store, normalized to a string.
    #[serde(alias = "NROEMPRESA", deserialize_with = "de_id", default)]
    pub branch_id: String,

    /// Work line category (picking line, in the original deployment).
    #[serde(alias = "LINHA_SEPARACAO", default)]
    pub line: String,

    /// Optional team/shift label.
    #[serde(alias = "EQUIPE", default)]
    pub team: Option<String>,

    /// Units of volume moved in this task. May arrive as a numeric string.
    #[serde(alias = "QTDVOLUME", deserialize_with = "de_lenient_count", default)]
    pub volume_count: u64,

    /// Addresses visited in this task. May arrive as a numeric string.
    #[serde(alias = "QTD_VISITAS", deserialize_with = "de_lenient_count", default)]
    pub visit_count: u64,

    /// Calendar date the task started. Only the first 10 characters of
    /// the stored ISO-like value are significant.
    #[serde(alias = "DTAINICIO", default)]
    pub date_started: String,

    /// Task start time of day, naive `HH:MM:SS`.
    #[serde(alias = "HORAINICIO", alias = "Hora Inicio", default)]
    pub time_start: String,

    /// Task end time of day, naive `HH:MM:SS`.
    #[serde(alias = "HORAFIM", default)]
    pub time_end: String,
}

impl TaskRow {
    /// The row's calendar date truncated to `YYYY-MM-DD`.
    ///
    /// The store mixes plain dates and full ISO timestamps in the same
    /// column; every date comparison in the engine runs on this prefix.
    pub fn date_key(&self) -> &str {
        self.date_started.get(..10).unwrap_or(&self.date_started)
    }

    /// Display name with the missing-name placeholder applied.
    pub fn display_name(&self) -> &str {
        match self.worker_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => UNKNOWN_WORKER,
        }
    }
}

/// Parse a count that may be a number, a numeric string, or garbage.
///
/// Mirrors the store's historical `parseInt(...) || 0` contract: leading
/// digits win, anything else is zero. Negative input clamps to zero.
pub fn lenient_count(raw: &str) -> u64 {
    let trimmed = raw.trim();
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<u64>().unwrap_or(0)
}

fn de_lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => 0,
        Some(Raw::Int(v)) => v.max(0) as u64,
        Some(Raw::Float(v)) if v.is_finite() && v > 0.0 => v.round() as u64,
        Some(Raw::Float(_)) => 0,
        Some(Raw::Text(s)) => lenient_count(&s),
    })
}

/// Identifiers arrive as either strings or bare numbers depending on the
/// store column type; both normalize to a string.
fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => String::new(),
        Some(Raw::Int(v)) => v.to_string(),
        Some(Raw::Float(v)) => {
            if v.fract() == 0.0 && v.is_finite() {
                (v as i64).to_string()
            } else {
                v.to_string()
            }
        }
        Some(Raw::Text(s)) => s.trim().to_string(),
    })
}
