//! Dashboard configuration (ritmo.toml)
//!
//! Everything the engine treats as policy rather than data lives here:
//! the goal targets workers are classified against, and which row-store
//! backend to construct. Backend choice is configuration at construction
//! time, never runtime environment sniffing.
//!
//! # Example ritmo.toml
//!
//! ```toml
//! [goal]
//! default = 120
//!
//! [goal.branches]
//! "101" = 130
//!
//! [goal.lines]
//! MERCEARIA = 110
//!
//! [source]
//! kind = "rest"
//!
//! [source.rest]
//! base_url = "https://example.supabase.co/rest/v1"
//! table = "separacao"
//! api_key = "anon-key"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Goal rate applied when nothing narrower is configured.
pub const DEFAULT_GOAL_TARGET: u64 = 120;

/// Default config file probed in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "ritmo.toml";

/// Root configuration for ritmo.toml.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub goal: GoalPolicy,
    pub source: SourceConfig,
}

impl DashboardConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    /// Resolve configuration for the CLI: an explicit path must load,
    /// `ritmo.toml` is picked up when present, everything else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                if Path::new(DEFAULT_CONFIG_FILE).exists() {
                    Self::from_file(DEFAULT_CONFIG_FILE)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Goal targets (rate per hour) with per-branch and per-line overrides.
///
/// Precedence: line override, then branch override, then the default.
/// The line is the unit the goal measures; the branch is just where it
/// runs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GoalPolicy {
    pub default: u64,
    pub branches: HashMap<String, u64>,
    pub lines: HashMap<String, u64>,
}

impl Default for GoalPolicy {
    fn default() -> Self {
        Self {
            default: DEFAULT_GOAL_TARGET,
            branches: HashMap::new(),
            lines: HashMap::new(),
        }
    }
}

impl GoalPolicy {
    /// A flat policy with one target and no overrides.
    pub fn flat(target: u64) -> Self {
        Self {
            default: target,
            branches: HashMap::new(),
            lines: HashMap::new(),
        }
    }

    /// Target for a worker operating on `line` at `branch`.
    pub fn target_for(&self, branch: &str, line: &str) -> u64 {
        self.lines
            .get(line)
            .or_else(|| self.branches.get(branch))
            .copied()
            .unwrap_or(self.default)
    }
}

/// Which row-store backend to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Seeded synthetic generator (demo and development).
    Mock,
    /// Live PostgREST-style row store.
    Rest,
}

/// Row-source configuration section.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub mock: MockConfig,
    pub rest: RestConfig,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Mock,
            mock: MockConfig::default(),
            rest: RestConfig::default(),
        }
    }
}

/// Synthetic generator settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MockConfig {
    /// How many task rows to generate per fetch.
    pub rows: usize,
    /// RNG seed; fixed seeds make fetches reproducible.
    pub seed: Option<u64>,
    /// Rows are spread over today minus this many days.
    pub days_back: u32,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            rows: 150,
            seed: None,
            days_back: 7,
        }
    }
}

/// Live row-store settings (PostgREST-style endpoint).
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RestConfig {
    /// Endpoint root, e.g. `https://host/rest/v1`.
    pub base_url: String,
    /// Table exposed by the endpoint.
    pub table: String,
    /// API key sent as `apikey` and bearer token. Empty sends none.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            table: "separacao".to_string(),
            api_key: String::new(),
            timeout_seconds: 30,
        }
    }
}
