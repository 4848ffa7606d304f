//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.jobscope.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".jobscope.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote API settings.
    #[serde(default)]
    pub collector: CollectorConfig,

    /// CSV artifact settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Report settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Settings for the fetch-and-normalize step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Job listing endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of postings to keep from the response.
    #[serde(default = "default_max_jobs")]
    pub max_jobs: usize,

    /// Print a progress line every this many processed postings.
    #[serde(default = "default_progress_every")]
    pub progress_every: usize,

    /// User-Agent header sent with the request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: default_timeout(),
            max_jobs: default_max_jobs(),
            progress_every: default_progress_every(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_endpoint() -> String {
    "https://remotive.com/api/remote-jobs".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_max_jobs() -> usize {
    50
}

fn default_progress_every() -> usize {
    10
}

fn default_user_agent() -> String {
    format!("jobscope/{}", env!("CARGO_PKG_VERSION"))
}

/// Where the CSV table lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// CSV file written by `collect` and read by `analyze`.
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("jobs_data.csv")
}

/// Settings for the summary reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// How many locations and companies to list.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// How many title keywords to list.
    #[serde(default = "default_keyword_limit")]
    pub keyword_limit: usize,

    /// Shortest token (in characters) counted as a keyword.
    #[serde(default = "default_min_keyword_length")]
    pub min_keyword_length: usize,

    /// Words never counted as keywords.
    #[serde(default = "default_stop_words")]
    pub stop_words: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            keyword_limit: default_keyword_limit(),
            min_keyword_length: default_min_keyword_length(),
            stop_words: default_stop_words(),
        }
    }
}

fn default_top_n() -> usize {
    5
}

fn default_keyword_limit() -> usize {
    10
}

fn default_min_keyword_length() -> usize {
    3
}

fn default_stop_words() -> Vec<String> {
    vec!["and", "or", "the", "a", "an", "in", "of", "for"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_if_exists(Path::new(DEFAULT_CONFIG_FILE))
    }

    fn load_if_exists(path: &Path) -> Result<Option<Self>> {
        if path.exists() {
            Ok(Some(Self::load(path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were actually given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        use crate::cli::Command;

        match &args.command {
            Some(Command::Collect(collect)) => {
                if let Some(ref endpoint) = collect.endpoint {
                    self.collector.endpoint = endpoint.clone();
                }
                if let Some(timeout) = collect.timeout {
                    self.collector.timeout_seconds = timeout;
                }
                if let Some(limit) = collect.limit {
                    self.collector.max_jobs = limit;
                }
                if let Some(ref output) = collect.output {
                    self.storage.path = output.clone();
                }
            }
            Some(Command::Analyze(analyze)) => {
                if let Some(ref input) = analyze.input {
                    self.storage.path = input.clone();
                }
                if let Some(top) = analyze.top {
                    self.analysis.top_n = top;
                }
            }
            None => {}
        }
    }

    /// Check the limits a file could set out of range.
    ///
    /// Run after [`Config::merge_with_args`] so file values and flags
    /// obey the same rules.
    pub fn validate(&self) -> Result<()> {
        let endpoint = &self.collector.endpoint;
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            anyhow::bail!(
                "collector.endpoint must start with 'http://' or 'https://' (got '{}')",
                endpoint
            );
        }
        if self.collector.max_jobs == 0 {
            anyhow::bail!("collector.max_jobs must be at least 1");
        }
        if self.collector.timeout_seconds == 0 {
            anyhow::bail!("collector.timeout_seconds must be at least 1");
        }
        if self.analysis.top_n == 0 {
            anyhow::bail!("analysis.top_n must be at least 1");
        }
        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
