//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// jobscope - remote job postings to CSV, plus quick statistics
///
/// `collect` pulls postings from the Remotive API into a CSV file;
/// `analyze` reads that file back and prints top locations, top
/// companies and the most common title keywords.
///
/// Examples:
///   jobscope collect
///   jobscope collect --limit 100 --output remote.csv
///   jobscope analyze --input remote.csv --top 10
///   jobscope analyze --format json
///   jobscope --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to configuration file
    ///
    /// If not specified, looks for .jobscope.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Generate a default .jobscope.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch postings and save them as CSV
    Collect(CollectArgs),
    /// Load the CSV and print summary reports
    Analyze(AnalyzeArgs),
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct CollectArgs {
    /// Maximum number of postings to keep (default: 50)
    #[arg(short, long, value_name = "COUNT")]
    pub limit: Option<usize>,

    /// CSV file to write (default: jobs_data.csv)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Job listing endpoint
    #[arg(long, value_name = "URL", env = "JOBSCOPE_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds (default: 10)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct AnalyzeArgs {
    /// CSV file to read (default: jobs_data.csv)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// How many locations and companies to list (default: 5)
    #[arg(short, long, value_name = "N")]
    pub top: Option<usize>,

    /// Output format (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,
}

/// Output format for the analysis reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Numbered console listing (default)
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        match &self.command {
            None => Err("A command is required: collect or analyze".to_string()),
            Some(Command::Collect(collect)) => {
                if let Some(ref endpoint) = collect.endpoint {
                    if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                        return Err("Endpoint must start with 'http://' or 'https://'".to_string());
                    }
                }
                if collect.limit == Some(0) {
                    return Err("Limit must be at least 1".to_string());
                }
                if collect.timeout == Some(0) {
                    return Err("Timeout must be at least 1 second".to_string());
                }
                Ok(())
            }
            Some(Command::Analyze(analyze)) => {
                if analyze.top == Some(0) {
                    return Err("Top must be at least 1".to_string());
                }
                Ok(())
            }
        }
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
