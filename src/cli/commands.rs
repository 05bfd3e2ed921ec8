//! CLI commands and argument parsing

use crate::types::Direction;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for the TempoDB API
#[derive(Parser, Debug)]
#[command(name = "tempodb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML); falls back to TEMPODB_* environment variables
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List series matching a filter
    ListSeries {
        /// Series key (repeatable)
        #[arg(long)]
        key: Vec<String>,

        /// Tag (repeatable)
        #[arg(long)]
        tag: Vec<String>,

        /// Attribute as NAME=VALUE (repeatable)
        #[arg(long, value_parser = parse_key_val)]
        attr: Vec<(String, String)>,

        /// Stop after this many series
        #[arg(long)]
        max: Option<usize>,
    },

    /// Show one series
    GetSeries {
        /// Series key
        key: String,
    },

    /// Create a series
    CreateSeries {
        /// Series key
        key: String,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Tag (repeatable)
        #[arg(long)]
        tag: Vec<String>,

        /// Attribute as NAME=VALUE (repeatable)
        #[arg(long, value_parser = parse_key_val)]
        attr: Vec<(String, String)>,
    },

    /// Read data points from a series
    Read {
        /// Series key
        key: String,

        /// Start of the range (ISO8601)
        #[arg(long)]
        start: String,

        /// End of the range (ISO8601)
        #[arg(long)]
        end: String,

        /// Rollup as FOLD=PERIOD, e.g. mean=1hour
        #[arg(long, value_parser = parse_key_val)]
        rollup: Option<(String, String)>,

        /// Timezone for returned timestamps
        #[arg(long)]
        tz: Option<String>,

        /// Page size requested from the server
        #[arg(long)]
        limit: Option<u32>,

        /// Stop after this many points
        #[arg(long)]
        max: Option<usize>,
    },

    /// Find one point per period matching a predicate
    Find {
        /// Series key
        key: String,

        /// Predicate function (e.g. max, min)
        #[arg(long)]
        predicate: String,

        /// Period searched for each point (e.g. 1day)
        #[arg(long)]
        period: String,

        /// Start of the range (ISO8601)
        #[arg(long)]
        start: String,

        /// End of the range (ISO8601)
        #[arg(long)]
        end: String,

        /// Timezone for returned timestamps
        #[arg(long)]
        tz: Option<String>,

        /// Stop after this many points
        #[arg(long)]
        max: Option<usize>,
    },

    /// Write data points to a series
    Write {
        /// Series key
        key: String,

        /// Point as TIME=VALUE (repeatable)
        #[arg(required = true, value_parser = parse_key_val)]
        points: Vec<(String, String)>,
    },

    /// Show the value nearest a timestamp
    Single {
        /// Series key
        key: String,

        /// Timestamp (ISO8601)
        #[arg(long)]
        ts: String,

        /// exact, before, after or nearest
        #[arg(long, default_value = "exact")]
        direction: Direction,
    },

    /// Delete the data points of a series in a range
    Delete {
        /// Series key
        key: String,

        /// Start of the range (ISO8601)
        #[arg(long)]
        start: String,

        /// End of the range (ISO8601)
        #[arg(long)]
        end: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one object per line)
    Json,
    /// Human-readable output
    Pretty,
}

/// Parse a `NAME=VALUE` argument
pub fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))
}
