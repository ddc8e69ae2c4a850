//! Command-line interface for sqlcompact

use crate::scanner::DATE_FORMAT;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sqlcompact")]
#[command(about = "Rewrites dated SQL dump backups into incremental form")]
#[command(version)]
pub struct Cli {
    /// Compacts the backup tree when no subcommand is given
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backup root directory (defaults to /backup)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Configuration file (defaults to <root>/sqlcompact.json when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Rewrite schema and data dumps against earlier dumps of their group
    Compact {
        /// Report what would change without writing or deleting anything
        #[arg(long)]
        dry_run: bool,

        /// Date to group against, YYYY-MM-DD (defaults to the local date)
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,

        /// Stop at the first dump that cannot be processed
        #[arg(long)]
        fail_fast: bool,

        /// Rewritten schema content: "ledger" or "increment"
        #[arg(long)]
        schema_output: Option<String>,

        /// Output the run report as JSON
        #[arg(long)]
        json: bool,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Show how dumps would be grouped, without touching any file
    Plan {
        /// Date to group against, YYYY-MM-DD (defaults to the local date)
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Self::Compact {
            dry_run: false,
            today: None,
            fail_fast: false,
            schema_output: None,
            json: false,
            no_progress: false,
        }
    }
}

/// Parse a YYYY-MM-DD date argument
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| format!("Invalid date: '{}'. Use YYYY-MM-DD.", s))
}
