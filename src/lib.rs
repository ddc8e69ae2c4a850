//! # sqlcompact
//!
//! Rewrites a tree of dated SQL dump backups into incremental form. Dumps
//! are grouped into windows by date, and every dump in a window is stripped
//! of the statements and rows an earlier dump of the same window already
//! holds. Fully redundant dumps are deleted.

pub mod cli;
pub mod commands;
pub mod config;
pub mod data;
pub mod error;
pub mod grouping;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod rewrite;
pub mod scanner;
pub mod schema;
pub mod workspace;

pub use config::Config;
pub use error::{CompactError, Result};
pub use pipeline::RunReport;
pub use workspace::BackupWorkspace;

use serde::Serialize;
use std::fmt;

/// The two dump files found in a backup directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DumpKind {
    Schema,
    Data,
}

impl DumpKind {
    /// Processing order of the pipelines
    pub const ALL: [DumpKind; 2] = [DumpKind::Schema, DumpKind::Data];

    pub fn label(&self) -> &'static str {
        match self {
            DumpKind::Schema => "schema",
            DumpKind::Data => "data",
        }
    }
}

impl fmt::Display for DumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
