//! Error types for sqlcompact operations

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompactError>;

#[derive(Error, Debug)]
pub enum CompactError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Directory name '{value}' is not a YYYY-MM-DD date: {path}")]
    InvalidDate { path: PathBuf, value: String },

    #[error("Failed to read dump '{path}': {source}")]
    DumpRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    DumpWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("{failed} dump file(s) could not be processed")]
    FilesFailed { failed: usize },
}

impl CompactError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    pub fn dump_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DumpRead {
            path: path.into(),
            source,
        }
    }

    pub fn dump_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DumpWrite {
            path: path.into(),
            source,
        }
    }
}
