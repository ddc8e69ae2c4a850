//! Discovery of dated backup directories

use crate::error::{CompactError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Format of backup directory names
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A backup directory holding a dump file, dated by its basename
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupDirectory {
    pub path: PathBuf,
    pub date: NaiveDate,
}

impl BackupDirectory {
    /// Build from a directory path, parsing the basename as a date
    pub fn from_path(path: PathBuf) -> Result<Self> {
        let date = parse_dir_date(&path)?;
        Ok(Self { path, date })
    }

    /// Path of a file directly inside this directory
    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

/// Parse a directory basename such as `2024-03-17`
pub fn parse_dir_date(path: &Path) -> Result<NaiveDate> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    NaiveDate::parse_from_str(&name, DATE_FORMAT).map_err(|_| CompactError::InvalidDate {
        path: path.to_path_buf(),
        value: name,
    })
}

/// Find every directory under `root` (root included) that directly contains
/// `file_name`, sorted ascending by path.
///
/// Any such directory whose name is not a date aborts the scan.
pub fn scan(root: &Path, file_name: &str) -> Result<Vec<BackupDirectory>> {
    let mut dirs = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry?;
        if entry.file_type().is_dir() || entry.file_name() != file_name {
            continue;
        }
        if let Some(parent) = entry.path().parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    dirs.sort();
    log::debug!("Found {} directories containing {} under {}", dirs.len(), file_name, root.display());

    dirs.into_iter().map(BackupDirectory::from_path).collect()
}
