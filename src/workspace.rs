//! Backup tree file access

use crate::error::{CompactError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// The backup root and the file operations allowed on it.
///
/// In dry-run mode reads go to disk and every write or delete is skipped.
#[derive(Debug, Clone)]
pub struct BackupWorkspace {
    pub root: PathBuf,
    pub dry_run: bool,
}

impl BackupWorkspace {
    pub fn new(root: PathBuf, dry_run: bool) -> Result<Self> {
        if !root.is_dir() {
            return Err(CompactError::invalid_input(format!(
                "Backup root is not a directory: {}",
                root.display()
            )));
        }
        Ok(Self { root, dry_run })
    }

    /// Read a whole dump file
    pub fn read_dump(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| CompactError::dump_read(path, e))
    }

    /// Replace a file's content
    pub fn write(&self, path: &Path, content: &str) -> Result<()> {
        if self.dry_run {
            log::debug!("[dry-run] would write {} bytes to {}", content.len(), path.display());
            return Ok(());
        }
        fs::write(path, content).map_err(|e| CompactError::dump_write(path, e))
    }

    /// Delete a dump that holds nothing new
    pub fn remove(&self, path: &Path) -> Result<()> {
        if self.dry_run {
            log::debug!("[dry-run] would delete {}", path.display());
            return Ok(());
        }
        fs::remove_file(path).map_err(|e| CompactError::dump_write(path, e))
    }
}
