//! Incremental rewrite of the dump files of one group

use crate::error::{CompactError, Result};
use crate::grouping::Group;
use crate::progress::ProgressReporter;
use crate::workspace::BackupWorkspace;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// New content for a dump after filtering against its group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// Nothing new, the file can go
    Redundant,
    Content(String),
}

/// Accumulated state of a group, fed one dump at a time in date order
pub trait DumpLedger {
    /// Fold a dump into the ledger and return what the file should become
    fn absorb(&mut self, content: &str) -> Rewrite;
}

/// What happened to a single dump file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FileAction {
    Rewritten { before_bytes: u64, after_bytes: u64 },
    Deleted { bytes: u64 },
    Unchanged { bytes: u64 },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    #[serde(flatten)]
    pub action: FileAction,
}

impl FileOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self.action, FileAction::Failed { .. })
    }
}

/// Rewrites the dumps of a group against a fresh ledger
#[derive(Debug)]
pub struct GroupRewriter<'a> {
    workspace: &'a BackupWorkspace,
    file_name: &'a str,
    reference_file: Option<&'a str>,
    fail_fast: bool,
}

impl<'a> GroupRewriter<'a> {
    pub fn new(workspace: &'a BackupWorkspace, file_name: &'a str) -> Self {
        Self {
            workspace,
            file_name,
            reference_file: None,
            fail_fast: false,
        }
    }

    /// Write a marker naming the previous dump next to every non-baseline dump
    pub fn with_reference_file(mut self, name: &'a str) -> Self {
        self.reference_file = Some(name);
        self
    }

    /// Stop at the first file error instead of recording it
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Process every member of `group` in order.
    ///
    /// A file that cannot be read adds nothing to the ledger. Unless
    /// `fail_fast` is set, its error is recorded and the next file is
    /// processed against the ledger as it stands.
    pub fn rewrite<L: DumpLedger>(
        &self,
        group: &Group,
        mut ledger: L,
        progress: &ProgressReporter,
    ) -> Result<Vec<FileOutcome>> {
        let mut outcomes = Vec::with_capacity(group.len());
        let mut reference = group.baseline().file(self.file_name);

        for member in group.members() {
            let path = member.file(self.file_name);
            log::info!("Processing {} (reference {})", path.display(), reference.display());

            let action = match self.rewrite_file(&mut ledger, &reference, &path) {
                Ok(action) => action,
                Err(e) if !self.fail_fast => {
                    log::warn!("Skipping {}: {}", path.display(), e);
                    FileAction::Failed {
                        error: e.to_string(),
                    }
                }
                Err(e) => return Err(e),
            };

            progress.advance(&path);
            // The reference moves to the file just handled, not the baseline
            reference = path.clone();
            outcomes.push(FileOutcome { path, action });
        }

        Ok(outcomes)
    }

    fn rewrite_file<L: DumpLedger>(
        &self,
        ledger: &mut L,
        reference: &Path,
        path: &Path,
    ) -> Result<FileAction> {
        if let Some(marker_name) = self.reference_file {
            if reference != path {
                self.write_reference_marker(marker_name, reference, path)?;
            }
        }

        let content = self.workspace.read_dump(path)?;
        let before_bytes = content.len() as u64;

        match ledger.absorb(&content) {
            Rewrite::Redundant => {
                self.workspace.remove(path)?;
                log::info!("Deleted {} ({} bytes, nothing new)", path.display(), before_bytes);
                Ok(FileAction::Deleted {
                    bytes: before_bytes,
                })
            }
            Rewrite::Content(body) if body == content => Ok(FileAction::Unchanged {
                bytes: before_bytes,
            }),
            Rewrite::Content(body) => {
                self.workspace.write(path, &body)?;
                let after_bytes = body.len() as u64;
                log::info!(
                    "Rewrote {} ({} -> {} bytes)",
                    path.display(),
                    before_bytes,
                    after_bytes
                );
                Ok(FileAction::Rewritten {
                    before_bytes,
                    after_bytes,
                })
            }
        }
    }

    fn write_reference_marker(&self, marker_name: &str, reference: &Path, path: &Path) -> Result<()> {
        let dir = path.parent().ok_or_else(|| {
            CompactError::invalid_input(format!("Dump has no parent directory: {}", path.display()))
        })?;
        let marker = dir.join(marker_name);
        log::debug!("Writing reference marker {} -> {}", marker.display(), reference.display());
        self.workspace.write(&marker, &reference.display().to_string())
    }
}
