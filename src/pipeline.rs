//! Scanner → grouper → rewriter, once per dump kind

use crate::config::Config;
use crate::data::DataLedger;
use crate::error::Result;
use crate::grouping::{group_directories, Group};
use crate::progress::ProgressReporter;
use crate::rewrite::{FileAction, FileOutcome, GroupRewriter};
use crate::scanner;
use crate::schema::SchemaLedger;
use crate::workspace::BackupWorkspace;
use crate::DumpKind;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

/// Groups of one pipeline, before any file is touched
#[derive(Debug, Clone, Serialize)]
pub struct PipelinePlan {
    pub kind: DumpKind,
    pub file_name: String,
    pub groups: Vec<Group>,
}

impl PipelinePlan {
    pub fn file_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    pub fn group_paths(&self) -> Vec<Vec<PathBuf>> {
        self.groups
            .iter()
            .map(|g| g.members().iter().map(|m| m.file(&self.file_name)).collect())
            .collect()
    }
}

/// Totals over the outcomes of one pipeline
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineTotals {
    pub rewritten: usize,
    pub deleted: usize,
    pub unchanged: usize,
    pub failed: usize,
    pub bytes_before: u64,
    pub bytes_after: u64,
}

impl PipelineTotals {
    pub fn from_outcomes(outcomes: &[FileOutcome]) -> Self {
        let mut totals = Self::default();
        for outcome in outcomes {
            match outcome.action {
                FileAction::Rewritten {
                    before_bytes,
                    after_bytes,
                } => {
                    totals.rewritten += 1;
                    totals.bytes_before += before_bytes;
                    totals.bytes_after += after_bytes;
                }
                FileAction::Deleted { bytes } => {
                    totals.deleted += 1;
                    totals.bytes_before += bytes;
                }
                FileAction::Unchanged { bytes } => {
                    totals.unchanged += 1;
                    totals.bytes_before += bytes;
                    totals.bytes_after += bytes;
                }
                FileAction::Failed { .. } => totals.failed += 1,
            }
        }
        totals
    }

    pub fn bytes_saved(&self) -> u64 {
        self.bytes_before.saturating_sub(self.bytes_after)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub kind: DumpKind,
    pub groups: Vec<Vec<PathBuf>>,
    pub outcomes: Vec<FileOutcome>,
    pub totals: PipelineTotals,
}

/// Result of a whole compaction run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub root: PathBuf,
    pub today: NaiveDate,
    pub dry_run: bool,
    pub pipelines: Vec<PipelineReport>,
}

impl RunReport {
    pub fn pipeline(&self, kind: DumpKind) -> Option<&PipelineReport> {
        self.pipelines.iter().find(|p| p.kind == kind)
    }

    pub fn failed_files(&self) -> usize {
        self.pipelines.iter().map(|p| p.totals.failed).sum()
    }
}

/// Scan and group the dumps of one kind
pub fn plan(config: &Config, kind: DumpKind, today: NaiveDate) -> Result<PipelinePlan> {
    let file_name = config.file_name(kind).to_string();
    let dirs = scanner::scan(&config.backup_root, &file_name)?;
    let groups = group_directories(dirs, today);

    log::info!(
        "{} pipeline: {} groups over {} files",
        kind,
        groups.len(),
        groups.iter().map(Group::len).sum::<usize>()
    );
    for group in &groups {
        log::debug!("{} group: {:?}", kind, group.paths());
    }

    Ok(PipelinePlan {
        kind,
        file_name,
        groups,
    })
}

/// Rewrite every group of a plan, each against its own empty ledger
pub fn execute(
    workspace: &BackupWorkspace,
    config: &Config,
    plan: &PipelinePlan,
    show_progress: bool,
) -> Result<PipelineReport> {
    let mut progress = if show_progress {
        ProgressReporter::new_for_pipeline(plan.kind.label(), plan.file_count() as u64)
    } else {
        ProgressReporter::new_minimal()
    };

    let mut rewriter = GroupRewriter::new(workspace, &plan.file_name).fail_fast(config.fail_fast);
    if plan.kind == DumpKind::Schema {
        rewriter = rewriter.with_reference_file(&config.reference_file);
    }

    let mut outcomes = Vec::with_capacity(plan.file_count());
    for group in &plan.groups {
        let group_outcomes = match plan.kind {
            DumpKind::Schema => rewriter.rewrite(group, SchemaLedger::new(config.schema_output), &progress)?,
            DumpKind::Data => rewriter.rewrite(group, DataLedger::new(), &progress)?,
        };
        outcomes.extend(group_outcomes);
    }

    progress.finish(&format!("{} dumps done", plan.kind));

    let totals = PipelineTotals::from_outcomes(&outcomes);
    Ok(PipelineReport {
        kind: plan.kind,
        groups: plan.group_paths(),
        outcomes,
        totals,
    })
}

/// Run both pipelines, schema first.
///
/// Both trees are scanned before anything is rewritten, so an undated
/// directory aborts the run with every file untouched.
pub fn run(config: &Config, today: NaiveDate, show_progress: bool) -> Result<RunReport> {
    let workspace = BackupWorkspace::new(config.backup_root.clone(), config.dry_run)?;

    let plans = DumpKind::ALL
        .iter()
        .map(|kind| plan(config, *kind, today))
        .collect::<Result<Vec<_>>>()?;

    let mut pipelines = Vec::with_capacity(plans.len());
    for plan in &plans {
        pipelines.push(execute(&workspace, config, plan, show_progress)?);
    }

    Ok(RunReport {
        root: config.backup_root.clone(),
        today,
        dry_run: config.dry_run,
        pipelines,
    })
}
