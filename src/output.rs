//! Output formatting utilities

use crate::error::Result;
use crate::pipeline::{PipelinePlan, PipelineReport, RunReport};
use crate::rewrite::FileAction;
use serde_json::json;

/// Pretty printer for sqlcompact output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Print the groups of a pipeline
    pub fn print_plan(plan: &PipelinePlan) {
        println!("🗂️  {} dumps: {} groups, {} files", plan.kind, plan.groups.len(), plan.file_count());
        let groups = plan.group_paths();
        for (i, group) in groups.iter().enumerate() {
            let last_group = i == groups.len() - 1;
            let prefix = if last_group { "└─" } else { "├─" };
            println!("{} Group {} ({} files)", prefix, i + 1, group.len());

            let indent = if last_group { "   " } else { "│  " };
            for (j, path) in group.iter().enumerate() {
                let marker = if j == group.len() - 1 { "└─" } else { "├─" };
                let role = if j == 0 { " [baseline]" } else { "" };
                println!("{}{} {}{}", indent, marker, path.display(), role);
            }
        }
    }

    /// Print a full run report
    pub fn print_run_report(report: &RunReport, verbose: bool) {
        if report.dry_run {
            println!("🔍 Dry run on {} (today {}), nothing was modified", report.root.display(), report.today);
        } else {
            println!("📦 Compacted {} (today {})", report.root.display(), report.today);
        }

        for pipeline in &report.pipelines {
            Self::print_pipeline(pipeline, verbose);
        }

        let failed = report.failed_files();
        if failed > 0 {
            println!();
            println!("❌ {} dump file(s) failed", failed);
        }
    }

    fn print_pipeline(pipeline: &PipelineReport, verbose: bool) {
        let totals = &pipeline.totals;
        println!("{} dumps ({} groups)", pipeline.kind, pipeline.groups.len());
        println!("├─ Rewritten: {}", totals.rewritten);
        println!("├─ Deleted: {}", totals.deleted);
        println!("├─ Unchanged: {}", totals.unchanged);
        if totals.failed > 0 {
            println!("├─ ❌ Failed: {}", totals.failed);
        }
        println!(
            "└─ Size: {} → {} ({} saved)",
            format_bytes(totals.bytes_before),
            format_bytes(totals.bytes_after),
            format_bytes(totals.bytes_saved())
        );

        for outcome in &pipeline.outcomes {
            match &outcome.action {
                FileAction::Failed { error } => {
                    println!("   ❌ {}: {}", outcome.path.display(), error);
                }
                FileAction::Rewritten { before_bytes, after_bytes } if verbose => {
                    println!(
                        "   ✏️  {}: {} → {}",
                        outcome.path.display(),
                        format_bytes(*before_bytes),
                        format_bytes(*after_bytes)
                    );
                }
                FileAction::Deleted { bytes } if verbose => {
                    println!("   🗑️  {}: {} freed", outcome.path.display(), format_bytes(*bytes));
                }
                _ => {}
            }
        }
    }
}

/// JSON formatter for sqlcompact output
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn format_plans(plans: &[PipelinePlan]) -> Result<String> {
        let value = json!({
            "pipelines": plans.iter().map(|plan| json!({
                "kind": plan.kind,
                "file_name": plan.file_name,
                "groups": plan.group_paths(),
            })).collect::<Vec<_>>(),
        });
        Ok(serde_json::to_string_pretty(&value)?)
    }

    pub fn format_run_report(report: &RunReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

/// Format a byte count for humans
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
