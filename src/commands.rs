//! Command implementations for sqlcompact CLI

use crate::cli::Commands;
use crate::config::Config;
use crate::error::{CompactError, Result};
use crate::output::{JsonFormatter, PrettyPrinter};
use crate::pipeline::{self, PipelinePlan};
use crate::schema::SchemaOutput;
use crate::DumpKind;
use chrono::NaiveDate;
use std::path::Path;

/// Execute a command, compacting when none is given
pub fn execute_command(
    command: Option<Commands>,
    root: Option<&Path>,
    config_path: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let mut config = Config::resolve(root, config_path)?;

    match command.unwrap_or_default() {
        Commands::Compact {
            dry_run,
            today,
            fail_fast,
            schema_output,
            json,
            no_progress,
        } => {
            config.dry_run |= dry_run;
            config.fail_fast |= fail_fast;
            if let Some(output) = schema_output {
                config.schema_output = SchemaOutput::parse(&output).map_err(CompactError::invalid_input)?;
            }
            compact_command(&config, resolve_today(today), json, !(no_progress || json), verbose)
        }
        Commands::Plan { today, json } => plan_command(&config, resolve_today(today), json),
    }
}

fn resolve_today(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| chrono::Local::now().date_naive())
}

/// Rewrite both pipelines and report
fn compact_command(
    config: &Config,
    today: NaiveDate,
    json: bool,
    show_progress: bool,
    verbose: bool,
) -> Result<()> {
    log::info!(
        "Compacting {} (today {}, schema output {:?}{})",
        config.backup_root.display(),
        today,
        config.schema_output,
        if config.dry_run { ", dry run" } else { "" }
    );

    let report = pipeline::run(config, today, show_progress)?;

    if json {
        println!("{}", JsonFormatter::format_run_report(&report)?);
    } else {
        PrettyPrinter::print_run_report(&report, verbose);
    }

    match report.failed_files() {
        0 => Ok(()),
        failed => Err(CompactError::FilesFailed { failed }),
    }
}

/// Show grouping for both pipelines
fn plan_command(config: &Config, today: NaiveDate, json: bool) -> Result<()> {
    let plans: Vec<PipelinePlan> = DumpKind::ALL
        .iter()
        .map(|kind| pipeline::plan(config, *kind, today))
        .collect::<Result<_>>()?;

    if json {
        println!("{}", JsonFormatter::format_plans(&plans)?);
    } else {
        println!("📅 Grouping against {}", today);
        for plan in &plans {
            PrettyPrinter::print_plan(plan);
        }
    }

    Ok(())
}
