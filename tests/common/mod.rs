//! Common test utilities and helpers

use chrono::NaiveDate;
use sqlcompact::{Config, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Date every test groups against unless it says otherwise.
///
/// Years up to 2028 chain by year, months January to April chain by month.
pub const TODAY: &str = "2030-06-15";

pub fn today() -> NaiveDate {
    NaiveDate::parse_from_str(TODAY, "%Y-%m-%d").unwrap()
}

/// Temporary backup tree with dated dump directories
pub struct BackupFixture {
    pub temp_dir: TempDir,
}

impl BackupFixture {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Get the root path of the backup tree
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of a file inside a dated directory
    pub fn path(&self, day: &str, file: &str) -> PathBuf {
        self.root().join(day).join(file)
    }

    /// Write a dump into `<root>/<day>/<file>`
    pub fn add_dump(&self, day: &str, file: &str, content: &str) -> Result<PathBuf> {
        let dir = self.root().join(day);
        fs::create_dir_all(&dir)?;
        let path = dir.join(file);
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn add_schema(&self, day: &str, content: &str) -> Result<PathBuf> {
        self.add_dump(day, "schema.sql", content)
    }

    pub fn add_data(&self, day: &str, content: &str) -> Result<PathBuf> {
        self.add_dump(day, "data.sql", content)
    }

    /// Content of a file, `None` once deleted
    pub fn read(&self, day: &str, file: &str) -> Option<String> {
        fs::read_to_string(self.path(day, file)).ok()
    }

    pub fn exists(&self, day: &str, file: &str) -> bool {
        self.path(day, file).exists()
    }

    /// Default configuration pointed at this tree
    pub fn config(&self) -> Config {
        Config {
            backup_root: self.root().to_path_buf(),
            ..Config::default()
        }
    }
}

/// Helper for running CLI commands in tests
pub struct CliTestRunner {
    fixture: BackupFixture,
}

impl CliTestRunner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            fixture: BackupFixture::new()?,
        })
    }

    pub fn fixture(&self) -> &BackupFixture {
        &self.fixture
    }

    /// Run a sqlcompact command against the fixture root
    pub fn run_command(&self, args: &[&str]) -> Result<()> {
        use clap::Parser;
        use sqlcompact::cli::Cli;
        use sqlcompact::commands::execute_command;

        let mut cmd_args = vec!["sqlcompact"];
        cmd_args.extend(args);

        let cli = Cli::try_parse_from(cmd_args)
            .map_err(|e| sqlcompact::CompactError::invalid_input(e.to_string()))?;

        let root = cli.root.clone().unwrap_or_else(|| self.fixture.root().to_path_buf());
        execute_command(cli.command, Some(&root), cli.config.as_deref(), cli.verbose)
    }

    /// Run a command and expect it to succeed
    pub fn expect_success(&self, args: &[&str]) {
        self.run_command(args).expect("Command should succeed");
    }

    /// Run a command and expect it to fail
    pub fn expect_failure(&self, args: &[&str]) -> sqlcompact::CompactError {
        self.run_command(args).expect_err("Command should fail")
    }
}

/// Sample dumps shaped like pg_dump output
pub mod sample_dumps {
    pub const SCHEMA_FOOTER: &str = "\n\n-- PostgreSQL database dump complete\n\n";

    pub fn schema(statements: &[&str]) -> String {
        let mut content = statements.join(";");
        content.push(';');
        content.push_str(SCHEMA_FOOTER);
        content
    }

    pub fn data(records: &[(&str, &[&str])]) -> String {
        let mut content = String::new();
        for (key, rows) in records {
            content.push_str(key);
            content.push_str(";\n");
            content.push_str(&rows.join("\n"));
            content.push_str("\n\\.\n");
        }
        content.push_str("\n-- end of data\n");
        content
    }
}
