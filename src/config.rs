//! Run configuration
//!
//! Settings come from an optional JSON file and are then overridden by
//! command-line flags. Without a `--config` flag the file is looked up as
//! `sqlcompact.json` inside the backup root.

use crate::error::{CompactError, Result};
use crate::schema::SchemaOutput;
use crate::DumpKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the backup root
pub const CONFIG_FILE_NAME: &str = "sqlcompact.json";

/// Backup root used when neither the config nor the CLI names one
pub const DEFAULT_BACKUP_ROOT: &str = "/backup";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backup_root: PathBuf,
    pub schema_file: String,
    pub data_file: String,
    /// Marker written next to every non-baseline schema dump
    pub reference_file: String,
    pub schema_output: SchemaOutput,
    pub fail_fast: bool,
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backup_root: PathBuf::from(DEFAULT_BACKUP_ROOT),
            schema_file: "schema.sql".to_string(),
            data_file: "data.sql".to_string(),
            reference_file: "reference_sql".to_string(),
            schema_output: SchemaOutput::Ledger,
            fail_fast: false,
            dry_run: false,
        }
    }
}

impl Config {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CompactError::config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit `config_path` must exist. Otherwise the file in the backup
    /// root is used when present, else the defaults.
    pub fn resolve(root: Option<&Path>, config_path: Option<&Path>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::load(path)?,
            None => {
                let root = root.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(DEFAULT_BACKUP_ROOT));
                let candidate = root.join(CONFIG_FILE_NAME);
                if candidate.is_file() {
                    Self::load(&candidate)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(root) = root {
            config.backup_root = root.to_path_buf();
        }

        config.validate()?;
        Ok(config)
    }

    /// File name of the dump handled by a pipeline
    pub fn file_name(&self, kind: DumpKind) -> &str {
        match kind {
            DumpKind::Schema => &self.schema_file,
            DumpKind::Data => &self.data_file,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("schema_file", &self.schema_file),
            ("data_file", &self.data_file),
            ("reference_file", &self.reference_file),
        ] {
            if value.is_empty() || value.contains('/') || value.contains('\\') {
                return Err(CompactError::config(format!(
                    "{} must be a plain file name, got '{}'",
                    field, value
                )));
            }
        }

        if self.schema_file == self.data_file {
            return Err(CompactError::config("schema_file and data_file must differ"));
        }
        if self.reference_file == self.schema_file || self.reference_file == self.data_file {
            return Err(CompactError::config("reference_file must not name a dump file"));
        }

        Ok(())
    }
}
