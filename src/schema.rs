//! Schema dump parsing and statement accumulation
//!
//! A schema dump is a run of statements separated by `;`. Whatever follows
//! the last `;` is the footer, kept verbatim and never compared.

use crate::rewrite::{DumpLedger, Rewrite};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Separator between schema statements
pub const STATEMENT_DELIMITER: &str = ";";

/// A schema dump split into statements and footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDump<'a> {
    pub statements: Vec<&'a str>,
    pub footer: &'a str,
}

impl<'a> SchemaDump<'a> {
    pub fn parse(content: &'a str) -> Self {
        let mut statements: Vec<&str> = content.split(STATEMENT_DELIMITER).collect();
        let footer = statements.pop().unwrap_or_default();
        Self { statements, footer }
    }
}

/// What a rewritten schema file contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaOutput {
    /// Every statement accumulated so far in the group
    #[default]
    Ledger,
    /// Only the statements this file added
    Increment,
}

impl SchemaOutput {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "ledger" => Ok(Self::Ledger),
            "increment" => Ok(Self::Increment),
            _ => Err(format!("Invalid schema output: {}. Use 'ledger' or 'increment'", s)),
        }
    }
}

/// Statements seen so far in one group, in first-seen order, plus the
/// footer of the most recent file.
#[derive(Debug, Clone, Default)]
pub struct SchemaLedger {
    output: SchemaOutput,
    statements: Vec<String>,
    seen: HashSet<String>,
    footer: Option<String>,
}

impl SchemaLedger {
    pub fn new(output: SchemaOutput) -> Self {
        Self {
            output,
            ..Self::default()
        }
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn footer(&self) -> Option<&str> {
        self.footer.as_deref()
    }

    pub fn contains(&self, statement: &str) -> bool {
        self.seen.contains(statement)
    }

    /// All accumulated statements followed by the current footer
    pub fn render(&self) -> String {
        join_with_footer(&self.statements, self.footer.as_deref().unwrap_or_default())
    }
}

impl DumpLedger for SchemaLedger {
    fn absorb(&mut self, content: &str) -> Rewrite {
        let dump = SchemaDump::parse(content);

        // Filtered against earlier files only, repeats inside this file survive
        let fresh: Vec<String> = dump
            .statements
            .iter()
            .filter(|statement| !self.seen.contains(**statement))
            .map(|statement| statement.to_string())
            .collect();

        log::debug!(
            "Schema dump: {} statements, {} new, {} already accumulated",
            dump.statements.len(),
            fresh.len(),
            self.statements.len()
        );

        self.seen.extend(fresh.iter().cloned());
        self.statements.extend(fresh.iter().cloned());
        self.footer = Some(dump.footer.to_string());

        if fresh.is_empty() {
            return Rewrite::Redundant;
        }

        match self.output {
            SchemaOutput::Ledger => Rewrite::Content(self.render()),
            SchemaOutput::Increment => Rewrite::Content(join_with_footer(&fresh, dump.footer)),
        }
    }
}

fn join_with_footer(statements: &[String], footer: &str) -> String {
    let mut parts: Vec<&str> = statements.iter().map(String::as_str).collect();
    parts.push(footer);
    parts.join(STATEMENT_DELIMITER)
}
