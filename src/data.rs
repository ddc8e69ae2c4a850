//! Data dump parsing and per-key row accumulation
//!
//! A data dump is a sequence of records separated by a `\.` line. Each
//! record is a key line ending in `;` followed by one row per line:
//!
//! ```text
//! COPY public.users (id, name) FROM stdin;
//! 1	alice
//! 2	bob
//! \.
//! ```
//!
//! Text after the last separator is the footer.

use crate::rewrite::{DumpLedger, Rewrite};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Separator between records
pub const RECORD_SENTINEL: &str = "\n\\.\n";

/// Separator between a record's key and its rows
pub const KEY_SENTINEL: &str = ";\n";

/// One key and its rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRecord<'a> {
    pub key: &'a str,
    pub rows: Vec<&'a str>,
}

impl<'a> DataRecord<'a> {
    /// Returns `None` when the key separator is missing
    pub fn parse(raw: &'a str) -> Option<Self> {
        let (key, body) = raw.split_once(KEY_SENTINEL)?;
        Some(Self {
            key,
            rows: body.split('\n').collect(),
        })
    }
}

/// A data dump split into records and footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDump<'a> {
    pub records: Vec<DataRecord<'a>>,
    /// Records without a key separator, ignored
    pub skipped: usize,
    pub footer: &'a str,
}

impl<'a> DataDump<'a> {
    pub fn parse(content: &'a str) -> Self {
        let mut raw: Vec<&str> = content.split(RECORD_SENTINEL).collect();
        let footer = raw.pop().unwrap_or_default();

        let mut records = Vec::with_capacity(raw.len());
        let mut skipped = 0;
        for chunk in raw {
            match DataRecord::parse(chunk) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }

        Self {
            records,
            skipped,
            footer,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct KeyRows {
    rows: Vec<String>,
    seen: HashSet<String>,
}

/// Rows seen so far in one group, per key, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct DataLedger {
    keys: IndexMap<String, KeyRows>,
}

impl DataLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows accumulated for `key`, empty if the key was never seen
    pub fn rows(&self, key: &str) -> &[String] {
        self.keys.get(key).map(|k| k.rows.as_slice()).unwrap_or_default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    pub fn contains(&self, key: &str, row: &str) -> bool {
        self.keys.get(key).is_some_and(|k| k.seen.contains(row))
    }
}

impl DumpLedger for DataLedger {
    fn absorb(&mut self, content: &str) -> Rewrite {
        let dump = DataDump::parse(content);
        if dump.skipped > 0 {
            log::debug!("Skipped {} data records without a key line", dump.skipped);
        }

        let mut output: Vec<String> = Vec::new();
        for record in &dump.records {
            let fresh: Vec<&str> = match self.keys.get(record.key) {
                Some(known) => record
                    .rows
                    .iter()
                    .copied()
                    .filter(|row| !known.seen.contains(*row))
                    .collect(),
                None => record.rows.clone(),
            };

            if fresh.is_empty() {
                continue;
            }

            let entry = self.keys.entry(record.key.to_string()).or_default();
            for row in &fresh {
                entry.rows.push(row.to_string());
                entry.seen.insert(row.to_string());
            }

            output.push(format!("{}{}{}", record.key, KEY_SENTINEL, fresh.join("\n")));
        }

        log::debug!(
            "Data dump: {} records, {} with new rows, {} keys accumulated",
            dump.records.len(),
            output.len(),
            self.keys.len()
        );

        if output.is_empty() {
            return Rewrite::Redundant;
        }

        output.push(dump.footer.to_string());
        Rewrite::Content(output.join(RECORD_SENTINEL))
    }
}
