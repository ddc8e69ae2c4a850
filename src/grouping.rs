//! Partitioning of dated backups into incremental windows
//!
//! Old backups that share a year, or share a month number, with the backup
//! placed just before them are chained into one group. Recent backups fail
//! both tests and end up alone in their own group, so they stay full dumps.

use crate::scanner::BackupDirectory;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::path::PathBuf;

/// A contiguous run of backups compacted against its first member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    members: Vec<BackupDirectory>,
}

impl Group {
    fn start(first: BackupDirectory) -> Self {
        Self {
            members: vec![first],
        }
    }

    /// Members in date order, never empty
    pub fn members(&self) -> &[BackupDirectory] {
        &self.members
    }

    /// The full dump every later member is compacted against
    pub fn baseline(&self) -> &BackupDirectory {
        &self.members[0]
    }

    pub fn last(&self) -> &BackupDirectory {
        &self.members[self.members.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.members.iter().map(|m| m.path.clone()).collect()
    }
}

/// Whether `cur` continues the group whose last member is dated `last`.
///
/// The month test compares bare month numbers and ignores the year.
pub fn continues_group(last: NaiveDate, cur: NaiveDate, today: NaiveDate) -> bool {
    let same_old_year = last.year() == cur.year() && cur.year() < today.year() - 1;
    let same_old_month =
        last.month() == cur.month() && (cur.month() as i32) < (today.month() as i32) - 1;
    same_old_year || same_old_month
}

/// Split date-sorted directories into groups, preserving input order
pub fn group_directories(dirs: Vec<BackupDirectory>, today: NaiveDate) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();

    for dir in dirs {
        match groups.last_mut() {
            Some(group) if continues_group(group.last().date, dir.date, today) => {
                group.members.push(dir);
            }
            _ => groups.push(Group::start(dir)),
        }
    }

    groups
}
