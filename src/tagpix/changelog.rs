//! Append-only narrative of renames.
//!
//! Entries are never validated, deduplicated or reordered. The whole log is
//! rewritten to its snapshot on every append.

use crate::error::Result;
use crate::model::file_name;
use crate::store::{open_collection, SnapshotStore};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    TagsAdded,
    TagsRemoved,
    NameReverted,
}

impl ChangeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::TagsAdded => "Added tag(s)",
            ChangeKind::TagsRemoved => "Removed tag(s)",
            ChangeKind::NameReverted => "Name of picture reverted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntry {
    pub kind: ChangeKind,
    pub before: String,
    pub after: String,
    pub timestamp: DateTime<Local>,
}

impl std::fmt::Display for ChangeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} ---> {} {}",
            self.kind.label(),
            self.before,
            self.after,
            self.timestamp.format(TIMESTAMP_FORMAT)
        )
    }
}

pub struct ChangeLog<S: SnapshotStore> {
    store: S,
    location: PathBuf,
    entries: Vec<ChangeEntry>,
}

impl<S: SnapshotStore> ChangeLog<S> {
    pub fn open(mut store: S, location: impl Into<PathBuf>) -> Result<Self> {
        let location = location.into();
        let entries = open_collection(&mut store, &location)?;
        Ok(Self {
            store,
            location,
            entries,
        })
    }

    pub fn entries(&self) -> &[ChangeEntry] {
        &self.entries
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Record a change. `before_path` is the picture's path prior to the change;
    /// only its final component is kept.
    pub fn record(
        &mut self,
        kind: ChangeKind,
        before_path: &Path,
        after_name: &str,
    ) -> Result<&ChangeEntry> {
        self.entries.push(ChangeEntry {
            kind,
            before: file_name(before_path),
            after: after_name.to_string(),
            timestamp: Local::now(),
        });
        self.store.save(&self.location, &self.entries)?;
        Ok(&self.entries[self.entries.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fs::FileStore;
    use crate::store::memory::InMemoryStore;
    use tempfile::TempDir;

    #[test]
    fn record_keeps_only_the_file_name_of_the_old_path() {
        let mut log = ChangeLog::open(InMemoryStore::new(), "log.json").unwrap();
        let entry = log
            .record(ChangeKind::TagsAdded, Path::new("/d/cat.jpg"), "cat @x.jpg")
            .unwrap();

        assert_eq!(entry.before, "cat.jpg");
        assert_eq!(entry.after, "cat @x.jpg");
        assert!(entry
            .to_string()
            .starts_with("Added tag(s): cat.jpg ---> cat @x.jpg "));
    }

    #[test]
    fn labels_match_each_kind() {
        let mut log = ChangeLog::open(InMemoryStore::new(), "log.json").unwrap();
        log.record(ChangeKind::TagsRemoved, Path::new("/d/a @x.jpg"), "a.jpg")
            .unwrap();
        log.record(ChangeKind::NameReverted, Path::new("/d/a.jpg"), "a @x.jpg")
            .unwrap();

        let lines: Vec<String> = log.entries().iter().map(|e| e.to_string()).collect();
        assert!(lines[0].starts_with("Removed tag(s): a @x.jpg ---> a.jpg "));
        assert!(lines[1].starts_with("Name of picture reverted: a.jpg ---> a @x.jpg "));
    }

    #[test]
    fn entries_are_appended_without_deduplication() {
        let mut log = ChangeLog::open(InMemoryStore::new(), "log.json").unwrap();
        for _ in 0..3 {
            log.record(ChangeKind::TagsAdded, Path::new("/d/a.jpg"), "a @x.jpg")
                .unwrap();
        }
        assert_eq!(log.entries().len(), 3);
    }

    #[test]
    fn log_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let location = dir.path().join("log.json");
        {
            let mut log = ChangeLog::open(FileStore::new(), &location).unwrap();
            log.record(ChangeKind::TagsAdded, Path::new("/d/a.jpg"), "a @x.jpg")
                .unwrap();
        }
        let log = ChangeLog::open(FileStore::new(), &location).unwrap();
        assert_eq!(log.entries().len(), 1);
        assert_eq!(log.entries()[0].kind, ChangeKind::TagsAdded);
    }
}
