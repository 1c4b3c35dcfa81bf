//! Immutable, fully loaded views of the school directory.

use chrono::{DateTime, Utc};

use crate::domain::SchoolRecord;

use super::phonetic::phonetic_key;

/// A school together with its precomputed phonetic key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    school: SchoolRecord,
    phonetic_key: String,
}

impl IndexEntry {
    pub fn new(school: SchoolRecord) -> Self {
        let phonetic_key = phonetic_key(school.name());
        Self {
            school,
            phonetic_key,
        }
    }

    pub fn school(&self) -> &SchoolRecord {
        &self.school
    }

    pub fn phonetic_key(&self) -> &str {
        &self.phonetic_key
    }
}

/// The whole directory as of one load cycle.
///
/// Snapshots are built completely before they are published and are never
/// modified afterwards; a newer load replaces the snapshot as a whole.
#[derive(Debug)]
pub struct Snapshot {
    entries: Vec<IndexEntry>,
    loaded_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(entries: Vec<IndexEntry>, loaded_at: DateTime<Utc>) -> Self {
        Self { entries, loaded_at }
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<SchoolRecord> for Snapshot {
    /// Build a snapshot stamped with the current time.
    fn from_iter<I: IntoIterator<Item = SchoolRecord>>(iter: I) -> Self {
        let entries = iter.into_iter().map(IndexEntry::new).collect();
        Self::new(entries, Utc::now())
    }
}
