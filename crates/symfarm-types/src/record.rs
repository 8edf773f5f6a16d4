//! Scan records and the per-path groups the merge resolver consumes.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::path::FarmPath;

/// One entry observed at `path` inside one source tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRecord {
    /// Location relative to the source tree root (and inside the farm).
    pub path: FarmPath,
    /// The entry's full path in its source tree.
    pub origin: PathBuf,
    /// `true` only for real directories; symbolic links are never directories.
    pub is_dir: bool,
}

impl PathRecord {
    /// Create a new record.
    pub fn new(path: FarmPath, origin: impl Into<PathBuf>, is_dir: bool) -> Self {
        Self {
            path,
            origin: origin.into(),
            is_dir,
        }
    }
}

/// All records sharing one farm path, in the order source trees were supplied.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathGroup {
    records: Vec<PathRecord>,
}

impl PathGroup {
    /// Create an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record contributed by the next source tree.
    pub fn push(&mut self, record: PathRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[PathRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns `true` if any source tree has a directory here.
    pub fn any_dir(&self) -> bool {
        self.records.iter().any(|r| r.is_dir)
    }

    /// Returns `true` if every source tree has a directory here.
    pub fn all_dirs(&self) -> bool {
        self.records.iter().all(|r| r.is_dir)
    }

    /// Origin paths in source order.
    pub fn origins(&self) -> Vec<PathBuf> {
        self.records.iter().map(|r| r.origin.clone()).collect()
    }

    /// Origins of the directory records.
    pub fn directory_origins(&self) -> Vec<PathBuf> {
        self.records
            .iter()
            .filter(|r| r.is_dir)
            .map(|r| r.origin.clone())
            .collect()
    }

    /// Origins of the non-directory records.
    pub fn file_origins(&self) -> Vec<PathBuf> {
        self.records
            .iter()
            .filter(|r| !r.is_dir)
            .map(|r| r.origin.clone())
            .collect()
    }
}

/// Everything the scanner found, keyed by farm path.
///
/// Backed by a `BTreeMap`, so iteration follows [`FarmPath`] ordering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    groups: BTreeMap<FarmPath, PathGroup>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the group for its path.
    pub fn insert(&mut self, record: PathRecord) {
        self.groups
            .entry(record.path.clone())
            .or_default()
            .push(record);
    }

    /// Convenience for building records inline.
    pub fn record(&mut self, path: FarmPath, origin: impl AsRef<Path>, is_dir: bool) {
        self.insert(PathRecord::new(path, origin.as_ref(), is_dir));
    }

    pub fn get(&self, path: &FarmPath) -> Option<&PathGroup> {
        self.groups.get(path)
    }

    /// Number of distinct farm paths.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of records across all groups.
    pub fn record_count(&self) -> usize {
        self.groups.values().map(PathGroup::len).sum()
    }

    pub fn paths(&self) -> impl Iterator<Item = &FarmPath> {
        self.groups.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, FarmPath, PathGroup> {
        self.groups.iter()
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = (&'a FarmPath, &'a PathGroup);
    type IntoIter = btree_map::Iter<'a, FarmPath, PathGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl FromIterator<PathRecord> for Inventory {
    fn from_iter<I: IntoIterator<Item = PathRecord>>(iter: I) -> Self {
        let mut inventory = Self::new();
        for record in iter {
            inventory.insert(record);
        }
        inventory
    }
}

impl Extend<PathRecord> for Inventory {
    fn extend<I: IntoIterator<Item = PathRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}
