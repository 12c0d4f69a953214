//! Commit snapshot
//!
//! A snapshot is the full mapping from tracked paths to blob fingerprints
//! embedded in a commit. It is kept in a `BTreeMap` so serialization order is
//! deterministic and commit identity stays reproducible.

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Ordered path-to-fingerprint mapping of one committed tree state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot(BTreeMap<PathBuf, ObjectId>);

impl Snapshot {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn tracks(&self, path: &Path) -> bool {
        self.0.contains_key(path)
    }

    pub fn oid(&self, path: &Path) -> Option<&ObjectId> {
        self.0.get(path)
    }

    /// Whether any tracked path references the given blob fingerprint.
    pub fn references(&self, oid: &ObjectId) -> bool {
        self.0.values().any(|tracked| tracked == oid)
    }

    pub fn insert(&mut self, path: PathBuf, oid: ObjectId) {
        self.0.insert(path, oid);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &ObjectId)> {
        self.0.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Derive the snapshot of a child commit: staged additions override the
    /// parent entries, removal paths are dropped.
    pub fn overlay(
        &self,
        additions: &BTreeMap<PathBuf, ObjectId>,
        removals: &BTreeSet<PathBuf>,
    ) -> Snapshot {
        let mut entries = self.0.clone();

        for (path, oid) in additions {
            entries.insert(path.clone(), oid.clone());
        }
        for path in removals {
            entries.remove(path);
        }

        Snapshot(entries)
    }
}

impl FromIterator<(PathBuf, ObjectId)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (PathBuf, ObjectId)>>(iter: I) -> Self {
        Snapshot(iter.into_iter().collect())
    }
}
