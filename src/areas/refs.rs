//! Branch references and HEAD
//!
//! Branches are named mutable pointers to commit fingerprints, one text file
//! per branch under `.kit/refs/branches/`. HEAD is a single text file holding
//! the *name* of the active branch, one level of indirection away from a
//! commit id.
//!
//! Invariants: every branch file holds the fingerprint of a commit that
//! exists in the object store, and exactly one branch is current at any time.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::errors::KitError;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Name of the HEAD file
pub const HEAD_FILE_NAME: &str = "HEAD";

/// Branch and HEAD store rooted at the repository marker directory.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the marker directory (typically `.kit`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_FILE_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn branches_path(&self) -> Box<Path> {
        self.refs_path().join("branches").into_boxed_path()
    }

    fn branch_path(&self, name: &BranchName) -> Box<Path> {
        self.branches_path().join(name.as_ref()).into_boxed_path()
    }

    pub fn branch_exists(&self, name: &BranchName) -> bool {
        self.branch_path(name).is_file()
    }

    /// Name of the currently active branch, read from HEAD.
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;

        BranchName::try_parse(content.trim().to_string())
    }

    pub fn set_current_branch(&self, name: &BranchName) -> anyhow::Result<()> {
        self.update_ref_file(self.head_path(), name.as_ref().to_string())
    }

    /// Bind the default branch at repository initialization.
    pub fn create_default(&self, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(
            self.branch_path(&BranchName::default_branch()),
            oid.as_ref().to_string(),
        )
    }

    /// Create a new branch pointing at the given commit.
    pub fn create(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(name) {
            anyhow::bail!(KitError::Precondition(
                "A branch with that name already exists.".to_string()
            ));
        }

        self.update_ref_file(self.branch_path(name), oid.as_ref().to_string())
    }

    /// Delete a branch pointer; the commits it pointed to are untouched.
    ///
    /// The active branch can never be removed; there must always be a
    /// checked-out branch.
    pub fn delete(&self, name: &BranchName) -> anyhow::Result<()> {
        if !self.branch_exists(name) {
            anyhow::bail!(KitError::Precondition(
                "A branch with that name does not exist.".to_string()
            ));
        }

        if *name == self.current_branch()? {
            anyhow::bail!(KitError::Precondition(
                "Cannot remove the current branch.".to_string()
            ));
        }

        let branch_path = self.branch_path(name);
        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;

        Ok(())
    }

    /// Unconditionally rebind a branch to a new commit.
    pub fn advance(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(self.branch_path(name), oid.as_ref().to_string())
    }

    /// Fingerprint a branch points at, or None when the branch is absent.
    pub fn read_oid(&self, name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(name);
        if !branch_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read branch file at {:?}", branch_path))?;

        Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
    }

    /// Head fingerprint of a branch that must exist.
    pub fn head_commit(&self, name: &BranchName) -> anyhow::Result<ObjectId> {
        self.read_oid(name)?.ok_or_else(|| {
            anyhow::Error::new(KitError::Precondition("No such branch exists.".to_string()))
        })
    }

    /// All branch names, sorted.
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let branches_path = self.branches_path();

        let mut branches = WalkDir::new(&branches_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                if entry.path().is_file() {
                    let relative_path = entry.path().strip_prefix(branches_path.as_ref()).ok()?;
                    BranchName::try_parse(relative_path.to_string_lossy().to_string()).ok()
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        branches.sort();
        Ok(branches)
    }

    fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.clone())
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }
}
