//! Ancestor walk over the parent-pointer chain
//!
//! History is a singly-parented chain ending at the root commit, whose parent
//! is the all-zero sentinel. The walk is lazy (commits are parsed one step at
//! a time), finite, and restartable from any fingerprint by constructing a
//! new walker.

use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

/// Lazy iterator over a commit and all of its ancestors, oldest last.
///
/// Yields `(fingerprint, commit)` pairs starting at the given commit and
/// following parent pointers until the root sentinel terminates the chain.
/// A repository holding only the root commit yields exactly one item.
pub struct RevWalk<'d> {
    database: &'d Database,
    next_oid: Option<ObjectId>,
}

impl<'d> RevWalk<'d> {
    pub fn new(database: &'d Database, start: ObjectId) -> Self {
        RevWalk {
            database,
            next_oid: Some(start),
        }
    }
}

impl Iterator for RevWalk<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.next_oid.take()?;

        match self.database.parse_object_as_commit(&oid) {
            Ok(commit) => {
                // the root's parent is the sentinel; stop after yielding it
                if !commit.parent().is_zero() {
                    self.next_oid = Some(commit.parent().clone());
                }
                Some(Ok((oid, commit)))
            }
            Err(err) => Some(Err(err)),
        }
    }
}
