//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage a file for addition
//! - `rm`: Un-stage a file or stage it for removal
//! - `commit`: Record the staged snapshot
//! - `branch`: Create or delete branch pointers
//! - `checkout`: Restore files or switch branches
//! - `log`: Show commit history
//! - `status`: Show branches and staging state

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod rm;
pub mod status;

use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::history::rev_walk::RevWalk;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Delete a staged blob that lost its last reference.
    ///
    /// The original design deletes eagerly on unstage; that loses shared
    /// content, so the object file is only removed when no other staged path
    /// and no snapshot reachable from any branch still references the
    /// fingerprint. Otherwise the store is left append-only.
    pub(crate) fn release_staged_blob(
        &self,
        oid: &ObjectId,
        index: &Index,
    ) -> anyhow::Result<()> {
        if !self.blob_is_referenced(oid, index)? {
            self.database().delete(oid)?;
        }

        Ok(())
    }

    fn blob_is_referenced(&self, oid: &ObjectId, index: &Index) -> anyhow::Result<bool> {
        if index.references(oid) {
            return Ok(true);
        }

        for branch in self.refs().list_branches()? {
            let Some(head_oid) = self.refs().read_oid(&branch)? else {
                continue;
            };

            for step in RevWalk::new(self.database(), head_oid) {
                let (_, commit) = step?;
                if commit.snapshot().references(oid) {
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }
}
