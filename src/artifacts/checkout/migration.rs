//! Checkout migration and conflict detection
//!
//! Switching branches materializes the target snapshot into the working
//! directory. The switch is planned in full before anything is touched:
//!
//! 1. Collect working files not tracked by the current head snapshot; any
//!    such file is in the way of the switch and aborts it.
//! 2. Plan deletions for paths tracked by the current head but absent from
//!    the target.
//! 3. Plan writes for every path in the target snapshot.
//!
//! The conflict pass runs to completion against the pre-switch state before
//! any file is deleted or written; a detected conflict leaves the working
//! directory untouched.

use crate::artifacts::errors::KitError;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::snapshot::Snapshot;
use std::path::{Path, PathBuf};

const UNTRACKED_CONFLICT_MESSAGE: &str =
    "There is an untracked file in the way; delete it, or add and commit it first.";

/// Macro for debug logging that is enabled with the debug_checkout feature flag
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(any(feature = "debug_checkout"))]
        {
            eprintln!($($arg)*);
        }
    };
}

/// Planned file system changes for one branch switch.
///
/// Construction performs the untracked-conflict pre-flight; a successfully
/// built migration is safe to apply.
#[derive(Debug)]
pub struct Migration {
    /// Paths tracked by the current head but not by the target
    deletes: Vec<PathBuf>,
    /// Every path of the target snapshot with its blob fingerprint
    writes: Vec<(PathBuf, ObjectId)>,
}

impl Migration {
    /// Plan the switch from `current` to `target`.
    ///
    /// `workspace_files` is the pre-switch working directory listing. Any
    /// working file the current head snapshot does not track is treated as
    /// in the way and fails the whole plan, so uncommitted content can never
    /// be clobbered by the switch.
    pub fn plan(
        workspace_files: &[PathBuf],
        current: &Snapshot,
        target: &Snapshot,
    ) -> anyhow::Result<Self> {
        let conflicts = workspace_files
            .iter()
            .filter(|path| !current.tracks(path))
            .collect::<Vec<_>>();

        if !conflicts.is_empty() {
            debug_log!("checkout blocked by untracked files: {:?}", conflicts);
            anyhow::bail!(KitError::Conflict(UNTRACKED_CONFLICT_MESSAGE.to_string()));
        }

        let deletes = current
            .paths()
            .filter(|path| !target.tracks(path))
            .cloned()
            .collect::<Vec<_>>();

        let writes = target
            .iter()
            .map(|(path, oid)| (path.clone(), oid.clone()))
            .collect::<Vec<_>>();

        debug_log!(
            "checkout plan: {} deletions, {} writes",
            deletes.len(),
            writes.len()
        );

        Ok(Migration { deletes, writes })
    }

    pub fn deletes(&self) -> impl Iterator<Item = &Path> {
        self.deletes.iter().map(PathBuf::as_path)
    }

    pub fn writes(&self) -> impl Iterator<Item = (&Path, &ObjectId)> {
        self.writes.iter().map(|(path, oid)| (path.as_path(), oid))
    }
}
