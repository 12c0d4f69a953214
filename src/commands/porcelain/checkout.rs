use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::errors::KitError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use std::path::Path;

impl Repository {
    /// Restore a single file from the active head commit.
    ///
    /// The index is not touched: restored content is not re-staged.
    pub async fn checkout_file(&mut self, path: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let (_, head) = self.head_commit()?;
        self.restore_file_from(&head, Path::new(path))
    }

    /// Restore a single file from an arbitrary commit.
    ///
    /// Accepts a full fingerprint or a unique prefix of at least two
    /// characters.
    pub async fn checkout_file_from(&mut self, commit_id: &str, path: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let commit_oid = self.resolve_commit_id(commit_id)?;
        let commit = self.database().parse_object_as_commit(&commit_oid)?;

        self.restore_file_from(&commit, Path::new(path))
    }

    /// Switch to another branch.
    ///
    /// The untracked-conflict pre-flight runs to completion against the
    /// pre-switch state before any file is deleted or written; a detected
    /// conflict aborts with the working directory untouched.
    pub async fn checkout_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        let target_oid = self.refs().read_oid(&branch_name)?.ok_or_else(|| {
            anyhow::Error::new(KitError::Precondition("No such branch exists.".to_string()))
        })?;

        if branch_name == self.refs().current_branch()? {
            anyhow::bail!(KitError::Precondition(
                "No need to checkout the current branch.".to_string()
            ));
        }

        let target = self.database().parse_object_as_commit(&target_oid)?;
        let (_, head) = self.head_commit()?;

        let workspace_files = self.workspace().list_files()?;
        let migration = Migration::plan(&workspace_files, head.snapshot(), target.snapshot())?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        self.workspace()
            .apply_migration(&migration, self.database())?;

        index.clear();
        index.write_updates()?;

        self.refs().set_current_branch(&branch_name)?;

        Ok(())
    }

    fn restore_file_from(&self, commit: &Commit, path: &Path) -> anyhow::Result<()> {
        let blob_oid = commit.snapshot().oid(path).ok_or_else(|| {
            anyhow::Error::new(KitError::Precondition(
                "File does not exist in that commit.".to_string(),
            ))
        })?;

        let blob = self.database().parse_object_as_blob(blob_oid)?;
        self.workspace().write_file(path, blob.data())?;

        Ok(())
    }

    /// Resolve a full or abbreviated commit fingerprint.
    pub(crate) fn resolve_commit_id(&self, commit_id: &str) -> anyhow::Result<ObjectId> {
        let not_found = || {
            anyhow::Error::new(KitError::Precondition(
                "No commit with that id exists.".to_string(),
            ))
        };

        if commit_id.len() == OBJECT_ID_LENGTH {
            let oid = ObjectId::try_parse(commit_id.to_string()).map_err(|_| not_found())?;
            if !self.database().exists(&oid) {
                return Err(not_found());
            }
            // a fingerprint naming a blob is not a commit; undecodable
            // objects surface as corruption instead of "absent"
            return match self.database().parse_object(&oid)? {
                ObjectBox::Commit(_) => Ok(oid),
                ObjectBox::Blob(_) => Err(not_found()),
            };
        }

        let mut candidates = Vec::new();
        for oid in self.database().find_objects_by_prefix(commit_id)? {
            if let ObjectBox::Commit(_) = self.database().parse_object(&oid)? {
                candidates.push(oid);
            }
        }

        // an ambiguous prefix resolves nothing
        match candidates.as_slice() {
            [oid] => Ok(oid.clone()),
            _ => Err(not_found()),
        }
    }
}
