use crate::areas::repository::Repository;
use crate::artifacts::errors::KitError;
use std::path::PathBuf;

impl Repository {
    /// Un-stage a pending addition and/or stage a tracked file for removal.
    ///
    /// A path that is neither staged nor tracked by the head commit is
    /// nothing to remove. Tracked paths are also deleted from the working
    /// directory unless already absent.
    pub async fn rm(&mut self, path: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let path = PathBuf::from(path);

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let (_, head) = self.head_commit()?;

        let staged = index.is_staged(&path);
        let tracked = head.snapshot().tracks(&path);

        if !staged && !tracked {
            anyhow::bail!(KitError::Precondition(
                "No reason to remove the file.".to_string()
            ));
        }

        if let Some(previous) = index.unstage(&path) {
            self.release_staged_blob(&previous, &index)?;
        }

        if tracked {
            index.mark_removal(path.clone());
            self.workspace().remove_file(&path)?;
        }

        index.write_updates()?;

        Ok(())
    }
}
