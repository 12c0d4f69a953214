use crate::areas::repository::Repository;
use crate::artifacts::errors::KitError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use std::path::PathBuf;

impl Repository {
    /// Stage a working file for addition.
    ///
    /// Staging is decided purely by content-fingerprint equality, never by
    /// timestamps: a file edited and edited back to its committed content
    /// must not appear staged, and un-stages itself if it was.
    pub async fn add(&mut self, path: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let path = PathBuf::from(path);
        if !self.workspace().exists(&path) {
            anyhow::bail!(KitError::UserInput("File does not exist.".to_string()));
        }

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let data = self.workspace().read_file(&path)?;
        let blob = Blob::new(data);
        let blob_oid = blob.object_id()?;

        let (_, head) = self.head_commit()?;

        // adding a file staged for removal cancels the pending removal
        index.unmark_removal(&path);

        if head.snapshot().oid(&path) == Some(&blob_oid) {
            if let Some(previous) = index.unstage(&path) {
                self.release_staged_blob(&previous, &index)?;
            }

            index.write_updates()?;
            return Ok(());
        }

        if let Some(previous) = index.staged_oid(&path).cloned()
            && previous != blob_oid
        {
            index.unstage(&path);
            self.release_staged_blob(&previous, &index)?;
        }

        self.database().store(blob)?;
        index.stage(path, blob_oid);

        index.write_updates()?;

        Ok(())
    }
}
