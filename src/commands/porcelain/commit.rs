use crate::areas::repository::Repository;
use crate::artifacts::errors::KitError;
use crate::artifacts::objects::commit::{timestamp_now, Commit, DEFAULT_AUTHOR};
use std::io::Write;

impl Repository {
    /// Record the staged snapshot as a new commit on the active branch.
    ///
    /// Writing the commit, advancing the branch pointer, and clearing the
    /// index happen in one operation; a dangling unreferenced commit is never
    /// left as the visible head.
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let message = message.trim();
        if message.is_empty() {
            anyhow::bail!(KitError::UserInput(
                "Please enter a commit message.".to_string()
            ));
        }

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        if index.is_empty() {
            anyhow::bail!(KitError::Precondition(
                "No changes added to the commit.".to_string()
            ));
        }

        let current_branch = self.refs().current_branch()?;
        let (parent_oid, parent) = self.head_commit()?;

        let author =
            std::env::var("KIT_AUTHOR_NAME").unwrap_or_else(|_| DEFAULT_AUTHOR.to_string());

        let commit = Commit::build(
            parent_oid,
            parent.snapshot(),
            index.staging(),
            index.removals(),
            author,
            timestamp_now()?,
            message.to_string(),
        );

        let commit_oid = self.database().store(commit.clone())?;
        self.refs().advance(&current_branch, &commit_oid)?;

        // staging state is commit-relative and never carries across a commit
        index.clear();
        index.write_updates()?;

        writeln!(
            self.writer(),
            "[{} {}] {}",
            current_branch,
            commit_oid.to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }
}
