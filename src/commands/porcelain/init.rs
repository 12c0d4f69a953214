use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::errors::KitError;
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.marker_path().exists() {
            anyhow::bail!(KitError::Precondition(
                "A kit version-control system already exists in the current directory."
                    .to_string()
            ));
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .kit/objects directory")?;

        fs::create_dir_all(self.refs().branches_path())
            .context("Failed to create .kit/refs/branches directory")?;

        // persist an empty staging index
        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;
        index.write_updates()?;

        // the synthetic root commit is created exactly once, here
        let root = Commit::root()?;
        let root_oid = self.database().store(root)?;

        self.refs()
            .create_default(&root_oid)
            .context("Failed to create the default branch")?;
        self.refs()
            .set_current_branch(&BranchName::default_branch())
            .context("Failed to create the initial HEAD reference")?;

        writeln!(
            self.writer(),
            "Initialized empty kit repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
