use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;

impl Repository {
    /// Create a new branch pointing at the current head commit.
    pub async fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        let current_branch = self.refs().current_branch()?;
        let head_oid = self.refs().head_commit(&current_branch)?;

        self.refs().create(&branch_name, &head_oid)?;

        Ok(())
    }

    /// Delete a branch pointer; never the active one.
    pub async fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        self.refs().delete(&branch_name)?;

        Ok(())
    }
}
