use crate::areas::repository::Repository;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Show branches and the current staging state.
    ///
    /// Sections mirror the persisted state exactly: branch pointers (current
    /// one starred), pending additions, pending removals, each sorted by
    /// name.
    pub async fn status(&mut self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let current_branch = self.refs().current_branch()?;
        let branches = self.refs().list_branches()?;

        writeln!(self.writer(), "=== Branches ===")?;
        writeln!(self.writer(), "*{}", current_branch)?;
        for branch in branches.iter().filter(|branch| **branch != current_branch) {
            writeln!(self.writer(), "{}", branch)?;
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Staged Files ===")?;
        for path in index.staging().keys() {
            let path = path.display().to_string();
            writeln!(self.writer(), "{}", path.as_str().green())?;
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Removed Files ===")?;
        for path in index.removals() {
            let path = path.display().to_string();
            writeln!(self.writer(), "{}", path.as_str().red())?;
        }
        writeln!(self.writer())?;

        Ok(())
    }
}
