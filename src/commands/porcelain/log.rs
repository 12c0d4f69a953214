use crate::areas::repository::Repository;
use crate::artifacts::core::PagerWriter;
use crate::artifacts::history::rev_walk::RevWalk;
use crate::artifacts::objects::object_id::ObjectId;
use is_terminal::IsTerminal;
use std::io::Write;

impl Repository {
    /// Show the history of the active branch, newest first.
    ///
    /// The walk is the lazy ancestor chain from the head commit down to the
    /// root. Output is paged when stdout is a terminal and `NO_PAGER` is not
    /// set.
    pub async fn log(&mut self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let (head_oid, _) = self.head_commit()?;

        let use_pager =
            std::io::stdout().is_terminal() && std::env::var_os("NO_PAGER").is_none();

        if use_pager {
            let pager = minus::Pager::new();
            let mut writer = PagerWriter::new(pager.clone());
            self.write_history(&mut writer, head_oid)?;
            minus::page_all(pager)?;
        } else {
            let mut writer = self.writer();
            self.write_history(&mut **writer, head_oid)?;
        }

        Ok(())
    }

    fn write_history(&self, writer: &mut dyn Write, start: ObjectId) -> anyhow::Result<()> {
        for step in RevWalk::new(self.database(), start) {
            let (oid, commit) = step?;

            writeln!(writer, "===")?;
            writeln!(writer, "commit {}", oid)?;
            writeln!(writer, "Date: {}", commit.readable_timestamp())?;
            writeln!(writer, "{}", commit.message())?;
            writeln!(writer)?;
        }

        Ok(())
    }
}
