use crate::areas::database::Database;
use crate::artifacts::checkout::migration::Migration;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".kit", ".", ".."];

/// Working directory access, rooted at the repository root.
///
/// All paths exchanged with callers are relative to the root.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List all working files, relative to the root, marker directory excluded.
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        Ok(WalkDir::new(self.path.as_ref())
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| self.check_if_not_ignored_file_path(entry.path()))
            .collect::<Vec<_>>())
    }

    pub fn exists(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(file_path);

        let content = std::fs::read(&file_path)
            .with_context(|| format!("failed to read file {:?}", file_path))?;

        Ok(Bytes::from(content))
    }

    pub fn write_file(&self, file_path: &Path, data: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(file_path);

        if let Some(parent) = file_path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {:?}", parent))?;
        }

        std::fs::write(&file_path, data)
            .with_context(|| format!("failed to write file {:?}", file_path))?;

        Ok(())
    }

    /// Remove a working file; removing an already-absent path is a no-op.
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let file_path = self.path.join(file_path);

        if file_path.is_file() {
            std::fs::remove_file(&file_path)
                .with_context(|| format!("failed to remove file {:?}", file_path))?;
        }

        Ok(())
    }

    /// Apply a planned branch switch: deletions first, then snapshot writes.
    ///
    /// The conflict pre-flight has already completed when a `Migration`
    /// exists, so every step here is committed to.
    pub fn apply_migration(&self, migration: &Migration, database: &Database) -> anyhow::Result<()> {
        for path in migration.deletes() {
            self.remove_file(path)?;
        }

        for (path, oid) in migration.writes() {
            let blob = database.parse_object_as_blob(oid)?;
            self.write_file(path, blob.data())?;
        }

        Ok(())
    }

    fn is_ignored(path: &Path) -> bool {
        path.components().any(|component| {
            if let std::path::Component::Normal(name) = component {
                let name_str = name.to_string_lossy();
                IGNORED_PATHS.contains(&name_str.as_ref())
            } else {
                false
            }
        })
    }

    fn check_if_not_ignored_file_path(&self, path: &Path) -> Option<PathBuf> {
        if path.is_file() && !Self::is_ignored(path) {
            Some(path.strip_prefix(self.path.as_ref()).ok()?.to_path_buf())
        } else {
            None
        }
    }
}
