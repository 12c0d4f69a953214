use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::errors::KitError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::cell::RefCell;
use std::cell::RefMut;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Name of the repository marker directory.
pub const MARKER_DIR: &str = ".kit";

/// Explicit repository context.
///
/// Every well-known location hangs off the root passed in here; there is no
/// ambient global state, so multiple repository roots can coexist in one
/// process (which the tests rely on).
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<Index>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;

        let marker = path.join(MARKER_DIR);
        let index = Index::new(marker.join("index").into_boxed_path());
        let database = Database::new(marker.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(marker.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn marker_path(&self) -> std::path::PathBuf {
        self.path.join(MARKER_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Guard shared by every command except `init`.
    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if !self.marker_path().is_dir() {
            anyhow::bail!(KitError::Precondition(
                "Not in an initialized kit directory.".to_string()
            ));
        }

        Ok(())
    }

    /// The active branch's head commit, with its fingerprint.
    pub fn head_commit(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let current_branch = self.refs.current_branch()?;
        let head_oid = self.refs.head_commit(&current_branch)?;
        let commit = self.database.parse_object_as_commit(&head_oid)?;

        Ok((head_oid, commit))
    }
}
