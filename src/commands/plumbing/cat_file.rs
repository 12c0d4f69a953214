use crate::areas::repository::Repository;
use crate::artifacts::errors::KitError;
use crate::artifacts::objects::object::{Object, ObjectBox};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use std::io::Write;

impl Repository {
    /// Pretty-print the object stored at the given (possibly abbreviated)
    /// fingerprint.
    pub fn cat_file(&mut self, object_id: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let oid = self.resolve_object_id(object_id)?;
        let rendered = match self.database().parse_object(&oid)? {
            ObjectBox::Blob(blob) => blob.display(),
            ObjectBox::Commit(commit) => commit.display(),
        };

        write!(self.writer(), "{}", rendered)?;

        Ok(())
    }

    fn resolve_object_id(&self, object_id: &str) -> anyhow::Result<ObjectId> {
        let not_found = || {
            anyhow::Error::new(KitError::Precondition(
                "No object with that id exists.".to_string(),
            ))
        };

        if object_id.len() == OBJECT_ID_LENGTH {
            let oid = ObjectId::try_parse(object_id.to_string()).map_err(|_| not_found())?;
            if !self.database().exists(&oid) {
                return Err(not_found());
            }
            return Ok(oid);
        }

        let candidates = self.database().find_objects_by_prefix(object_id)?;

        match candidates.as_slice() {
            [oid] => Ok(oid.clone()),
            _ => Err(not_found()),
        }
    }
}
