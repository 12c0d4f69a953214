//! Blob object
//!
//! Blobs store the raw byte content of one file version, without any
//! metadata like filename (paths live in commit snapshots).
//!
//! ## Format
//!
//! On disk: `blob <size>\0<content>`

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

/// Byte content of one file version, identified by its SHA-1 fingerprint.
/// Two files with identical bytes occupy one stored blob regardless of path.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    data: Bytes,
}

impl Blob {
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut blob_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), self.data.len());
        blob_bytes.write_all(header.as_bytes())?;
        blob_bytes.write_all(&self.data)?;

        Ok(Bytes::from(blob_bytes))
    }
}

impl Unpackable for Blob {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        // the container header has already been consumed
        let data = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        Ok(Self::new(Bytes::from(data)))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.data).to_string()
    }
}
