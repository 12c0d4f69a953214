//! Object identifier (SHA-1 fingerprint)
//!
//! Object ids are 40-character hexadecimal strings computed over an object's
//! serialized bytes. They are the sole identity and storage key for blobs and
//! commits.
//!
//! ## Storage
//!
//! Objects are stored in `.kit/objects/<first-2-chars>/<remaining-38-chars>`,
//! splitting the fingerprint so no single directory fans out over the whole
//! object population.

use crate::artifacts::objects::{OBJECT_ID_LENGTH, OBJECT_ID_RAW_LENGTH};
use std::io;
use std::path::PathBuf;

/// The reserved parent fingerprint of the root commit.
pub const ZERO_OID: &str = "0000000000000000000000000000000000000000";

/// Object identifier (SHA-1 fingerprint)
///
/// A 40-character hexadecimal string that uniquely identifies a stored object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object id from a string.
    ///
    /// Fails on anything that is not exactly 40 hexadecimal characters.
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id))
    }

    /// The reserved sentinel marking the parent of the root commit.
    pub fn zero() -> Self {
        Self(ZERO_OID.to_string())
    }

    /// Whether this id is the root-parent sentinel.
    pub fn is_zero(&self) -> bool {
        self.0 == ZERO_OID
    }

    /// Write the object id in binary format (20 bytes).
    ///
    /// Used when serializing index entries.
    pub fn write_binary_to<W: io::Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        // Process a nibble pair at a time
        for i in (0..OBJECT_ID_LENGTH).step_by(2) {
            let byte = u8::from_str_radix(&self.0[i..i + 2], 16)
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "Invalid hex digit"))?;
            writer.write_all(&[byte])?;
        }

        Ok(())
    }

    /// Read an object id from binary format (20 bytes).
    pub fn read_binary_from<R: io::Read + ?Sized>(reader: &mut R) -> anyhow::Result<Self> {
        let mut raw = [0u8; OBJECT_ID_RAW_LENGTH];
        reader.read_exact(&mut raw)?;

        let mut hex40 = String::with_capacity(OBJECT_ID_LENGTH);
        for byte in raw {
            hex40.push_str(&format!("{:02x}", byte));
        }

        Self::try_parse(hex40)
    }

    /// Convert to the file system path used for object storage.
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// Abbreviated form: the first 7 characters of the fingerprint.
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
