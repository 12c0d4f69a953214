//! Staging index (pending additions and removals)
//!
//! The index is the one piece of mutable persisted state: a map of paths
//! staged for addition (overriding the head snapshot) and a set of paths
//! staged for removal. Every mutating command follows a strict
//! load-mutate-save cycle within a single invocation; nothing is cached
//! across processes.
//!
//! The on-disk format is described in [`crate::artifacts::index`]; the file
//! carries a SHA-1 trailer that is verified on every load.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::OBJECT_ID_RAW_LENGTH;
use anyhow::Context;
use byteorder::{BigEndian, ByteOrder};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

/// Staging index backed by `.kit/index`.
///
/// Both areas are commit-relative: they are emptied after a successful
/// commit and after a branch checkout.
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.kit/index`)
    path: Box<Path>,
    /// Pending additions: path to staged blob fingerprint
    staging: BTreeMap<PathBuf, ObjectId>,
    /// Pending removals
    removals: BTreeSet<PathBuf>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            staging: BTreeMap::new(),
            removals: BTreeSet::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn staging(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.staging
    }

    pub fn removals(&self) -> &BTreeSet<PathBuf> {
        &self.removals
    }

    pub fn staged_oid(&self, path: &Path) -> Option<&ObjectId> {
        self.staging.get(path)
    }

    pub fn is_staged(&self, path: &Path) -> bool {
        self.staging.contains_key(path)
    }

    pub fn is_marked_for_removal(&self, path: &Path) -> bool {
        self.removals.contains(path)
    }

    /// Whether any staged path references the given blob fingerprint.
    pub fn references(&self, oid: &ObjectId) -> bool {
        self.staging.values().any(|staged| staged == oid)
    }

    /// Both areas empty: nothing to commit.
    pub fn is_empty(&self) -> bool {
        self.staging.is_empty() && self.removals.is_empty()
    }

    pub fn stage(&mut self, path: PathBuf, oid: ObjectId) {
        self.staging.insert(path, oid);
    }

    /// Drop a pending addition, returning the fingerprint it held.
    pub fn unstage(&mut self, path: &Path) -> Option<ObjectId> {
        self.staging.remove(path)
    }

    pub fn mark_removal(&mut self, path: PathBuf) {
        self.removals.insert(path);
    }

    pub fn unmark_removal(&mut self, path: &Path) -> bool {
        self.removals.remove(path)
    }

    pub fn clear(&mut self) {
        self.staging.clear();
        self.removals.clear();
    }

    /// Load the index from disk, verifying the trailing checksum.
    ///
    /// A missing or zero-length file loads as an empty index; the file is
    /// created so later writes can lock it in place.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.clear();

        if !self.path.exists() {
            std::fs::File::create(&self.path)
                .with_context(|| format!("failed to create index file at {:?}", self.path))?;
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(&self.path)?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock);
        let (staged_count, removals_count) = Self::parse_header(&mut reader)?;

        for _ in 0..staged_count {
            let path = Self::parse_path(&mut reader)?;
            let oid_bytes = reader.read(OBJECT_ID_RAW_LENGTH)?;
            let oid = ObjectId::read_binary_from(&mut oid_bytes.as_ref())?;
            self.staging.insert(path, oid);
        }

        for _ in 0..removals_count {
            let path = Self::parse_path(&mut reader)?;
            self.removals.insert(path);
        }

        reader.verify()
    }

    /// Persist the current staging state, replacing the whole file.
    ///
    /// Holds an exclusive lock for the duration of the write.
    pub fn write_updates(&self) -> anyhow::Result<()> {
        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .with_context(|| format!("failed to open index file at {:?}", self.path))?;
        let lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = Checksum::new(lock);

        let mut header = [0u8; HEADER_SIZE];
        header[..4].copy_from_slice(SIGNATURE.as_bytes());
        BigEndian::write_u32(&mut header[4..8], VERSION);
        BigEndian::write_u32(&mut header[8..12], self.staging.len() as u32);
        BigEndian::write_u32(&mut header[12..16], self.removals.len() as u32);
        writer.write(&header)?;

        for (path, oid) in &self.staging {
            Self::write_path(&mut writer, path)?;
            let mut oid_bytes = Vec::with_capacity(OBJECT_ID_RAW_LENGTH);
            oid.write_binary_to(&mut oid_bytes)?;
            writer.write(&oid_bytes)?;
        }

        for path in &self.removals {
            Self::write_path(&mut writer, path)?;
        }

        writer.write_checksum()
    }

    fn parse_header(reader: &mut Checksum) -> anyhow::Result<(u32, u32)> {
        let header = reader.read(HEADER_SIZE)?;

        let signature = &header[..4];
        if signature != SIGNATURE.as_bytes() {
            anyhow::bail!("index file has an invalid signature");
        }

        let version = BigEndian::read_u32(&header[4..8]);
        if version != VERSION {
            anyhow::bail!("index file has an unsupported version: {}", version);
        }

        Ok((
            BigEndian::read_u32(&header[8..12]),
            BigEndian::read_u32(&header[12..16]),
        ))
    }

    fn parse_path(reader: &mut Checksum) -> anyhow::Result<PathBuf> {
        let len = reader.read(2)?;
        let len = u16::from_be_bytes([len[0], len[1]]) as usize;

        let path = reader.read(len)?;
        let path = std::str::from_utf8(&path).context("index entry path is not valid UTF-8")?;

        Ok(PathBuf::from(path))
    }

    fn write_path(writer: &mut Checksum, path: &Path) -> anyhow::Result<()> {
        let path = path
            .to_str()
            .context("index entry path is not valid UTF-8")?;

        writer.write(&(path.len() as u16).to_be_bytes())?;
        writer.write(path.as_bytes())?;

        Ok(())
    }
}
