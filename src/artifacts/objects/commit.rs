//! Commit object
//!
//! A commit records one snapshot of the tracked files together with its
//! history metadata. Identity is the SHA-1 fingerprint of the serialized
//! record, so the same (message, author, timestamp, parent, snapshot) tuple
//! always reproduces the same commit id.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! author <name>
//! timestamp <formatted date>
//! track <blob-sha> <path>     (one line per tracked path, sorted)
//!
//! <commit message>
//! ```
//!
//! The chain's root is a synthetic commit with an empty snapshot, the
//! all-zero parent sentinel, and a fixed epoch timestamp; it is built by
//! [`Commit::root`] and never by overlaying staged content.

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::snapshot::Snapshot;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use std::collections::{BTreeMap, BTreeSet};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Author recorded when no author is configured in the environment.
pub const DEFAULT_AUTHOR: &str = "anonymous";

/// Message of the synthetic root commit.
const ROOT_MESSAGE: &str = "initial commit";

/// All commit timestamps are rendered in this fixed offset, west of UTC.
const TIMEZONE_OFFSET_SECS: i32 = 8 * 3600;

const DISPLAY_TIMESTAMP_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";
const PARSE_TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %Y %z";

/// The fixed timezone commit timestamps are formatted in (-08:00).
pub fn fixed_timezone() -> anyhow::Result<FixedOffset> {
    FixedOffset::west_opt(TIMEZONE_OFFSET_SECS).context("invalid commit timezone offset")
}

/// Current wall-clock time in the fixed commit timezone.
pub fn timestamp_now() -> anyhow::Result<DateTime<FixedOffset>> {
    Ok(chrono::Utc::now().with_timezone(&fixed_timezone()?))
}

/// The Unix epoch in the fixed commit timezone; timestamp of the root commit.
pub fn epoch_timestamp() -> anyhow::Result<DateTime<FixedOffset>> {
    let epoch = DateTime::from_timestamp(0, 0).context("invalid epoch timestamp")?;
    Ok(epoch.with_timezone(&fixed_timezone()?))
}

/// Immutable snapshot record forming one link of the history chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Fingerprint of the parent commit, or the all-zero sentinel for the root
    parent: ObjectId,
    /// Author name
    author: String,
    /// Commit timestamp in the fixed repository timezone
    timestamp: DateTime<FixedOffset>,
    /// Full mapping of tracked paths to blob fingerprints
    snapshot: Snapshot,
    /// Commit message
    message: String,
}

impl Commit {
    /// Build the synthetic root commit.
    ///
    /// The root carries an empty snapshot and the reserved parent sentinel;
    /// staged content is never layered onto it.
    pub fn root() -> anyhow::Result<Self> {
        Ok(Commit {
            parent: ObjectId::zero(),
            author: DEFAULT_AUTHOR.to_string(),
            timestamp: epoch_timestamp()?,
            snapshot: Snapshot::empty(),
            message: ROOT_MESSAGE.to_string(),
        })
    }

    /// Build a child commit from its parent's snapshot and the staged state.
    ///
    /// The snapshot is the parent's with `additions` overlaid and `removals`
    /// deleted; nothing is written to storage here.
    pub fn build(
        parent: ObjectId,
        parent_snapshot: &Snapshot,
        additions: &BTreeMap<PathBuf, ObjectId>,
        removals: &BTreeSet<PathBuf>,
        author: String,
        timestamp: DateTime<FixedOffset>,
        message: String,
    ) -> Self {
        Commit {
            parent,
            author,
            timestamp,
            snapshot: parent_snapshot.overlay(additions, removals),
            message,
        }
    }

    pub fn parent(&self) -> &ObjectId {
        &self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_zero()
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the commit message, for short-form display.
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    /// Timestamp in human-readable form, e.g. "Wed Dec 31 16:00:00 1969 -0800".
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format(DISPLAY_TIMESTAMP_FORMAT).to_string()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![];

        object_content.push(format!("parent {}", self.parent.as_ref()));
        object_content.push(format!("author {}", self.author));
        object_content.push(format!("timestamp {}", self.readable_timestamp()));
        for (path, oid) in self.snapshot.iter() {
            object_content.push(format!("track {} {}", oid.as_ref(), path.display()));
        }
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        let object_content = object_content.join("\n");

        let mut content_bytes = Vec::new();
        content_bytes.write_all(object_content.as_bytes())?;

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        let mut lines = content.lines();

        let parent_line = lines
            .next()
            .context("Invalid commit object: missing parent line")?;
        let parent = parent_line
            .strip_prefix("parent ")
            .context("Invalid commit object: invalid parent line")?;
        let parent = ObjectId::try_parse(parent.to_string())?;

        let author_line = lines
            .next()
            .context("Invalid commit object: missing author line")?;
        let author = author_line
            .strip_prefix("author ")
            .context("Invalid commit object: invalid author line")?
            .to_string();

        let timestamp_line = lines
            .next()
            .context("Invalid commit object: missing timestamp line")?;
        let timestamp = timestamp_line
            .strip_prefix("timestamp ")
            .context("Invalid commit object: invalid timestamp line")?;
        let timestamp = DateTime::parse_from_str(timestamp, PARSE_TIMESTAMP_FORMAT)
            .context("Invalid commit object: unparseable timestamp")?;

        // 0+ track lines up to the blank separator; paths may contain spaces,
        // so split after the fixed-width fingerprint
        let mut snapshot = Snapshot::empty();
        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }

            let entry = line
                .strip_prefix("track ")
                .context("Invalid commit object: invalid track line")?;
            if entry.len() < OBJECT_ID_LENGTH + 2 {
                anyhow::bail!("Invalid commit object: truncated track line");
            }
            let (oid, path) = entry.split_at(OBJECT_ID_LENGTH);
            let oid = ObjectId::try_parse(oid.to_string())?;
            snapshot.insert(PathBuf::from(&path[1..]), oid);
        }

        let message = lines.collect::<Vec<&str>>().join("\n");

        Ok(Commit {
            parent,
            author,
            timestamp,
            snapshot,
            message,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = vec![];

        lines.push(format!("parent {}", self.parent.as_ref()));
        lines.push(format!("author {}", self.author));
        lines.push(format!("timestamp {}", self.readable_timestamp()));
        for (path, oid) in self.snapshot.iter() {
            lines.push(format!("track {} {}", oid.as_ref(), path.display()));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}
