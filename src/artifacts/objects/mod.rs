//! Stored object types and operations
//!
//! All content is stored as objects identified by SHA-1 fingerprints. There
//! are two types:
//!
//! - **Blob**: the byte content of one file version
//! - **Commit**: a snapshot record (message, author, timestamp, parent
//!   fingerprint, and the full path-to-blob mapping)
//!
//! Both serialize to the container format `<type> <size>\0<content>`; the
//! fingerprint is computed over the serialized container, which makes object
//! identity a pure function of content.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod snapshot;

/// Length of a SHA-1 fingerprint in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 fingerprint in binary format
pub const OBJECT_ID_RAW_LENGTH: usize = 20;
