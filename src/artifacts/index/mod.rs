//! Staging index file format
//!
//! The index persists the pending additions and removals layered on top of
//! the current head commit. It is the only mutable persisted state and is
//! identified by its well-known location (`.kit/index`), not a fingerprint.
//!
//! ## File Format
//!
//! ```text
//! Header (16 bytes):
//!   - Signature: "KIT1" (4 bytes)
//!   - Version: 1 (4 bytes, big-endian)
//!   - Staged entry count (4 bytes, big-endian)
//!   - Removal entry count (4 bytes, big-endian)
//!
//! Staged entries:
//!   - Path length (2 bytes, big-endian) + UTF-8 path + 20-byte blob id
//!
//! Removal entries:
//!   - Path length (2 bytes, big-endian) + UTF-8 path
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of the index header in bytes
pub const HEADER_SIZE: usize = 16;

/// Magic signature identifying index files
pub const SIGNATURE: &str = "KIT1";

/// Index file format version
pub const VERSION: u32 = 1;
