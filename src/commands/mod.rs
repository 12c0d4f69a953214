//! Command implementations
//!
//! Commands are organized into two categories:
//!
//! - `plumbing`: low-level object inspection (cat-file)
//! - `porcelain`: user-facing version-control workflows (init, add, rm,
//!   commit, branch, checkout, log, status)
//!
//! Each command is a method on [`crate::areas::repository::Repository`] that
//! re-reads persisted state, mutates, and re-persists before returning;
//! nothing survives in memory across invocations.

pub mod plumbing;
pub mod porcelain;
