//! Failure taxonomy
//!
//! Every user-visible failure falls into one of four categories. The exact
//! diagnostic text is part of the command contract, so commands construct
//! these variants with the full message and `main` prints it verbatim before
//! exiting non-zero.

/// Classified command failure.
///
/// `UserInput` and `Precondition` are detected before any mutation, so the
/// repository state is untouched when they surface. `Conflict` is raised by
/// the checkout pre-flight, also before any destructive step. `Corrupt` is
/// fatal for the current command and is never silently recovered from.
#[derive(Debug, thiserror::Error)]
pub enum KitError {
    /// Missing or malformed operands.
    #[error("{0}")]
    UserInput(String),
    /// A required repository condition does not hold.
    #[error("{0}")]
    Precondition(String),
    /// An untracked working-tree file blocks a checkout.
    #[error("{0}")]
    Conflict(String),
    /// An object resolved by fingerprint but could not be decoded.
    #[error("corrupt object {oid}: {reason}")]
    Corrupt { oid: String, reason: String },
}
