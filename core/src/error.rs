//! Error type returned by every operation on [`crate::Fs`].
//!
//! Mirrors the taxonomy of POSIX error kinds the core can produce (see the teacher crate's
//! `error_given::APIError` / `error_fs::*` for the one-enum-per-layer shape this is modeled on).
//! This crate has a single layer, so a single enum covers every operation.

use thiserror::Error;

/// Error type for the namespace engine.
///
/// Each variant corresponds to one POSIX error kind from the specification; the payload, where
/// present, names the offending argument or condition for diagnostic purposes. None of these wrap
/// an underlying error (there is no I/O, no (de)serialization, nothing below this layer) so none
/// carry `#[from]`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    /// `ENOENT` — the referenced parent or entry does not exist.
    #[error("no such entry: {0}")]
    NotFound(&'static str),

    /// `ENOTDIR` — an operand expected to be a directory is not.
    #[error("not a directory: {0}")]
    NotADirectory(&'static str),

    /// `EISDIR` — an operand expected to be a regular file is a directory.
    #[error("is a directory: {0}")]
    IsADirectory(&'static str),

    /// `ENOTEMPTY` — the `rmdir` target still has children.
    #[error("directory not empty")]
    NotEmpty,

    /// `ENOSPC` — no free inode slot, or a buffer allocation failed.
    #[error("no space left: {0}")]
    NoSpace(&'static str),

    /// `EINVAL` — category/argument mismatch (hard-linking a directory, an over-length name, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// `EIO` — a corruption invariant was violated (e.g. a circular sibling list).
    #[error("corrupt filesystem state: {0}")]
    Corrupt(&'static str),
}

/// Shorthand `Result` alias used throughout this crate, matching the teacher crate's
/// `error_given::Result<T>` convention.
pub type Result<T> = std::result::Result<T, FsError>;
