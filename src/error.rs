//! Error types for the editor core.
//!
//! Low-level predicates and searches signal failure with `bool`/`Option`.
//! Everything that can fail in a way the command loop must hear about
//! returns one of the enums below.

use crate::session::EditorMode;
use std::collections::TryReserveError;
use thiserror::Error;

/// Backing storage could not be grown.
///
/// Raised by [`GrowableVector`](crate::buffer::GrowableVector) and
/// [`AppendBuffer`](crate::terminal::AppendBuffer) instead of aborting, so the
/// top-level loop can restore the terminal and decide what to do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("allocation of {requested} elements failed: {source}")]
pub struct AllocError {
    /// Capacity that was requested.
    pub requested: usize,
    /// Underlying reservation failure.
    #[source]
    pub source: TryReserveError,
}

/// Malformed color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Not exactly six hexadecimal digits.
    #[error("invalid color {0:?}: expected exactly 6 hex digits")]
    InvalidFormat(String),
}

/// Undo/redo failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// Nothing left to undo.
    #[error("already at oldest change")]
    AtOldest,
    /// Nothing left to redo.
    #[error("already at newest change")]
    AtNewest,
    /// A recorded action no longer applies to the buffer.
    #[error("history no longer matches buffer: {0}")]
    Diverged(#[from] EditError),
}

/// An edit could not be applied to a file buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The position is outside the document or not on a char boundary.
    #[error("position {row}:{col} is not a valid edit position")]
    InvalidPosition {
        /// Row index.
        row: usize,
        /// Byte column.
        col: usize,
    },
    /// The text the action claims to remove is not what the buffer holds.
    #[error("removed text does not match buffer contents at {row}:{col}")]
    Mismatch {
        /// Row index.
        row: usize,
        /// Byte column.
        col: usize,
    },
    /// Row storage could not grow.
    #[error(transparent)]
    Alloc(#[from] AllocError),
}

/// File-table and mode failures at the session level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The file table is full.
    #[error("too many open files (max {max})")]
    TooManyFiles {
        /// Configured ceiling.
        max: usize,
    },
    /// The requested mode cannot be entered from the current one.
    #[error("cannot enter {to} mode from {from} mode")]
    ModeRejected {
        /// Mode active at the time.
        from: EditorMode,
        /// Mode that was requested.
        to: EditorMode,
    },
    /// Row storage could not grow.
    #[error(transparent)]
    Alloc(#[from] AllocError),
}

/// Configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML syntax or type error, including bad color strings.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value parsed but is out of range.
    #[error("invalid value for `{key}`: {reason}")]
    Invalid {
        /// Offending key.
        key: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Failure while building or flushing a frame.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The frame buffer could not grow.
    #[error(transparent)]
    Alloc(#[from] AllocError),
    /// The terminal write failed.
    #[error("terminal write failed: {0}")]
    Io(#[from] std::io::Error),
}
