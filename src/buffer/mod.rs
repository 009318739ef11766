//! Buffer module: Document storage.
//!
//! This module contains:
//! - [`GrowableVector`]: Amortized-growth array backing line storage
//! - [`Row`]: One line of text plus its display cache
//! - [`Position`]: A (row, byte column) location
//! - [`FileBuffer`]: One open document with cursor, view and undo history

mod file;
mod position;
mod row;
pub mod vector;

pub use file::{FileBuffer, FileInfo, LineEnding, SearchDirection};
pub use position::Position;
pub use row::{Row, DEFAULT_TAB_SIZE};
pub use vector::GrowableVector;
