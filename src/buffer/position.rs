//! Position: A row/column location inside a document.

/// A location in a document.
///
/// `col` is a byte offset into the row's text and must sit on a UTF-8 char
/// boundary. Positions order row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// Zero-based row index.
    pub row: usize,
    /// Zero-based byte column.
    pub col: usize,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Start of the document.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Position just past `lines` when they are inserted at `self`.
    ///
    /// `lines` is text split on newlines, so `["ab", "c"]` spans one line
    /// break and ends one row down at column 1.
    pub fn end_of(self, lines: &[String]) -> Self {
        match lines {
            [] => self,
            [only] => Self::new(self.row, self.col + only.len()),
            [.., last] => Self::new(self.row + lines.len() - 1, last.len()),
        }
    }
}
