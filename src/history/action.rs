//! Action: One invertible edit.

use crate::buffer::Position;

/// Split text on `\n` into the line form used by actions.
///
/// The result always has at least one element; `"a\nb"` gives
/// `["a", "b"]` and `"a\n"` gives `["a", ""]`.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_owned).collect()
}

/// A recorded edit: at `at`, `removed` was replaced by `inserted`.
///
/// Applying an action removes `removed` starting at `at` and inserts
/// `inserted` there. The inverse swaps the two, so every action carries
/// enough to be undone without consulting the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Where the edit starts.
    pub at: Position,
    /// Text that was in the document before the edit.
    pub removed: Vec<String>,
    /// Text that is in the document after the edit.
    pub inserted: Vec<String>,
    /// Cursor before the edit.
    pub cursor_before: Position,
    /// Cursor after the edit.
    pub cursor_after: Position,
}

impl Action {
    /// Insert `text` at `at`. The cursor ends after the inserted text.
    pub fn insert(at: Position, text: &str) -> Self {
        let inserted = split_lines(text);
        Self {
            at,
            cursor_after: at.end_of(&inserted),
            removed: vec![String::new()],
            inserted,
            cursor_before: at,
        }
    }

    /// Delete `text`, which must currently start at `at`.
    pub fn delete(at: Position, text: &str) -> Self {
        let removed = split_lines(text);
        Self {
            at,
            cursor_before: at.end_of(&removed),
            removed,
            inserted: vec![String::new()],
            cursor_after: at,
        }
    }

    /// Replace `old` at `at` with `new`.
    pub fn replace(at: Position, old: &str, new: &str) -> Self {
        let removed = split_lines(old);
        let inserted = split_lines(new);
        Self {
            at,
            cursor_before: at,
            cursor_after: at.end_of(&inserted),
            removed,
            inserted,
        }
    }

    /// Override the cursor recorded before the edit.
    #[must_use]
    pub const fn with_cursor_before(mut self, cursor: Position) -> Self {
        self.cursor_before = cursor;
        self
    }

    /// The action that undoes this one.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            at: self.at,
            removed: self.inserted.clone(),
            inserted: self.removed.clone(),
            cursor_before: self.cursor_after,
            cursor_after: self.cursor_before,
        }
    }

    /// Whether the action changes nothing.
    pub fn is_noop(&self) -> bool {
        self.removed == self.inserted
    }
}
