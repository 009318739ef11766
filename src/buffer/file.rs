//! `FileBuffer`: One open document.
//!
//! A file buffer owns its rows, its undo history and its view state
//! (cursor and scroll offsets). Every change to the text goes through
//! [`FileBuffer::apply`], which validates the [`Action`], splices it into
//! the rows and records it, so undo and redo always have an exact inverse.

use super::position::Position;
use super::row::Row;
use super::vector::GrowableVector;
use crate::error::{AllocError, EditError, HistoryError};
use crate::history::{Action, UndoRedoList};
use crate::syntax::{Syntax, SyntaxDb};
use crate::text::number::digit_count;
use crate::text::path::base_name;
use crate::text::search;
use std::sync::Arc;
use std::time::SystemTime;

/// Line terminator used when the buffer is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// The terminator bytes.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }

    /// Detect from the first line break in `text`. Defaults to LF.
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(i) if i > 0 && text.as_bytes()[i - 1] == b'\r' => Self::CrLf,
            _ => Self::Lf,
        }
    }
}

/// File metadata supplied by the I/O layer at load time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileInfo {
    /// Last modification time on disk.
    pub modified: Option<SystemTime>,
    /// Whether the file could not be opened for writing.
    pub read_only: bool,
    /// Size in bytes when loaded.
    pub size: u64,
}

/// Direction for [`FileBuffer::find`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    /// Toward the end of the document.
    Forward,
    /// Toward the start of the document.
    Backward,
}

/// One open document.
#[derive(Debug, Clone)]
pub struct FileBuffer {
    /// Document lines. Never empty.
    rows: GrowableVector<Row>,
    /// Undo/redo history.
    history: UndoRedoList,
    /// Path on disk; `None` for an untitled buffer.
    path: Option<String>,
    /// Number shown as "Untitled-N" while there is no path.
    new_id: u32,
    /// Metadata from the I/O layer.
    info: Option<FileInfo>,
    /// Shared highlight rules.
    syntax: Option<Arc<Syntax>>,
    /// Cursor position.
    cursor: Position,
    /// Preferred display column for vertical motion.
    sx: usize,
    /// First visible row.
    row_offset: usize,
    /// First visible display column.
    col_offset: usize,
    /// Tab stop used by the row render caches.
    tab_size: usize,
    /// Line terminator for saving.
    line_ending: LineEnding,
}

impl FileBuffer {
    fn with_rows(rows: GrowableVector<Row>, path: Option<String>, tab_size: usize) -> Self {
        Self {
            rows,
            history: UndoRedoList::new(),
            path,
            new_id: 0,
            info: None,
            syntax: None,
            cursor: Position::ORIGIN,
            sx: 0,
            row_offset: 0,
            col_offset: 0,
            tab_size: tab_size.max(1),
            line_ending: LineEnding::Lf,
        }
    }

    /// Build a buffer from file contents handed over by the I/O layer.
    ///
    /// Lines are split on `\n` with a trailing `\r` stripped. A final line
    /// break does not produce an extra empty row. The buffer starts clean.
    pub fn from_text(path: Option<String>, text: &str, tab_size: usize) -> Result<Self, AllocError> {
        let mut rows = GrowableVector::new();
        let body = text.strip_suffix('\n').unwrap_or(text);
        if !text.is_empty() {
            for line in body.split('\n') {
                let line = line.strip_suffix('\r').unwrap_or(line);
                rows.push(Row::new(line, tab_size))?;
            }
        }
        if rows.is_empty() {
            rows.push(Row::empty(tab_size))?;
        }
        let mut file = Self::with_rows(rows, path, tab_size);
        file.line_ending = LineEnding::detect(text);
        Ok(file)
    }

    /// Create an empty, never-saved buffer labelled "Untitled-`id`".
    ///
    /// It holds a single empty row and reads dirty until saved.
    pub fn untitled(id: u32, tab_size: usize) -> Result<Self, AllocError> {
        let mut rows = GrowableVector::new();
        rows.push(Row::empty(tab_size))?;
        let mut file = Self::with_rows(rows, None, tab_size);
        file.new_id = id;
        file.history.mark_unsaved();
        Ok(file)
    }

    /// Serialize the rows, each followed by the line terminator.
    pub fn to_text(&self) -> String {
        let ending = self.line_ending.as_str();
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(row.text());
            out.push_str(ending);
        }
        out
    }

    // ----- identity -----

    /// Path on disk, if any.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Set the path (after a save-as). The buffer keeps its dirty state.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = Some(path.into());
    }

    /// Untitled number; 0 for buffers loaded from disk.
    pub const fn new_id(&self) -> u32 {
        self.new_id
    }

    /// Label for tabs and the status line.
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .map_or_else(|| format!("Untitled-{}", self.new_id), |p| base_name(p).to_owned())
    }

    /// File metadata.
    pub const fn info(&self) -> Option<&FileInfo> {
        self.info.as_ref()
    }

    /// Attach file metadata.
    pub fn set_info(&mut self, info: FileInfo) {
        self.info = Some(info);
    }

    /// Line terminator used when saving.
    pub const fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Change the line terminator. Does not touch the history.
    pub const fn set_line_ending(&mut self, ending: LineEnding) {
        self.line_ending = ending;
    }

    /// Syntax rules for this buffer.
    pub const fn syntax(&self) -> Option<&Arc<Syntax>> {
        self.syntax.as_ref()
    }

    /// Set or clear the syntax rules.
    pub fn set_syntax(&mut self, syntax: Option<Arc<Syntax>>) {
        self.syntax = syntax;
    }

    /// Pick syntax rules from `db` based on the path.
    pub fn select_syntax(&mut self, db: &SyntaxDb) {
        self.syntax = self.path.as_deref().and_then(|p| db.select(p));
    }

    // ----- rows -----

    /// Number of rows. Always at least one.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// All rows.
    pub fn rows(&self) -> &[Row] {
        self.rows.as_slice()
    }

    /// Row at `index`.
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Tab stop used for rendering.
    pub const fn tab_size(&self) -> usize {
        self.tab_size
    }

    /// Change the tab stop and rebuild every render cache.
    pub fn set_tab_size(&mut self, tab_size: usize) {
        self.tab_size = tab_size.max(1);
        for row in &mut self.rows {
            row.set_tab_size(self.tab_size);
        }
    }

    /// Width of the line-number gutter, including one column of padding.
    pub fn line_number_width(&self) -> usize {
        digit_count(self.rows.len()) + 1
    }

    // ----- cursor and view -----

    /// Cursor position.
    pub const fn cursor(&self) -> Position {
        self.cursor
    }

    /// Move the cursor, clamping it into the document.
    ///
    /// Columns past the end snap to the end of the row; columns inside a
    /// multi-byte char snap to its start. The preferred column follows.
    pub fn set_cursor(&mut self, pos: Position) {
        self.cursor = self.clamp(pos);
        self.sx = self.cursor_rx();
    }

    /// Preferred display column kept across vertical motion.
    pub const fn preferred_column(&self) -> usize {
        self.sx
    }

    /// Cursor column in display cells.
    pub fn cursor_rx(&self) -> usize {
        self.rows
            .get(self.cursor.row)
            .map_or(0, |row| row.cx_to_rx(self.cursor.col))
    }

    /// First visible row.
    pub const fn row_offset(&self) -> usize {
        self.row_offset
    }

    /// First visible display column.
    pub const fn col_offset(&self) -> usize {
        self.col_offset
    }

    /// Move the cursor to 1-based `line`, clamped into the document.
    pub fn goto_line(&mut self, line: i64) {
        let last = self.rows.len() - 1;
        let row = usize::try_from(line.saturating_sub(1)).unwrap_or(0).min(last);
        self.set_cursor(Position::new(row, 0));
    }

    /// Adjust the scroll offsets so the cursor is inside a view of
    /// `rows` × `cols` cells.
    pub fn scroll(&mut self, rows: usize, cols: usize) {
        let rx = self.cursor_rx();
        let rows = rows.max(1);
        let cols = cols.max(1);

        if self.cursor.row < self.row_offset {
            self.row_offset = self.cursor.row;
        } else if self.cursor.row >= self.row_offset + rows {
            self.row_offset = self.cursor.row + 1 - rows;
        }
        if rx < self.col_offset {
            self.col_offset = rx;
        } else if rx >= self.col_offset + cols {
            self.col_offset = rx + 1 - cols;
        }
    }

    /// Move the view by `delta` rows (positive scrolls up) and pull the
    /// cursor back inside a view of `rows` lines, keeping its column.
    pub fn scroll_lines(&mut self, delta: i64, rows: usize) {
        let last = self.rows.len() - 1;
        let rows = rows.max(1);
        let offset = i64::try_from(self.row_offset)
            .unwrap_or(i64::MAX)
            .saturating_sub(delta)
            .max(0);
        self.row_offset = usize::try_from(offset).map_or(last, |o| o.min(last));

        let bottom = (self.row_offset + rows - 1).min(last);
        let row = self.cursor.row.clamp(self.row_offset, bottom);
        if row != self.cursor.row {
            let col = self.rows[row].rx_to_cx(self.sx);
            self.cursor = self.clamp(Position::new(row, col));
        }
    }

    fn clamp(&self, pos: Position) -> Position {
        let row = pos.row.min(self.rows.len() - 1);
        let text = self.rows[row].text();
        let mut col = pos.col.min(text.len());
        while !text.is_char_boundary(col) {
            col -= 1;
        }
        Position::new(row, col)
    }

    // ----- editing -----

    /// Whether the buffer differs from its last save.
    pub fn is_dirty(&self) -> bool {
        !self.history.is_clean()
    }

    /// Record that the buffer now matches the file on disk.
    pub fn mark_saved(&mut self) {
        self.history.mark_saved();
        tracing::debug!(file = %self.display_name(), "marked saved");
    }

    /// The undo/redo history.
    pub const fn history(&self) -> &UndoRedoList {
        &self.history
    }

    /// Apply an edit and record it for undo.
    ///
    /// The action is checked against the buffer first: its position must
    /// be valid and `removed` must be exactly the text found there. On
    /// error nothing changes. No-op actions are not recorded.
    pub fn apply(&mut self, action: Action) -> Result<(), EditError> {
        if action.is_noop() {
            return Ok(());
        }
        self.splice(action.at, &action.removed, &action.inserted)?;
        self.set_cursor(action.cursor_after);
        self.history.record(action);
        Ok(())
    }

    /// Revert the last applied action. Returns the restored cursor.
    pub fn undo(&mut self) -> Result<Position, HistoryError> {
        let inverse = self.history.peek_undo().ok_or(HistoryError::AtOldest)?.inverse();
        self.splice(inverse.at, &inverse.removed, &inverse.inserted)?;
        self.history.undo()?;
        self.set_cursor(inverse.cursor_after);
        Ok(self.cursor)
    }

    /// Reapply the next undone action. Returns the new cursor.
    pub fn redo(&mut self) -> Result<Position, HistoryError> {
        let action = self.history.peek_redo().ok_or(HistoryError::AtNewest)?.clone();
        self.splice(action.at, &action.removed, &action.inserted)?;
        self.history.redo()?;
        self.set_cursor(action.cursor_after);
        Ok(self.cursor)
    }

    fn check_position(&self, pos: Position) -> Result<(), EditError> {
        let valid = self
            .rows
            .get(pos.row)
            .is_some_and(|row| row.text().is_char_boundary(pos.col));
        if valid {
            Ok(())
        } else {
            Err(EditError::InvalidPosition {
                row: pos.row,
                col: pos.col,
            })
        }
    }

    /// Text between `start` and `end`, split into lines.
    ///
    /// Both positions must already be valid and ordered.
    fn text_between(&self, start: Position, end: Position) -> Vec<String> {
        if start.row == end.row {
            return vec![self.rows[start.row].text()[start.col..end.col].to_owned()];
        }
        let mut lines = Vec::with_capacity(end.row - start.row + 1);
        lines.push(self.rows[start.row].text()[start.col..].to_owned());
        for row in &self.rows.as_slice()[start.row + 1..end.row] {
            lines.push(row.text().to_owned());
        }
        lines.push(self.rows[end.row].text()[..end.col].to_owned());
        lines
    }

    /// Text between two positions joined with `\n`.
    pub fn text_range(&self, start: Position, end: Position) -> Option<String> {
        if start > end || self.check_position(start).is_err() || self.check_position(end).is_err() {
            return None;
        }
        Some(self.text_between(start, end).join("\n"))
    }

    /// Replace `removed` at `at` with `inserted`.
    fn splice(&mut self, at: Position, removed: &[String], inserted: &[String]) -> Result<(), EditError> {
        self.check_position(at)?;
        let end = at.end_of(removed);
        self.check_position(end)?;
        if self.text_between(at, end) != removed {
            return Err(EditError::Mismatch {
                row: at.row,
                col: at.col,
            });
        }
        self.rows.reserve(inserted.len().saturating_sub(1))?;

        let tail = self.rows[end.row].text()[end.col..].to_owned();
        for _ in at.row..end.row {
            self.rows.remove(at.row + 1);
        }

        let Some(first) = self.rows.get_mut(at.row) else {
            return Err(EditError::InvalidPosition {
                row: at.row,
                col: at.col,
            });
        };
        first.split_off(at.col);
        match inserted {
            [] => first.push_str(&tail),
            [only] => {
                first.push_str(only);
                first.push_str(&tail);
            }
            [head, middle @ .., last] => {
                first.push_str(head);
                let mut row = at.row;
                for line in middle {
                    row += 1;
                    self.rows.insert(row, Row::new(line.as_str(), self.tab_size))?;
                }
                let mut last_line = last.clone();
                last_line.push_str(&tail);
                self.rows.insert(row + 1, Row::new(last_line, self.tab_size))?;
            }
        }
        Ok(())
    }

    // ----- find -----

    /// Find `query` starting at `from`, wrapping around the document.
    ///
    /// Forward search accepts a match starting at `from` itself; backward
    /// search only accepts matches starting before `from`. Returns the
    /// match start, or `None` if the query does not occur (or is empty).
    pub fn find(&self, query: &str, from: Position, direction: SearchDirection, ignore_case: bool) -> Option<Position> {
        if query.is_empty() {
            return None;
        }
        let needle = query.as_bytes();
        let n = self.rows.len();
        let from = self.clamp(from);

        for step in 0..=n {
            let hit = match direction {
                SearchDirection::Forward => {
                    let row = (from.row + step) % n;
                    let hay = self.rows[row].text().as_bytes();
                    let start = if step == 0 { from.col } else { 0 };
                    search::find(hay, needle, start, ignore_case)
                        .filter(|&col| step < n || col < from.col)
                        .map(|col| Position::new(row, col))
                }
                SearchDirection::Backward => {
                    let row = (from.row + n - step % n) % n;
                    let hay = self.rows[row].text().as_bytes();
                    let end = if step == 0 { from.col } else { usize::MAX };
                    search::rfind(hay, needle, end, ignore_case)
                        .filter(|&col| step < n || col >= from.col)
                        .map(|col| Position::new(row, col))
                }
            };
            if hit.is_some() {
                return hit;
            }
        }
        None
    }
}
