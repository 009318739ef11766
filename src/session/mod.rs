//! Session module: Everything the editor knows between two key presses.
//!
//! An [`EditorSession`] owns the open files, the active index and its tab
//! window, the mode stack, the prompt line, the clipboard and the status
//! message ring. It is a plain value passed by `&mut`; there is no global
//! editor state.
//!
//! # Example
//!
//! ```rust
//! use editcore::{EditorConfig, EditorSession, EditorMode};
//!
//! let mut session = EditorSession::new(EditorConfig::default());
//! session.finish_loading();
//! let index = session.new_untitled().unwrap();
//! assert_eq!(session.file_index(), index);
//!
//! session.enter(EditorMode::GotoLine).unwrap();
//! assert_eq!(session.mode(), EditorMode::GotoLine);
//! session.cancel();
//! assert_eq!(session.mode(), EditorMode::Edit);
//! ```

mod clipboard;
mod console;
mod mode;
mod prompt;

pub use clipboard::Clipboard;
pub use console::{ConsoleMessageRing, CONSOLE_CAPACITY, MESSAGE_MAX_BYTES};
pub use mode::{DialogFrame, EditorMode, ModeStack};
pub use prompt::PromptBuffer;

use crate::buffer::{FileBuffer, Position, SearchDirection};
use crate::config::EditorConfig;
use crate::error::SessionError;
use crate::input::{InputEvent, KeyCode, KeyEvent};
use crate::syntax::SyntaxDb;
use crate::text::number::parse_int;
use crate::text::path::{add_default_extension, base_name};
use unicode_width::UnicodeWidthStr;

/// Rows taken by the tab strip and the prompt/status line.
pub const CHROME_ROWS: usize = 2;

/// Columns of padding around each tab label.
pub const TAB_PADDING: usize = 2;

/// Lines moved per mouse wheel notch.
pub const SCROLL_LINES: i64 = 3;

/// What [`EditorSession::handle_event`] did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Not handled here; the caller's key dispatch should see it.
    Ignored,
    /// Handled; nothing for the caller to do.
    Consumed,
    /// A dialog was confirmed with this input.
    Confirmed {
        /// The dialog that closed.
        mode: EditorMode,
        /// The prompt text.
        input: String,
    },
    /// A dialog was cancelled.
    Cancelled(EditorMode),
}

/// State of one editor instance.
#[derive(Debug)]
pub struct EditorSession {
    config: EditorConfig,
    files: Vec<FileBuffer>,
    file_index: usize,
    tab_offset: usize,
    tab_displayed: usize,
    modes: ModeStack,
    prompt: PromptBuffer,
    prompt_right: String,
    clipboard: Clipboard,
    console: ConsoleMessageRing,
    next_untitled: u32,
    screen_cols: usize,
    screen_rows: usize,
    syntax_db: SyntaxDb,
}

impl EditorSession {
    /// Create a session in `Loading` mode with no files.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_syntax_db(config, SyntaxDb::new())
    }

    /// Create a session with a syntax database.
    pub fn with_syntax_db(config: EditorConfig, syntax_db: SyntaxDb) -> Self {
        Self {
            config,
            files: Vec::new(),
            file_index: 0,
            tab_offset: 0,
            tab_displayed: 1,
            modes: ModeStack::new(),
            prompt: PromptBuffer::new(),
            prompt_right: String::new(),
            clipboard: Clipboard::new(),
            console: ConsoleMessageRing::new(),
            next_untitled: 1,
            screen_cols: 80,
            screen_rows: 24,
            syntax_db,
        }
    }

    /// Session settings.
    pub const fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Syntax rule sets.
    pub const fn syntax_db(&self) -> &SyntaxDb {
        &self.syntax_db
    }

    // ----- file table -----

    /// Open files in tab order.
    pub fn files(&self) -> &[FileBuffer] {
        &self.files
    }

    /// Number of open files.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Index of the active file.
    ///
    /// May point past the end after [`remove_file`](Self::remove_file);
    /// callers pick a new file with [`change_to`](Self::change_to).
    pub const fn file_index(&self) -> usize {
        self.file_index
    }

    /// The active file.
    pub fn current_file(&self) -> Option<&FileBuffer> {
        self.files.get(self.file_index)
    }

    /// The active file, mutably.
    pub fn current_file_mut(&mut self) -> Option<&mut FileBuffer> {
        self.files.get_mut(self.file_index)
    }

    /// File at `index`.
    pub fn file(&self, index: usize) -> Option<&FileBuffer> {
        self.files.get(index)
    }

    /// Add a file at the end of the table and return its index.
    ///
    /// A file with a path but no syntax gets one from the database.
    pub fn add_file(&mut self, mut file: FileBuffer) -> Result<usize, SessionError> {
        let max = self.config.max_files;
        if self.files.len() >= max {
            tracing::warn!(max, "file table full");
            return Err(SessionError::TooManyFiles { max });
        }
        if file.syntax().is_none() {
            file.select_syntax(&self.syntax_db);
        }
        tracing::debug!(file = %file.display_name(), index = self.files.len(), "file added");
        self.files.push(file);
        self.fit_tab_window();
        Ok(self.files.len() - 1)
    }

    /// Close the file at `index`; later files shift left.
    ///
    /// The active index is left as is. Out-of-range indices are ignored.
    pub fn remove_file(&mut self, index: usize) -> Option<FileBuffer> {
        if index >= self.files.len() {
            return None;
        }
        let file = self.files.remove(index);
        tracing::debug!(file = %file.display_name(), index, "file removed");
        self.fit_tab_window();
        Some(file)
    }

    /// Make file `index` active and scroll the tab strip to show it.
    ///
    /// Out-of-range indices are ignored.
    pub fn change_to(&mut self, index: usize) {
        if index >= self.files.len() {
            return;
        }
        self.file_index = index;
        self.reveal_tab();
    }

    /// Open a new empty "Untitled-N" buffer and make it active.
    ///
    /// Untitled numbers are never reused within a session, even when the
    /// file table turns out to be full.
    pub fn new_untitled(&mut self) -> Result<usize, SessionError> {
        let id = self.next_untitled;
        self.next_untitled += 1;
        let file = FileBuffer::untitled(id, self.config.tab_size)?;
        let index = self.add_file(file)?;
        self.change_to(index);
        Ok(index)
    }

    // ----- geometry and tabs -----

    /// First tab shown in the tab strip.
    pub const fn tab_offset(&self) -> usize {
        self.tab_offset
    }

    /// Number of tabs that fit in the tab strip.
    pub const fn tab_displayed(&self) -> usize {
        self.tab_displayed
    }

    /// Screen size in (columns, rows).
    pub const fn screen_size(&self) -> (usize, usize) {
        (self.screen_cols, self.screen_rows)
    }

    /// Rows available for file text.
    pub const fn text_rows(&self) -> usize {
        self.screen_rows.saturating_sub(CHROME_ROWS)
    }

    /// Record a new terminal size and refit the tab strip.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.screen_cols = cols;
        self.screen_rows = rows;
        self.fit_tab_window();
    }

    /// Width of the tab for file `index`.
    pub fn tab_width(&self, index: usize) -> usize {
        self.files
            .get(index)
            .map_or(0, |f| f.display_name().width() + TAB_PADDING)
    }

    /// Recompute how many tabs fit, starting from `tab_offset`.
    ///
    /// At least one tab always counts as displayed.
    pub fn fit_tab_window(&mut self) {
        self.tab_offset = self.tab_offset.min(self.files.len().saturating_sub(1));
        self.reveal_tab();
    }

    fn tabs_fitting(&self, offset: usize) -> usize {
        let mut used = 0;
        let mut count = 0;
        for index in offset..self.files.len() {
            used += self.tab_width(index);
            if count > 0 && used > self.screen_cols {
                break;
            }
            count += 1;
        }
        count.max(1)
    }

    /// Move the window so the active tab is drawn, then refit from the new
    /// offset. When scrolling right the active tab ends up last.
    fn reveal_tab(&mut self) {
        let i = self.file_index;
        if i < self.tab_offset {
            self.tab_offset = i;
        } else if i < self.files.len() && i >= self.tab_offset + self.tabs_fitting(self.tab_offset) {
            let mut offset = i;
            let mut used = self.tab_width(i);
            while offset > 0 {
                let width = self.tab_width(offset - 1);
                if used + width > self.screen_cols {
                    break;
                }
                used += width;
                offset -= 1;
            }
            self.tab_offset = offset;
        }
        self.tab_displayed = self.tabs_fitting(self.tab_offset);
    }

    // ----- status -----

    /// Status message history.
    pub const fn console(&self) -> &ConsoleMessageRing {
        &self.console
    }

    /// Show a status message.
    pub fn message(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        tracing::debug!(message = text, "status");
        self.console.push(text);
    }

    /// Text on the right side of the prompt line.
    pub fn prompt_right(&self) -> &str {
        &self.prompt_right
    }

    /// Set the right side of the prompt line.
    pub fn set_prompt_right(&mut self, text: impl Into<String>) {
        self.prompt_right = text.into();
    }

    /// The prompt line being edited.
    pub const fn prompt(&self) -> &PromptBuffer {
        &self.prompt
    }

    /// Copy buffer.
    pub const fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Copy buffer, mutably.
    pub fn clipboard_mut(&mut self) -> &mut Clipboard {
        &mut self.clipboard
    }

    // ----- modes -----

    /// The active mode.
    pub fn mode(&self) -> EditorMode {
        self.modes.current()
    }

    /// The mode stack.
    pub const fn modes(&self) -> &ModeStack {
        &self.modes
    }

    /// Leave `Loading` for `Edit`.
    pub fn finish_loading(&mut self) {
        if self.modes.finish_loading() {
            tracing::debug!("loading finished");
        }
    }

    /// Open a dialog.
    ///
    /// The current prompt text and the active file's cursor are saved in
    /// the dialog frame and the prompt starts empty.
    pub fn enter(&mut self, mode: EditorMode) -> Result<(), SessionError> {
        let frame = DialogFrame {
            mode,
            saved_prompt: self.prompt.content().to_owned(),
            file_index: self.file_index,
            cursor: self.current_file().map(FileBuffer::cursor),
        };
        if let Err(err) = self.modes.push(frame) {
            tracing::warn!(%err, "mode change rejected");
            return Err(err);
        }
        self.prompt.clear();
        self.prompt_right.clear();
        tracing::debug!(%mode, depth = self.modes.depth(), "dialog entered");
        Ok(())
    }

    /// Close the innermost dialog, keeping its effects.
    ///
    /// Returns the dialog and the text that was typed, or `None` if no
    /// dialog is open. `GotoLine` and `SaveAs` apply their effect to the
    /// active file here; other modes leave the input to the caller.
    pub fn confirm(&mut self) -> Option<(EditorMode, String)> {
        let frame = self.modes.pop()?;
        let input = self.prompt.take();
        self.prompt.set_content(&frame.saved_prompt);
        self.prompt_right.clear();

        match frame.mode {
            EditorMode::GotoLine => self.goto_line(&input),
            EditorMode::SaveAs => self.save_as(&input),
            _ => {}
        }
        tracing::debug!(mode = %frame.mode, "dialog confirmed");
        Some((frame.mode, input))
    }

    /// Close the innermost dialog and undo its effects.
    ///
    /// Cancelling `Find` puts the cursor back where it was on entry.
    pub fn cancel(&mut self) -> Option<EditorMode> {
        let frame = self.modes.pop()?;
        self.prompt.set_content(&frame.saved_prompt);
        self.prompt_right.clear();

        if frame.mode == EditorMode::Find {
            if let (Some(cursor), Some(file)) = (frame.cursor, self.files.get_mut(frame.file_index)) {
                file.set_cursor(cursor);
            }
        }
        tracing::debug!(mode = %frame.mode, "dialog cancelled");
        Some(frame.mode)
    }

    fn goto_line(&mut self, input: &str) {
        if input.trim().is_empty() {
            return;
        }
        let Some(line) = parse_int(input) else {
            self.message(format!("not a line number: {input}"));
            return;
        };
        if let Some(file) = self.current_file_mut() {
            file.goto_line(line);
        }
    }

    fn save_as(&mut self, input: &str) {
        let path = input.trim();
        if path.is_empty() {
            return;
        }
        let Some(file) = self.files.get_mut(self.file_index) else {
            return;
        };
        // A bare name inherits the old extension.
        let extension = file
            .path()
            .map(base_name)
            .and_then(|name| name.rfind('.').map(|i| name[i..].to_owned()));
        let path = extension.map_or_else(|| path.to_owned(), |ext| add_default_extension(path, &ext));
        file.set_path(path);
        file.select_syntax(&self.syntax_db);
        tracing::debug!(file = %file.display_name(), "path changed");
    }

    // ----- input -----

    /// Route one input event.
    ///
    /// Resizes are always handled. Wheel events scroll the active file
    /// when `config.mouse` is set. In `Edit` and `Loading` mode keys are
    /// left to the caller. In a dialog, Enter confirms, Esc cancels and
    /// prompt modes edit their line; `Find` searches as the query changes
    /// and Up/Down step through matches.
    pub fn handle_event(&mut self, event: &InputEvent) -> EventOutcome {
        if let InputEvent::Resize { width, height } = *event {
            self.resize(usize::from(width), usize::from(height));
            return EventOutcome::Consumed;
        }
        let mode = self.mode();
        if let InputEvent::Scroll { delta, .. } = *event {
            return self.scroll_wheel(mode, delta);
        }
        if !mode.is_dialog() {
            return EventOutcome::Ignored;
        }

        match event {
            InputEvent::Key(key) => self.handle_dialog_key(mode, key),
            InputEvent::Paste(text) if mode.takes_prompt() => {
                self.prompt.insert_str(text);
                self.prompt_changed(mode);
                EventOutcome::Consumed
            }
            _ => EventOutcome::Ignored,
        }
    }

    fn scroll_wheel(&mut self, mode: EditorMode, delta: i16) -> EventOutcome {
        if !self.config.mouse || mode == EditorMode::Loading {
            return EventOutcome::Ignored;
        }
        let rows = self.text_rows();
        let Some(file) = self.files.get_mut(self.file_index) else {
            return EventOutcome::Ignored;
        };
        file.scroll_lines(i64::from(delta) * SCROLL_LINES, rows);
        EventOutcome::Consumed
    }

    fn handle_dialog_key(&mut self, mode: EditorMode, key: &KeyEvent) -> EventOutcome {
        match key.code {
            KeyCode::Esc => {
                return self
                    .cancel()
                    .map_or(EventOutcome::Ignored, EventOutcome::Cancelled);
            }
            KeyCode::Enter if mode.takes_prompt() => {
                return self
                    .confirm()
                    .map_or(EventOutcome::Ignored, |(mode, input)| EventOutcome::Confirmed { mode, input });
            }
            KeyCode::Up if mode == EditorMode::Find => {
                self.find_step(SearchDirection::Backward);
                return EventOutcome::Consumed;
            }
            KeyCode::Down if mode == EditorMode::Find => {
                self.find_step(SearchDirection::Forward);
                return EventOutcome::Consumed;
            }
            _ => {}
        }
        if !mode.takes_prompt() {
            return EventOutcome::Ignored;
        }
        let (consumed, changed) = self.prompt.handle_key(key);
        if changed {
            self.prompt_changed(mode);
        }
        if consumed {
            EventOutcome::Consumed
        } else {
            EventOutcome::Ignored
        }
    }

    fn prompt_changed(&mut self, mode: EditorMode) {
        if mode != EditorMode::Find {
            return;
        }
        let Some(start) = self.modes.top().and_then(|f| f.cursor) else {
            return;
        };
        self.search_from(start, SearchDirection::Forward);
    }

    fn find_step(&mut self, direction: SearchDirection) {
        let Some(file) = self.current_file() else {
            return;
        };
        let cursor = file.cursor();
        let from = match direction {
            SearchDirection::Forward => Position::new(cursor.row, cursor.col + self.prompt.content().len()),
            SearchDirection::Backward => cursor,
        };
        self.search_from(from, direction);
    }

    fn search_from(&mut self, from: Position, direction: SearchDirection) {
        let ignore_case = self.config.find_ignore_case;
        let query = self.prompt.content();
        let Some(file) = self.files.get_mut(self.file_index) else {
            return;
        };
        if query.is_empty() {
            file.set_cursor(from);
            self.prompt_right.clear();
            return;
        }
        match file.find(query, from, direction, ignore_case) {
            Some(pos) => {
                file.set_cursor(pos);
                self.prompt_right.clear();
            }
            None => "no match".clone_into(&mut self.prompt_right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyModifiers;
    use crate::syntax::Syntax;

    fn session() -> EditorSession {
        let mut s = EditorSession::new(EditorConfig::default());
        s.finish_loading();
        s
    }

    fn named(path: &str, text: &str) -> FileBuffer {
        FileBuffer::from_text(Some(path.into()), text, 4).unwrap()
    }

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::plain(code))
    }

    fn type_str(s: &mut EditorSession, text: &str) {
        for c in text.chars() {
            s.handle_event(&key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_add_then_remove_shifts() {
        let mut s = session();
        assert_eq!(s.add_file(named("a.txt", "")).unwrap(), 0);
        assert_eq!(s.add_file(named("b.txt", "")).unwrap(), 1);
        s.remove_file(0);
        assert_eq!(s.file_count(), 1);
        assert_eq!(s.files()[0].path(), Some("b.txt"));
    }

    #[test]
    fn test_remove_out_of_range_ignored() {
        let mut s = session();
        s.add_file(named("a.txt", "")).unwrap();
        assert!(s.remove_file(3).is_none());
        assert_eq!(s.file_count(), 1);
    }

    #[test]
    fn test_remove_keeps_file_index() {
        let mut s = session();
        s.add_file(named("a.txt", "")).unwrap();
        s.add_file(named("b.txt", "")).unwrap();
        s.change_to(1);
        s.remove_file(1);
        assert_eq!(s.file_index(), 1);
        assert!(s.current_file().is_none());
    }

    #[test]
    fn test_file_table_limit() {
        let config = EditorConfig {
            max_files: 2,
            ..EditorConfig::default()
        };
        let mut s = EditorSession::new(config);
        s.new_untitled().unwrap();
        s.new_untitled().unwrap();
        assert_eq!(s.new_untitled(), Err(SessionError::TooManyFiles { max: 2 }));
        assert_eq!(s.file_count(), 2);
    }

    #[test]
    fn test_untitled_ids_never_reused() {
        let mut s = session();
        s.new_untitled().unwrap();
        s.new_untitled().unwrap();
        s.remove_file(1);
        let i = s.new_untitled().unwrap();
        assert_eq!(s.files()[i].display_name(), "Untitled-3");
        assert!(s.files()[i].is_dirty());
        assert_eq!(s.file_index(), i);
    }

    #[test]
    fn test_change_to_out_of_range_ignored() {
        let mut s = session();
        s.add_file(named("a.txt", "")).unwrap();
        s.change_to(5);
        assert_eq!(s.file_index(), 0);
    }

    #[test]
    fn test_tab_window_follows_active_file() {
        let mut s = session();
        for i in 0..10 {
            s.add_file(named(&format!("file{i}.txt"), "")).unwrap();
        }
        // "fileN.txt" is 9 wide plus padding.
        s.resize(33, 24);
        assert_eq!(s.tab_displayed(), 3);

        s.change_to(7);
        assert_eq!(s.tab_offset(), 5);
        assert!(s.tab_offset() <= 7 && 7 < s.tab_offset() + s.tab_displayed());

        s.change_to(2);
        assert_eq!(s.tab_offset(), 2);
    }

    #[test]
    fn test_tab_window_mixed_widths() {
        let mut s = session();
        s.resize(20, 24);
        // Tab widths 3, 3, 3 and 19.
        for name in ["a", "b", "c", "verylongname12345"] {
            s.add_file(named(name, "")).unwrap();
        }
        assert_eq!(s.tab_offset(), 0);
        assert_eq!(s.tab_displayed(), 3);

        s.change_to(3);
        assert_eq!(s.tab_offset(), 3);
        assert_eq!(s.tab_displayed(), 1);

        s.change_to(1);
        assert_eq!(s.tab_offset(), 1);
        assert_eq!(s.tab_displayed(), 2);

        // Widening the screen refits from the current offset.
        s.resize(40, 24);
        assert_eq!(s.tab_offset(), 1);
        assert_eq!(s.tab_displayed(), 3);
    }

    #[test]
    fn test_add_file_selects_syntax() {
        let db: SyntaxDb = [Syntax::new("Rust", [".rs"])].into_iter().collect();
        let mut s = EditorSession::with_syntax_db(EditorConfig::default(), db);
        let i = s.add_file(named("main.rs", "")).unwrap();
        assert_eq!(s.files()[i].syntax().map(|x| x.name()), Some("Rust"));
    }

    #[test]
    fn test_message_goes_to_console() {
        let mut s = session();
        s.message("saved");
        assert_eq!(s.console().latest(), Some("saved"));
    }

    #[test]
    fn test_no_dialog_while_loading() {
        let mut s = EditorSession::new(EditorConfig::default());
        assert!(s.enter(EditorMode::Find).is_err());
        assert_eq!(s.mode(), EditorMode::Loading);
        assert_eq!(s.handle_event(&key(KeyCode::Char('x'))), EventOutcome::Ignored);
    }

    #[test]
    fn test_edit_mode_keys_ignored() {
        let mut s = session();
        assert_eq!(s.handle_event(&key(KeyCode::Char('x'))), EventOutcome::Ignored);
        assert_eq!(
            s.handle_event(&InputEvent::Resize { width: 100, height: 30 }),
            EventOutcome::Consumed
        );
        assert_eq!(s.screen_size(), (100, 30));
        assert_eq!(s.text_rows(), 28);
    }

    #[test]
    fn test_goto_line_confirm() {
        let mut s = session();
        s.add_file(named("a.txt", "1\n2\n3\n4\n5")).unwrap();
        s.enter(EditorMode::GotoLine).unwrap();
        type_str(&mut s, "4");
        let outcome = s.handle_event(&key(KeyCode::Enter));
        assert_eq!(
            outcome,
            EventOutcome::Confirmed {
                mode: EditorMode::GotoLine,
                input: "4".into()
            }
        );
        assert_eq!(s.current_file().unwrap().cursor(), Position::new(3, 0));
        assert_eq!(s.mode(), EditorMode::Edit);
    }

    #[test]
    fn test_goto_line_rejects_garbage() {
        let mut s = session();
        s.add_file(named("a.txt", "1\n2")).unwrap();
        s.enter(EditorMode::GotoLine).unwrap();
        type_str(&mut s, "2x");
        s.confirm();
        assert_eq!(s.current_file().unwrap().cursor(), Position::ORIGIN);
        assert_eq!(s.console().latest(), Some("not a line number: 2x"));
    }

    #[test]
    fn test_find_incremental_and_cancel_restores() {
        let mut s = session();
        s.add_file(named("a.txt", "alpha\nbeta\nGamma gamma")).unwrap();
        s.current_file_mut().unwrap().set_cursor(Position::new(0, 2));

        s.enter(EditorMode::Find).unwrap();
        type_str(&mut s, "gam");
        assert_eq!(s.current_file().unwrap().cursor(), Position::new(2, 0));

        s.handle_event(&key(KeyCode::Down));
        assert_eq!(s.current_file().unwrap().cursor(), Position::new(2, 6));
        s.handle_event(&key(KeyCode::Up));
        assert_eq!(s.current_file().unwrap().cursor(), Position::new(2, 0));

        assert_eq!(
            s.handle_event(&key(KeyCode::Esc)),
            EventOutcome::Cancelled(EditorMode::Find)
        );
        assert_eq!(s.current_file().unwrap().cursor(), Position::new(0, 2));
    }

    #[test]
    fn test_find_steps_onto_only_match_both_ways() {
        let mut s = session();
        s.add_file(named("a.txt", "xx needle yy")).unwrap();
        s.enter(EditorMode::Find).unwrap();
        type_str(&mut s, "needle");
        assert_eq!(s.current_file().unwrap().cursor(), Position::new(0, 3));

        s.handle_event(&key(KeyCode::Down));
        assert_eq!(s.current_file().unwrap().cursor(), Position::new(0, 3));
        assert_eq!(s.prompt_right(), "");

        s.handle_event(&key(KeyCode::Up));
        assert_eq!(s.current_file().unwrap().cursor(), Position::new(0, 3));
        assert_eq!(s.prompt_right(), "");
    }

    #[test]
    fn test_scroll_wheel_needs_mouse() {
        let text: String = (0..40).map(|i| format!("{i}\n")).collect();
        let wheel = |delta| InputEvent::Scroll { x: 0, y: 5, delta };

        let mut s = session();
        s.add_file(named("a.txt", &text)).unwrap();
        assert_eq!(s.handle_event(&wheel(-1)), EventOutcome::Ignored);
        assert_eq!(s.current_file().unwrap().row_offset(), 0);

        let mut config = EditorConfig::default();
        config.mouse = true;
        let mut s = EditorSession::new(config);
        assert_eq!(s.handle_event(&wheel(-1)), EventOutcome::Ignored);
        s.finish_loading();
        s.add_file(named("a.txt", &text)).unwrap();

        assert_eq!(s.handle_event(&wheel(-2)), EventOutcome::Consumed);
        let file = s.current_file().unwrap();
        assert_eq!(file.row_offset(), 2 * 3);
        assert_eq!(file.cursor(), Position::new(6, 0));

        // Wheel still works under an open dialog.
        s.enter(EditorMode::GotoLine).unwrap();
        assert_eq!(s.handle_event(&wheel(1)), EventOutcome::Consumed);
        assert_eq!(s.current_file().unwrap().row_offset(), 3);
    }

    #[test]
    fn test_find_confirm_keeps_match() {
        let mut s = session();
        s.add_file(named("a.txt", "one two")).unwrap();
        s.enter(EditorMode::Find).unwrap();
        type_str(&mut s, "two");
        s.handle_event(&key(KeyCode::Enter));
        assert_eq!(s.current_file().unwrap().cursor(), Position::new(0, 4));
    }

    #[test]
    fn test_find_no_match_reports() {
        let mut s = session();
        s.add_file(named("a.txt", "abc")).unwrap();
        s.enter(EditorMode::Find).unwrap();
        type_str(&mut s, "zz");
        assert_eq!(s.prompt_right(), "no match");
        s.handle_event(&key(KeyCode::Backspace));
        s.handle_event(&key(KeyCode::Backspace));
        assert_eq!(s.prompt_right(), "");
    }

    #[test]
    fn test_save_as_sets_path_and_syntax() {
        let db: SyntaxDb = [Syntax::new("C", [".c"])].into_iter().collect();
        let mut s = EditorSession::with_syntax_db(EditorConfig::default(), db);
        s.finish_loading();
        s.new_untitled().unwrap();
        s.enter(EditorMode::SaveAs).unwrap();
        s.handle_event(&InputEvent::Paste("src/main.c".into()));
        s.confirm();
        let file = s.current_file().unwrap();
        assert_eq!(file.path(), Some("src/main.c"));
        assert_eq!(file.syntax().map(|x| x.name()), Some("C"));
        assert!(file.is_dirty());
    }

    #[test]
    fn test_save_as_keeps_extension() {
        let mut s = session();
        s.add_file(named("notes.md", "")).unwrap();
        s.enter(EditorMode::SaveAs).unwrap();
        type_str(&mut s, "todo");
        s.confirm();
        assert_eq!(s.current_file().unwrap().path(), Some("todo.md"));
    }

    #[test]
    fn test_nested_dialogs_restore_prompt() {
        let mut s = session();
        s.add_file(named("a.txt", "")).unwrap();
        s.enter(EditorMode::OpenFile).unwrap();
        type_str(&mut s, "foo");
        s.enter(EditorMode::Find).unwrap();
        assert!(s.prompt().is_empty());
        s.cancel();
        assert_eq!(s.mode(), EditorMode::OpenFile);
        assert_eq!(s.prompt().content(), "foo");
        assert_eq!(
            s.handle_event(&key(KeyCode::Enter)),
            EventOutcome::Confirmed {
                mode: EditorMode::OpenFile,
                input: "foo".into()
            }
        );
        assert_eq!(s.mode(), EditorMode::Edit);
    }

    #[test]
    fn test_explorer_passes_keys_through() {
        let mut s = session();
        s.enter(EditorMode::Explorer).unwrap();
        assert_eq!(s.handle_event(&key(KeyCode::Enter)), EventOutcome::Ignored);
        assert_eq!(s.handle_event(&key(KeyCode::Char('j'))), EventOutcome::Ignored);
        assert_eq!(
            s.handle_event(&key(KeyCode::Esc)),
            EventOutcome::Cancelled(EditorMode::Explorer)
        );
    }

    #[test]
    fn test_ctrl_keys_not_typed_into_prompt() {
        let mut s = session();
        s.enter(EditorMode::OpenFile).unwrap();
        let ctrl_s = InputEvent::Key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(s.handle_event(&ctrl_s), EventOutcome::Ignored);
        assert!(s.prompt().is_empty());
    }
}
