//! Editor modes and the dialog stack.
//!
//! The session starts in [`EditorMode::Loading`] and switches to
//! [`EditorMode::Edit`] once startup is done. Every other mode is a dialog
//! pushed on top of that base. A dialog frame remembers what it needs to
//! undo its effects on cancel, and popping a frame always lands in the
//! enclosing mode.

use crate::buffer::Position;
use crate::error::SessionError;
use std::fmt;

/// Interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorMode {
    /// Startup; no input is handled.
    Loading,
    /// Normal editing.
    Edit,
    /// File explorer.
    Explorer,
    /// Incremental find.
    Find,
    /// Jump to a line number.
    GotoLine,
    /// Open a file by path.
    OpenFile,
    /// Settings.
    Config,
    /// Save under a new path.
    SaveAs,
}

impl EditorMode {
    /// Whether the mode can be pushed as a dialog.
    pub const fn is_dialog(self) -> bool {
        !matches!(self, Self::Loading | Self::Edit)
    }

    /// Whether the mode reads a line of text from the prompt.
    pub const fn takes_prompt(self) -> bool {
        matches!(self, Self::Find | Self::GotoLine | Self::OpenFile | Self::SaveAs)
    }

    /// Label shown before the prompt text.
    pub const fn prompt_label(self) -> &'static str {
        match self {
            Self::Find => "Find: ",
            Self::GotoLine => "Go to line: ",
            Self::OpenFile => "Open: ",
            Self::SaveAs => "Save as: ",
            Self::Loading | Self::Edit | Self::Explorer | Self::Config => "",
        }
    }

    /// Lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Edit => "edit",
            Self::Explorer => "explorer",
            Self::Find => "find",
            Self::GotoLine => "goto-line",
            Self::OpenFile => "open-file",
            Self::Config => "config",
            Self::SaveAs => "save-as",
        }
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// State captured when a dialog is entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogFrame {
    /// The dialog mode.
    pub mode: EditorMode,
    /// Prompt text of the enclosing mode.
    pub saved_prompt: String,
    /// Active file at entry.
    pub file_index: usize,
    /// Cursor of the active file at entry.
    pub cursor: Option<Position>,
}

/// Base mode plus nested dialogs.
#[derive(Debug, Clone)]
pub struct ModeStack {
    base: EditorMode,
    frames: Vec<DialogFrame>,
}

impl Default for ModeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeStack {
    /// Start in [`EditorMode::Loading`].
    pub const fn new() -> Self {
        Self {
            base: EditorMode::Loading,
            frames: Vec::new(),
        }
    }

    /// The active mode.
    pub fn current(&self) -> EditorMode {
        self.frames.last().map_or(self.base, |f| f.mode)
    }

    /// The innermost dialog, if any.
    pub fn top(&self) -> Option<&DialogFrame> {
        self.frames.last()
    }

    /// Number of open dialogs.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Leave `Loading`. Returns whether anything changed.
    pub fn finish_loading(&mut self) -> bool {
        let changed = self.base == EditorMode::Loading;
        self.base = EditorMode::Edit;
        changed
    }

    /// Open a dialog on top of the current mode.
    pub fn push(&mut self, frame: DialogFrame) -> Result<(), SessionError> {
        let from = self.current();
        if from == EditorMode::Loading || !frame.mode.is_dialog() {
            return Err(SessionError::ModeRejected { from, to: frame.mode });
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Close the innermost dialog.
    pub fn pop(&mut self) -> Option<DialogFrame> {
        self.frames.pop()
    }
}
