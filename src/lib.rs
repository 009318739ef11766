//! # Editcore
//!
//! The in-memory runtime core of a terminal multi-document text editor.
//!
//! Editcore holds everything between reading a key and writing a frame:
//! documents, their undo history, the session with its open files and
//! dialog modes, and the frame builder that turns it all into one batch of
//! escape sequences.
//!
//! ## Core Concepts
//!
//! - **File buffers**: rows of text with a render cache, cursor and scroll state
//! - **Undo/redo**: an arena of invertible actions with save-point tracking
//! - **Session**: a bounded file table, a tab window and a mode stack
//! - **Batched output**: each frame is built in an [`AppendBuffer`] and flushed once
//!
//! ## Example
//!
//! ```rust
//! use editcore::{Action, EditorConfig, EditorSession, FileBuffer, Position};
//!
//! let mut session = EditorSession::new(EditorConfig::default());
//! session.finish_loading();
//!
//! let file = FileBuffer::from_text(Some("notes.txt".into()), "hello\n", 4).unwrap();
//! let index = session.add_file(file).unwrap();
//! session.change_to(index);
//!
//! let file = session.current_file_mut().unwrap();
//! file.apply(Action::insert(Position::new(0, 5), " world")).unwrap();
//! assert!(file.is_dirty());
//! file.undo().unwrap();
//! assert!(!file.is_dirty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod config;
pub mod error;
pub mod history;
pub mod input;
pub mod render;
pub mod session;
pub mod syntax;
pub mod terminal;
pub mod text;

// Re-exports for convenience
pub use buffer::{FileBuffer, FileInfo, GrowableVector, LineEnding, Position, Row, SearchDirection};
pub use config::{ColorScheme, EditorConfig};
pub use error::{AllocError, ColorError, ConfigError, EditError, HistoryError, RenderError, SessionError};
pub use history::{Action, ActionId, SavePoint, UndoRedoList};
pub use input::{InputEvent, KeyCode, KeyEvent, KeyModifiers};
pub use render::{draw_frame, render, FrameStats};
pub use session::{ConsoleMessageRing, EditorMode, EditorSession, EventOutcome};
pub use syntax::{Syntax, SyntaxDb};
pub use terminal::{AppendBuffer, Modifiers, Rgb};
