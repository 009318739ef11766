//! Render pass: Draw the session into one frame and flush it.
//!
//! A frame is built top to bottom into an [`AppendBuffer`]:
//! 1. Tab strip on the first row
//! 2. Text rows with a line-number gutter
//! 3. Prompt/status line on the last row
//! 4. Cursor placement
//!
//! Nothing reaches the terminal until the whole frame is built, and then it
//! goes out in a single [`AppendBuffer::flush_to`] call.

use crate::buffer::FileBuffer;
use crate::config::ColorScheme;
use crate::error::{AllocError, RenderError};
use crate::session::{EditorMode, EditorSession, TAB_PADDING};
use crate::terminal::{emit_cursor_move, emit_modifiers, emit_sgr, AppendBuffer, Modifiers, Rgb};
use std::io::Write;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// What a frame cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Bytes sent to the terminal.
    pub bytes: usize,
    /// Text rows that showed file content.
    pub text_rows: usize,
}

/// Build a frame for `session` and write it to `writer`.
///
/// The active file's scroll offsets are updated to keep its cursor
/// visible. `out` is cleared first and can be reused across frames.
pub fn render<W: Write>(
    session: &mut EditorSession,
    out: &mut AppendBuffer,
    writer: &mut W,
) -> Result<FrameStats, RenderError> {
    out.clear();
    let text_rows = draw_frame(session, out)?;
    let bytes = out.flush_to(writer)?;
    tracing::trace!(bytes, text_rows, "frame rendered");
    Ok(FrameStats { bytes, text_rows })
}

/// Build a frame for `session` into `out` without flushing it.
///
/// Returns the number of text rows that showed file content.
pub fn draw_frame(session: &mut EditorSession, out: &mut AppendBuffer) -> Result<usize, AllocError> {
    let (cols, _) = session.screen_size();
    let rows = session.text_rows();
    if let Some(file) = session.current_file_mut() {
        let gutter = file.line_number_width();
        file.scroll(rows, cols.saturating_sub(gutter));
    }

    let session = &*session;
    let colors = session.config().colors;
    out.cursor_hide()?;
    out.cursor_home()?;

    draw_tabs(session, &colors, out)?;
    let drawn = draw_rows(session, &colors, out)?;
    draw_prompt_line(session, &colors, out)?;
    out.reset_attrs()?;

    let (row, col) = cursor_screen_position(session);
    emit_cursor_move(out, row, col)?;
    out.cursor_show()?;
    Ok(drawn)
}

fn set_colors(out: &mut AppendBuffer, fg: Rgb, bg: Rgb) -> Result<(), AllocError> {
    emit_sgr(out, fg, false)?;
    emit_sgr(out, bg, true)
}

fn draw_tabs(session: &EditorSession, colors: &ColorScheme, out: &mut AppendBuffer) -> Result<(), AllocError> {
    let (cols, _) = session.screen_size();
    set_colors(out, colors.fg, colors.top_status)?;

    let start = session.tab_offset();
    let end = (start + session.tab_displayed()).min(session.file_count());
    let mut used = 0;
    for index in start..end {
        let Some(file) = session.file(index) else {
            break;
        };
        let width = session.tab_width(index);
        if used + width > cols {
            break;
        }
        let mut modifiers = Modifiers::empty();
        if index == session.file_index() {
            modifiers |= Modifiers::REVERSED;
        }
        if file.is_dirty() {
            modifiers |= Modifiers::BOLD;
        }
        emit_modifiers(out, modifiers)?;
        let pad = " ".repeat(TAB_PADDING / 2);
        out.append_str(&pad)?;
        out.append_str(&file.display_name())?;
        out.append_str(&pad)?;
        if !modifiers.is_empty() {
            out.reset_attrs()?;
            set_colors(out, colors.fg, colors.top_status)?;
        }
        used += width;
    }
    out.clear_line()?;
    out.append(b"\r\n")
}

fn draw_rows(session: &EditorSession, colors: &ColorScheme, out: &mut AppendBuffer) -> Result<usize, AllocError> {
    let (cols, _) = session.screen_size();
    let file = session.current_file();
    let gutter = file.map_or(0, FileBuffer::line_number_width);
    let text_cols = cols.saturating_sub(gutter);
    let highlight = find_highlight(session);
    let mut drawn = 0;

    for y in 0..session.text_rows() {
        let line = file.and_then(|f| {
            let index = f.row_offset() + y;
            f.row(index).map(|row| (f, index, row))
        });
        let Some((file, index, row)) = line else {
            set_colors(out, colors.line_number, colors.bg)?;
            out.append(b"~")?;
            out.clear_line()?;
            out.append(b"\r\n")?;
            continue;
        };

        let bg = if index == file.cursor().row {
            colors.cursor_line
        } else {
            colors.bg
        };
        set_colors(out, colors.line_number, bg)?;
        out.append_str(&format!("{:>width$} ", index + 1, width = gutter - 1))?;
        emit_sgr(out, colors.fg, false)?;

        let visible = slice_columns(row.render(), file.col_offset(), text_cols);
        match highlight.filter(|h| h.row == index) {
            Some(h) => {
                // Split at the match, in columns relative to the visible slice.
                let start = h.start.saturating_sub(file.col_offset());
                let end = h.end.saturating_sub(file.col_offset());
                let before = slice_columns(visible, 0, start);
                let hit = slice_columns(visible, start, end - start);
                let after = slice_columns(visible, end, usize::MAX);
                out.append_str(before)?;
                emit_sgr(out, colors.match_highlight, true)?;
                out.append_str(hit)?;
                emit_sgr(out, bg, true)?;
                out.append_str(after)?;
            }
            None => out.append_str(visible)?,
        }
        out.clear_line()?;
        out.append(b"\r\n")?;
        drawn += 1;
    }
    Ok(drawn)
}

/// Render columns of the current find match.
#[derive(Debug, Clone, Copy)]
struct Highlight {
    row: usize,
    start: usize,
    end: usize,
}

fn find_highlight(session: &EditorSession) -> Option<Highlight> {
    if session.mode() != EditorMode::Find || session.prompt().is_empty() || !session.prompt_right().is_empty() {
        return None;
    }
    let file = session.current_file()?;
    let cursor = file.cursor();
    let row = file.row(cursor.row)?;
    let end_col = (cursor.col + session.prompt().content().len()).min(row.len());
    Some(Highlight {
        row: cursor.row,
        start: row.cx_to_rx(cursor.col),
        end: row.cx_to_rx(end_col),
    })
}

fn status_left(session: &EditorSession) -> String {
    let mode = session.mode();
    if mode.takes_prompt() {
        return format!("{}{}", mode.prompt_label(), session.prompt().content());
    }
    if let Some(message) = session.console().latest() {
        return message.to_owned();
    }
    session.current_file().map_or_else(String::new, |f| {
        let marker = if f.is_dirty() { " [+]" } else { "" };
        format!("{} - {} lines{marker}", f.display_name(), f.num_rows())
    })
}

fn status_right(session: &EditorSession) -> String {
    if !session.prompt_right().is_empty() || session.mode().is_dialog() {
        return session.prompt_right().to_owned();
    }
    session.current_file().map_or_else(String::new, |f| {
        let c = f.cursor();
        format!("{}:{}", c.row + 1, f.cursor_rx() + 1)
    })
}

fn draw_prompt_line(session: &EditorSession, colors: &ColorScheme, out: &mut AppendBuffer) -> Result<(), AllocError> {
    let (cols, _) = session.screen_size();
    set_colors(out, colors.fg, colors.prompt)?;

    let right = status_right(session);
    let right = slice_columns(&right, 0, cols);
    let left = status_left(session);
    let left = slice_columns(&left, 0, cols - right.width());
    out.append_str(left)?;
    let gap = cols - left.width() - right.width();
    out.append_str(&" ".repeat(gap))?;
    out.append_str(right)?;
    out.reset_attrs()
}

/// 1-based terminal position of the visible cursor.
fn cursor_screen_position(session: &EditorSession) -> (usize, usize) {
    let (cols, screen_rows) = session.screen_size();
    let mode = session.mode();
    if mode.takes_prompt() {
        let prompt = session.prompt();
        let typed = &prompt.content()[..prompt.cursor()];
        let col = mode.prompt_label().width() + typed.width() + 1;
        return (screen_rows.max(1), col.min(cols.max(1)));
    }
    let Some(file) = session.current_file() else {
        return (2, 1);
    };
    let cursor = file.cursor();
    let row = cursor.row.saturating_sub(file.row_offset()) + 2;
    let col = file.line_number_width() + file.cursor_rx().saturating_sub(file.col_offset()) + 1;
    (row, col)
}

/// The part of `s` covering display columns `start..start + width`.
///
/// A wide char that would straddle either edge is left out.
fn slice_columns(s: &str, start: usize, width: usize) -> &str {
    let end = start.saturating_add(width);
    let mut col = 0;
    let mut from = s.len();
    let mut to = s.len();
    for (i, c) in s.char_indices() {
        if col >= start && from == s.len() {
            from = i;
        }
        let w = c.width().unwrap_or(0);
        if col + w > end {
            to = i;
            break;
        }
        col += w;
    }
    if from > to {
        return "";
    }
    &s[from..to]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Position;
    use crate::config::EditorConfig;
    use crate::input::{InputEvent, KeyCode, KeyEvent};

    fn session_with(text: &str) -> EditorSession {
        let mut s = EditorSession::new(EditorConfig::default());
        s.finish_loading();
        s.resize(40, 6);
        let file = FileBuffer::from_text(Some("demo.txt".into()), text, 4).unwrap();
        s.add_file(file).unwrap();
        s
    }

    fn frame(s: &mut EditorSession) -> String {
        let mut out = AppendBuffer::new();
        draw_frame(s, &mut out).unwrap();
        String::from_utf8(out.as_bytes().to_vec()).unwrap()
    }

    #[test]
    fn test_slice_columns() {
        assert_eq!(slice_columns("hello", 1, 3), "ell");
        assert_eq!(slice_columns("hello", 3, 10), "lo");
        assert_eq!(slice_columns("hello", 9, 3), "");
        assert_eq!(slice_columns("日本語", 0, 3), "日");
        assert_eq!(slice_columns("日本語", 2, 4), "本語");
        assert_eq!(slice_columns("abc", 0, usize::MAX), "abc");
    }

    #[test]
    fn test_frame_contains_text_and_gutter() {
        let mut s = session_with("first\nsecond");
        let f = frame(&mut s);
        assert!(f.starts_with("\x1b[?25l\x1b[H"));
        assert!(f.contains("demo.txt"));
        assert!(f.contains("1 "));
        assert!(f.contains("first"));
        assert!(f.contains("second"));
        assert!(f.contains('~'));
        assert!(f.ends_with("\x1b[2;3H\x1b[?25h"));
    }

    #[test]
    fn test_frame_scrolls_to_cursor() {
        let text: String = (1..=20).map(|i| format!("line{i}\n")).collect();
        let mut s = session_with(&text);
        s.current_file_mut().unwrap().set_cursor(Position::new(15, 0));
        let f = frame(&mut s);
        assert_eq!(s.current_file().unwrap().row_offset(), 12);
        assert!(f.contains("line16"));
        assert!(!f.contains("line1\x1b"));
    }

    #[test]
    fn test_prompt_line_and_cursor_in_dialog() {
        let mut s = session_with("abc");
        s.enter(EditorMode::GotoLine).unwrap();
        s.handle_event(&InputEvent::Key(KeyEvent::plain(KeyCode::Char('7'))));
        let f = frame(&mut s);
        assert!(f.contains("Go to line: 7"));
        // Label is 12 columns, one typed char, 1-based.
        assert!(f.ends_with("\x1b[6;14H\x1b[?25h"));
    }

    #[test]
    fn test_status_shows_latest_message() {
        let mut s = session_with("abc");
        s.message("hello there");
        assert!(frame(&mut s).contains("hello there"));
    }

    #[test]
    fn test_find_match_highlighted() {
        let mut s = session_with("xx needle yy");
        s.enter(EditorMode::Find).unwrap();
        for c in "needle".chars() {
            s.handle_event(&InputEvent::Key(KeyEvent::plain(KeyCode::Char(c))));
        }
        let hl = s.config().colors.match_highlight;
        let sgr = format!("\x1b[48;2;{};{};{}mneedle", hl.r, hl.g, hl.b);
        assert!(frame(&mut s).contains(&sgr));
    }

    #[test]
    fn test_find_highlight_survives_stepping_back_onto_only_match() {
        let mut s = session_with("xx needle yy");
        s.enter(EditorMode::Find).unwrap();
        for c in "needle".chars() {
            s.handle_event(&InputEvent::Key(KeyEvent::plain(KeyCode::Char(c))));
        }
        s.handle_event(&InputEvent::Key(KeyEvent::plain(KeyCode::Down)));
        s.handle_event(&InputEvent::Key(KeyEvent::plain(KeyCode::Up)));
        let hl = s.config().colors.match_highlight;
        let sgr = format!("\x1b[48;2;{};{};{}mneedle", hl.r, hl.g, hl.b);
        assert!(frame(&mut s).contains(&sgr));
    }

    #[test]
    fn test_tab_strip_draws_active_wide_tab() {
        let mut s = EditorSession::new(EditorConfig::default());
        s.finish_loading();
        s.resize(20, 6);
        for name in ["a", "b", "c", "verylongname12345"] {
            s.add_file(FileBuffer::from_text(Some(name.into()), "", 4).unwrap()).unwrap();
        }
        s.change_to(3);
        let text = frame(&mut s);
        let tabs = text.split("\r\n").next().unwrap();
        assert!(tabs.contains(" verylongname12345 "));
        assert!(!tabs.contains(" a "));
    }

    #[test]
    fn test_render_flushes_whole_frame() {
        let mut s = session_with("abc");
        let mut out = AppendBuffer::new();
        let mut sink = Vec::new();
        let stats = render(&mut s, &mut out, &mut sink).unwrap();
        assert_eq!(stats.bytes, sink.len());
        assert_eq!(stats.text_rows, 1);
        assert_eq!(sink, out.as_bytes());
    }
}
