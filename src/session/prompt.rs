//! Prompt buffer: Single-line text entry for dialog modes.

use crate::input::{KeyCode, KeyEvent};

/// Editable single-line text with a byte-offset cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptBuffer {
    /// Current text.
    content: String,
    /// Cursor as a byte offset, always on a char boundary.
    cursor: usize,
}

impl PromptBuffer {
    /// Create an empty prompt.
    pub const fn new() -> Self {
        Self {
            content: String::new(),
            cursor: 0,
        }
    }

    /// Current text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor byte offset.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the text and move the cursor to the end.
    pub fn set_content(&mut self, content: &str) {
        content.clone_into(&mut self.content);
        self.cursor = self.content.len();
    }

    /// Empty the prompt.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Whether the prompt holds no text.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Take the text out, leaving the prompt empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.content)
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert text at the cursor. Line breaks are dropped.
    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars().filter(|c| *c != '\n' && *c != '\r') {
            self.insert_char(c);
        }
    }

    fn prev_boundary(&self) -> usize {
        self.content[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    /// Delete the char before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.content.remove(prev);
            self.cursor = prev;
        }
    }

    /// Delete the char under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.content.len() {
            self.content.remove(self.cursor);
        }
    }

    /// Move one char left.
    pub fn cursor_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    /// Move one char right.
    pub fn cursor_right(&mut self) {
        if let Some(c) = self.content[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Move to the start.
    pub const fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    /// Move to the end.
    pub fn cursor_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Apply a line-editing key. Returns whether the key was consumed and
    /// whether the text changed, in that order.
    pub fn handle_key(&mut self, key: &KeyEvent) -> (bool, bool) {
        if let Some(c) = key.typed_char() {
            self.insert_char(c);
            return (true, true);
        }
        let before = self.content.len();
        match key.code {
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor_left(),
            KeyCode::Right => self.cursor_right(),
            KeyCode::Home => self.cursor_home(),
            KeyCode::End => self.cursor_end(),
            _ => return (false, false),
        }
        (true, self.content.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyModifiers;

    #[test]
    fn test_prompt_insert() {
        let mut p = PromptBuffer::new();
        p.insert_char('H');
        p.insert_char('i');
        assert_eq!(p.content(), "Hi");
        assert_eq!(p.cursor(), 2);
    }

    #[test]
    fn test_prompt_backspace_multibyte() {
        let mut p = PromptBuffer::new();
        p.set_content("añ");
        p.backspace();
        assert_eq!(p.content(), "a");
        assert_eq!(p.cursor(), 1);
    }

    #[test]
    fn test_prompt_cursor_movement() {
        let mut p = PromptBuffer::new();
        p.set_content("Hello");
        p.cursor_left();
        assert_eq!(p.cursor(), 4);
        p.cursor_home();
        assert_eq!(p.cursor(), 0);
        p.cursor_left();
        assert_eq!(p.cursor(), 0);
        p.delete();
        assert_eq!(p.content(), "ello");
        p.cursor_end();
        assert_eq!(p.cursor(), 4);
    }

    #[test]
    fn test_prompt_paste_drops_newlines() {
        let mut p = PromptBuffer::new();
        p.insert_str("a\r\nb");
        assert_eq!(p.content(), "ab");
    }

    #[test]
    fn test_prompt_handle_key() {
        let mut p = PromptBuffer::new();
        assert_eq!(p.handle_key(&KeyEvent::plain(KeyCode::Char('x'))), (true, true));
        assert_eq!(p.handle_key(&KeyEvent::plain(KeyCode::Left)), (true, false));
        assert_eq!(p.handle_key(&KeyEvent::plain(KeyCode::Up)), (false, false));
        let ctrl = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(p.handle_key(&ctrl), (false, false));
        assert_eq!(p.take(), "x");
        assert!(p.is_empty());
    }
}
