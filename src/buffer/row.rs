//! Row: One line of document text plus its render cache.

use unicode_width::UnicodeWidthChar;

/// Tab stop used when none is configured.
pub const DEFAULT_TAB_SIZE: usize = 4;

/// A line stored in a file buffer.
///
/// `render` is the display form of `text`: tabs are expanded to the next
/// tab stop and control characters are shown as `^X`. It is rebuilt by
/// every mutating method, so it always matches `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Raw line content, without the line terminator.
    text: String,
    /// Cached display form.
    render: String,
    /// Tab stop used to build `render`.
    tab_size: usize,
}

impl Row {
    /// Create a row from its text.
    pub fn new(text: impl Into<String>, tab_size: usize) -> Self {
        let mut row = Self {
            text: text.into(),
            render: String::new(),
            tab_size: tab_size.max(1),
        };
        row.update();
        row
    }

    /// Create an empty row.
    pub fn empty(tab_size: usize) -> Self {
        Self::new(String::new(), tab_size)
    }

    /// Raw text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Display form.
    #[inline]
    pub fn render(&self) -> &str {
        &self.render
    }

    /// Length of the raw text in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the line is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the text and rebuild the cache.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.update();
    }

    /// Change the tab stop and rebuild the cache.
    pub fn set_tab_size(&mut self, tab_size: usize) {
        self.tab_size = tab_size.max(1);
        self.update();
    }

    /// Split off everything from byte `col` into a new string.
    pub(crate) fn split_off(&mut self, col: usize) -> String {
        let tail = self.text.split_off(col);
        self.update();
        tail
    }

    /// Append text to the end of the line.
    pub(crate) fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
        self.update();
    }

    fn update(&mut self) {
        self.render.clear();
        let mut width = 0;
        for c in self.text.chars() {
            if c == '\t' {
                let stop = self.tab_size - (width % self.tab_size);
                self.render.extend(std::iter::repeat_n(' ', stop));
                width += stop;
            } else if c.is_control() {
                self.render.push('^');
                self.render.push(caret_char(c));
                width += 2;
            } else {
                self.render.push(c);
                width += c.width().unwrap_or(0);
            }
        }
    }

    /// Display width of `c` when it starts at display column `rx`.
    fn char_width(&self, c: char, rx: usize) -> usize {
        if c == '\t' {
            self.tab_size - (rx % self.tab_size)
        } else if c.is_control() {
            2
        } else {
            c.width().unwrap_or(0)
        }
    }

    /// Convert a byte column to a display column.
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let mut rx = 0;
        for (i, c) in self.text.char_indices() {
            if i >= cx {
                break;
            }
            rx += self.char_width(c, rx);
        }
        rx
    }

    /// Convert a display column to the byte column of the char covering it.
    ///
    /// Columns past the end map to the end of the line.
    pub fn rx_to_cx(&self, rx: usize) -> usize {
        let mut cur = 0;
        for (i, c) in self.text.char_indices() {
            cur += self.char_width(c, cur);
            if cur > rx {
                return i;
            }
        }
        self.text.len()
    }

    /// Total display width.
    pub fn display_width(&self) -> usize {
        self.cx_to_rx(self.text.len())
    }
}

/// Caret notation for a control character (`\x01` shows as `^A`).
fn caret_char(c: char) -> char {
    match c {
        '\x7f' => '?',
        c if (c as u32) < 0x20 => char::from_u32(c as u32 + 0x40).unwrap_or('?'),
        _ => '?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_render_tabs() {
        let row = Row::new("\tab\tc", 4);
        assert_eq!(row.render(), "    ab  c");
        assert_eq!(row.display_width(), 9);
    }

    #[test]
    fn test_row_render_control() {
        let row = Row::new("a\x01b", 4);
        assert_eq!(row.render(), "a^Ab");
    }

    #[test]
    fn test_row_cx_rx() {
        let row = Row::new("\tx", 8);
        assert_eq!(row.cx_to_rx(0), 0);
        assert_eq!(row.cx_to_rx(1), 8);
        assert_eq!(row.cx_to_rx(2), 9);
        assert_eq!(row.rx_to_cx(3), 0);
        assert_eq!(row.rx_to_cx(8), 1);
        assert_eq!(row.rx_to_cx(50), 2);
    }

    #[test]
    fn test_row_wide_chars() {
        let row = Row::new("日本", 4);
        assert_eq!(row.cx_to_rx(3), 2);
        assert_eq!(row.display_width(), 4);
        assert_eq!(row.rx_to_cx(3), 3);
    }

    #[test]
    fn test_row_split_and_push() {
        let mut row = Row::new("hello world", 4);
        let tail = row.split_off(5);
        assert_eq!(row.text(), "hello");
        assert_eq!(tail, " world");
        row.push_str("!\t");
        assert_eq!(row.render(), "hello!  ");
    }

    #[test]
    fn test_row_set_tab_size() {
        let mut row = Row::new("\t", 4);
        row.set_tab_size(2);
        assert_eq!(row.render(), "  ");
        row.set_tab_size(0);
        assert_eq!(row.render(), " ");
    }
}
