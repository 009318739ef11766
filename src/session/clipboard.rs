//! Clipboard: Session-wide copy buffer.

use crate::text::encode::base64_encode;

/// Lines copied from a file buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
    lines: Vec<String>,
}

impl Clipboard {
    /// Create an empty clipboard.
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Replace the contents with `text`, split on `\n`.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_owned).collect();
    }

    /// Replace the contents with already split lines.
    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }

    /// Copied lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Contents joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Whether nothing has been copied.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop the contents.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Contents as base64, the payload of an OSC 52 system clipboard
    /// request.
    pub fn encoded(&self) -> String {
        base64_encode(self.text().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_text() {
        let mut clip = Clipboard::new();
        assert!(clip.is_empty());
        clip.set_text("a\nb");
        assert_eq!(clip.lines(), ["a", "b"]);
        assert_eq!(clip.text(), "a\nb");
    }

    #[test]
    fn test_clipboard_encoded() {
        let mut clip = Clipboard::new();
        clip.set_text("hello");
        assert_eq!(clip.encoded(), "aGVsbG8=");
    }
}
