//! Character classes used for word motion and token boundaries.

/// Punctuation that separates words.
pub const SEPARATORS: &[u8] = b"`~!@#$%^&*()-=+[{]}\\|;:'\",.<>/?";

/// Whether `c` is a word separator.
#[inline]
pub fn is_separator(c: u8) -> bool {
    SEPARATORS.contains(&c)
}

/// Whether `c` is space, tab, LF, CR, vertical tab or form feed.
#[inline]
pub const fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Whether `c` can be part of an identifier: not space, NUL or separator.
#[inline]
pub fn is_identifier_char(c: u8) -> bool {
    !(is_space(c) || c == 0 || is_separator(c))
}

/// `char` form of [`is_separator`]. Non-ASCII is never a separator.
#[inline]
pub fn char_is_separator(c: char) -> bool {
    u8::try_from(c).is_ok_and(is_separator)
}

/// `char` form of [`is_space`].
#[inline]
pub fn char_is_space(c: char) -> bool {
    u8::try_from(c).is_ok_and(is_space)
}

/// `char` form of [`is_identifier_char`]. Non-ASCII counts as identifier.
#[inline]
pub fn char_is_identifier(c: char) -> bool {
    u8::try_from(c).map_or(true, is_identifier_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators() {
        for c in SEPARATORS {
            assert!(is_separator(*c));
            assert!(!is_identifier_char(*c));
        }
        assert!(!is_separator(b'_'));
        assert!(!is_separator(b'a'));
        assert!(!is_separator(b' '));
    }

    #[test]
    fn test_space() {
        for c in [b' ', b'\t', b'\n', b'\r', 0x0b, 0x0c] {
            assert!(is_space(c));
            assert!(!is_identifier_char(c));
        }
        assert!(!is_space(b'x'));
        assert!(!is_space(0));
    }

    #[test]
    fn test_identifier() {
        assert!(is_identifier_char(b'a'));
        assert!(is_identifier_char(b'Z'));
        assert!(is_identifier_char(b'9'));
        assert!(is_identifier_char(b'_'));
        assert!(!is_identifier_char(0));
    }

    #[test]
    fn test_char_forms() {
        assert!(char_is_separator('('));
        assert!(!char_is_separator('é'));
        assert!(char_is_space('\t'));
        assert!(!char_is_space('\u{3000}'));
        assert!(char_is_identifier('é'));
        assert!(!char_is_identifier('.'));
    }
}
