//! Substring search for interactive find.
//!
//! Plain O(n·m) scans. Case folding is ASCII-only, which is what the find
//! prompt needs for byte offsets to stay valid.

use std::cmp::Ordering;

#[inline]
fn bytes_match(hay: &[u8], needle: &[u8], ignore_case: bool) -> bool {
    if ignore_case {
        hay.eq_ignore_ascii_case(needle)
    } else {
        hay == needle
    }
}

/// Find the first occurrence of `needle` in `haystack` at or after `start`.
///
/// An empty needle matches at `start` as long as `start <= haystack.len()`.
pub fn find(haystack: &[u8], needle: &[u8], start: usize, ignore_case: bool) -> Option<usize> {
    if needle.is_empty() {
        return (start <= haystack.len()).then_some(start);
    }
    if haystack.len() < needle.len() {
        return None;
    }
    let limit = haystack.len() - needle.len();
    if start > limit {
        return None;
    }
    (start..=limit).find(|&i| bytes_match(&haystack[i..i + needle.len()], needle, ignore_case))
}

/// Find the last occurrence of `needle` that starts strictly before `end`.
///
/// `end` is clamped to the haystack length plus one, so passing
/// `usize::MAX` searches the whole haystack.
pub fn rfind(haystack: &[u8], needle: &[u8], end: usize, ignore_case: bool) -> Option<usize> {
    if haystack.len() < needle.len() || end == 0 {
        return None;
    }
    let limit = (haystack.len() - needle.len()).min(end - 1);
    (0..=limit)
        .rev()
        .find(|&i| bytes_match(&haystack[i..i + needle.len()], needle, ignore_case))
}

/// Compare two strings ignoring ASCII case.
pub fn case_insensitive_cmp(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn naive(hay: &[u8], needle: &[u8], start: usize, ignore_case: bool) -> Option<usize> {
        if needle.is_empty() {
            return (start <= hay.len()).then_some(start);
        }
        (start..hay.len()).find(|&i| {
            i + needle.len() <= hay.len()
                && hay[i..i + needle.len()]
                    .iter()
                    .zip(needle)
                    .all(|(a, b)| if ignore_case { a.eq_ignore_ascii_case(b) } else { a == b })
        })
    }

    #[test]
    fn test_find_case_insensitive() {
        assert_eq!(find(b"Hello World", b"world", 0, true), Some(6));
        assert_eq!(find(b"Hello World", b"world", 0, false), None);
        assert_eq!(find(b"Hello World", b"World", 0, false), Some(6));
    }

    #[test]
    fn test_find_from_start() {
        assert_eq!(find(b"abcabc", b"abc", 1, false), Some(3));
        assert_eq!(find(b"abcabc", b"abc", 4, false), None);
    }

    #[test]
    fn test_find_empty_needle() {
        assert_eq!(find(b"abc", b"", 0, false), Some(0));
        assert_eq!(find(b"abc", b"", 3, false), Some(3));
        assert_eq!(find(b"abc", b"", 4, false), None);
    }

    #[test]
    fn test_find_needle_longer() {
        assert_eq!(find(b"ab", b"abc", 0, false), None);
    }

    #[test]
    fn test_rfind() {
        assert_eq!(rfind(b"abcabc", b"abc", usize::MAX, false), Some(3));
        assert_eq!(rfind(b"abcabc", b"abc", 3, false), Some(0));
        assert_eq!(rfind(b"abcabc", b"abc", 0, false), None);
        assert_eq!(rfind(b"ABCabc", b"abc", 3, true), Some(0));
    }

    #[test]
    fn test_case_insensitive_cmp() {
        assert_eq!(case_insensitive_cmp("Main.rs", "main.RS"), Ordering::Equal);
        assert_eq!(case_insensitive_cmp("a", "B"), Ordering::Less);
    }

    proptest! {
        #[test]
        fn prop_find_matches_naive(
            hay in "[abAB]{0,24}",
            needle in "[abAB]{0,4}",
            start in 0usize..30,
            ignore_case in any::<bool>(),
        ) {
            prop_assert_eq!(
                find(hay.as_bytes(), needle.as_bytes(), start, ignore_case),
                naive(hay.as_bytes(), needle.as_bytes(), start, ignore_case)
            );
        }
    }
}
