//! Syntax handles: Read-only rule-set references shared by file buffers.
//!
//! The rule contents and the tokenizer live outside this crate. The core
//! only needs to pick a rule set for a file name and hand out shared
//! handles to it.

use crate::text::path::base_name;
use crate::text::search::case_insensitive_cmp;
use std::cmp::Ordering;
use std::sync::Arc;

/// A syntax rule set, as far as the core is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syntax {
    /// Display name (e.g. "Rust").
    name: String,
    /// File patterns: `.ext` matches an extension, anything else matches a
    /// whole file name.
    patterns: Vec<String>,
}

impl Syntax {
    /// Create a rule-set handle.
    pub fn new(name: impl Into<String>, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File patterns.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether this rule set applies to `path`.
    pub fn matches(&self, path: &str) -> bool {
        let file = base_name(path);
        let ext = file.rfind('.').map(|i| &file[i..]);
        self.patterns.iter().any(|pattern| {
            let target = if pattern.starts_with('.') { ext } else { Some(file) };
            target.is_some_and(|t| case_insensitive_cmp(t, pattern) == Ordering::Equal)
        })
    }
}

/// Session-wide, read-only collection of syntax rule sets.
#[derive(Debug, Clone, Default)]
pub struct SyntaxDb {
    entries: Vec<Arc<Syntax>>,
}

impl SyntaxDb {
    /// Create an empty database.
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Add a rule set.
    pub fn push(&mut self, syntax: Syntax) {
        self.entries.push(Arc::new(syntax));
    }

    /// Number of rule sets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the database is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First rule set matching `path`.
    pub fn select(&self, path: &str) -> Option<Arc<Syntax>> {
        self.entries.iter().find(|s| s.matches(path)).cloned()
    }
}

impl FromIterator<Syntax> for SyntaxDb {
    fn from_iter<I: IntoIterator<Item = Syntax>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Arc::new).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> SyntaxDb {
        [
            Syntax::new("C", [".c", ".h"]),
            Syntax::new("Make", ["Makefile"]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_select_by_extension() {
        let db = db();
        assert_eq!(db.select("src/main.c").unwrap().name(), "C");
        assert_eq!(db.select("INCLUDE/X.H").unwrap().name(), "C");
        assert!(db.select("notes.txt").is_none());
        assert!(db.select("noext").is_none());
    }

    #[test]
    fn test_select_by_name() {
        assert_eq!(db().select("/build/Makefile").unwrap().name(), "Make");
    }

    #[test]
    fn test_select_shares_handle() {
        let db = db();
        let a = db.select("a.c").unwrap();
        let b = db.select("b.c").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
