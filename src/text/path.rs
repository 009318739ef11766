//! Path string helpers for tab labels and save-as prompts.
//!
//! These work on the text the user typed, so they stay string based
//! instead of going through `std::path` normalization.

#[inline]
fn is_path_separator(c: char) -> bool {
    c == '/' || (cfg!(windows) && c == '\\')
}

/// Final component of `path`: `"/home/user/file.txt"` gives `"file.txt"`.
pub fn base_name(path: &str) -> &str {
    path.rfind(is_path_separator).map_or(path, |i| &path[i + 1..])
}

/// Directory part of `path`, or `"."` when there is none.
pub fn dir_name(path: &str) -> &str {
    match path.rfind(is_path_separator) {
        Some(0) => &path[..1],
        Some(i) => &path[..i],
        None => ".",
    }
}

/// Append `extension` (including the dot) if the file name has none.
pub fn add_default_extension(path: &str, extension: &str) -> String {
    if base_name(path).contains('.') {
        path.to_owned()
    } else {
        format!("{path}{extension}")
    }
}
