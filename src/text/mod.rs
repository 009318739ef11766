//! Text module: Byte-level helpers shared by navigation, find and prompts.
//!
//! - [`classify`]: separator/space/identifier predicates
//! - [`search`]: substring search with optional case folding
//! - [`number`]: digit counting and prompt integer parsing
//! - [`path`]: base/dir name and default extensions
//! - [`encode`]: base64

pub mod classify;
pub mod encode;
pub mod number;
pub mod path;
pub mod search;

pub use classify::{is_identifier_char, is_separator, is_space};
pub use encode::base64_encode;
pub use number::{digit_count, parse_int};
pub use search::{find, rfind};
