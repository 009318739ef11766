//! Terminal module: Frame accumulation and escape-sequence encoding.
//!
//! - [`AppendBuffer`]: collects one frame of output for a single flush
//! - [`color`]: hex/RGB conversion and SGR emission

pub mod color;
mod output;

pub use color::{emit_cursor_move, emit_modifiers, emit_sgr, hex_to_rgb, rgb_to_hex, Modifiers, Rgb};
pub use output::{AppendBuffer, ABUF_GROWTH_RATE};
