//! Color codec: hex strings, RGB triples and SGR escape sequences.
//!
//! Colors travel through the configuration as six hex digits without a
//! prefix (`"ff5733"`), and reach the terminal as 24-bit SGR sequences.

use super::output::AppendBuffer;
use crate::error::{AllocError, ColorError};
use bitflags::bitflags;

/// Sequence restoring the terminal's default background.
pub const ANSI_DEFAULT_BG: &str = "\x1b[49m";

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create from a 24-bit value (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Pack into a 24-bit value.
    #[inline]
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Whether this is pure black.
    #[inline]
    pub const fn is_black(self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl std::str::FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        hex_to_rgb(&s)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        rgb_to_hex(color)
    }
}

bitflags! {
    /// Text style modifiers emitted alongside colors.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Underlined text
        const UNDERLINE = 0b0000_0010;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0000_0100;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Parse exactly six hex digits (either case, no `#`) into a color.
///
/// The most significant byte is red.
pub fn hex_to_rgb(s: &str) -> Result<Rgb, ColorError> {
    if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidFormat(s.to_owned()));
    }
    u32::from_str_radix(s, 16)
        .map(Rgb::from_u32)
        .map_err(|_| ColorError::InvalidFormat(s.to_owned()))
}

/// Format a color as six lowercase hex digits.
pub fn rgb_to_hex(color: Rgb) -> String {
    color.to_string()
}

/// Emit the SGR sequence selecting `color`.
///
/// Black requested as a background emits [`ANSI_DEFAULT_BG`] instead, so the
/// terminal's own background shows through.
pub fn emit_sgr(buffer: &mut AppendBuffer, color: Rgb, is_background: bool) -> Result<(), AllocError> {
    if is_background && color.is_black() {
        return buffer.append_str(ANSI_DEFAULT_BG);
    }
    let layer = if is_background { 48 } else { 38 };
    buffer.append_str(&format!("\x1b[{layer};2;{};{};{}m", color.r, color.g, color.b))
}

/// Emit a 1-based cursor position sequence.
pub fn emit_cursor_move(buffer: &mut AppendBuffer, row: usize, col: usize) -> Result<(), AllocError> {
    // CSI row ; col H
    buffer.append_str(&format!("\x1b[{row};{col}H"))
}

/// Emit SGR attributes for `modifiers`. Empty modifiers emit nothing.
pub fn emit_modifiers(buffer: &mut AppendBuffer, modifiers: Modifiers) -> Result<(), AllocError> {
    if modifiers.contains(Modifiers::BOLD) {
        buffer.append(b"\x1b[1m")?;
    }
    if modifiers.contains(Modifiers::UNDERLINE) {
        buffer.append(b"\x1b[4m")?;
    }
    if modifiers.contains(Modifiers::REVERSED) {
        buffer.append(b"\x1b[7m")?;
    }
    Ok(())
}
