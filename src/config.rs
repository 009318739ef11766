//! Editor configuration.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration and a partial one only overrides what it names:
//!
//! ```toml
//! tab_size = 8
//!
//! [colors]
//! bg = "1e1e1e"
//! match_highlight = "FF5733"
//! ```

use crate::buffer::DEFAULT_TAB_SIZE;
use crate::error::ConfigError;
use crate::terminal::Rgb;
use serde::{Deserialize, Serialize};

/// Default ceiling on open files.
pub const DEFAULT_MAX_FILES: usize = 32;

/// UI colors. Each is written as six hex digits in TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    /// Text area background. Black means the terminal default.
    pub bg: Rgb,
    /// Text foreground.
    pub fg: Rgb,
    /// Tab strip background.
    pub top_status: Rgb,
    /// Prompt/status line background.
    pub prompt: Rgb,
    /// Line-number gutter foreground.
    pub line_number: Rgb,
    /// Background of the cursor row.
    pub cursor_line: Rgb,
    /// Background of the current find match.
    pub match_highlight: Rgb,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            bg: Rgb::BLACK,
            fg: Rgb::new(0xd4, 0xd4, 0xd4),
            top_status: Rgb::new(0x25, 0x25, 0x26),
            prompt: Rgb::new(0x00, 0x7a, 0xcc),
            line_number: Rgb::new(0x85, 0x85, 0x85),
            cursor_line: Rgb::new(0x28, 0x28, 0x28),
            match_highlight: Rgb::new(0x61, 0x3a, 0x00),
        }
    }
}

/// Session-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of open files.
    pub max_files: usize,
    /// Tab stop for new buffers.
    pub tab_size: usize,
    /// Whether find ignores ASCII case.
    pub find_ignore_case: bool,
    /// Whether the front end should capture the mouse. Wheel events are
    /// ignored when unset.
    pub mouse: bool,
    /// UI colors.
    pub colors: ColorScheme,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            tab_size: DEFAULT_TAB_SIZE,
            find_ignore_case: true,
            mouse: false,
            colors: ColorScheme::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        tracing::debug!(
            max_files = config.max_files,
            tab_size = config.tab_size,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_files == 0 {
            return Err(ConfigError::Invalid {
                key: "max_files",
                reason: "must be at least 1".into(),
            });
        }
        if self.tab_size == 0 {
            return Err(ConfigError::Invalid {
                key: "tab_size",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
