//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the color scheme system for the client, supporting both
//! built-in themes and custom themes loaded from TOML files. It provides
//! utilities for converting hex colors to ANSI escape sequences.
//!
//! # Built-in Themes
//!
//! - `default`: Dark theme (default)
//! - `light`: Light theme for bright terminals
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e6e6e6"
//! selection_fg = "#1b1f24"
//! selection_bg = "#8ab4f8"
//! text_normal = "#e6e6e6"
//! text_dim = "#8b949e"
//! border = "#30363d"
//! search_bar_border = "#8ab4f8"
//! match_highlight_fg = "#1b1f24"
//! match_highlight_bg = "#f2cc60"
//! empty_state_fg = "#8ab4f8"
//! category_fg = "#d2a8ff"
//! tag_fg = "#7ee787"
//! toast_fg = "#ffffff"
//! success_bg = "#28a745"
//! error_bg = "#dc3545"
//! info_bg = "#17a2b8"
//! ```

use crate::domain::error::{Result, SysrefError};
use crate::search::NotificationKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "default";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// All colors are specified as hex strings (e.g., "#e6e6e6").
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected card foreground color.
    pub selection_fg: String,
    /// Selected card background color.
    pub selection_bg: String,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, timestamps, previews).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Search bar border color.
    pub search_bar_border: String,
    /// Match highlight foreground (snippets, titles).
    pub match_highlight_fg: String,
    /// Match highlight background.
    pub match_highlight_bg: String,

    /// Placeholder message color.
    pub empty_state_fg: String,

    /// Category badge color.
    pub category_fg: String,
    /// Tag color.
    pub tag_fg: String,

    /// Notification text color.
    pub toast_fg: String,
    /// Success notification background.
    pub success_bg: String,
    /// Error notification background.
    pub error_bg: String,
    /// Info notification background.
    pub info_bg: String,
}

impl ThemeColors {
    /// Background color for a notification of `kind`.
    #[must_use]
    pub fn toast_bg(&self, kind: NotificationKind) -> &str {
        match kind {
            NotificationKind::Success => &self.success_bg,
            NotificationKind::Error => &self.error_bg,
            NotificationKind::Info => &self.info_bg,
        }
    }
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Supported names: `default`, `light`.
    ///
    /// # Returns
    ///
    /// - `Some(Theme)` if the theme name is recognized
    /// - `None` if the theme name is unknown
    ///
    /// # Example
    ///
    /// ```rust
    /// use sysref::ui::theme::Theme;
    ///
    /// let theme = Theme::from_name("light").unwrap();
    /// assert_eq!(theme.name, "light");
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "default" => include_str!("../../themes/default.toml"),
            "light" => include_str!("../../themes/light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SysrefError::Theme`] if the file cannot be read or the TOML
    /// content cannot be parsed (invalid syntax, missing fields, type
    /// mismatches).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| SysrefError::Theme(format!("Failed to read theme file {}: {e}", path.display())))?;

        toml::from_str(&contents).map_err(|e| SysrefError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to RGB tuple.
    ///
    /// Returns `(255, 255, 255)` (white) on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// Generates an ANSI 24-bit foreground color escape sequence.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sysref::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#28a745"), "\u{1b}[38;2;40;167;69m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// Generates an ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// Returns the ANSI bold escape sequence (`\x1b[1m`).
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// Returns the ANSI dim escape sequence (`\x1b[2m`).
    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Returns the ANSI reset escape sequence (`\x1b[0m`).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the built-in `default` theme.
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("Built-in default theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn built_in_themes_parse() {
        for name in ["default", "light"] {
            let theme = Theme::from_name(name).expect("built-in theme");
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn notification_colors_follow_kind() {
        let theme = Theme::default();
        assert_eq!(theme.colors.toast_bg(NotificationKind::Success), "#28a745");
        assert_eq!(theme.colors.toast_bg(NotificationKind::Error), "#dc3545");
        assert_eq!(theme.colors.toast_bg(NotificationKind::Info), "#17a2b8");
    }

    #[test]
    fn custom_theme_file_loads() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(include_str!("../../themes/light.toml").replace("\"light\"", "\"mine\"").as_bytes())
            .expect("write theme");
        let theme = Theme::from_file(file.path()).expect("valid theme");
        assert_eq!(theme.name, "mine");
    }

    #[test]
    fn broken_theme_file_is_a_theme_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"name = \"x\"\n[colors]\nheader_fg = 3\n").expect("write theme");
        assert!(matches!(Theme::from_file(file.path()), Err(SysrefError::Theme(_))));
    }

    #[test]
    fn malformed_hex_falls_back_to_white() {
        assert_eq!(Theme::fg("nope"), "\u{1b}[38;2;255;255;255m");
    }
}
