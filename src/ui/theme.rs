//! Theme management and ANSI escape sequence generation.
//!
//! Built-in themes are the four Catppuccin flavours; custom themes load from
//! TOML files with the same shape.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme
//! - `catppuccin-frappe`: Cool dark theme
//! - `catppuccin-macchiato`: Warm dark theme
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! button_fg = "#1e1e2e"
//! button_bg = "#f5c2e7"
//! link_fg = "#89b4fa"
//! status_fg = "#cdd6f4"
//! busy_fg = "#f9e2af"
//! success_fg = "#a6e3a1"
//! error_fg = "#f38ba8"
//! empty_state_fg = "#89b4fa"
//! ```

use crate::domain::MetaStreamError;
use crate::ui::viewmodel::StatusTone;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex color strings (e.g. `"#cdd6f4"`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Footer, metadata lines and thumbnail sources.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    pub button_fg: String,
    pub button_bg: String,

    /// Result titles.
    pub link_fg: String,

    pub status_fg: String,
    pub busy_fg: String,
    pub success_fg: String,
    pub error_fg: String,

    pub empty_state_fg: String,
}

impl ThemeColors {
    /// Status line color for a tone.
    #[must_use]
    pub fn status(&self, tone: StatusTone) -> &str {
        match tone {
            StatusTone::Neutral => &self.status_fg,
            StatusTone::Busy => &self.busy_fg,
            StatusTone::Success => &self.success_fg,
            StatusTone::Error => &self.error_fg,
        }
    }
}

impl Theme {
    /// Loads a built-in theme by name, `None` if the name is unknown.
    ///
    /// # Example
    ///
    /// ```
    /// use metastream::ui::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`MetaStreamError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MetaStreamError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| MetaStreamError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| MetaStreamError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Parses `#rrggbb` (or `rrggbb`), falling back to white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground color escape sequence.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn underline() -> &'static str {
        "\u{001b}[4m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the bundled theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha").expect("built-in catppuccin-mocha theme should always parse")
    }
}
