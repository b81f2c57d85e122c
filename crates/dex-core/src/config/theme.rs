//! Theme configuration for dex.
//!
//! Colors are stored as strings (e.g. `"blue"`, `"#ff5500"`) and converted
//! to [`ratatui::style::Color`] at render time via [`parse_color`].

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{read_error, CoreError, CoreResult};
use crate::model::Category;

/// Complete theme configuration with per-component color groups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default)]
    pub list: ListTheme,
    #[serde(default)]
    pub header: HeaderTheme,
    #[serde(default)]
    pub statusbar: StatusBarTheme,
    #[serde(default)]
    pub detail: DetailTheme,
    #[serde(default)]
    pub popup: PopupTheme,
    /// Badge color overrides keyed by category code (`"fire"`, `"water"`, …).
    #[serde(default)]
    pub categories: HashMap<String, String>,
}

impl Theme {
    /// Loads a theme from a TOML file at `path`.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// Badge color of a category: the override if any, else its default.
    pub fn category_color(&self, category: Category) -> ratatui::style::Color {
        let spec = self
            .categories
            .get(category.code())
            .map(String::as_str)
            .unwrap_or_else(|| category.default_color());
        parse_color(spec)
    }
}

/// Item list colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTheme {
    pub number_fg: String,
    pub name_fg: String,
    pub secondary_fg: String,
    pub selected_bg: String,
    pub favorite_fg: String,
}

impl Default for ListTheme {
    fn default() -> Self {
        Self {
            number_fg: "dark_gray".to_string(),
            name_fg: "white".to_string(),
            secondary_fg: "gray".to_string(),
            selected_bg: "#3a3a3a".to_string(),
            favorite_fg: "yellow".to_string(),
        }
    }
}

/// Header row colors (title, load progress, filter tags).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderTheme {
    pub title_fg: String,
    pub progress_fg: String,
    pub tag_fg: String,
}

impl Default for HeaderTheme {
    fn default() -> Self {
        Self {
            title_fg: "#dc0a2d".to_string(),
            progress_fg: "cyan".to_string(),
            tag_fg: "#3b82f6".to_string(),
        }
    }
}

/// Status bar colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusBarTheme {
    pub bg: String,
    pub fg: String,
    pub query_fg: String,
    pub message_fg: String,
}

impl Default for StatusBarTheme {
    fn default() -> Self {
        Self {
            bg: "white".to_string(),
            fg: "black".to_string(),
            query_fg: "blue".to_string(),
            message_fg: "magenta".to_string(),
        }
    }
}

/// Detail screen colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailTheme {
    pub border_fg: String,
    pub label_fg: String,
    pub stat_bar_fg: String,
    pub lineage_selected_fg: String,
    pub error_fg: String,
}

impl Default for DetailTheme {
    fn default() -> Self {
        Self {
            border_fg: "dark_gray".to_string(),
            label_fg: "cyan".to_string(),
            stat_bar_fg: "green".to_string(),
            lineage_selected_fg: "yellow".to_string(),
            error_fg: "red".to_string(),
        }
    }
}

/// Popup/dialog colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopupTheme {
    pub border_fg: String,
}

impl Default for PopupTheme {
    fn default() -> Self {
        Self {
            border_fg: "yellow".to_string(),
        }
    }
}

/// Parses a color string into a `ratatui::style::Color`.
///
/// Supports named colors (`"blue"`, `"dark_gray"`) and hex (`"#rrggbb"`).
/// Returns `Color::Reset` for unrecognised values.
pub fn parse_color(s: &str) -> ratatui::style::Color {
    use ratatui::style::Color;

    match s.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "dark_gray" | "dark_grey" | "darkgray" | "darkgrey" => Color::DarkGray,
        "light_red" | "lightred" => Color::LightRed,
        "light_green" | "lightgreen" => Color::LightGreen,
        "light_yellow" | "lightyellow" => Color::LightYellow,
        "light_blue" | "lightblue" => Color::LightBlue,
        "light_magenta" | "lightmagenta" => Color::LightMagenta,
        "light_cyan" | "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        "reset" => Color::Reset,
        hex if hex.starts_with('#') && hex.len() == 7 => {
            let channel = |range| u8::from_str_radix(&hex[range], 16).unwrap_or(0);
            Color::Rgb(channel(1..3), channel(3..5), channel(5..7))
        }
        _ => Color::Reset,
    }
}
