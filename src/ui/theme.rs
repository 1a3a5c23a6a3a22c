use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub text_dim: String,
    pub accent: String,
    pub accent_dim: String,
    pub border: String,
    pub header_bg: String,
    pub header_fg: String,
    pub overlay_bg: String,
    pub hard_badge: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // user themes take precedence over bundled ones
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("firstread")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                if let Ok(theme) = toml::from_str::<Theme>(&content) {
                    return Some(theme);
                }
            }
        }

        let filename = format!("{name}.toml");
        if let Some(file) = ThemeAssets::get(&filename) {
            if let Ok(content) = std::str::from_utf8(file.data.as_ref()) {
                if let Ok(theme) = toml::from_str::<Theme>(content) {
                    return Some(theme);
                }
            }
        }

        None
    }

    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("chalkboard").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1D2A24".to_string(),
            fg: "#E8F0E8".to_string(),
            text_dim: "#6E8A78".to_string(),
            accent: "#FFD166".to_string(),
            accent_dim: "#3A4F44".to_string(),
            border: "#3A4F44".to_string(),
            header_bg: "#16201B".to_string(),
            header_fg: "#E8F0E8".to_string(),
            overlay_bg: "#223129".to_string(),
            hard_badge: "#EF476F".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::Reset
    }

    pub fn bg(&self) -> Color {
        Self::parse_color(&self.bg)
    }

    pub fn fg(&self) -> Color {
        Self::parse_color(&self.fg)
    }

    pub fn text_dim(&self) -> Color {
        Self::parse_color(&self.text_dim)
    }

    pub fn accent(&self) -> Color {
        Self::parse_color(&self.accent)
    }

    pub fn accent_dim(&self) -> Color {
        Self::parse_color(&self.accent_dim)
    }

    pub fn border(&self) -> Color {
        Self::parse_color(&self.border)
    }

    pub fn header_bg(&self) -> Color {
        Self::parse_color(&self.header_bg)
    }

    pub fn header_fg(&self) -> Color {
        Self::parse_color(&self.header_fg)
    }

    pub fn overlay_bg(&self) -> Color {
        Self::parse_color(&self.overlay_bg)
    }

    pub fn hard_badge(&self) -> Color {
        Self::parse_color(&self.hard_badge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_themes_parse() {
        for name in Theme::available_themes() {
            let theme = Theme::load(&name).unwrap_or_else(|| panic!("theme {name} unreadable"));
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(
            ThemeColors::parse_color("#00A651"),
            Color::Rgb(0x00, 0xA6, 0x51)
        );
        assert_eq!(ThemeColors::parse_color("garbage"), Color::Reset);
    }
}
