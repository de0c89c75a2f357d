//! Configuration and theme
//!
//! Loaded from `~/.termdialog/config.json`. Every field has a default, so a
//! missing or partial file still yields a usable configuration.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Foreground/background pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair {
    pub fg: Color,
    pub bg: Color,
}

impl ColorPair {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }

    pub fn style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

/// Normal and focused colors of one control family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colors {
    pub normal: ColorPair,
    pub focused: ColorPair,
}

impl Colors {
    pub const fn new(normal: ColorPair, focused: ColorPair) -> Self {
        Self { normal, focused }
    }

    pub fn style(&self, focused: bool) -> Style {
        if focused {
            self.focused.style().add_modifier(Modifier::BOLD)
        } else {
            self.normal.style()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub text: ColorPair,
    pub header: ColorPair,
    pub separator: ColorPair,
    pub field: Colors,
    pub button: Colors,
    pub toggle: Colors,
    pub error: ColorPair,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: ColorPair::new(Color::White, Color::Reset),
            header: ColorPair::new(Color::Cyan, Color::Reset),
            separator: ColorPair::new(Color::DarkGray, Color::Reset),
            field: Colors::new(
                ColorPair::new(Color::White, Color::DarkGray),
                ColorPair::new(Color::Black, Color::Yellow),
            ),
            button: Colors::new(
                ColorPair::new(Color::White, Color::Reset),
                ColorPair::new(Color::Black, Color::Cyan),
            ),
            toggle: Colors::new(
                ColorPair::new(Color::White, Color::Reset),
                ColorPair::new(Color::Yellow, Color::Reset),
            ),
            error: ColorPair::new(Color::Red, Color::Reset),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: Theme,
    /// Character repeated by separators
    pub separator_char: char,
    /// List every invalid field under the validation message
    pub show_error_details: bool,
    /// Wait for a key after showing validation errors
    pub pause_after_errors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            separator_char: '─',
            show_error_details: true,
            pause_after_errors: false,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".termdialog"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(config) => {
                log::info!("Loaded config from {}", config_path.display());
                Some(config)
            }
            Err(e) => {
                log::warn!("Ignoring malformed config {}: {}", config_path.display(), e);
                None
            }
        }
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.separator_char, '─');
        assert!(config.show_error_details);
        assert!(!config.pause_after_errors);
    }

    #[test]
    fn test_sparse_json_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{ "pause_after_errors": true }"#).unwrap();
        assert!(config.pause_after_errors);
        assert_eq!(config.theme, Theme::default());
        assert_eq!(config.separator_char, '─');
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = Config::default();
        config.separator_char = '=';
        config.theme.error = ColorPair::new(Color::Magenta, Color::Reset);

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_focused_style_is_bold() {
        let colors = Theme::default().button;
        assert!(colors.style(true).add_modifier.contains(Modifier::BOLD));
        assert!(!colors.style(false).add_modifier.contains(Modifier::BOLD));
    }
}
