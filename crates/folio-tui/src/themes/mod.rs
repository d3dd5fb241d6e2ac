//! Theme registry and loader

mod dracula;
mod gruvbox;
pub(crate) mod midnight;
mod nord;

use folio_core::config::{ThemeColorOverrides, ThemeConfig};
use ratatui::style::Color;
use tracing::warn;

use crate::theme::Theme;

/// "#rrggbb" or "#rgb" (leading '#' optional) to an RGB color
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.is_ascii() {
        return None;
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    let (r, g, b) = match digits.len() {
        // Each short digit doubles up: "f50" is "ff5500"
        3 => (
            channel(&digits[0..1])? * 0x11,
            channel(&digits[1..2])? * 0x11,
            channel(&digits[2..3])? * 0x11,
        ),
        6 => (
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        ),
        _ => return None,
    };
    Some(Color::Rgb(r, g, b))
}

/// Load a theme by name from config
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = match config.name.to_lowercase().as_str() {
        "midnight" => midnight::default(),
        "gruvbox" | "gruvbox-dark" => gruvbox::dark(),
        "nord" => nord::default(),
        "dracula" => dracula::default(),
        other => {
            warn!(
                "Unknown theme '{}' (available: {}), falling back to midnight",
                other,
                available_themes().join(", ")
            );
            midnight::default()
        }
    };

    apply_overrides(base, &config.colors)
}

fn override_color(slot: &mut Color, hex: Option<&str>) {
    if let Some(hex) = hex {
        match parse_hex_color(hex) {
            Some(color) => *slot = color,
            None => warn!("Ignoring invalid color override '{}'", hex),
        }
    }
}

/// Apply user color overrides to a base theme
fn apply_overrides(mut theme: Theme, overrides: &ThemeColorOverrides) -> Theme {
    override_color(&mut theme.bg0, overrides.bg0.as_deref());
    override_color(&mut theme.bg1, overrides.bg1.as_deref());
    override_color(&mut theme.bg2, overrides.bg2.as_deref());
    override_color(&mut theme.fg0, overrides.fg0.as_deref());
    override_color(&mut theme.fg1, overrides.fg1.as_deref());
    override_color(&mut theme.accent, overrides.accent.as_deref());
    override_color(&mut theme.selection, overrides.selection.as_deref());
    override_color(&mut theme.muted, overrides.muted.as_deref());
    override_color(&mut theme.error, overrides.error.as_deref());
    override_color(&mut theme.success, overrides.success.as_deref());
    override_color(&mut theme.warning, overrides.warning.as_deref());
    override_color(&mut theme.info, overrides.info.as_deref());
    theme
}

/// Get list of available theme names
pub fn available_themes() -> Vec<&'static str> {
    vec!["midnight", "gruvbox-dark", "nord", "dracula"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color_6digit() {
        let color = parse_hex_color("#ff5500").unwrap();
        assert!(matches!(color, Color::Rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_hex_color_3digit() {
        let color = parse_hex_color("#f50").unwrap();
        assert!(matches!(color, Color::Rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_hex_color_invalid() {
        assert!(parse_hex_color("invalid").is_none());
        assert!(parse_hex_color("#gg0000").is_none());
        assert!(parse_hex_color("#ééé").is_none());
    }

    #[test]
    fn test_load_theme_default() {
        let theme = load_theme(&ThemeConfig::default());
        assert!(matches!(theme.bg0, Color::Rgb(0x0a, 0x0a, 0x0f)));
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let config = ThemeConfig {
            name: "solarized".to_string(),
            colors: ThemeColorOverrides::default(),
        };
        let theme = load_theme(&config);
        assert!(matches!(theme.accent, Color::Rgb(0x00, 0xd4, 0xff)));
    }

    #[test]
    fn test_load_theme_with_override() {
        let config = ThemeConfig {
            name: "nord".to_string(),
            colors: ThemeColorOverrides {
                accent: Some("#ff0000".to_string()),
                ..Default::default()
            },
        };
        let theme = load_theme(&config);
        assert!(matches!(theme.accent, Color::Rgb(255, 0, 0)));
        assert!(matches!(theme.bg0, Color::Rgb(0x2e, 0x34, 0x40)));
    }
}
