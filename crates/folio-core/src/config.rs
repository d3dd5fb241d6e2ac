use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::sections::TrackerConfig;
use crate::typewriter::TypewriterTiming;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub typing: TypingConfig,
    #[serde(default)]
    pub nav: NavConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (outbox, log file)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Portfolio content file; built-in content is used when unset
    #[serde(default)]
    pub content_path: Option<PathBuf>,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            content_path: None,
            log_level: default_log_level(),
        }
    }
}

/// Typewriter timing in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypingConfig {
    #[serde(default = "default_type_speed")]
    pub type_speed_ms: i64,
    #[serde(default = "default_delete_speed")]
    pub delete_speed_ms: i64,
    /// Pause with the full phrase shown
    #[serde(default = "default_pause")]
    pub pause_ms: i64,
    /// Pause between a deleted phrase and the next one
    #[serde(default = "default_inter_phrase")]
    pub inter_phrase_ms: i64,
    /// Replaces the profile roles when set
    #[serde(default)]
    pub phrases: Option<Vec<String>>,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            type_speed_ms: default_type_speed(),
            delete_speed_ms: default_delete_speed(),
            pause_ms: default_pause(),
            inter_phrase_ms: default_inter_phrase(),
            phrases: None,
        }
    }
}

impl TypingConfig {
    /// Timings are signed in the file so a negative value reaches this check
    /// instead of failing as a parse error
    pub fn validate(&self) -> crate::Result<()> {
        for (name, value) in [
            ("type_speed_ms", self.type_speed_ms),
            ("delete_speed_ms", self.delete_speed_ms),
            ("pause_ms", self.pause_ms),
            ("inter_phrase_ms", self.inter_phrase_ms),
        ] {
            if value < 0 {
                return Err(crate::Error::InvalidConfiguration(format!(
                    "typing.{} must not be negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Navigation offsets, in terminal rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavConfig {
    /// Rows the anchor point sits below the top of the viewport
    #[serde(default = "default_anchor_offset")]
    pub anchor_offset: f64,
    /// Rows scrolled before the navbar switches to its scrolled style
    #[serde(default = "default_scrolled_threshold")]
    pub scrolled_threshold: f64,
    /// Rows scrolled before the back-to-top hint appears
    #[serde(default = "default_back_to_top_threshold")]
    pub back_to_top_threshold: f64,
    /// Rows kept above a section when jumping to it
    #[serde(default = "default_jump_offset")]
    pub jump_offset: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            anchor_offset: default_anchor_offset(),
            scrolled_threshold: default_scrolled_threshold(),
            back_to_top_threshold: default_back_to_top_threshold(),
            jump_offset: default_jump_offset(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Show the scroll progress bar under the navbar
    #[serde(default = "default_true")]
    pub show_progress: bool,
    /// Duration of the stat counter animation
    #[serde(default = "default_counter_duration")]
    pub counter_duration_ms: u64,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Smooth scrolling
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            show_progress: default_true(),
            counter_duration_ms: default_counter_duration(),
            theme: ThemeConfig::default(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Easing curve for scroll and counter animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the end
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Lines per step when smooth scrolling is off
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            scroll_lines: default_scroll_lines(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "midnight", "nord")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Accept either `theme = "nord"` or `[ui.theme]` with name/colors
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "midnight".to_string()
}

/// Optional color overrides, each a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    pub bg0: Option<String>,
    pub bg1: Option<String>,
    pub bg2: Option<String>,
    pub fg0: Option<String>,
    pub fg1: Option<String>,
    /// Active nav link, typewriter text, headings
    pub accent: Option<String>,
    /// Navbar background once scrolled
    pub selection: Option<String>,
    /// Muted text (inactive links, tags)
    pub muted: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
    pub warning: Option<String>,
    pub info: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-j>" (Ctrl+j), "<S-g>" (Shift+g), "<CR>" (Enter), "<Esc>", "<Tab>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,
    #[serde(default = "default_key_scroll_down")]
    pub scroll_down: String,
    #[serde(default = "default_key_scroll_up")]
    pub scroll_up: String,
    #[serde(default = "default_key_scroll_half_down")]
    pub scroll_half_down: String,
    #[serde(default = "default_key_scroll_half_up")]
    pub scroll_half_up: String,
    #[serde(default = "default_key_scroll_page_down")]
    pub scroll_page_down: String,
    #[serde(default = "default_key_scroll_page_up")]
    pub scroll_page_up: String,
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,
    /// Jump to the next section in the navbar
    #[serde(default = "default_key_next_section")]
    pub next_section: String,
    /// Jump to the previous section in the navbar
    #[serde(default = "default_key_prev_section")]
    pub prev_section: String,
    /// Cycle the project category filter
    #[serde(default = "default_key_cycle_filter")]
    pub cycle_filter: String,
    /// Move the project cursor down
    #[serde(default = "default_key_next_project")]
    pub next_project: String,
    /// Move the project cursor up
    #[serde(default = "default_key_prev_project")]
    pub prev_project: String,
    /// Open the selected project's live URL
    #[serde(default = "default_key_open_project")]
    pub open_project: String,
    /// Open the selected project's repository
    #[serde(default = "default_key_open_repo")]
    pub open_repo: String,
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            scroll_down: default_key_scroll_down(),
            scroll_up: default_key_scroll_up(),
            scroll_half_down: default_key_scroll_half_down(),
            scroll_half_up: default_key_scroll_half_up(),
            scroll_page_down: default_key_scroll_page_down(),
            scroll_page_up: default_key_scroll_page_up(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            next_section: default_key_next_section(),
            prev_section: default_key_prev_section(),
            cycle_filter: default_key_cycle_filter(),
            next_project: default_key_next_project(),
            prev_project: default_key_prev_project(),
            open_project: default_key_open_project(),
            open_repo: default_key_open_repo(),
            help: default_key_help(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_scroll_down() -> String { "j".to_string() }
fn default_key_scroll_up() -> String { "k".to_string() }
fn default_key_scroll_half_down() -> String { "<C-d>".to_string() }
fn default_key_scroll_half_up() -> String { "<C-u>".to_string() }
fn default_key_scroll_page_down() -> String { "<C-f>".to_string() }
fn default_key_scroll_page_up() -> String { "<C-b>".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_next_section() -> String { "<Tab>".to_string() }
fn default_key_prev_section() -> String { "<S-Tab>".to_string() }
fn default_key_cycle_filter() -> String { "f".to_string() }
fn default_key_next_project() -> String { "n".to_string() }
fn default_key_prev_project() -> String { "p".to_string() }
fn default_key_open_project() -> String { "o".to_string() }
fn default_key_open_repo() -> String { "r".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_type_speed() -> i64 {
    100
}

fn default_delete_speed() -> i64 {
    50
}

fn default_pause() -> i64 {
    2000
}

fn default_inter_phrase() -> i64 {
    500
}

fn default_anchor_offset() -> f64 {
    3.0 // navbar height plus one row
}

fn default_scrolled_threshold() -> f64 {
    2.0
}

fn default_back_to_top_threshold() -> f64 {
    12.0
}

fn default_jump_offset() -> f64 {
    0.0
}

fn default_tick_rate() -> u64 {
    100
}

fn default_counter_duration() -> u64 {
    2000
}

fn default_animation_duration() -> u64 {
    150
}

fn default_scroll_lines() -> u16 {
    1
}

fn default_animation_fps() -> u32 {
    60
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults if it does not exist
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.typing.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/folio/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("folio")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Content file path (with tilde expansion), if configured
    pub fn content_path(&self) -> Option<PathBuf> {
        self.general.content_path.as_deref().map(expand_tilde)
    }

    /// Where contact messages are queued
    pub fn outbox_path(&self) -> PathBuf {
        self.data_dir().join("outbox.jsonl")
    }

    /// Log file used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("folio.log")
    }

    pub fn typewriter_timing(&self) -> crate::Result<TypewriterTiming> {
        self.typing.validate()?;
        let ms = |value: i64| Duration::from_millis(value.unsigned_abs());
        Ok(TypewriterTiming {
            type_speed: ms(self.typing.type_speed_ms),
            delete_speed: ms(self.typing.delete_speed_ms),
            pause_time: ms(self.typing.pause_ms),
            inter_phrase_delay: ms(self.typing.inter_phrase_ms),
        })
    }

    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            anchor_offset: self.nav.anchor_offset,
            scrolled_threshold: self.nav.scrolled_threshold,
            back_to_top_threshold: self.nav.back_to_top_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.typing.type_speed_ms, 100);
        assert_eq!(config.typing.delete_speed_ms, 50);
        assert_eq!(config.typing.pause_ms, 2000);
        assert_eq!(config.typing.inter_phrase_ms, 500);
        assert_eq!(config.ui.theme.name, "midnight");
        assert_eq!(config.keymap.jump_to_top, "gg");
    }

    #[test]
    fn test_theme_as_string_or_table() {
        let config = AppConfig::from_toml("[ui]\ntheme = \"nord\"\n").unwrap();
        assert_eq!(config.ui.theme.name, "nord");

        let config = AppConfig::from_toml(
            "[ui.theme]\nname = \"dracula\"\n[ui.theme.colors]\naccent = \"#ff0000\"\n",
        )
        .unwrap();
        assert_eq!(config.ui.theme.name, "dracula");
        assert_eq!(config.ui.theme.colors.accent.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_negative_timing_is_invalid_configuration() {
        let result = AppConfig::from_toml("[typing]\ndelete_speed_ms = -50\n");
        assert!(matches!(result, Err(crate::Error::InvalidConfiguration(_))));

        let mut config = AppConfig::default();
        config.typing.pause_ms = -1;
        assert!(matches!(
            config.typewriter_timing(),
            Err(crate::Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_unparseable_timing_is_a_config_error() {
        let result = AppConfig::from_toml("[typing]\ntype_speed_ms = \"fast\"\n");
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_typewriter_timing() {
        let config = AppConfig::from_toml("[typing]\npause_ms = 750\n").unwrap();
        let timing = config.typewriter_timing().unwrap();
        assert_eq!(timing.pause_time, Duration::from_millis(750));
        assert_eq!(timing.type_speed, Duration::from_millis(100));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.nav.anchor_offset = 5.0;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.nav.anchor_offset, 5.0);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.ui.tick_rate_ms, 100);
    }
}
