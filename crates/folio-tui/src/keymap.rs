use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio_core::config::KeymapConfig;
use tracing::warn;

use crate::input::Action;

/// Key code plus modifiers, normalised so lookups match crossterm events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        // Terminals report SHIFT inconsistently for symbols ('?', '>'), so it
        // only carries meaning on letters and non-character keys
        let modifiers = match code {
            KeyCode::Char(c) if c.is_ascii_uppercase() => modifiers | KeyModifiers::SHIFT,
            KeyCode::Char(c) if !c.is_ascii_alphabetic() => {
                modifiers.difference(KeyModifiers::SHIFT)
            }
            KeyCode::BackTab => modifiers | KeyModifiers::SHIFT,
            _ => modifiers,
        };
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

impl From<KeyEvent> for KeyBinding {
    fn from(key: KeyEvent) -> Self {
        Self::new(key.code, key.modifiers)
    }
}

/// Key-to-action table built from `[keymap]`
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
    /// Action for a two-key "gg" sequence, if configured
    double_g: Option<Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut bindings = HashMap::new();
        let mut double_g = None;

        let mut bind = |notation: &str, action: Action| {
            if notation == "gg" {
                double_g = Some(action);
                return;
            }
            match parse_key_binding(notation) {
                Some(binding) => {
                    if let Some(existing) = bindings.get(&binding) {
                        warn!(
                            "Key conflict: '{}' already bound to {:?}, ignoring {:?}",
                            notation, existing, action
                        );
                    } else {
                        bindings.insert(binding, action);
                    }
                }
                None => warn!("Invalid key binding: '{}'", notation),
            }
        };

        bind(&config.quit, Action::Quit);
        bind(&config.scroll_down, Action::ScrollDown);
        bind(&config.scroll_up, Action::ScrollUp);
        bind(&config.scroll_half_down, Action::ScrollHalfPageDown);
        bind(&config.scroll_half_up, Action::ScrollHalfPageUp);
        bind(&config.scroll_page_down, Action::ScrollPageDown);
        bind(&config.scroll_page_up, Action::ScrollPageUp);
        bind(&config.jump_to_top, Action::JumpToTop);
        bind(&config.jump_to_bottom, Action::JumpToBottom);
        bind(&config.next_section, Action::NextSection);
        bind(&config.prev_section, Action::PrevSection);
        bind(&config.cycle_filter, Action::CycleFilter);
        bind(&config.next_project, Action::NextProject);
        bind(&config.prev_project, Action::PrevProject);
        bind(&config.open_project, Action::OpenProject);
        bind(&config.open_repo, Action::OpenRepo);
        bind(&config.help, Action::ToggleHelp);

        // Fixed alternatives that stay available whatever the config says
        bindings.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        bindings.entry(KeyBinding::simple(KeyCode::Down)).or_insert(Action::ScrollDown);
        bindings.entry(KeyBinding::simple(KeyCode::Up)).or_insert(Action::ScrollUp);
        bindings.entry(KeyBinding::simple(KeyCode::PageDown)).or_insert(Action::ScrollPageDown);
        bindings.entry(KeyBinding::simple(KeyCode::PageUp)).or_insert(Action::ScrollPageUp);
        bindings.entry(KeyBinding::simple(KeyCode::Home)).or_insert(Action::JumpToTop);
        bindings.entry(KeyBinding::simple(KeyCode::End)).or_insert(Action::JumpToBottom);
        bindings.insert(KeyBinding::simple(KeyCode::Esc), Action::ExitMode);

        Self { bindings, double_g }
    }

    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }

    /// Action for a completed "gg"
    pub fn double_g_action(&self) -> Option<&Action> {
        self.double_g.as_ref()
    }

    /// A plain 'g' that should wait for a second 'g'
    pub fn is_g_prefix(&self, binding: &KeyBinding) -> bool {
        self.double_g.is_some()
            && binding.code == KeyCode::Char('g')
            && binding.modifiers == KeyModifiers::NONE
    }
}

/// Parse Vim-style notation: "j", "G", "?", "<C-d>", "<S-Tab>", "<Esc>", "<F1>"
pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
    let s = s.trim();

    if let Some(inner) = s.strip_prefix('<').and_then(|rest| rest.strip_suffix('>')) {
        return parse_special_key(inner);
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if c.is_ascii_uppercase() {
        Some(KeyBinding::shift(KeyCode::Char(c)))
    } else {
        Some(KeyBinding::simple(KeyCode::Char(c)))
    }
}

fn parse_special_key(inner: &str) -> Option<KeyBinding> {
    if let Some(rest) = inner.strip_prefix("C-") {
        return parse_key_name(rest).map(KeyBinding::ctrl);
    }
    if let Some(rest) = inner.strip_prefix("S-") {
        return match parse_key_name(rest)? {
            KeyCode::Tab => Some(KeyBinding::shift(KeyCode::BackTab)),
            KeyCode::Char(c) => Some(KeyBinding::shift(KeyCode::Char(c.to_ascii_uppercase()))),
            code => Some(KeyBinding::shift(code)),
        };
    }
    parse_key_name(inner).map(KeyBinding::simple)
}

fn parse_key_name(name: &str) -> Option<KeyCode> {
    let lower = name.to_lowercase();
    let code = match lower.as_str() {
        "cr" | "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" | "spc" => KeyCode::Char(' '),
        "bs" | "backspace" => KeyCode::Backspace,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        other => {
            if let Some(n) = other.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                if (1..=12).contains(&n) {
                    return Some(KeyCode::F(n));
                }
            }
            let mut chars = name.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c.to_ascii_lowercase())
        }
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_and_uppercase() {
        assert_eq!(parse_key_binding("j"), Some(KeyBinding::simple(KeyCode::Char('j'))));
        assert_eq!(parse_key_binding("G"), Some(KeyBinding::shift(KeyCode::Char('G'))));
        assert_eq!(parse_key_binding("jk"), None);
    }

    #[test]
    fn test_parse_modified_keys() {
        assert_eq!(parse_key_binding("<C-d>"), Some(KeyBinding::ctrl(KeyCode::Char('d'))));
        assert_eq!(parse_key_binding("<S-Tab>"), Some(KeyBinding::shift(KeyCode::BackTab)));
        assert_eq!(parse_key_binding("<Esc>"), Some(KeyBinding::simple(KeyCode::Esc)));
        assert_eq!(parse_key_binding("<F5>"), Some(KeyBinding::simple(KeyCode::F(5))));
        assert_eq!(parse_key_binding("<Nope>"), None);
    }

    #[test]
    fn test_symbol_matches_with_or_without_shift() {
        let configured = parse_key_binding("?").unwrap();
        let reported = KeyBinding::from(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT));
        assert_eq!(configured, reported);
    }

    #[test]
    fn test_backtab_matches_terminal_report() {
        let keymap = Keymap::default();
        let reported = KeyBinding::from(KeyEvent::new(KeyCode::BackTab, KeyModifiers::NONE));
        assert_eq!(keymap.get(&reported), Some(&Action::PrevSection));
    }

    #[test]
    fn test_default_keymap() {
        let keymap = Keymap::default();
        assert_eq!(keymap.get(&KeyBinding::simple(KeyCode::Char('j'))), Some(&Action::ScrollDown));
        assert_eq!(keymap.get(&KeyBinding::simple(KeyCode::Tab)), Some(&Action::NextSection));
        assert_eq!(keymap.get(&KeyBinding::ctrl(KeyCode::Char('c'))), Some(&Action::Quit));
        assert_eq!(keymap.double_g_action(), Some(&Action::JumpToTop));
        assert!(keymap.is_g_prefix(&KeyBinding::simple(KeyCode::Char('g'))));
    }

    #[test]
    fn test_conflicting_binding_keeps_first() {
        let config = KeymapConfig {
            help: "q".to_string(),
            ..Default::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(keymap.get(&KeyBinding::simple(KeyCode::Char('q'))), Some(&Action::Quit));
    }
}
