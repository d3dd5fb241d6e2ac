use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Something the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // first 'g' of "gg"
    NextSection,
    PrevSection,
    /// Nav entry by position, from the digit keys
    JumpToSection(usize),
    CycleFilter,
    NextProject,
    PrevProject,
    OpenProject,
    OpenRepo,
    ToggleHelp,
    ExitMode,
    None,
}

pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    if app.mode == Mode::Help {
        // Any key closes help
        return Action::ExitMode;
    }

    let binding = KeyBinding::from(key);

    if keymap.is_g_prefix(&binding) {
        return if app.pending_key == Some('g') {
            keymap.double_g_action().cloned().unwrap_or(Action::None)
        } else {
            Action::PendingG
        };
    }

    if let Some(action) = keymap.get(&binding) {
        return action.clone();
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::JumpToSection(c as usize - '1' as usize)
        }
        _ => Action::None,
    }
}

/// Digit keys that reach a nav entry, e.g. "1-5"; digits stop at 9
pub fn jump_keys_label(nav_len: usize) -> Option<String> {
    match nav_len.min(9) {
        0 => None,
        1 => Some("1".to_string()),
        last => Some(format!("1-{}", last)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use folio_core::{AppConfig, Portfolio};

    use super::*;
    use crate::theme::Theme;

    fn app() -> App {
        App::new(Arc::new(AppConfig::default()), Portfolio::default(), Theme::default()).unwrap()
    }

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_gg_needs_two_presses() {
        let keymap = Keymap::default();
        let mut app = app();
        assert_eq!(handle_key_event(press('g'), &app, &keymap), Action::PendingG);
        app.pending_key = Some('g');
        assert_eq!(handle_key_event(press('g'), &app, &keymap), Action::JumpToTop);
    }

    #[test]
    fn test_digits_jump_to_sections() {
        let keymap = Keymap::default();
        let app = app();
        assert_eq!(handle_key_event(press('1'), &app, &keymap), Action::JumpToSection(0));
        assert_eq!(handle_key_event(press('4'), &app, &keymap), Action::JumpToSection(3));
        assert_eq!(handle_key_event(press('0'), &app, &keymap), Action::None);
    }

    #[test]
    fn test_any_key_leaves_help() {
        let keymap = Keymap::default();
        let mut app = app();
        app.mode = Mode::Help;
        assert_eq!(handle_key_event(press('j'), &app, &keymap), Action::ExitMode);
    }

    #[test]
    fn test_configured_keys() {
        let keymap = Keymap::default();
        let app = app();
        let shift_g = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(handle_key_event(shift_g, &app, &keymap), Action::JumpToBottom);
        let help = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(handle_key_event(help, &app, &keymap), Action::ToggleHelp);
        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(handle_key_event(tab, &app, &keymap), Action::NextSection);
    }

    #[test]
    fn test_jump_keys_label_follows_nav_length() {
        assert_eq!(jump_keys_label(0), None);
        assert_eq!(jump_keys_label(1).as_deref(), Some("1"));
        assert_eq!(jump_keys_label(5).as_deref(), Some("1-5"));
        assert_eq!(jump_keys_label(12).as_deref(), Some("1-9"));
    }
}
