use folio_core::config::KeymapConfig;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode, StatusLevel};
use crate::input::jump_keys_label;
use crate::theme::Theme;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let (status_text, status_fg) = match &app.status_message {
            Some(msg) => (format!(" {}", msg), status_color(theme, app.status_level)),
            None => {
                let mode = match app.mode {
                    Mode::Normal => "NORMAL",
                    Mode::Help => "HELP",
                };
                let text = format!(
                    " {} | {} | {:>3.0}% | Filter: {}",
                    mode,
                    app.active_section().unwrap_or("-"),
                    app.progress() * 100.0,
                    app.project_filter.label(),
                );
                (text, theme.fg0)
            }
        };

        let hint = key_hints(
            &app.config.keymap,
            app.portfolio.nav.len(),
            app.show_back_to_top(),
        );

        let padding = (area.width as usize).saturating_sub(status_text.width() + hint.width());
        let bar = Style::default().bg(theme.bg2);

        let line = Line::from(vec![
            Span::styled(status_text, bar.fg(status_fg)),
            Span::styled(" ".repeat(padding), bar),
            Span::styled(hint, bar.fg(theme.muted)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

fn status_color(theme: &Theme, level: StatusLevel) -> Color {
    match level {
        StatusLevel::Info => theme.fg0,
        StatusLevel::Success => theme.success,
        StatusLevel::Error => theme.error,
    }
}

/// Right-hand hints, spelled with the configured keys.
/// Past the back-to-top threshold the scroll hint becomes a "top" hint.
fn key_hints(keys: &KeymapConfig, nav_len: usize, back_to_top: bool) -> String {
    let mut hints = Vec::new();
    if back_to_top {
        hints.push(format!("↑ {}:top", keys.jump_to_top));
    } else {
        hints.push(format!("{}/{}:scroll", keys.scroll_down, keys.scroll_up));
    }
    hints.push(format!("{}:section", keys.next_section));
    if !back_to_top {
        if let Some(range) = jump_keys_label(nav_len) {
            hints.push(format!("{}:jump", range));
        }
    }
    hints.push(format!("{}:help", keys.help));
    hints.push(format!("{}:quit", keys.quit));
    format!(" {} ", hints.join("  "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_use_default_keys() {
        let keys = KeymapConfig::default();
        assert_eq!(
            key_hints(&keys, 5, false),
            " j/k:scroll  <Tab>:section  1-5:jump  ?:help  q:quit "
        );
        assert_eq!(key_hints(&keys, 5, true), " ↑ gg:top  <Tab>:section  ?:help  q:quit ");
    }

    #[test]
    fn test_hints_follow_keymap_and_nav() {
        let keys = KeymapConfig {
            quit: "x".to_string(),
            scroll_down: "<Down>".to_string(),
            scroll_up: "<Up>".to_string(),
            jump_to_top: "<Home>".to_string(),
            ..Default::default()
        };
        assert_eq!(
            key_hints(&keys, 3, false),
            " <Down>/<Up>:scroll  <Tab>:section  1-3:jump  ?:help  x:quit "
        );
        assert!(key_hints(&keys, 3, true).starts_with(" ↑ <Home>:top"));
        assert!(!key_hints(&keys, 0, false).contains(":jump"));
    }

    #[test]
    fn test_status_color_by_level() {
        let theme = Theme::default();
        assert_eq!(status_color(&theme, StatusLevel::Info), theme.fg0);
        assert_eq!(status_color(&theme, StatusLevel::Success), theme.success);
        assert_eq!(status_color(&theme, StatusLevel::Error), theme.error);
    }
}
