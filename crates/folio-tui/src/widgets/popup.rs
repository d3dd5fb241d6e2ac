use folio_core::config::KeymapConfig;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::input::jump_keys_label;

/// Key and description pairs shown in the help popup, spelled with the
/// configured keys
fn help_entries(keys: &KeymapConfig, nav_len: usize) -> Vec<(String, &'static str)> {
    let pair = |a: &str, b: &str| format!("{} / {}", a, b);
    let mut entries = vec![
        (pair(&keys.scroll_down, &keys.scroll_up), "scroll line"),
        (pair(&keys.scroll_half_down, &keys.scroll_half_up), "half page"),
        (pair(&keys.scroll_page_down, &keys.scroll_page_up), "full page"),
        (pair(&keys.jump_to_top, &keys.jump_to_bottom), "top / bottom"),
        (
            pair(&keys.next_section, &keys.prev_section),
            "next / previous section",
        ),
    ];
    if let Some(range) = jump_keys_label(nav_len) {
        entries.push((range, "jump to nav entry"));
    }
    entries.extend([
        (keys.cycle_filter.clone(), "cycle project filter"),
        (
            pair(&keys.next_project, &keys.prev_project),
            "next / previous project",
        ),
        (
            pair(&keys.open_project, &keys.open_repo),
            "open live site / repository",
        ),
        (keys.help.clone(), "toggle help"),
        (keys.quit.clone(), "quit"),
    ]);
    entries
}

pub struct PopupWidget;

impl PopupWidget {
    pub fn render_help(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let entries = help_entries(&app.config.keymap, app.portfolio.nav.len());
        let key_width = entries.iter().map(|(key, _)| key.width()).max().unwrap_or(0);

        let area = frame.area();
        let width = (key_width as u16 + 32).min(area.width.saturating_sub(4));
        let height = (entries.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(width, height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));

        let mut lines: Vec<Line> = entries
            .into_iter()
            .map(|(key, description)| {
                let pad = key_width.saturating_sub(key.width()) + 2;
                Line::from(vec![
                    Span::styled(
                        format!(" {}{}", key, " ".repeat(pad)),
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(description, Style::default().fg(theme.fg1)),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(
            Line::from(Span::styled("any key to close", Style::default().fg(theme.muted)))
                .alignment(Alignment::Center),
        );

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

/// Rect of the given size centered in `area`, clipped to it
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_default_keys() {
        let entries = help_entries(&KeymapConfig::default(), 5);
        let keys: Vec<&str> = entries.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys[0], "j / k");
        assert_eq!(keys[3], "gg / G");
        assert!(keys.contains(&"1-5"));
        assert_eq!(keys.last(), Some(&"q"));
    }

    #[test]
    fn test_help_follows_keymap_and_nav() {
        let keys = KeymapConfig {
            quit: "<C-c>".to_string(),
            cycle_filter: "t".to_string(),
            ..Default::default()
        };
        let entries = help_entries(&keys, 2);
        assert!(entries.contains(&("1-2".to_string(), "jump to nav entry")));
        assert!(entries.contains(&("t".to_string(), "cycle project filter")));
        assert!(entries.contains(&("<C-c>".to_string(), "quit")));

        let without_nav = help_entries(&keys, 0);
        assert!(without_nav.iter().all(|(_, description)| *description != "jump to nav entry"));
    }

    #[test]
    fn test_centered_rect() {
        let rect = centered_rect(20, 10, Rect::new(0, 0, 100, 50));
        assert_eq!(rect, Rect::new(40, 20, 20, 10));
    }

    #[test]
    fn test_centered_rect_clips_to_area() {
        let rect = centered_rect(200, 100, Rect::new(5, 5, 40, 20));
        assert_eq!(rect, Rect::new(5, 5, 40, 20));
    }
}
