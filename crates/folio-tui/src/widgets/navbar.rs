use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Top bar: nav links with the active section highlighted, and a progress
/// rule underneath
pub struct NavbarWidget;

impl NavbarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let bar_bg = navbar_background(app);
        let active = app.active_section();

        let mut spans = vec![Span::styled(
            format!(" {} ", app.portfolio.profile.name),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )];
        spans.push(Span::raw("  "));
        for (i, link) in app.portfolio.nav.iter().enumerate() {
            let style = if Some(link.id.as_str()) == active {
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg1)
            };
            spans.push(Span::styled(format!(" {} {} ", i + 1, link.label), style));
            spans.push(Span::raw(" "));
        }

        let mut lines = vec![Line::from(spans)];
        if area.height > 1 {
            lines.push(progress_rule(app, area.width));
        }

        let paragraph = Paragraph::new(lines).style(Style::default().bg(bar_bg));
        frame.render_widget(paragraph, area);
    }
}

/// The bar gains a solid background once the page has scrolled
fn navbar_background(app: &App) -> Color {
    if app.is_scrolled() {
        app.theme.selection
    } else {
        app.theme.bg0
    }
}

fn progress_rule(app: &App, width: u16) -> Line<'static> {
    let theme = &app.theme;
    let width = width as usize;
    if !app.config.ui.show_progress {
        return Line::from(Span::styled("─".repeat(width), Style::default().fg(theme.bg2)));
    }

    let filled = (app.progress() * width as f64).round() as usize;
    let filled = filled.min(width);
    Line::from(vec![
        Span::styled("━".repeat(filled), Style::default().fg(theme.accent)),
        Span::styled("─".repeat(width - filled), Style::default().fg(theme.bg2)),
    ])
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use folio_core::config::{ScrollConfig, ThemeColorOverrides, ThemeConfig};
    use folio_core::{AppConfig, Portfolio};

    use super::*;
    use crate::load_theme;

    #[test]
    fn test_scrolled_navbar_uses_selection_color() {
        let mut config = AppConfig::default();
        config.ui.scroll = ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        let theme = load_theme(&ThemeConfig {
            name: "midnight".to_string(),
            colors: ThemeColorOverrides {
                selection: Some("#123456".to_string()),
                ..Default::default()
            },
        });
        let mut app = App::new(Arc::new(config), Portfolio::default(), theme).unwrap();
        app.resize(100, 33);
        assert_eq!(navbar_background(&app), app.theme.bg0);

        app.scroll_by(10);
        app.update_scroll_animation();
        assert!(app.is_scrolled());
        assert_eq!(navbar_background(&app), Color::Rgb(0x12, 0x34, 0x56));
    }
}
