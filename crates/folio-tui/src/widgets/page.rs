//! The scrolling page: every section laid out as rows, top to bottom.
//!
//! Layout happens once per resize or content change. The typewriter line and
//! the stats line change every frame, so the layout only reserves their rows
//! and `PageWidget` fills them in while drawing.

use folio_core::content::{Portfolio, Project, ProjectFilter};
use folio_core::SectionBoundary;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;
use crate::theme::Theme;

const MARGIN: &str = "  ";
const SKILL_BAR_WIDTH: usize = 24;
const SKILL_NAME_WIDTH: usize = 14;

/// Inputs that decide what the page looks like
pub struct PageView<'a> {
    pub portfolio: &'a Portfolio,
    pub filter: &'a ProjectFilter,
    pub categories: &'a [String],
    pub selected_project: usize,
    pub width: u16,
    pub viewport_height: u16,
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub lines: Vec<Line<'static>>,
    /// One entry per rendered section, in page order, measured in rows
    pub boundaries: Vec<SectionBoundary>,
    pub typed_row: Option<usize>,
    pub stats_row: Option<usize>,
    /// First row of each visible project card
    pub project_rows: Vec<usize>,
}

impl PageLayout {
    pub fn build(view: &PageView, theme: &Theme) -> Self {
        let mut builder = Builder {
            layout: PageLayout::default(),
            theme,
            text_width: (view.width as usize).saturating_sub(MARGIN.len() * 2).max(16),
        };

        let last = view.portfolio.nav.len().saturating_sub(1);
        for (i, link) in view.portfolio.nav.iter().enumerate() {
            let top = builder.layout.lines.len();
            match link.id.as_str() {
                "home" => builder.home(view.portfolio),
                "about" => builder.about(view.portfolio, &link.label),
                "skills" => builder.skills(view.portfolio, &link.label),
                "projects" => builder.projects(view, &link.label),
                "contact" => builder.contact(view.portfolio, &link.label),
                // Portfolio::validate rejects anything else
                _ => continue,
            }

            // The hero fills the first screen, and the last section is tall
            // enough that a jump can bring its top to the top of the viewport
            if link.id == "home" || i == last {
                builder.pad_to(top + view.viewport_height as usize);
            }

            let height = builder.layout.lines.len() - top;
            builder
                .layout
                .boundaries
                .push(SectionBoundary::new(link.id.clone(), top as f64, height as f64));
        }

        builder.layout
    }

    pub fn content_height(&self) -> u16 {
        self.lines.len().min(u16::MAX as usize) as u16
    }
}

struct Builder<'t> {
    layout: PageLayout,
    theme: &'t Theme,
    text_width: usize,
}

impl Builder<'_> {
    fn push(&mut self, spans: Vec<Span<'static>>) {
        let mut all = vec![Span::raw(MARGIN)];
        all.extend(spans);
        self.layout.lines.push(Line::from(all));
    }

    fn blank(&mut self) {
        self.layout.lines.push(Line::default());
    }

    fn pad_to(&mut self, rows: usize) {
        while self.layout.lines.len() < rows {
            self.blank();
        }
    }

    fn paragraph(&mut self, text: &str, indent: usize, style: Style) {
        let width = self.text_width.saturating_sub(indent).max(8);
        for row in wrap(text, width) {
            self.push(vec![Span::raw(" ".repeat(indent)), Span::styled(row, style)]);
        }
    }

    fn header(&mut self, title: &str) {
        let rule_len = self.text_width.saturating_sub(title.width() + 4);
        self.blank();
        self.push(vec![
            Span::styled("── ", Style::default().fg(self.theme.secondary)),
            Span::styled(
                title.to_string(),
                Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {}", "─".repeat(rule_len)),
                Style::default().fg(self.theme.secondary),
            ),
        ]);
        self.blank();
    }

    fn home(&mut self, portfolio: &Portfolio) {
        let profile = &portfolio.profile;
        self.blank();
        self.blank();
        self.push(vec![Span::styled(
            "Hello, my name is",
            Style::default().fg(self.theme.muted),
        )]);
        self.push(vec![Span::styled(
            profile.name.clone(),
            Style::default().fg(self.theme.fg0).add_modifier(Modifier::BOLD),
        )]);

        self.layout.typed_row = Some(self.layout.lines.len());
        self.blank();
        self.blank();

        self.paragraph(&profile.summary, 0, Style::default().fg(self.theme.fg1));

        if !portfolio.stats.is_empty() {
            self.blank();
            self.layout.stats_row = Some(self.layout.lines.len());
            self.blank();
        }

        if !profile.links.is_empty() {
            self.blank();
            let mut spans = Vec::new();
            for link in &profile.links {
                spans.push(Span::styled(
                    format!("{} ", link.label),
                    Style::default().fg(self.theme.highlight),
                ));
                spans.push(Span::styled(
                    format!("{}   ", link.url),
                    Style::default().fg(self.theme.muted),
                ));
            }
            self.push(spans);
        }
    }

    fn about(&mut self, portfolio: &Portfolio, title: &str) {
        self.header(title);

        for entry in &portfolio.timeline {
            self.push(vec![
                Span::styled("● ", Style::default().fg(self.theme.accent)),
                Span::styled(entry.period.clone(), Style::default().fg(self.theme.accent)),
            ]);
            self.push(vec![
                Span::raw("  "),
                Span::styled(
                    entry.title.clone(),
                    Style::default().fg(self.theme.fg0).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" · {}", entry.organization),
                    Style::default().fg(self.theme.fg1),
                ),
            ]);
            if !entry.description.is_empty() {
                self.paragraph(&entry.description, 2, Style::default().fg(self.theme.muted));
            }
            self.blank();
        }

        if !portfolio.competencies.is_empty() {
            self.push(vec![Span::styled(
                "Core competencies",
                Style::default().fg(self.theme.secondary).add_modifier(Modifier::BOLD),
            )]);
            for competency in &portfolio.competencies {
                self.push(vec![
                    Span::styled("  ▸ ", Style::default().fg(self.theme.highlight)),
                    Span::styled(competency.clone(), Style::default().fg(self.theme.fg1)),
                ]);
            }
        }
    }

    fn skills(&mut self, portfolio: &Portfolio, title: &str) {
        self.header(title);

        for category in &portfolio.skills {
            self.push(vec![Span::styled(
                category.name.clone(),
                Style::default().fg(self.theme.secondary).add_modifier(Modifier::BOLD),
            )]);
            for skill in &category.skills {
                let filled = SKILL_BAR_WIDTH * skill.level.min(100) as usize / 100;
                self.push(vec![
                    Span::styled(
                        format!("  {}", pad_to_width(&skill.name, SKILL_NAME_WIDTH)),
                        Style::default().fg(self.theme.fg1),
                    ),
                    Span::styled("█".repeat(filled), Style::default().fg(self.theme.accent)),
                    Span::styled(
                        "░".repeat(SKILL_BAR_WIDTH - filled),
                        Style::default().fg(self.theme.bg2),
                    ),
                    Span::styled(
                        format!(" {:>3}%", skill.level),
                        Style::default().fg(self.theme.muted),
                    ),
                ]);
            }
            self.blank();
        }
    }

    fn projects(&mut self, view: &PageView, title: &str) {
        self.header(title);

        let mut filters = vec![ProjectFilter::All];
        filters.extend(view.categories.iter().map(|c| ProjectFilter::Category(c.clone())));
        let mut spans = vec![Span::styled("Filter ", Style::default().fg(self.theme.muted))];
        for filter in filters {
            let style = if &filter == view.filter {
                Style::default()
                    .fg(self.theme.bg0)
                    .bg(self.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.fg1)
            };
            spans.push(Span::styled(format!(" {} ", filter.label()), style));
            spans.push(Span::raw(" "));
        }
        self.push(spans);
        self.blank();

        let mut shown = 0;
        for (i, project) in view.portfolio.filtered_projects(view.filter).enumerate() {
            self.layout.project_rows.push(self.layout.lines.len());
            self.project_card(project, i == view.selected_project);
            shown += 1;
        }
        if shown == 0 {
            self.push(vec![Span::styled(
                "No projects in this category",
                Style::default().fg(self.theme.muted),
            )]);
        }
    }

    fn project_card(&mut self, project: &Project, selected: bool) {
        let (marker, title_style) = if selected {
            (
                "▸ ",
                Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD),
            )
        } else {
            ("  ", Style::default().fg(self.theme.fg0).add_modifier(Modifier::BOLD))
        };

        let mut title = vec![
            Span::styled(marker, Style::default().fg(self.theme.accent)),
            Span::styled(project.title.clone(), title_style),
        ];
        if project.featured {
            title.push(Span::styled(" ★", Style::default().fg(self.theme.warning)));
        }
        self.push(title);

        let mut meta = project.category.clone();
        if !project.tags.is_empty() {
            meta.push_str(" · ");
            meta.push_str(&project.tags.join(", "));
        }
        self.push(vec![
            Span::raw("  "),
            Span::styled(meta, Style::default().fg(self.theme.highlight)),
        ]);
        self.paragraph(&project.description, 2, Style::default().fg(self.theme.fg1));

        let mut links = vec![Span::raw("  ")];
        if let Some(url) = &project.live_url {
            links.push(Span::styled(
                format!("live {}  ", url),
                Style::default().fg(self.theme.info),
            ));
        }
        if let Some(url) = &project.repo_url {
            links.push(Span::styled(format!("code {}", url), Style::default().fg(self.theme.info)));
        }
        if links.len() > 1 {
            self.push(links);
        }
        self.blank();
    }

    fn contact(&mut self, portfolio: &Portfolio, title: &str) {
        self.header(title);
        let profile = &portfolio.profile;

        self.push(vec![Span::styled(
            "Let's work together",
            Style::default().fg(self.theme.fg0).add_modifier(Modifier::BOLD),
        )]);
        self.blank();
        if let Some(email) = &profile.email {
            self.labelled("Email", email);
        }
        if let Some(location) = &profile.location {
            self.labelled("Location", location);
        }
        for link in &profile.links {
            self.labelled(&link.label, &link.url);
        }
        self.blank();
        self.paragraph(
            "Leave a message with: folio contact --name <name> --email <email> --subject <subject> --message <text>",
            0,
            Style::default().fg(self.theme.muted),
        );
    }

    fn labelled(&mut self, label: &str, value: &str) {
        self.push(vec![
            Span::styled(pad_to_width(label, 10), Style::default().fg(self.theme.muted)),
            Span::styled(value.to_string(), Style::default().fg(self.theme.fg1)),
        ]);
    }
}

/// Greedy word wrap by display width; words wider than `width` are split
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        let gap = usize::from(current_width > 0);

        if current_width + gap + word_width <= width {
            if gap == 1 {
                current.push(' ');
            }
            current.push_str(word);
            current_width += gap + word_width;
            continue;
        }

        if current_width > 0 {
            rows.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        for c in word.chars() {
            let w = c.width().unwrap_or(0);
            if current_width + w > width && current_width > 0 {
                rows.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(c);
            current_width += w;
        }
    }

    if current_width > 0 || rows.is_empty() {
        rows.push(current);
    }
    rows
}

fn pad_to_width(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(pad.max(1)))
}

pub struct PageWidget;

impl PageWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let layout = &app.layout;
        let top = app.scroll_row() as usize;
        let bottom = (top + area.height as usize).min(layout.lines.len());

        let lines: Vec<Line> = (top..bottom)
            .map(|row| {
                if Some(row) == layout.typed_row {
                    typed_line(app)
                } else if Some(row) == layout.stats_row {
                    stats_line(app)
                } else {
                    layout.lines[row].clone()
                }
            })
            .collect();

        let paragraph =
            Paragraph::new(lines).style(Style::default().bg(app.theme.bg0).fg(app.theme.fg1));
        frame.render_widget(paragraph, area);
    }
}

fn typed_line(app: &App) -> Line<'static> {
    let theme = &app.theme;
    Line::from(vec![
        Span::raw(MARGIN),
        Span::styled(
            format!("{} ", app.portfolio.profile.headline),
            Style::default().fg(theme.fg1),
        ),
        Span::styled(
            app.typed_text.clone(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "▌",
            Style::default().fg(theme.highlight).add_modifier(Modifier::SLOW_BLINK),
        ),
    ])
}

fn stats_line(app: &App) -> Line<'static> {
    let theme = &app.theme;
    let mut spans = vec![Span::raw(MARGIN)];
    for (stat, counter) in app.portfolio.stats.iter().zip(&app.counters) {
        spans.push(Span::styled(
            format!("{}{}", counter.value(), stat.suffix),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}    ", stat.label),
            Style::default().fg(theme.muted),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(width: u16, viewport_height: u16) -> PageLayout {
        let portfolio = Portfolio::default();
        let categories = portfolio.categories();
        let view = PageView {
            portfolio: &portfolio,
            filter: &ProjectFilter::All,
            categories: &categories,
            selected_project: 0,
            width,
            viewport_height,
        };
        PageLayout::build(&view, &Theme::default())
    }

    #[test]
    fn test_wrap_words() {
        assert_eq!(wrap("the quick brown fox", 9), vec!["the quick", "brown fox"]);
        assert_eq!(wrap("", 10), vec![""]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_wide_chars() {
        // Each CJK character is two columns wide
        assert_eq!(wrap("日本語テキスト", 6), vec!["日本語", "テキス", "ト"]);
    }

    #[test]
    fn test_sections_tile_the_page() {
        let layout = build(80, 30);
        let ids: Vec<&str> = layout.boundaries.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["home", "about", "skills", "projects", "contact"]);

        let mut expected_top = 0.0;
        for boundary in &layout.boundaries {
            assert_eq!(boundary.top_offset, expected_top);
            assert!(boundary.height > 0.0);
            expected_top += boundary.height;
        }
        assert_eq!(expected_top, layout.lines.len() as f64);
    }

    #[test]
    fn test_hero_fills_viewport_and_last_section_reachable() {
        let layout = build(80, 40);
        assert!(layout.boundaries[0].height >= 40.0);

        let contact = layout.boundaries.last().unwrap();
        let max_scroll = layout.content_height() as f64 - 40.0;
        assert!(contact.top_offset <= max_scroll);
    }

    #[test]
    fn test_dynamic_rows_inside_hero() {
        let layout = build(80, 30);
        let hero_end = layout.boundaries[0].height as usize;
        assert!(layout.typed_row.unwrap() < hero_end);
        assert!(layout.stats_row.unwrap() < hero_end);
        assert_eq!(layout.project_rows.len(), 4);
    }

    #[test]
    fn test_narrow_terminal_grows_page() {
        let wide = build(120, 30);
        let narrow = build(40, 30);
        assert!(narrow.lines.len() > wide.lines.len());
    }
}
