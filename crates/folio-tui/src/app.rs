use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use folio_core::sections::{scroll_progress, scroll_target};
use folio_core::{ActiveSectionTracker, AppConfig, Portfolio, Project, ProjectFilter};
use tracing::debug;
use url::Url;

use crate::counter::CounterAnimation;
use crate::scroll::PageScroller;
use crate::theme::Theme;
use crate::typewriter::TypewriterFrame;
use crate::widgets::page::{PageLayout, PageView};

/// Rows above the page: nav links and the progress rule
pub const NAVBAR_HEIGHT: u16 = 2;
/// Rows below the page
pub const STATUS_BAR_HEIGHT: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
}

/// How a status message is colored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLevel {
    #[default]
    Info,
    Success,
    Error,
}

pub struct App {
    pub config: Arc<AppConfig>,
    pub portfolio: Portfolio,
    pub theme: Theme,
    pub mode: Mode,
    pub scroller: PageScroller,
    pub tracker: ActiveSectionTracker,
    pub layout: PageLayout,
    pub width: u16,
    pub viewport_height: u16,
    /// Typewriter text currently shown in the hero
    pub typed_text: String,
    pub counters: Vec<CounterAnimation>,
    pub categories: Vec<String>,
    pub project_filter: ProjectFilter,
    /// Index into the filtered project list
    pub selected_project: usize,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub status_level: StatusLevel,
    pub pending_key: Option<char>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, portfolio: Portfolio, theme: Theme) -> Result<Self> {
        let tracker = ActiveSectionTracker::new(config.tracker_config())?;
        let counter_duration = Duration::from_millis(config.ui.counter_duration_ms);
        let counters = portfolio
            .stats
            .iter()
            .map(|stat| {
                CounterAnimation::new(stat.value, counter_duration, config.ui.scroll.easing)
            })
            .collect();

        let mut app = Self {
            scroller: PageScroller::new(config.ui.scroll.clone()),
            categories: portfolio.categories(),
            config,
            portfolio,
            theme,
            mode: Mode::Normal,
            tracker,
            layout: PageLayout::default(),
            width: 80,
            viewport_height: 24 - NAVBAR_HEIGHT - STATUS_BAR_HEIGHT,
            typed_text: String::new(),
            counters,
            project_filter: ProjectFilter::All,
            selected_project: 0,
            should_quit: false,
            status_message: None,
            status_level: StatusLevel::Info,
            pending_key: None,
        };
        app.relayout();
        Ok(app)
    }

    /// Terminal size changed; re-wrap the page and re-evaluate the active section
    pub fn resize(&mut self, width: u16, height: u16) {
        let viewport_height = height.saturating_sub(NAVBAR_HEIGHT + STATUS_BAR_HEIGHT).max(1);
        if width == self.width && viewport_height == self.viewport_height {
            return;
        }
        self.width = width;
        self.viewport_height = viewport_height;
        self.relayout();
    }

    /// Rebuild the page rows and section boundaries
    pub fn relayout(&mut self) {
        let view = PageView {
            portfolio: &self.portfolio,
            filter: &self.project_filter,
            categories: &self.categories,
            selected_project: self.selected_project,
            width: self.width,
            viewport_height: self.viewport_height,
        };
        self.layout = PageLayout::build(&view, &self.theme);

        let max_scroll = self.max_scroll();
        if self.scroller.position() > max_scroll {
            self.scroller.set_position(max_scroll);
        }
        self.recompute_active();
    }

    pub fn max_scroll(&self) -> u16 {
        self.layout.content_height().saturating_sub(self.viewport_height)
    }

    /// Top row of the viewport
    pub fn scroll_row(&self) -> u16 {
        self.scroller.position()
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroller.position() as f64
    }

    /// Advance scroll animation by one frame, then refresh everything that
    /// depends on the scroll position
    pub fn update_scroll_animation(&mut self) {
        let max_scroll = self.max_scroll();
        self.scroller.update(max_scroll);
        self.recompute_active();
        self.start_visible_counters();
    }

    /// Frame-rate polling is needed while something is moving
    pub fn needs_fast_update(&self) -> bool {
        self.scroller.needs_update() || self.counters.iter().any(|c| c.is_running())
    }

    pub fn recompute_active(&mut self) {
        let scroll_y = self.scroll_y();
        self.tracker.compute_active(scroll_y, &self.layout.boundaries);
    }

    pub fn active_section(&self) -> Option<&str> {
        self.tracker.active()
    }

    pub fn is_scrolled(&self) -> bool {
        self.tracker.is_scrolled(self.scroll_y())
    }

    pub fn show_back_to_top(&self) -> bool {
        self.tracker.show_back_to_top(self.scroll_y())
    }

    pub fn progress(&self) -> f64 {
        scroll_progress(
            self.scroll_y(),
            self.layout.content_height() as f64,
            self.viewport_height as f64,
        )
    }

    fn start_visible_counters(&mut self) {
        let Some(row) = self.layout.stats_row else {
            return;
        };
        let top = self.scroll_row() as usize;
        if (top..top + self.viewport_height as usize).contains(&row) {
            for counter in &mut self.counters {
                counter.start();
            }
        }
    }

    pub fn apply_typewriter_frame(&mut self, frame: TypewriterFrame) {
        self.typed_text = frame.text;
    }

    // Scrolling

    pub fn scroll_lines(&mut self, direction: i32) {
        let max_scroll = self.max_scroll();
        self.scroller.scroll_lines(direction, max_scroll);
    }

    pub fn scroll_by(&mut self, rows: i32) {
        let max_scroll = self.max_scroll();
        self.scroller.scroll_by(rows, max_scroll);
    }

    pub fn scroll_half_page(&mut self, direction: i32) {
        let max_scroll = self.max_scroll();
        self.scroller.scroll_half_page(direction, self.viewport_height, max_scroll);
    }

    pub fn scroll_page(&mut self, direction: i32) {
        let max_scroll = self.max_scroll();
        self.scroller.scroll_page(direction, self.viewport_height, max_scroll);
    }

    pub fn jump_to_top(&mut self) {
        let max_scroll = self.max_scroll();
        self.scroller.scroll_to(0, max_scroll);
    }

    pub fn jump_to_bottom(&mut self) {
        let max_scroll = self.max_scroll();
        self.scroller.scroll_to(max_scroll, max_scroll);
    }

    // Section navigation

    /// Scroll so the section's top sits just under the navbar.
    /// Returns false for ids with no rendered section.
    pub fn jump_to_section(&mut self, id: &str) -> bool {
        let Some(target) = scroll_target(id, &self.layout.boundaries, self.config.nav.jump_offset)
        else {
            return false;
        };
        let max_scroll = self.max_scroll();
        self.scroller.scroll_to(target.round() as u16, max_scroll);
        debug!(section = id, target, "jumping to section");
        true
    }

    /// Jump by nav position (0-based)
    pub fn jump_to_nav(&mut self, index: usize) -> bool {
        match self.portfolio.nav.get(index) {
            Some(link) => {
                let id = link.id.clone();
                self.jump_to_section(&id)
            }
            None => false,
        }
    }

    pub fn next_section(&mut self) {
        let next = match self.section_index_at_target() {
            Some(i) => (i + 1).min(self.layout.boundaries.len().saturating_sub(1)),
            None => 0,
        };
        self.jump_to_boundary(next);
    }

    pub fn prev_section(&mut self) {
        let prev = self
            .section_index_at_target()
            .map(|i| i.saturating_sub(1))
            .unwrap_or(0);
        self.jump_to_boundary(prev);
    }

    fn jump_to_boundary(&mut self, index: usize) {
        if let Some(boundary) = self.layout.boundaries.get(index) {
            let id = boundary.id.clone();
            self.jump_to_section(&id);
        }
    }

    /// Section under the anchor once the current glide settles, so repeated
    /// presses step through sections even mid-animation
    fn section_index_at_target(&self) -> Option<usize> {
        let target = self.scroller.target() as f64;
        let anchor = self.tracker.config().anchor_offset;
        self.layout
            .boundaries
            .iter()
            .rposition(|b| b.contains(target, anchor))
    }

    // Projects

    pub fn filtered_projects(&self) -> Vec<&Project> {
        self.portfolio.filtered_projects(&self.project_filter).collect()
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.portfolio
            .filtered_projects(&self.project_filter)
            .nth(self.selected_project)
    }

    pub fn cycle_filter(&mut self) {
        self.project_filter = self.project_filter.next(&self.categories);
        self.selected_project = 0;
        let shown = self.filtered_projects().len();
        self.set_status(format!("Filter: {} ({} projects)", self.project_filter.label(), shown));
        self.relayout();
    }

    pub fn next_project(&mut self) {
        let count = self.filtered_projects().len();
        if count > 0 && self.selected_project + 1 < count {
            self.selected_project += 1;
            self.relayout();
            self.reveal_selected_project();
        }
    }

    pub fn prev_project(&mut self) {
        if self.selected_project > 0 {
            self.selected_project -= 1;
            self.relayout();
            self.reveal_selected_project();
        }
    }

    fn reveal_selected_project(&mut self) {
        let Some(&row) = self.layout.project_rows.get(self.selected_project) else {
            return;
        };
        let top = self.scroller.target() as usize;
        let bottom = top + self.viewport_height as usize;
        // Keep a few rows of the card visible below its title
        if row < top || row + 4 > bottom {
            let max_scroll = self.max_scroll();
            self.scroller.scroll_to(row.saturating_sub(2) as u16, max_scroll);
        }
    }

    pub fn open_project(&mut self) {
        let url = self.selected_project().and_then(|p| p.live_url.clone());
        match url {
            Some(url) => self.open_url(&url),
            None => self.set_status("No live link for this project"),
        }
    }

    pub fn open_repo(&mut self) {
        let url = self.selected_project().and_then(|p| p.repo_url.clone());
        match url {
            Some(url) => self.open_url(&url),
            None => self.set_status("No repository link for this project"),
        }
    }

    fn open_url(&mut self, raw: &str) {
        let Some(url) = checked_url(raw) else {
            self.set_status_level(StatusLevel::Error, format!("Refusing to open '{}'", raw));
            return;
        };
        match open::that(url.as_str()) {
            Ok(()) => self.set_status_level(StatusLevel::Success, format!("Opening: {}", url)),
            Err(e) => {
                self.set_status_level(StatusLevel::Error, format!("Failed to open browser: {}", e))
            }
        }
    }

    // Modes and status

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            Mode::Normal => Mode::Help,
            Mode::Help => Mode::Normal,
        };
    }

    pub fn exit_mode(&mut self) {
        self.mode = Mode::Normal;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.set_status_level(StatusLevel::Info, message);
    }

    pub fn set_status_level(&mut self, level: StatusLevel, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_level = level;
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
        self.status_level = StatusLevel::Info;
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }
}

/// Only web and mail links are handed to the system opener
fn checked_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw).ok()?;
    matches!(url.scheme(), "http" | "https" | "mailto").then_some(url)
}
