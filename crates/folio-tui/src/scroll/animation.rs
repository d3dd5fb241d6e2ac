//! Page scroller: eased movement of the viewport's top row

use std::time::{Duration, Instant};

use super::config::{ScrollConfig, ScrollConfigExt};
use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp_u16, progress};

#[derive(Debug, Clone)]
struct Glide {
    start: Instant,
    from: u16,
    to: u16,
    duration: Duration,
    easing: EasingType,
}

impl Glide {
    fn position(&self) -> u16 {
        let eased = self.easing.apply(progress(self.start, self.duration));
        lerp_u16(self.from, self.to, eased)
    }
}

/// Tracks the page's top row and animates towards scroll targets.
///
/// Key and wheel deltas queue up via `scroll_by` and are folded into a
/// single glide on the next `update`; nav jumps use `scroll_to`.
#[derive(Debug, Clone)]
pub struct PageScroller {
    glide: Option<Glide>,
    config: ScrollConfig,
    position: u16,
    queued: i32,
}

impl Default for PageScroller {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl PageScroller {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            glide: None,
            config,
            position: 0,
            queued: 0,
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.glide.is_some()
    }

    /// Animation running or deltas waiting for the next frame
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.glide.is_some() || self.queued != 0
    }

    /// Row the page will rest on once the current glide finishes
    pub fn target(&self) -> u16 {
        self.glide.as_ref().map(|g| g.to).unwrap_or(self.position)
    }

    /// Row currently shown at the top of the viewport
    #[inline]
    pub fn position(&self) -> u16 {
        self.position
    }

    /// Jump without animating
    pub fn set_position(&mut self, row: u16) {
        self.glide = None;
        self.queued = 0;
        self.position = row;
    }

    /// Glide to an absolute row (nav jumps, top/bottom)
    pub fn scroll_to(&mut self, row: u16, max_scroll: u16) {
        let row = row.min(max_scroll);
        self.queued = 0;

        if !self.config.is_smooth() || row == self.position {
            self.glide = None;
            self.position = row;
            return;
        }

        self.start_glide(row);
    }

    /// Move by a relative number of rows (positive is down)
    pub fn scroll_by(&mut self, delta: i32, max_scroll: u16) {
        if self.config.is_smooth() {
            self.queued += delta;
        } else {
            self.glide = None;
            self.position = clamp_row(self.position as i32 + delta, max_scroll);
        }
    }

    /// One step of line scrolling, `scroll_lines` rows at a time
    pub fn scroll_lines(&mut self, direction: i32, max_scroll: u16) {
        let lines = self.config.scroll_lines.max(1) as i32;
        self.scroll_by(direction.signum() * lines, max_scroll);
    }

    pub fn scroll_half_page(&mut self, direction: i32, viewport_height: u16, max_scroll: u16) {
        let half = (viewport_height / 2).max(1) as i32;
        self.scroll_by(direction.signum() * half, max_scroll);
    }

    pub fn scroll_page(&mut self, direction: i32, viewport_height: u16, max_scroll: u16) {
        let page = viewport_height.max(1) as i32;
        self.scroll_by(direction.signum() * page, max_scroll);
    }

    /// Advance one frame and return the row to render
    pub fn update(&mut self, max_scroll: u16) -> u16 {
        if self.queued != 0 {
            let target = clamp_row(self.target() as i32 + self.queued, max_scroll);
            self.queued = 0;
            if target != self.position {
                self.start_glide(target);
            }
        }

        if let Some(glide) = &self.glide {
            if is_complete(glide.start, glide.duration) {
                self.position = glide.to;
                self.glide = None;
            } else {
                self.position = glide.position();
            }
        }

        self.position = self.position.min(max_scroll);
        self.position
    }

    fn start_glide(&mut self, to: u16) {
        self.glide = Some(Glide {
            start: Instant::now(),
            from: self.position,
            to,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
    }
}

fn clamp_row(row: i32, max_scroll: u16) -> u16 {
    row.clamp(0, max_scroll as i32) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant() -> PageScroller {
        PageScroller::new(ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        })
    }

    #[test]
    fn test_instant_jump_when_smooth_disabled() {
        let mut scroller = instant();
        scroller.scroll_to(100, 200);
        assert_eq!(scroller.position(), 100);
        assert!(!scroller.is_animating());
    }

    #[test]
    fn test_scroll_by_clamps_to_page() {
        let mut scroller = instant();
        scroller.scroll_by(-5, 50);
        assert_eq!(scroller.position(), 0);
        scroller.scroll_by(80, 50);
        assert_eq!(scroller.position(), 50);
    }

    #[test]
    fn test_smooth_scroll_to_starts_glide() {
        let mut scroller = PageScroller::default();
        scroller.scroll_to(100, 200);
        assert!(scroller.is_animating());
        assert_eq!(scroller.target(), 100);
    }

    #[test]
    fn test_queued_deltas_merge_into_one_glide() {
        let mut scroller = PageScroller::default();
        scroller.scroll_by(10, 200);
        scroller.scroll_by(10, 200);
        scroller.scroll_by(10, 200);
        assert!(scroller.needs_update());

        scroller.update(200);
        assert_eq!(scroller.target(), 30);
    }

    #[test]
    fn test_target_clamped_to_max_scroll() {
        let mut scroller = PageScroller::default();
        scroller.set_position(50);
        scroller.scroll_to(300, 100);
        scroller.update(100);
        assert!(scroller.target() <= 100);
        assert!(scroller.position() <= 100);
    }

    #[test]
    fn test_glide_finishes_on_target() {
        let mut scroller = PageScroller::new(ScrollConfig {
            animation_duration_ms: 1,
            ..Default::default()
        });
        scroller.scroll_to(40, 100);
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(scroller.update(100), 40);
        assert!(!scroller.is_animating());
    }

    #[test]
    fn test_page_steps_use_viewport() {
        let mut scroller = instant();
        scroller.scroll_page(1, 20, 100);
        assert_eq!(scroller.position(), 20);
        scroller.scroll_half_page(-1, 20, 100);
        assert_eq!(scroller.position(), 10);
        scroller.scroll_lines(1, 100);
        assert_eq!(scroller.position(), 11);
    }
}
