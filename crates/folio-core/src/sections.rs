//! Scroll position to active section mapping
//!
//! Boundaries are measured by the caller from live layout on every call;
//! the tracker never keeps them. The only state carried between calls is the
//! sticky active id.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Vertical range a named section occupies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionBoundary {
    pub id: String,
    pub top_offset: f64,
    pub height: f64,
}

impl SectionBoundary {
    pub fn new(id: impl Into<String>, top_offset: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top_offset,
            height,
        }
    }

    /// Whether the anchor point lands in this section
    ///
    /// The range is open at the top and closed at the bottom.
    #[inline]
    pub fn contains(&self, scroll_y: f64, anchor_offset: f64) -> bool {
        let top = self.top_offset - anchor_offset;
        top < scroll_y && scroll_y <= top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerConfig {
    /// Height of the fixed navigation bar the anchor point is shifted by
    pub anchor_offset: f64,
    /// Scroll distance after which the page counts as scrolled
    pub scrolled_threshold: f64,
    /// Scroll distance after which a back-to-top affordance is shown
    pub back_to_top_threshold: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            anchor_offset: 100.0,
            scrolled_threshold: 50.0,
            back_to_top_threshold: 300.0,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("anchor_offset", self.anchor_offset),
            ("scrolled_threshold", self.scrolled_threshold),
            ("back_to_top_threshold", self.back_to_top_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfiguration(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Tracks which section the navigation should highlight
#[derive(Debug, Clone)]
pub struct ActiveSectionTracker {
    config: TrackerConfig,
    active: Option<String>,
}

impl ActiveSectionTracker {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            active: None,
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Recompute the active section with the configured anchor offset
    pub fn compute_active(
        &mut self,
        scroll_y: f64,
        boundaries: &[SectionBoundary],
    ) -> Option<&str> {
        let anchor_offset = self.config.anchor_offset;
        self.compute_active_with_anchor(scroll_y, boundaries, anchor_offset)
    }

    /// Recompute the active section for an explicit anchor offset
    ///
    /// Overlapping boundaries resolve to the last match in iteration order.
    /// With no match the previous id is kept, unless it is no longer part of
    /// `boundaries`.
    pub fn compute_active_with_anchor(
        &mut self,
        scroll_y: f64,
        boundaries: &[SectionBoundary],
        anchor_offset: f64,
    ) -> Option<&str> {
        let matched = boundaries
            .iter()
            .rev()
            .find(|b| b.contains(scroll_y, anchor_offset));

        match matched {
            Some(boundary) => {
                if self.active.as_deref() != Some(boundary.id.as_str()) {
                    debug!(section = %boundary.id, scroll_y, "active section changed");
                    self.active = Some(boundary.id.clone());
                }
            }
            None => {
                let stale = self
                    .active
                    .as_deref()
                    .is_some_and(|id| !boundaries.iter().any(|b| b.id == id));
                if stale {
                    self.active = None;
                }
            }
        }

        self.active.as_deref()
    }

    /// Whether the page is scrolled past the style threshold
    #[inline]
    pub fn is_scrolled(&self, scroll_y: f64) -> bool {
        scroll_y > self.config.scrolled_threshold
    }

    #[inline]
    pub fn show_back_to_top(&self, scroll_y: f64) -> bool {
        scroll_y > self.config.back_to_top_threshold
    }
}

/// Scroll position that brings a section just below the navigation bar
pub fn scroll_target(id: &str, boundaries: &[SectionBoundary], nav_offset: f64) -> Option<f64> {
    boundaries
        .iter()
        .find(|b| b.id == id)
        .map(|b| (b.top_offset - nav_offset).max(0.0))
}

/// Fraction of the scrollable distance already scrolled, in [0, 1]
pub fn scroll_progress(scroll_y: f64, content_height: f64, viewport_height: f64) -> f64 {
    let scrollable = content_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_y / scrollable).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Vec<SectionBoundary> {
        vec![
            SectionBoundary::new("home", 0.0, 800.0),
            SectionBoundary::new("about", 800.0, 600.0),
        ]
    }

    fn tracker() -> ActiveSectionTracker {
        ActiveSectionTracker::new(TrackerConfig::default()).unwrap()
    }

    #[test]
    fn test_home_then_about() {
        let mut t = tracker();
        assert_eq!(t.compute_active(50.0, &page()), Some("home"));
        assert_eq!(t.compute_active(750.0, &page()), Some("about"));
    }

    #[test]
    fn test_range_edges() {
        let mut t = tracker();
        // home ends at 700 inclusive, about starts after 700
        assert_eq!(t.compute_active(700.0, &page()), Some("home"));
        assert_eq!(t.compute_active(700.5, &page()), Some("about"));
    }

    #[test]
    fn test_no_match_is_sticky() {
        let mut t = tracker();
        t.compute_active(750.0, &page());
        assert_eq!(t.compute_active(10_000.0, &page()), Some("about"));
    }

    #[test]
    fn test_no_match_without_history() {
        let mut t = tracker();
        assert_eq!(t.compute_active(10_000.0, &page()), None);
    }

    #[test]
    fn test_stale_id_cleared() {
        let mut t = tracker();
        t.compute_active(750.0, &page());
        let home_only = vec![SectionBoundary::new("home", 0.0, 800.0)];
        assert_eq!(t.compute_active(10_000.0, &home_only), None);
    }

    #[test]
    fn test_overlap_last_match_wins() {
        let mut t = tracker();
        let overlapping = vec![
            SectionBoundary::new("a", 0.0, 1000.0),
            SectionBoundary::new("b", 200.0, 400.0),
        ];
        assert_eq!(t.compute_active(300.0, &overlapping), Some("b"));
    }

    #[test]
    fn test_idempotent() {
        let mut t = tracker();
        let first = t.compute_active(750.0, &page()).map(str::to_string);
        let second = t.compute_active(750.0, &page()).map(str::to_string);
        assert_eq!(first, second);
    }

    #[test]
    fn test_explicit_anchor() {
        let mut t = tracker();
        // With no anchor correction, 750 is still inside home
        assert_eq!(t.compute_active_with_anchor(750.0, &page(), 0.0), Some("home"));
    }

    #[test]
    fn test_is_scrolled() {
        let t = tracker();
        assert!(!t.is_scrolled(0.0));
        assert!(!t.is_scrolled(50.0));
        assert!(t.is_scrolled(51.0));
        assert!(t.show_back_to_top(301.0));
        assert!(!t.show_back_to_top(300.0));
    }

    #[test]
    fn test_rejects_negative_config() {
        let config = TrackerConfig {
            anchor_offset: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            ActiveSectionTracker::new(config),
            Err(Error::InvalidConfiguration(_))
        ));

        let config = TrackerConfig {
            scrolled_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_scroll_target() {
        assert_eq!(scroll_target("about", &page(), 70.0), Some(730.0));
        assert_eq!(scroll_target("home", &page(), 70.0), Some(0.0));
        assert_eq!(scroll_target("missing", &page(), 70.0), None);
    }

    #[test]
    fn test_scroll_progress() {
        assert_eq!(scroll_progress(0.0, 1400.0, 400.0), 0.0);
        assert!((scroll_progress(500.0, 1400.0, 400.0) - 0.5).abs() < f64::EPSILON);
        assert_eq!(scroll_progress(5000.0, 1400.0, 400.0), 1.0);
        assert_eq!(scroll_progress(10.0, 300.0, 400.0), 0.0);
    }
}
