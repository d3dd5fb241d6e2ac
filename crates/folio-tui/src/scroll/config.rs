//! Duration helpers over the scroll settings from folio-core

use std::time::Duration;

pub use folio_core::{EasingType, ScrollConfig};

pub trait ScrollConfigExt {
    fn animation_duration(&self) -> Duration;

    /// Poll interval while an animation is running
    fn frame_duration(&self) -> Duration;

    /// Smooth scrolling is on and has a non-zero duration
    fn is_smooth(&self) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    fn frame_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScrollConfig::default();
        assert!(config.is_smooth());
        assert_eq!(config.animation_duration(), Duration::from_millis(150));
        assert_eq!(config.easing, EasingType::Cubic);
        assert_eq!(config.frame_duration(), Duration::from_millis(16));
    }

    #[test]
    fn test_zero_fps_falls_back() {
        let config = ScrollConfig {
            animation_fps: 0,
            ..Default::default()
        };
        assert_eq!(config.frame_duration(), Duration::from_millis(16));
    }

    #[test]
    fn test_zero_duration_is_not_smooth() {
        let config = ScrollConfig {
            animation_duration_ms: 0,
            ..Default::default()
        };
        assert!(!config.is_smooth());
    }
}
