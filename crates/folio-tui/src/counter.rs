//! Count-up animation for the hero stats

use std::time::{Duration, Instant};

use folio_core::EasingType;

use crate::scroll::timing::fraction;
use crate::scroll::EasingTypeExt;

/// Counts from 0 to `target` over `duration`.
///
/// Values are derived from elapsed time, so the frame rate only changes how
/// often the number is redrawn, never how fast it climbs.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: u32,
    duration: Duration,
    easing: EasingType,
    started: Option<Instant>,
}

impl CounterAnimation {
    pub fn new(target: u32, duration: Duration, easing: EasingType) -> Self {
        Self {
            target,
            duration,
            easing,
            started: None,
        }
    }

    /// Begin counting; later calls are ignored so the count never restarts
    pub fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    pub fn is_started(&self) -> bool {
        self.started.is_some()
    }

    /// Still climbing towards the target
    pub fn is_running(&self) -> bool {
        self.started
            .map(|start| start.elapsed() < self.duration)
            .unwrap_or(false)
    }

    /// Value to show `elapsed` after the start
    pub fn value_at(&self, elapsed: Duration) -> u32 {
        let t = fraction(elapsed, self.duration);
        if t >= 1.0 {
            return self.target;
        }
        let eased = self.easing.apply(t);
        ((self.target as f64) * eased).floor().min(self.target as f64) as u32
    }

    /// Value to show now; 0 before `start`
    pub fn value(&self) -> u32 {
        match self.started {
            Some(start) => self.value_at(start.elapsed()),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(easing: EasingType) -> CounterAnimation {
        CounterAnimation::new(500, Duration::from_millis(2000), easing)
    }

    #[test]
    fn test_not_started_shows_zero() {
        let c = counter(EasingType::Linear);
        assert_eq!(c.value(), 0);
        assert!(!c.is_running());
    }

    #[test]
    fn test_linear_midpoint() {
        let c = counter(EasingType::Linear);
        assert_eq!(c.value_at(Duration::ZERO), 0);
        assert_eq!(c.value_at(Duration::from_millis(1000)), 250);
    }

    #[test]
    fn test_reaches_exact_target() {
        for easing in [EasingType::Linear, EasingType::Cubic, EasingType::EaseOut] {
            let c = counter(easing);
            assert_eq!(c.value_at(Duration::from_millis(2000)), 500);
            assert_eq!(c.value_at(Duration::from_secs(60)), 500);
        }
    }

    #[test]
    fn test_monotonic() {
        let c = counter(EasingType::Cubic);
        let mut prev = 0;
        for ms in (0..=2100).step_by(50) {
            let v = c.value_at(Duration::from_millis(ms));
            assert!(v >= prev);
            assert!(v <= 500);
            prev = v;
        }
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut c = counter(EasingType::Linear);
        c.start();
        assert!(c.is_started());
        assert!(c.is_running());
        c.start();
        assert!(c.value() <= 500);
    }
}
