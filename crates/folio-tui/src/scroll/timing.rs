//! Time and interpolation helpers shared by scroll and counter animations

use std::time::{Duration, Instant};

/// Fraction of `duration` covered by `elapsed`, clamped to [0, 1]
#[inline]
pub fn fraction(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Animation progress since `start`
#[inline]
pub fn progress(start: Instant, duration: Duration) -> f64 {
    fraction(start.elapsed(), duration)
}

#[inline]
pub fn is_complete(start: Instant, duration: Duration) -> bool {
    start.elapsed() >= duration
}

#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Interpolate between two row positions
#[inline]
pub fn lerp_u16(from: u16, to: u16, t: f64) -> u16 {
    lerp(from as f64, to as f64, t).round() as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_u16() {
        assert_eq!(lerp_u16(0, 100, 0.0), 0);
        assert_eq!(lerp_u16(0, 100, 0.5), 50);
        assert_eq!(lerp_u16(100, 0, 0.25), 75);
    }

    #[test]
    fn test_fraction() {
        let second = Duration::from_secs(1);
        assert_eq!(fraction(Duration::ZERO, second), 0.0);
        assert!((fraction(Duration::from_millis(250), second) - 0.25).abs() < 1e-9);
        assert_eq!(fraction(Duration::from_secs(3), second), 1.0);
        assert_eq!(fraction(Duration::ZERO, Duration::ZERO), 1.0);
    }
}
