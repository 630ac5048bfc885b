//! Progress and interpolation helpers over the host's millisecond clock.

use crate::schedule::Millis;

/// Animation progress (0.0 to 1.0) at `now`
///
/// # Arguments
/// * `start` - Animation start time
/// * `duration_ms` - Total animation duration
/// * `now` - Current time
///
/// # Returns
/// Progress value clamped to [0.0, 1.0]
#[inline]
pub fn progress(start: Millis, duration_ms: Millis, now: Millis) -> f64 {
    if duration_ms == 0 {
        return 1.0;
    }
    let elapsed = now.saturating_sub(start);
    let ratio = elapsed as f64 / duration_ms as f64;
    ratio.clamp(0.0, 1.0)
}

/// Check if animation is complete
#[inline]
pub fn is_complete(start: Millis, duration_ms: Millis, now: Millis) -> bool {
    now.saturating_sub(start) >= duration_ms
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
        assert!((lerp(600.0, 300.0, 0.5) - 450.0).abs() < 0.001);
    }

    #[test]
    fn test_progress() {
        assert!((progress(100, 200, 100) - 0.0).abs() < 0.001);
        assert!((progress(100, 200, 200) - 0.5).abs() < 0.001);
        assert!((progress(100, 200, 900) - 1.0).abs() < 0.001);
        // Clock reading before the start clamps to zero
        assert!((progress(100, 200, 50) - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_zero_duration() {
        assert!((progress(10, 0, 10) - 1.0).abs() < 0.001);
        assert!(is_complete(10, 0, 10));
    }
}
