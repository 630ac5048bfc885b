//! Easing curves for strip motion.
//!
//! Every curve maps linear progress in [0, 1] onto eased progress in [0, 1]
//! and hits both end points exactly.

use std::f64::consts::PI;

pub use crate::config::EasingType;

/// Eased progress for `t`, clamped to [0, 1] first
pub fn ease(easing: EasingType, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    match easing {
        // Jump straight to the end on the first frame that reaches it
        EasingType::None => t.floor(),
        EasingType::Linear => t,
        EasingType::Swing => 0.5 - (PI * t).cos() / 2.0,
        EasingType::Cubic => 1.0 - (1.0 - t).powi(3),
        EasingType::Quintic => 1.0 - (1.0 - t).powi(5),
        EasingType::EaseOut if t >= 1.0 => 1.0,
        EasingType::EaseOut => 1.0 - 2f64.powf(-10.0 * t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [EasingType; 5] = [
        EasingType::Linear,
        EasingType::Swing,
        EasingType::Cubic,
        EasingType::Quintic,
        EasingType::EaseOut,
    ];

    #[test]
    fn test_end_points() {
        for easing in CURVES {
            assert!(ease(easing, 0.0).abs() < 1e-9, "{:?} at 0", easing);
            assert!((ease(easing, 1.0) - 1.0).abs() < 1e-9, "{:?} at 1", easing);
        }
        assert_eq!(ease(EasingType::None, 0.99), 0.0);
        assert_eq!(ease(EasingType::None, 1.0), 1.0);
    }

    #[test]
    fn test_swing_is_symmetric() {
        assert!((ease(EasingType::Swing, 0.5) - 0.5).abs() < 1e-9);
        let a = ease(EasingType::Swing, 0.25);
        let b = ease(EasingType::Swing, 0.75);
        assert!((a + b - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_clamped() {
        assert_eq!(ease(EasingType::Linear, -0.5), 0.0);
        assert_eq!(ease(EasingType::Cubic, 3.0), 1.0);
    }

    #[test]
    fn test_monotonic() {
        for easing in CURVES {
            let mut prev = 0.0;
            for i in 0..=20 {
                let v = ease(easing, f64::from(i) / 20.0);
                assert!(v >= prev, "{:?} dips at step {}", easing, i);
                prev = v;
            }
        }
    }
}
