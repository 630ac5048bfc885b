//! Eased motion of the slide container's horizontal offset.
//!
//! Starting a new motion replaces the old one where it stands. A motion only
//! completes through [`ScrollAnimator::settle`] with the generation it was
//! started under, so a stale completion never lands on a newer target.

use crate::device::Direction;
use crate::schedule::Millis;

use super::easing::{ease, EasingType};
use super::timing::{is_complete, lerp, progress};

/// Horizontal offset that brings block `index` into view
///
/// Under RTL the strip is laid out mirrored, so the offset counts from the
/// last block instead of the first.
pub fn target_offset(index: usize, total: usize, block_width: f64, direction: Direction) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let index = index.min(total - 1);
    let slot = if direction.is_rtl() {
        total - 1 - index
    } else {
        index
    };
    slot as f64 * block_width
}

/// Active motion state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    /// Motion start time
    start: Millis,
    /// Starting offset
    from: f64,
    /// Target offset
    to: f64,
    /// Motion duration
    duration_ms: Millis,
    /// Generation this motion was started under
    generation: u64,
}

/// Strip scroll animation controller
///
/// Call [`ScrollAnimator::start`] to begin a motion, [`ScrollAnimator::frame`]
/// whenever the host renders, and [`ScrollAnimator::settle`] when the
/// motion's completion timer fires.
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    easing: EasingType,
    generation: u64,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(EasingType::default())
    }
}

impl ScrollAnimator {
    pub fn new(easing: EasingType) -> Self {
        Self {
            animation: None,
            easing,
            generation: 0,
        }
    }

    pub fn easing(&self) -> EasingType {
        self.easing
    }

    pub fn set_easing(&mut self, easing: EasingType) {
        self.easing = easing;
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Begin a motion, replacing any in flight; returns its generation
    pub fn start(&mut self, from: f64, to: f64, now: Millis, duration_ms: Millis) -> u64 {
        self.generation += 1;
        self.animation = Some(ActiveAnimation {
            start: now,
            from,
            to,
            duration_ms,
            generation: self.generation,
        });
        self.generation
    }

    /// Interpolated offset at `now`, if a motion is in flight
    pub fn frame(&self, now: Millis) -> Option<f64> {
        let anim = self.animation.as_ref()?;
        if is_complete(anim.start, anim.duration_ms, now) {
            return Some(anim.to);
        }
        let t = progress(anim.start, anim.duration_ms, now);
        Some(lerp(anim.from, anim.to, ease(self.easing, t)))
    }

    /// Finish the motion started under `generation`
    ///
    /// Returns the final offset, or `None` when that motion was replaced
    /// or stopped in the meantime.
    pub fn settle(&mut self, generation: u64) -> Option<f64> {
        match self.animation.as_ref() {
            Some(anim) if anim.generation == generation => {
                let to = anim.to;
                self.animation = None;
                Some(to)
            }
            _ => None,
        }
    }

    /// Stop where it stands without completing
    pub fn stop(&mut self) {
        self.animation = None;
    }
}
