//! Horizontal swipe recognition from raw touch sequences.
//!
//! `Idle -> Tracking -> {swipe | vertical scroll | cancelled}`, back to
//! `Idle` after every touch-end. The recognizer only classifies; the
//! slider decides what a resolved swipe moves.

use tracing::trace;

use crate::device::Direction;

/// Horizontal travel after which the gesture claims the touch from native scrolling
pub const CLAIM_THRESHOLD_PX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TouchGestureState {
    start_x: f64,
    start_y: f64,
    last_x: f64,
    last_y: f64,
}

impl TouchGestureState {
    fn begin(point: TouchPoint) -> Self {
        Self {
            start_x: point.x,
            start_y: point.y,
            last_x: point.x,
            last_y: point.y,
        }
    }

    /// Travel from start to the last seen point, positive when the finger moved left/up
    fn delta(&self) -> (f64, f64) {
        (self.start_x - self.last_x, self.start_y - self.last_y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum GestureState {
    Idle,
    Tracking(TouchGestureState),
    Cancelled,
}

/// Direction of a recognised swipe, before reading direction is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeIntent {
    /// Finger travelled toward the start edge (leftward in LTR)
    Forward,
    Backward,
}

/// Which neighbour a resolved swipe moves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Left,
    Right,
}

impl SwipeIntent {
    pub fn step(self, direction: Direction) -> Step {
        match (self, direction.is_rtl()) {
            (SwipeIntent::Forward, false) | (SwipeIntent::Backward, true) => Step::Right,
            (SwipeIntent::Backward, false) | (SwipeIntent::Forward, true) => Step::Left,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    state: GestureState,
    sensitivity_px: f64,
}

impl GestureRecognizer {
    pub fn new(sensitivity_px: f64) -> Self {
        Self {
            state: GestureState::Idle,
            sensitivity_px,
        }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.state, GestureState::Tracking(_))
    }

    /// Begin tracking; `armed` is false when swiping is off or the breakpoint is disabled
    pub fn touch_start(&mut self, point: TouchPoint, armed: bool) {
        if !armed {
            self.state = GestureState::Idle;
            return;
        }
        self.state = GestureState::Tracking(TouchGestureState::begin(point));
    }

    /// Returns true when native scrolling should be suppressed for this move
    pub fn touch_move(&mut self, point: TouchPoint, armed: bool) -> bool {
        if !armed {
            return false;
        }
        let GestureState::Tracking(ref mut touch) = self.state else {
            return false;
        };

        touch.last_x = point.x;
        touch.last_y = point.y;
        let (dx, dy) = touch.delta();

        if dy.abs() > dx.abs() {
            trace!(dx, dy, "Touch is a vertical scroll, releasing");
            self.state = GestureState::Cancelled;
            return false;
        }

        dx.abs() > CLAIM_THRESHOLD_PX
    }

    /// Finish the sequence and classify it
    pub fn touch_end(&mut self, armed: bool) -> Option<SwipeIntent> {
        let state = std::mem::replace(&mut self.state, GestureState::Idle);
        let GestureState::Tracking(touch) = state else {
            return None;
        };
        if !armed {
            return None;
        }

        let (dx, dy) = touch.delta();
        if dx.abs() < dy.abs() {
            return None;
        }
        if dx.abs() < self.sensitivity_px {
            trace!(dx, sensitivity = self.sensitivity_px, "Swipe below threshold");
            return None;
        }

        if dx > 0.0 {
            Some(SwipeIntent::Forward)
        } else {
            Some(SwipeIntent::Backward)
        }
    }

    /// Drop any sequence in progress
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(recognizer: &mut GestureRecognizer, dx: f64, dy: f64) -> Option<SwipeIntent> {
        recognizer.touch_start(TouchPoint::new(200.0, 200.0), true);
        recognizer.touch_move(TouchPoint::new(200.0 - dx / 2.0, 200.0 - dy / 2.0), true);
        recognizer.touch_move(TouchPoint::new(200.0 - dx, 200.0 - dy), true);
        recognizer.touch_end(true)
    }

    #[test]
    fn test_swipe_over_threshold() {
        let mut r = GestureRecognizer::new(50.0);
        assert_eq!(swipe(&mut r, 60.0, 5.0), Some(SwipeIntent::Forward));
        assert_eq!(swipe(&mut r, -60.0, 5.0), Some(SwipeIntent::Backward));
        assert!(!r.is_tracking());
    }

    #[test]
    fn test_swipe_under_threshold() {
        let mut r = GestureRecognizer::new(50.0);
        assert_eq!(swipe(&mut r, 40.0, 0.0), None);
    }

    #[test]
    fn test_vertical_drag_never_swipes() {
        let mut r = GestureRecognizer::new(50.0);
        assert_eq!(swipe(&mut r, 300.0, 400.0), None);
    }

    #[test]
    fn test_vertical_move_cancels_for_rest_of_sequence() {
        let mut r = GestureRecognizer::new(50.0);
        r.touch_start(TouchPoint::new(0.0, 0.0), true);
        assert!(!r.touch_move(TouchPoint::new(-2.0, -20.0), true));
        // Later horizontal travel cannot revive it
        assert!(!r.touch_move(TouchPoint::new(-200.0, -20.0), true));
        assert_eq!(r.touch_end(true), None);
    }

    #[test]
    fn test_claims_native_scroll_past_ten_px() {
        let mut r = GestureRecognizer::new(50.0);
        r.touch_start(TouchPoint::new(100.0, 100.0), true);
        assert!(!r.touch_move(TouchPoint::new(95.0, 100.0), true));
        assert!(r.touch_move(TouchPoint::new(85.0, 99.0), true));
    }

    #[test]
    fn test_unarmed_stays_idle() {
        let mut r = GestureRecognizer::new(50.0);
        r.touch_start(TouchPoint::new(100.0, 100.0), false);
        assert!(!r.is_tracking());
        assert!(!r.touch_move(TouchPoint::new(0.0, 100.0), false));
        assert_eq!(r.touch_end(false), None);
    }

    #[test]
    fn test_disarmed_mid_gesture_discards() {
        let mut r = GestureRecognizer::new(50.0);
        r.touch_start(TouchPoint::new(100.0, 100.0), true);
        r.touch_move(TouchPoint::new(0.0, 100.0), true);
        assert_eq!(r.touch_end(false), None);
        assert!(!r.is_tracking());
    }

    #[test]
    fn test_tap_without_move_is_not_a_swipe() {
        let mut r = GestureRecognizer::new(50.0);
        swipe(&mut r, 80.0, 0.0);
        r.touch_start(TouchPoint::new(10.0, 10.0), true);
        assert_eq!(r.touch_end(true), None);
    }

    #[test]
    fn test_rtl_swaps_steps() {
        assert_eq!(SwipeIntent::Forward.step(Direction::Ltr), Step::Right);
        assert_eq!(SwipeIntent::Backward.step(Direction::Ltr), Step::Left);
        assert_eq!(SwipeIntent::Forward.step(Direction::Rtl), Step::Left);
        assert_eq!(SwipeIntent::Backward.step(Direction::Rtl), Step::Right);
    }
}
