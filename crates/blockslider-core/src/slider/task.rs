use crate::resize::OrientationStep;

/// Deferred slider work queued on the scheduler
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Task {
    /// Images settled and the settle delay ran out
    SettleElapsed,
    /// Final delay of the ready sequence ran out
    ReadyElapsed,
    /// Trailing debounced hide of inactive blocks
    HideOthers,
    ClearAnimationOverride,
    /// Trailing resize notification after a move
    NotifyResize,
    /// Unanimated scroll, applied one tick after it was computed
    ApplyScroll(f64),
    /// Completion of the animated scroll started under this generation
    ScrollSettled(u64),
    MoveTo(usize),
    ScrollToCurrent,
    Orientation(OrientationStep),
}
