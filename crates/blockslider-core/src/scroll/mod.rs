//! Strip scrolling for the slider
//!
//! Moves the slide container's horizontal offset to the active block,
//! instantly or with an eased motion, mirrored under RTL.
//!
//! - `easing`: progress curves (swing, cubic, quintic, exponential)
//! - `timing`: progress and interpolation helpers
//! - `animation`: the strip motion controller
//!
//! # Usage
//!
//! ```ignore
//! use blockslider_core::scroll::{target_offset, ScrollAnimator};
//!
//! let mut animator = ScrollAnimator::default();
//! let to = target_offset(index, total, block_width, direction);
//! let generation = animator.start(surface.scroll_left(), to, now, duration_ms);
//!
//! // Each frame
//! if let Some(offset) = animator.frame(now) {
//!     surface.set_scroll_left(offset)?;
//! }
//!
//! // When the completion timer fires
//! if let Some(offset) = animator.settle(generation) {
//!     surface.set_scroll_left(offset)?;
//! }
//! ```

pub mod animation;
pub mod easing;
pub mod timing;

pub use animation::{target_offset, ScrollAnimator};
pub use easing::{ease, EasingType};
