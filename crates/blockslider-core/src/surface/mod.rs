//! The rendered-article contract the slider measures and mutates.
//!
//! A host's template collaborator produces navigation controls, index
//! buttons, a scrollable slide container, a block-holding strip, the block
//! collection and optional tab bar. [`Surface`] exposes exactly the roles
//! the engine depends on, in host units (pixels in a browser, cells in a
//! terminal).

pub mod memory;

pub use memory::{MemorySurface, SurfaceOp};

use crate::Result;

/// A CSS-like length
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Cleared; normal layout flow decides
    Auto,
    Percent(f64),
    Px(f64),
}

/// How a height change is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    Ease { duration_ms: u64 },
}

/// Navigation controls that can be enabled or disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Previous,
    Next,
    Index(usize),
}

pub trait Surface {
    /// Number of blocks in the rendered article
    fn block_count(&self) -> usize;

    /// Images in the rendered blocks that have neither loaded nor failed
    fn pending_images(&self) -> usize;

    /// Inner width of the scrollable slide container
    fn container_width(&self) -> Result<f64>;

    /// Current rendered height of the slide container
    fn container_height(&self) -> Result<f64>;

    /// Outer width of one block, margins excluded
    fn block_outer_width(&self, index: usize) -> Result<f64>;

    /// Rendered content height of one block
    fn block_height(&self, index: usize) -> Result<f64>;

    /// Width applied to every block
    fn set_block_width(&mut self, width: Length) -> Result<()>;

    /// Width of the strip holding the blocks side by side
    fn set_strip_width(&mut self, width: Length) -> Result<()>;

    fn set_container_height(&mut self, height: Length, transition: Transition) -> Result<()>;

    fn set_container_min_height(&mut self, min_height: Option<f64>) -> Result<()>;

    /// Horizontal scroll offset of the slide container
    fn scroll_left(&self) -> f64;

    fn set_scroll_left(&mut self, offset: f64) -> Result<()>;

    fn set_block_visible(&mut self, index: usize, visible: bool) -> Result<()>;

    /// Whether a block is exposed to assistive technology
    fn set_block_accessible(&mut self, index: usize, accessible: bool);

    fn set_control_enabled(&mut self, control: Control, enabled: bool);

    fn set_index_selected(&mut self, index: usize, selected: bool);

    fn mark_index_visited(&mut self, index: usize);

    /// Show or hide the top and bottom toolbars together
    fn set_toolbar_visible(&mut self, visible: bool);

    fn set_tab_width(&mut self, width: Length) -> Result<()>;

    fn set_tab_height(&mut self, height: Length) -> Result<()>;

    /// Height of the row the tab buttons sit in
    fn tab_row_height(&self) -> Result<f64>;

    /// Height of the whole tab bar
    fn tab_bar_height(&self) -> Result<f64>;

    /// Vertical offset of the tab bar relative to the slide container
    fn set_tab_bar_top(&mut self, top: f64) -> Result<()>;

    fn set_container_margin_top(&mut self, margin: f64) -> Result<()>;
}
