//! Width, height, tab-bar and visibility layout of the slider.
//!
//! Every function measures through the [`Surface`] and writes styles back;
//! none keeps state, so each is safe to call redundantly. When the current
//! breakpoint is disabled the slider degrades to stacked blocks in normal
//! layout flow.

use tracing::debug;

use crate::config::SliderConfig;
use crate::surface::{Length, Surface, Transition};
use crate::Result;

/// Extra spacing between the tab bar and the slide container
pub const DEFAULT_TAB_MARGIN: f64 = 30.0;

/// What a height pass did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeightOutcome {
    /// Breakpoint disabled: height cleared, carousel visibility suspended
    Suspended,
    /// No blocks to measure
    Empty,
    Set { height: f64 },
}

/// Size blocks to the container and the strip to hold all of them side by side
pub fn resize_width<S: Surface + ?Sized>(surface: &mut S, enabled: bool) -> Result<()> {
    if !enabled {
        surface.set_block_width(Length::Auto)?;
        return surface.set_strip_width(Length::Percent(100.0));
    }

    let container_width = surface.container_width()?;
    let count = surface.block_count();
    if count == 0 {
        return Ok(());
    }

    surface.set_block_width(Length::Px(container_width))?;
    let block_width = surface.block_outer_width(0)?;
    let total = count as f64 * block_width;
    surface.set_strip_width(Length::Px(total))?;

    debug!(block_width, total, "Slider width recalculated");
    Ok(())
}

/// Fit the container height to the blocks
///
/// Uniform mode uses the tallest block, otherwise the active one. A
/// configured minimum height is applied as a floor in both modes.
pub fn resize_height<S: Surface + ?Sized>(
    surface: &mut S,
    config: &SliderConfig,
    enabled: bool,
    current: usize,
    animate: bool,
) -> Result<HeightOutcome> {
    if !enabled {
        surface.set_container_height(Length::Auto, Transition::None)?;
        surface.set_container_min_height(None)?;
        return Ok(HeightOutcome::Suspended);
    }

    if surface.block_count() == 0 {
        return Ok(HeightOutcome::Empty);
    }

    let height = if config.has_uniform_height {
        tallest_block(surface)?
    } else {
        surface.block_height(current)?
    };

    let transition = if animate {
        Transition::Ease {
            duration_ms: config.height_transition_ms(),
        }
    } else {
        Transition::None
    };

    surface.set_container_height(Length::Px(height), transition)?;
    if let Some(min_height) = config.min_height_px {
        surface.set_container_min_height(Some(min_height))?;
    }

    debug!(height, animate, "Slider height recalculated");
    Ok(HeightOutcome::Set { height })
}

/// Height of the tallest block
pub fn tallest_block<S: Surface + ?Sized>(surface: &S) -> Result<f64> {
    let mut tallest = 0.0_f64;
    for index in 0..surface.block_count() {
        tallest = tallest.max(surface.block_height(index)?);
    }
    Ok(tallest)
}

/// Lay out the tab bar as an overlay above the strip
///
/// Tab buttons share the bar width equally and take the row's height; the
/// container is pushed down by the bar height plus `margin`.
pub fn resize_tabs<S: Surface + ?Sized>(
    surface: &mut S,
    config: &SliderConfig,
    tab_count: usize,
    margin: f64,
) -> Result<()> {
    if !config.has_tabs || tab_count == 0 {
        return Ok(());
    }

    surface.set_tab_width(Length::Percent(100.0 / tab_count as f64))?;

    surface.set_tab_height(Length::Auto)?;
    let row_height = surface.tab_row_height()?;
    surface.set_tab_height(Length::Px(row_height))?;

    let bar_height = surface.tab_bar_height()?;
    surface.set_tab_bar_top(-(bar_height + margin / 2.0))?;
    surface.set_container_margin_top(bar_height + margin)?;

    Ok(())
}

pub fn show_all<S: Surface + ?Sized>(surface: &mut S) -> Result<()> {
    for index in 0..surface.block_count() {
        surface.set_block_visible(index, true)?;
    }
    Ok(())
}

/// Leave only the active block visible
pub fn hide_others<S: Surface + ?Sized>(surface: &mut S, current: usize) -> Result<()> {
    for index in 0..surface.block_count() {
        surface.set_block_visible(index, index == current)?;
    }
    Ok(())
}
