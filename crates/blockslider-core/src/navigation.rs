//! Active-index state and navigation control bookkeeping.

use std::str::FromStr;

use serde::Serialize;
use tracing::warn;

use crate::surface::{Control, Surface};
use crate::{Error, Result};

/// One entry of the index/tab button row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemButton {
    pub index: usize,
    pub title: String,
    pub is_home: bool,
    /// Whether templates print the ordinal next to the title
    pub include_number: bool,
}

impl ItemButton {
    pub fn new(index: usize, title: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            is_home: index == 0,
            include_number: index != 0,
        }
    }

    /// Class list templates attach to the button
    pub fn class_name(&self) -> String {
        let base = if self.is_home { "home" } else { "not-home" };
        format!("{} i{}", base, self.index)
    }
}

/// Navigation state; only the slider mutates it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SliderState {
    current_index: usize,
    total_blocks: usize,
    item_buttons: Vec<ItemButton>,
    configured: bool,
}

impl SliderState {
    /// Set up from block titles; later calls are ignored
    pub fn configure<I, T>(&mut self, titles: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        if self.configured {
            warn!("Slider state already configured, ignoring");
            return;
        }
        self.item_buttons = titles
            .into_iter()
            .enumerate()
            .map(|(index, title)| ItemButton::new(index, title))
            .collect();
        self.total_blocks = self.item_buttons.len();
        self.current_index = 0;
        self.configured = true;
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[inline]
    pub fn total_blocks(&self) -> usize {
        self.total_blocks
    }

    pub fn item_buttons(&self) -> &[ItemButton] {
        &self.item_buttons
    }

    pub fn last_index(&self) -> usize {
        self.total_blocks.saturating_sub(1)
    }

    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_index == self.last_index()
    }

    /// Move to `index`, clamped to the block range; true when it changed
    pub fn set_current(&mut self, index: usize) -> bool {
        let clamped = index.min(self.last_index());
        if clamped != index {
            warn!(index, clamped, "Slider index out of range, clamping");
        }
        if clamped == self.current_index {
            return false;
        }
        self.current_index = clamped;
        true
    }
}

/// A clickable navigation control, as tagged in the rendered template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlId {
    Left,
    Right,
    Index(usize),
}

impl ControlId {
    /// Parse the `data-block-slider` kind plus, for `index`, the
    /// `data-block-slider-index` value
    pub fn from_attributes(kind: &str, index: Option<&str>) -> Result<Self> {
        match kind {
            "left" => Ok(ControlId::Left),
            "right" => Ok(ControlId::Right),
            "index" => {
                let raw = index
                    .ok_or_else(|| Error::InvalidControl("index control without an index".into()))?;
                raw.trim()
                    .parse::<usize>()
                    .map(ControlId::Index)
                    .map_err(|_| Error::InvalidControl(format!("bad index '{}'", raw)))
            }
            other => Err(Error::InvalidControl(format!("unknown control '{}'", other))),
        }
    }
}

impl FromStr for ControlId {
    type Err = Error;

    /// Accepts `left`, `right` or `index:<n>`
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((kind, index)) => Self::from_attributes(kind, Some(index)),
            None => Self::from_attributes(s, None),
        }
    }
}

/// Write control enablement, selection and block accessibility for the current state
///
/// Previous is disabled only at the first block, next only at the last;
/// every index control is enabled and unselected except the current one,
/// which is disabled, selected and marked visited. Only the active block
/// stays exposed to assistive technology.
pub fn refresh_controls<S: Surface + ?Sized>(surface: &mut S, state: &SliderState) {
    let current = state.current_index();

    surface.set_control_enabled(Control::Previous, !state.is_first());
    surface.set_control_enabled(Control::Next, !state.is_last());

    for button in state.item_buttons() {
        let is_current = button.index == current;
        surface.set_control_enabled(Control::Index(button.index), !is_current);
        surface.set_index_selected(button.index, is_current);
    }
    surface.mark_index_visited(current);

    let block_count = surface.block_count();
    if block_count == 0 {
        return;
    }
    for index in 0..block_count {
        surface.set_block_accessible(index, index == current);
    }
}
