//! In-memory [`Surface`] used by the terminal host and by tests.
//!
//! It records every style the engine writes and answers measurements from
//! content heights and a viewport width the host keeps up to date.

use std::collections::{HashMap, HashSet};

use super::{Control, Length, Surface, Transition};
use crate::{Error, Result};

/// Operations that can be made to fail on purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceOp {
    MeasureContainer,
    MeasureBlocks,
    MeasureTabs,
    Scroll,
    Visibility,
}

#[derive(Debug, Clone)]
pub struct MemorySurface {
    viewport_width: Option<f64>,
    content_heights: Vec<f64>,
    pending_images: usize,

    block_width: Length,
    strip_width: Length,
    container_height: Length,
    height_transition: Transition,
    min_height: Option<f64>,
    scroll_left: f64,
    margin_top: f64,

    visible: Vec<bool>,
    accessible: Vec<bool>,
    controls: HashMap<Control, bool>,
    selected: Vec<bool>,
    visited: Vec<bool>,
    toolbar_visible: bool,

    tab_width: Length,
    tab_height: Length,
    tab_row_height: f64,
    tab_bar_height: f64,
    tab_bar_top: f64,

    failures: HashSet<SurfaceOp>,
    visibility_writes: usize,
}

impl MemorySurface {
    /// A surface with one block per content height, all visible
    pub fn new(viewport_width: f64, content_heights: Vec<f64>) -> Self {
        let count = content_heights.len();
        Self {
            viewport_width: Some(viewport_width),
            content_heights,
            pending_images: 0,
            block_width: Length::Auto,
            strip_width: Length::Auto,
            container_height: Length::Auto,
            height_transition: Transition::None,
            min_height: None,
            scroll_left: 0.0,
            margin_top: 0.0,
            visible: vec![true; count],
            accessible: vec![true; count],
            controls: HashMap::new(),
            selected: vec![false; count],
            visited: vec![false; count],
            toolbar_visible: true,
            tab_width: Length::Auto,
            tab_height: Length::Auto,
            tab_row_height: 1.0,
            tab_bar_height: 1.0,
            tab_bar_top: 0.0,
            failures: HashSet::new(),
            visibility_writes: 0,
        }
    }

    /// A surface whose slide container was never rendered
    pub fn detached(content_heights: Vec<f64>) -> Self {
        let mut surface = Self::new(0.0, content_heights);
        surface.viewport_width = None;
        surface
    }

    pub fn with_pending_images(mut self, count: usize) -> Self {
        self.pending_images = count;
        self
    }

    pub fn with_tab_bar(mut self, row_height: f64, bar_height: f64) -> Self {
        self.tab_row_height = row_height;
        self.tab_bar_height = bar_height;
        self
    }

    /// Make an operation return an error until cleared
    pub fn fail_on(&mut self, op: SurfaceOp) {
        self.failures.insert(op);
    }

    pub fn clear_failures(&mut self) {
        self.failures.clear();
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = Some(width);
    }

    pub fn set_content_height(&mut self, index: usize, height: f64) {
        if let Some(h) = self.content_heights.get_mut(index) {
            *h = height;
        }
    }

    pub fn image_settled(&mut self) {
        self.pending_images = self.pending_images.saturating_sub(1);
    }

    fn check(&self, op: SurfaceOp) -> Result<()> {
        if self.failures.contains(&op) {
            Err(Error::Surface(format!("{:?} failed", op)))
        } else {
            Ok(())
        }
    }

    fn viewport(&self) -> Result<f64> {
        self.viewport_width
            .ok_or(Error::MissingElement("slide container"))
    }

    fn check_block(&self, index: usize) -> Result<()> {
        if index < self.content_heights.len() {
            Ok(())
        } else {
            Err(Error::MissingElement("block"))
        }
    }

    // Read-side accessors for renderers and assertions

    pub fn viewport_width(&self) -> Option<f64> {
        self.viewport_width
    }

    pub fn block_width(&self) -> Length {
        self.block_width
    }

    pub fn strip_width(&self) -> Length {
        self.strip_width
    }

    pub fn container_height_style(&self) -> Length {
        self.container_height
    }

    pub fn height_transition(&self) -> Transition {
        self.height_transition
    }

    pub fn min_height(&self) -> Option<f64> {
        self.min_height
    }

    pub fn margin_top(&self) -> f64 {
        self.margin_top
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    pub fn visible_blocks(&self) -> Vec<usize> {
        self.visible
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.then_some(i))
            .collect()
    }

    pub fn is_accessible(&self, index: usize) -> bool {
        self.accessible.get(index).copied().unwrap_or(false)
    }

    /// `None` until the engine has written the control's state
    pub fn control_enabled(&self, control: Control) -> Option<bool> {
        self.controls.get(&control).copied()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }

    pub fn selected_indexes(&self) -> Vec<usize> {
        self.selected
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.then_some(i))
            .collect()
    }

    pub fn is_visited(&self, index: usize) -> bool {
        self.visited.get(index).copied().unwrap_or(false)
    }

    pub fn toolbar_visible(&self) -> bool {
        self.toolbar_visible
    }

    pub fn tab_width(&self) -> Length {
        self.tab_width
    }

    pub fn tab_height(&self) -> Length {
        self.tab_height
    }

    pub fn tab_bar_top(&self) -> f64 {
        self.tab_bar_top
    }

    /// Number of visibility writes so far
    pub fn visibility_writes(&self) -> usize {
        self.visibility_writes
    }
}

impl Surface for MemorySurface {
    fn block_count(&self) -> usize {
        self.content_heights.len()
    }

    fn pending_images(&self) -> usize {
        self.pending_images
    }

    fn container_width(&self) -> Result<f64> {
        self.check(SurfaceOp::MeasureContainer)?;
        self.viewport()
    }

    fn container_height(&self) -> Result<f64> {
        self.check(SurfaceOp::MeasureContainer)?;
        self.viewport()?;
        let height = match self.container_height {
            Length::Px(h) => h,
            Length::Auto | Length::Percent(_) => self
                .content_heights
                .iter()
                .copied()
                .fold(0.0, f64::max),
        };
        Ok(self.min_height.map_or(height, |min| height.max(min)))
    }

    fn block_outer_width(&self, index: usize) -> Result<f64> {
        self.check(SurfaceOp::MeasureBlocks)?;
        self.check_block(index)?;
        match self.block_width {
            Length::Px(w) => Ok(w),
            Length::Percent(p) => Ok(self.viewport()? * p / 100.0),
            Length::Auto => self.viewport(),
        }
    }

    fn block_height(&self, index: usize) -> Result<f64> {
        self.check(SurfaceOp::MeasureBlocks)?;
        self.check_block(index)?;
        Ok(self.content_heights[index])
    }

    fn set_block_width(&mut self, width: Length) -> Result<()> {
        self.block_width = width;
        Ok(())
    }

    fn set_strip_width(&mut self, width: Length) -> Result<()> {
        self.strip_width = width;
        Ok(())
    }

    fn set_container_height(&mut self, height: Length, transition: Transition) -> Result<()> {
        self.viewport()?;
        self.container_height = height;
        self.height_transition = transition;
        Ok(())
    }

    fn set_container_min_height(&mut self, min_height: Option<f64>) -> Result<()> {
        self.min_height = min_height;
        Ok(())
    }

    fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    fn set_scroll_left(&mut self, offset: f64) -> Result<()> {
        self.check(SurfaceOp::Scroll)?;
        self.scroll_left = offset.max(0.0);
        Ok(())
    }

    fn set_block_visible(&mut self, index: usize, visible: bool) -> Result<()> {
        self.check(SurfaceOp::Visibility)?;
        self.check_block(index)?;
        self.visible[index] = visible;
        self.visibility_writes += 1;
        Ok(())
    }

    fn set_block_accessible(&mut self, index: usize, accessible: bool) {
        if let Some(a) = self.accessible.get_mut(index) {
            *a = accessible;
        }
    }

    fn set_control_enabled(&mut self, control: Control, enabled: bool) {
        self.controls.insert(control, enabled);
    }

    fn set_index_selected(&mut self, index: usize, selected: bool) {
        if let Some(s) = self.selected.get_mut(index) {
            *s = selected;
        }
    }

    fn mark_index_visited(&mut self, index: usize) {
        if let Some(v) = self.visited.get_mut(index) {
            *v = true;
        }
    }

    fn set_toolbar_visible(&mut self, visible: bool) {
        self.toolbar_visible = visible;
    }

    fn set_tab_width(&mut self, width: Length) -> Result<()> {
        self.tab_width = width;
        Ok(())
    }

    fn set_tab_height(&mut self, height: Length) -> Result<()> {
        self.tab_height = height;
        Ok(())
    }

    fn tab_row_height(&self) -> Result<f64> {
        self.check(SurfaceOp::MeasureTabs)?;
        Ok(self.tab_row_height)
    }

    fn tab_bar_height(&self) -> Result<f64> {
        self.check(SurfaceOp::MeasureTabs)?;
        Ok(self.tab_bar_height)
    }

    fn set_tab_bar_top(&mut self, top: f64) -> Result<()> {
        self.tab_bar_top = top;
        Ok(())
    }

    fn set_container_margin_top(&mut self, margin: f64) -> Result<()> {
        self.margin_top = margin;
        Ok(())
    }
}
