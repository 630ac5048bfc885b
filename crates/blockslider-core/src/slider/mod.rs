//! The block slider: one article's blocks shown one at a time.
//!
//! [`BlockSlider`] owns the navigation state, the gesture recognizer, the
//! strip animator and the readiness gate, and drives them from host
//! signals, user input and its own timers. Nothing here blocks or reads a
//! clock: the host calls [`BlockSlider::advance`] with its current time and
//! every deferred step runs from there.

mod task;

use tracing::{debug, info, warn};

use crate::article::ArticleModel;
use crate::bus::{EventBus, HostBus, HostSignal, SliderEvent, Subscription, ViewPhase};
use crate::config::SliderConfig;
use crate::device::{Device, ScreenSize};
use crate::gesture::{GestureRecognizer, Step, TouchPoint};
use crate::layout::{self, HeightOutcome, DEFAULT_TAB_MARGIN};
use crate::navigation::{self, ControlId, SliderState};
use crate::readiness::{GatePhase, ReadinessGate, ReadinessWaiter, READY_DELAY_MS, SETTLE_DELAY_MS};
use crate::resize::{self, OrientationStep, PipelineReport, Stage, ORIENTATION_DELAY_MS};
use crate::schedule::{Debouncer, Millis, Scheduler};
use crate::scroll::{target_offset, EasingType, ScrollAnimator};
use crate::surface::Surface;
use crate::Result;

use task::Task;

/// Window in which repeated hide-others calls collapse into one
pub const HIDE_OTHERS_DEBOUNCE_MS: Millis = 200;

pub struct BlockSlider<S: Surface> {
    article: ArticleModel,
    config: SliderConfig,
    device: Device,
    surface: S,

    state: SliderState,
    gesture: GestureRecognizer,
    animator: ScrollAnimator,
    gate: ReadinessGate,

    scheduler: Scheduler<Task>,
    hide_others: Debouncer,

    signals: Subscription<HostSignal>,
    events: EventBus<SliderEvent>,

    /// Set once the ready sequence finishes; animated moves need it
    ready: bool,
    /// Forces the next moves unanimated until the following tick
    disable_animation_once: bool,
    component_resize_bound: bool,
    tab_margin: f64,
    rendered: bool,
    torn_down: bool,
}

impl<S: Surface> BlockSlider<S> {
    /// Wire a slider to its rendered surface and the host's bus
    pub fn new(
        article: ArticleModel,
        config: SliderConfig,
        device: Device,
        surface: S,
        bus: &HostBus,
    ) -> Self {
        let gesture = GestureRecognizer::new(config.swipe_sensitivity_px);
        Self {
            article,
            config,
            device,
            surface,
            state: SliderState::default(),
            gesture,
            animator: ScrollAnimator::default(),
            gate: ReadinessGate::new(),
            scheduler: Scheduler::new(),
            hide_others: Debouncer::new(HIDE_OTHERS_DEBOUNCE_MS),
            signals: bus.signals.subscribe(),
            events: bus.events.clone(),
            ready: false,
            disable_animation_once: false,
            component_resize_bound: false,
            tab_margin: DEFAULT_TAB_MARGIN,
            rendered: false,
            torn_down: false,
        }
    }

    pub fn with_easing(mut self, easing: EasingType) -> Self {
        self.animator.set_easing(easing);
        self
    }

    /// Spacing between tab bar and slides, in surface units
    pub fn with_tab_margin(mut self, margin: f64) -> Self {
        self.tab_margin = margin;
        self
    }

    // Accessors

    pub fn article(&self) -> &ArticleModel {
        &self.article
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable surface access for the host's measurements
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn state(&self) -> &SliderState {
        &self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn readiness_phase(&self) -> GatePhase {
        self.gate.phase()
    }

    /// Observer that resolves once the ready sequence completes
    pub fn readiness(&self) -> ReadinessWaiter {
        self.gate.waiter()
    }

    /// Time of the next queued step, so idle hosts know when to wake
    pub fn next_deadline(&self) -> Option<Millis> {
        self.scheduler.next_deadline()
    }

    pub fn now(&self) -> Millis {
        self.scheduler.now()
    }

    /// Whether the slider layout applies at the current screen size
    pub fn is_enabled_here(&self) -> bool {
        self.config.is_enabled_on(self.device.screen_size)
    }

    fn animations_allowed(&self) -> bool {
        self.ready && !self.disable_animation_once
    }

    // Lifecycle

    /// Build navigation state from the rendered blocks and start the ready sequence
    pub fn render(&mut self) {
        if self.rendered || self.torn_down {
            return;
        }
        self.rendered = true;

        self.publish_phase(ViewPhase::PreRender);
        self.state
            .configure(self.article.blocks.iter().map(|b| b.title.clone()));
        self.publish_phase(ViewPhase::Render);

        let pending = self.surface.pending_images();
        info!(
            article_id = %self.article.id,
            blocks = self.state.total_blocks(),
            pending_images = pending,
            "Block slider rendered"
        );
        if self.gate.begin(pending) {
            self.scheduler.delay(SETTLE_DELAY_MS, Task::SettleElapsed);
        }
    }

    /// One rendered image finished loading or failed
    pub fn image_settled(&mut self) {
        if self.torn_down {
            return;
        }
        if self.gate.image_settled() {
            debug!(article_id = %self.article.id, "All slider images settled");
            self.scheduler.delay(SETTLE_DELAY_MS, Task::SettleElapsed);
        }
    }

    /// Process queued signals and every step due by `now`
    ///
    /// Call before feeding input so moves are timed from the present.
    pub fn advance(&mut self, now: Millis) {
        if self.torn_down {
            return;
        }
        self.run_due(now);

        for signal in self.signals.drain() {
            self.handle_signal(signal);
            if self.torn_down {
                return;
            }
        }
        self.run_due(now);

        if let Some(offset) = self.animator.frame(now) {
            if let Err(e) = self.surface.set_scroll_left(offset) {
                warn!("Failed to apply slider scroll frame: {}", e);
            }
        }
    }

    fn run_due(&mut self, now: Millis) {
        while let Some(task) = self.scheduler.pop_due(now) {
            self.run_task(task);
            if self.torn_down {
                return;
            }
        }
        self.scheduler.advance_clock(now);
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::SettleElapsed => {
                if self.gate.settle_elapsed() {
                    self.post_render();
                }
            }
            Task::ReadyElapsed => self.finish_ready(),
            Task::HideOthers => {
                self.hide_others.fired();
                if !self.is_enabled_here() {
                    return;
                }
                if let Err(e) = layout::hide_others(&mut self.surface, self.state.current_index()) {
                    warn!("Failed to hide inactive blocks: {}", e);
                }
            }
            Task::ClearAnimationOverride => self.disable_animation_once = false,
            Task::NotifyResize => {
                self.events.publish(SliderEvent::WindowResize);
            }
            Task::ApplyScroll(offset) => {
                if let Err(e) = self.surface.set_scroll_left(offset) {
                    warn!("Failed to scroll slider: {}", e);
                }
                self.hide_others.call(&mut self.scheduler, Task::HideOthers);
            }
            Task::ScrollSettled(generation) => {
                let Some(offset) = self.animator.settle(generation) else {
                    return;
                };
                if let Err(e) = self.surface.set_scroll_left(offset) {
                    warn!("Failed to settle slider scroll: {}", e);
                }
                self.hide_others.call(&mut self.scheduler, Task::HideOthers);
            }
            Task::MoveTo(index) => self.move_to(index, false),
            Task::ScrollToCurrent => {
                if let Err(e) = self.scroll_to_current(false) {
                    warn!("Failed to re-align slider: {}", e);
                }
            }
            Task::Orientation(step) => {
                resize::run_pipeline(step.stages(), |stage| self.run_stage(stage));
                if let Some(next) = step.next() {
                    self.scheduler.defer(Task::Orientation(next));
                }
            }
        }
    }

    /// First layout pass once images have settled
    fn post_render(&mut self) {
        self.refresh_controls();
        self.toggle_toolbar();
        self.relayout();

        let start = self.config.start_index;
        self.move_to(start, false);
        self.publish_phase(ViewPhase::PostRender);

        if self.gate.rendered() {
            self.begin_ready();
        }
    }

    fn begin_ready(&mut self) {
        self.hide_others.call(&mut self.scheduler, Task::HideOthers);
        self.scheduler.delay(READY_DELAY_MS, Task::ReadyElapsed);
    }

    fn finish_ready(&mut self) {
        self.refresh_controls();
        self.relayout();
        if !self.gate.ready_elapsed() {
            return;
        }
        self.ready = true;
        self.component_resize_bound = true;
        info!(article_id = %self.article.id, "Block slider ready");
        self.events.publish(SliderEvent::Ready {
            article_id: self.article.id.clone(),
        });
    }

    /// Release every binding; later calls do nothing
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        self.signals.unsubscribe();
        self.hide_others.cancel(&mut self.scheduler);
        let cancelled = self.scheduler.clear();
        self.animator.stop();
        self.gesture.reset();
        self.gate.teardown();
        self.component_resize_bound = false;

        debug!(article_id = %self.article.id, cancelled, "Block slider torn down");
    }

    // Signals

    pub fn handle_signal(&mut self, signal: HostSignal) {
        if self.torn_down {
            return;
        }
        match signal {
            HostSignal::DeviceResize => {
                self.relayout();
            }
            HostSignal::DeviceChanged(size) => self.device_changed(size),
            HostSignal::OrientationChanged => {
                self.scheduler
                    .delay(ORIENTATION_DELAY_MS, Task::Orientation(OrientationStep::first()));
            }
            HostSignal::ScrollTo { selector } => self.scroll_to_element(&selector),
            HostSignal::ScrolledTo { .. } => {
                self.scheduler.defer(Task::ScrollToCurrent);
            }
            HostSignal::ModelReady => {
                if self.gate.model_ready() {
                    self.begin_ready();
                }
            }
            HostSignal::ComponentResize => {
                if !self.component_resize_bound {
                    return;
                }
                if let Err(e) = self.resize_height(true) {
                    warn!("Failed to resize slider after component change: {}", e);
                }
            }
            HostSignal::Remove => self.teardown(),
        }
    }

    fn device_changed(&mut self, size: ScreenSize) {
        debug!(
            article_id = %self.article.id,
            from = %self.device.screen_size,
            to = %size,
            "Screen size changed"
        );
        self.device.screen_size = size;
        if !self.is_enabled_here() {
            self.gesture.reset();
        }
        self.toggle_toolbar();
        self.relayout();
    }

    /// Jump to the block holding `selector` ahead of a page scroll
    fn scroll_to_element(&mut self, selector: &str) {
        self.disable_animation_once = true;
        self.scheduler.defer(Task::ClearAnimationOverride);

        if !self.is_enabled_here() {
            return;
        }
        let Some(id) = selector.strip_prefix('.') else {
            debug!(selector, "Ignoring non-class scroll target");
            return;
        };
        let Some(index) = self.article.block_index_for(id) else {
            return;
        };
        self.scheduler.defer(Task::MoveTo(index));
    }

    /// Full width, height, scroll and tab relayout
    pub fn relayout(&mut self) -> PipelineReport {
        resize::run_pipeline(&Stage::ALL, |stage| self.run_stage(stage))
    }

    fn run_stage(&mut self, stage: Stage) -> Result<()> {
        match stage {
            Stage::Width => {
                let enabled = self.is_enabled_here();
                layout::resize_width(&mut self.surface, enabled)
            }
            Stage::Height => self.resize_height(false),
            Stage::Scroll => self.scroll_to_current(false),
            Stage::Tabs => layout::resize_tabs(
                &mut self.surface,
                &self.config,
                self.state.item_buttons().len(),
                self.tab_margin,
            ),
        }
    }

    // Navigation

    /// Handle a click on a tagged control
    pub fn click(&mut self, control: ControlId) {
        match control {
            ControlId::Left => self.move_left(),
            ControlId::Right => self.move_right(),
            ControlId::Index(index) => self.move_to(index, true),
        }
    }

    pub fn move_left(&mut self) {
        if !self.rendered || self.state.is_first() {
            return;
        }
        self.move_to(self.state.current_index() - 1, true);
    }

    pub fn move_right(&mut self) {
        if !self.rendered || self.state.is_last() {
            return;
        }
        self.move_to(self.state.current_index() + 1, true);
    }

    /// Make `index` the active block
    ///
    /// Moving to the current block only repeats the trailing resize
    /// notification.
    pub fn move_to(&mut self, index: usize, animate: bool) {
        if !self.rendered || self.torn_down {
            return;
        }
        let animate = animate && self.animations_allowed();

        if self.state.set_current(index) {
            let current = self.state.current_index();
            debug!(article_id = %self.article.id, index = current, animate, "Slider moving");

            self.events.publish(SliderEvent::MediaStop);
            if let Err(e) = self.surface.set_block_visible(current, true) {
                warn!(index = current, "Failed to reveal block: {}", e);
            }
            if let Err(e) = self.resize_height(animate) {
                warn!("Failed to resize slider height: {}", e);
            }
            if let Err(e) = self.scroll_to_current(animate) {
                warn!("Failed to scroll slider: {}", e);
            }
            self.refresh_controls();
        }

        if animate {
            self.scheduler
                .delay(self.config.slide_duration_ms(), Task::NotifyResize);
        } else {
            self.events.publish(SliderEvent::WindowResize);
        }
    }

    fn resize_height(&mut self, animate: bool) -> Result<()> {
        let animate = animate && self.animations_allowed();
        let enabled = self.is_enabled_here();
        let outcome = layout::resize_height(
            &mut self.surface,
            &self.config,
            enabled,
            self.state.current_index(),
            animate,
        )?;
        if outcome == HeightOutcome::Suspended {
            self.show_all()?;
        }
        Ok(())
    }

    /// Bring the active block into view
    ///
    /// Every block is shown while the strip moves; the inactive ones are
    /// hidden again once it settles.
    fn scroll_to_current(&mut self, animate: bool) -> Result<()> {
        if !self.is_enabled_here() {
            self.animator.stop();
            return self.surface.set_scroll_left(0.0);
        }

        let total = self.surface.block_count();
        if total == 0 {
            return Ok(());
        }
        let block_width = self.surface.block_outer_width(0)?;
        let to = target_offset(
            self.state.current_index(),
            total,
            block_width,
            self.device.direction,
        );

        self.show_all()?;

        if !(animate && self.animations_allowed()) {
            self.animator.stop();
            self.scheduler.defer(Task::ApplyScroll(to));
            return Ok(());
        }

        let duration = self.config.slide_duration_ms();
        let generation =
            self.animator
                .start(self.surface.scroll_left(), to, self.scheduler.now(), duration);
        self.scheduler.delay(duration, Task::ScrollSettled(generation));
        Ok(())
    }

    fn show_all(&mut self) -> Result<()> {
        self.hide_others.cancel(&mut self.scheduler);
        layout::show_all(&mut self.surface)
    }

    fn refresh_controls(&mut self) {
        navigation::refresh_controls(&mut self.surface, &self.state);
    }

    fn toggle_toolbar(&mut self) {
        let visible = self.is_enabled_here();
        self.surface.set_toolbar_visible(visible);
    }

    fn publish_phase(&self, phase: ViewPhase) {
        self.events.publish(SliderEvent::Lifecycle {
            article_id: self.article.id.clone(),
            phase,
        });
    }

    // Touch

    fn swipe_armed(&self) -> bool {
        self.config.touch_swipe_enabled && self.is_enabled_here()
    }

    pub fn touch_start(&mut self, point: TouchPoint) {
        let armed = self.swipe_armed();
        self.gesture.touch_start(point, armed);
    }

    /// Returns true when the host should suppress native scrolling
    pub fn touch_move(&mut self, point: TouchPoint) -> bool {
        let armed = self.swipe_armed();
        self.gesture.touch_move(point, armed)
    }

    /// Finish a touch sequence, moving if it was a swipe
    pub fn touch_end(&mut self) -> Option<Step> {
        let armed = self.swipe_armed();
        let step = self.gesture.touch_end(armed)?.step(self.device.direction);
        match step {
            Step::Left => self.move_left(),
            Step::Right => self.move_right(),
        }
        Some(step)
    }
}

#[cfg(test)]
mod tests;
