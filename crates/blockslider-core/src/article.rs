//! Article models and the choice between a plain and a sliding article.

use tracing::{debug, info};

use crate::bus::{EventBus, HostBus, HostSignal, SliderEvent, Subscription, ViewPhase};
use crate::config::{is_slider_enabled, CourseSliderConfig, SliderConfig, SliderSettings};
use crate::device::Device;
use crate::layout;
use crate::readiness::{ReadinessToken, ReadinessWaiter};
use crate::schedule::Millis;
use crate::slider::BlockSlider;
use crate::surface::Surface;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockModel {
    pub id: String,
    pub title: String,
    /// Ids of the components rendered inside this block
    pub component_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleModel {
    pub id: String,
    pub title: String,
    pub blocks: Vec<BlockModel>,
    /// Slider block from the article content, if any
    pub slider: Option<SliderSettings>,
}

impl ArticleModel {
    /// Index of the block with `id`, or of the block containing component `id`
    pub fn block_index_for(&self, id: &str) -> Option<usize> {
        self.blocks
            .iter()
            .position(|b| b.id == id)
            .or_else(|| {
                self.blocks
                    .iter()
                    .position(|b| b.component_ids.iter().any(|c| c == id))
            })
    }
}

/// What the host page knows when an article is built
#[derive(Debug, Clone, Default)]
pub struct HostContext {
    pub course: Option<CourseSliderConfig>,
    pub device: Device,
    pub accessibility_active: bool,
}

/// Behaviour every article view offers its host
pub trait ArticleLifecycle {
    fn article_id(&self) -> &str;

    fn render(&mut self);

    /// Process signals and timers due by `now`
    fn advance(&mut self, now: Millis);

    fn handle_signal(&mut self, signal: HostSignal);

    fn teardown(&mut self);

    fn readiness(&self) -> ReadinessWaiter;
}

/// An article laid out in normal flow, every block visible
pub struct StandardArticle<S: Surface> {
    model: ArticleModel,
    surface: S,
    /// Slider configured but switched off for this article
    is_disabled: bool,
    signals: Subscription<HostSignal>,
    events: EventBus<SliderEvent>,
    token: ReadinessToken,
    rendered: bool,
}

impl<S: Surface> StandardArticle<S> {
    pub fn new(model: ArticleModel, surface: S, is_disabled: bool, bus: &HostBus) -> Self {
        Self {
            model,
            surface,
            is_disabled,
            signals: bus.signals.subscribe(),
            events: bus.events.clone(),
            token: ReadinessToken::new(),
            rendered: false,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.is_disabled
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn publish_phase(&self, phase: ViewPhase) {
        self.events.publish(SliderEvent::Lifecycle {
            article_id: self.model.id.clone(),
            phase,
        });
    }
}

impl<S: Surface> ArticleLifecycle for StandardArticle<S> {
    fn article_id(&self) -> &str {
        &self.model.id
    }

    fn render(&mut self) {
        if self.rendered {
            return;
        }
        self.rendered = true;

        self.publish_phase(ViewPhase::PreRender);
        if let Err(e) = layout::show_all(&mut self.surface) {
            debug!("Failed to show article blocks: {}", e);
        }
        self.publish_phase(ViewPhase::Render);
        self.publish_phase(ViewPhase::PostRender);
        self.token.resolve();
    }

    fn advance(&mut self, _now: Millis) {
        for signal in self.signals.drain() {
            self.handle_signal(signal);
        }
    }

    fn handle_signal(&mut self, signal: HostSignal) {
        if signal == HostSignal::Remove {
            self.teardown();
        }
    }

    fn teardown(&mut self) {
        self.signals.unsubscribe();
        self.token.abandon();
    }

    fn readiness(&self) -> ReadinessWaiter {
        self.token.waiter()
    }
}

impl<S: Surface> ArticleLifecycle for BlockSlider<S> {
    fn article_id(&self) -> &str {
        &self.article().id
    }

    fn render(&mut self) {
        BlockSlider::render(self)
    }

    fn advance(&mut self, now: Millis) {
        BlockSlider::advance(self, now)
    }

    fn handle_signal(&mut self, signal: HostSignal) {
        BlockSlider::handle_signal(self, signal)
    }

    fn teardown(&mut self) {
        BlockSlider::teardown(self)
    }

    fn readiness(&self) -> ReadinessWaiter {
        BlockSlider::readiness(self)
    }
}

/// An article view, chosen once from its configuration
pub enum ArticleView<S: Surface> {
    Standard(StandardArticle<S>),
    Slideable(Box<BlockSlider<S>>),
}

impl<S: Surface> ArticleView<S> {
    pub fn build(model: ArticleModel, surface: S, host: &HostContext, bus: &HostBus) -> Self {
        let enabled = is_slider_enabled(
            host.course.as_ref(),
            model.slider.as_ref(),
            host.accessibility_active,
        );

        if !enabled {
            let is_disabled = model.slider.is_some();
            debug!(article_id = %model.id, is_disabled, "Building standard article");
            return ArticleView::Standard(StandardArticle::new(model, surface, is_disabled, bus));
        }

        let settings = model.slider.clone().unwrap_or_default();
        let config = SliderConfig::resolve(host.course.as_ref(), &settings);
        info!(article_id = %model.id, blocks = model.blocks.len(), "Building block slider");
        ArticleView::Slideable(Box::new(BlockSlider::new(
            model,
            config,
            host.device,
            surface,
            bus,
        )))
    }

    pub fn is_slideable(&self) -> bool {
        matches!(self, ArticleView::Slideable(_))
    }

    pub fn as_slider(&self) -> Option<&BlockSlider<S>> {
        match self {
            ArticleView::Slideable(slider) => Some(&**slider),
            ArticleView::Standard(_) => None,
        }
    }

    pub fn as_slider_mut(&mut self) -> Option<&mut BlockSlider<S>> {
        match self {
            ArticleView::Slideable(slider) => Some(&mut **slider),
            ArticleView::Standard(_) => None,
        }
    }

    pub fn surface(&self) -> &S {
        match self {
            ArticleView::Standard(article) => article.surface(),
            ArticleView::Slideable(slider) => slider.surface(),
        }
    }

    pub fn surface_mut(&mut self) -> &mut S {
        match self {
            ArticleView::Standard(article) => article.surface_mut(),
            ArticleView::Slideable(slider) => slider.surface_mut(),
        }
    }

    fn inner(&self) -> &dyn ArticleLifecycle {
        match self {
            ArticleView::Standard(article) => article,
            ArticleView::Slideable(slider) => &**slider,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ArticleLifecycle {
        match self {
            ArticleView::Standard(article) => article,
            ArticleView::Slideable(slider) => &mut **slider,
        }
    }
}

impl<S: Surface> ArticleLifecycle for ArticleView<S> {
    fn article_id(&self) -> &str {
        self.inner().article_id()
    }

    fn render(&mut self) {
        self.inner_mut().render()
    }

    fn advance(&mut self, now: Millis) {
        self.inner_mut().advance(now)
    }

    fn handle_signal(&mut self, signal: HostSignal) {
        self.inner_mut().handle_signal(signal)
    }

    fn teardown(&mut self) {
        self.inner_mut().teardown()
    }

    fn readiness(&self) -> ReadinessWaiter {
        self.inner().readiness()
    }
}
