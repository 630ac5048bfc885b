use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, info, warn};

use blockslider_core::gesture::TouchPoint;
use blockslider_core::{
    AppConfig, ArticleLifecycle, ArticleView, ControlId, HostBus, HostSignal,
    MemorySurface, ScreenSize, SliderEvent, Subscription,
};

use crate::content::measure;
use crate::deck::Deck;
use crate::images::{ImageLoadResult, ImageState};
use crate::input::Action;
use crate::theme::Theme;

/// Columns taken by the article border
const FRAME_COLUMNS: u16 = 2;

/// Rows between the tab bar and the slides
const TAB_MARGIN_ROWS: f64 = 1.0;

/// Application state for one slider deck
pub struct App {
    pub config: AppConfig,
    pub deck: Deck,
    pub theme: Theme,
    pub bus: HostBus,
    pub view: ArticleView<MemorySurface>,
    pub images: HashMap<PathBuf, ImageState>,
    pub screen_size: ScreenSize,
    pub status_message: Option<String>,
    pub media_stops: usize,
    pub should_quit: bool,
    events: Subscription<SliderEvent>,
    started: Instant,
    dragging: bool,
}

impl App {
    /// Build and render the deck's article for a `width` column terminal
    pub fn new(config: AppConfig, deck: Deck, width: u16) -> Self {
        let bus = HostBus::new();
        let events = bus.events.subscribe();
        let screen_size = config.breakpoints.classify(f64::from(width));

        let images: HashMap<PathBuf, ImageState> = deck
            .image_paths()
            .map(|path| (path.clone(), ImageState::Loading))
            .collect();

        let content_width = content_width(width);
        let heights = measure(&deck, usize::from(content_width), &images);
        let surface = MemorySurface::new(f64::from(content_width), heights)
            .with_pending_images(images.len())
            .with_tab_bar(1.0, 1.0);

        let view = ArticleView::build(
            deck.article_model(),
            surface,
            &deck.host_context(screen_size),
            &bus,
        );
        let mut view = match view {
            ArticleView::Slideable(slider) => ArticleView::Slideable(Box::new(
                (*slider)
                    .with_easing(config.ui.easing)
                    .with_tab_margin(TAB_MARGIN_ROWS),
            )),
            standard => standard,
        };
        view.render();
        // Deck blocks carry no components of their own to wait on
        bus.signals.publish(HostSignal::ModelReady);

        info!(
            article = %deck.article.id,
            blocks = deck.article.blocks.len(),
            slider = view.is_slideable(),
            "Deck loaded"
        );

        Self {
            config,
            deck,
            theme: Theme::default(),
            bus,
            view,
            images,
            screen_size,
            status_message: None,
            media_stops: 0,
            should_quit: false,
            events,
            started: Instant::now(),
            dragging: false,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Run due timers and react to what the article broadcast
    pub fn tick(&mut self) {
        let now = self.now_ms();
        self.view.advance(now);
        for event in self.events.drain() {
            self.handle_slider_event(event);
        }
    }

    fn handle_slider_event(&mut self, event: SliderEvent) {
        match event {
            // The terminal is the whole page, so a window resize comes
            // straight back as a device resize
            SliderEvent::WindowResize => {
                self.bus.signals.publish(HostSignal::DeviceResize);
            }
            SliderEvent::MediaStop => {
                self.media_stops += 1;
                self.status_message = Some(format!(" media stopped ({})", self.media_stops));
            }
            SliderEvent::Lifecycle { article_id, phase } => {
                debug!(article = %article_id, ?phase, "Article lifecycle");
                self.status_message = Some(format!(" {} {:?}", article_id, phase));
            }
            SliderEvent::Ready { article_id } => {
                self.status_message = Some(format!(" {} ready", article_id));
            }
        }
    }

    /// Terminal resized to `width` columns
    pub fn resize(&mut self, width: u16) {
        self.tick();
        self.remeasure(content_width(width));

        let size = self.config.breakpoints.classify(f64::from(width));
        if size != self.screen_size {
            info!(from = %self.screen_size, to = %size, "Screen size changed");
            self.screen_size = size;
            self.bus.signals.publish(HostSignal::DeviceChanged(size));
        } else {
            self.bus.signals.publish(HostSignal::DeviceResize);
        }
    }

    fn remeasure(&mut self, content_width: u16) {
        let heights = measure(&self.deck, usize::from(content_width), &self.images);
        let surface = self.view.surface_mut();
        surface.set_viewport_width(f64::from(content_width));
        for (index, height) in heights.into_iter().enumerate() {
            surface.set_content_height(index, height);
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.bus.signals.publish(HostSignal::Remove);
                self.tick();
                self.should_quit = true;
            }
            Action::Previous => self.click(ControlId::Left),
            Action::Next => self.click(ControlId::Right),
            Action::Jump(index) => {
                if index < self.deck.article.blocks.len() {
                    self.click(ControlId::Index(index));
                }
            }
            Action::Rotate => {
                self.bus.signals.publish(HostSignal::OrientationChanged);
            }
            Action::None => {}
        }
    }

    fn click(&mut self, control: ControlId) {
        self.tick();
        if let Some(slider) = self.view.as_slider_mut() {
            slider.click(control);
        }
    }

    pub fn handle_image_result(&mut self, result: ImageLoadResult) {
        let (path, state) = result.into_state();
        if let ImageState::Failed(error) = &state {
            warn!(path = %path.display(), "Image failed to load: {}", error);
        }
        self.images.insert(path, state);
        if let Some(width) = self.view.surface().viewport_width() {
            self.remeasure(width as u16);
        }

        self.tick();
        self.view.surface_mut().image_settled();
        if let Some(slider) = self.view.as_slider_mut() {
            slider.image_settled();
        }
    }

    // Mouse drags stand in for touch

    fn touch_point(&self, column: u16, row: u16) -> TouchPoint {
        TouchPoint::new(
            f64::from(column) * self.config.ui.cell_width_px,
            f64::from(row) * self.config.ui.cell_height_px,
        )
    }

    pub fn mouse_down(&mut self, column: u16, row: u16) {
        self.tick();
        let point = self.touch_point(column, row);
        if let Some(slider) = self.view.as_slider_mut() {
            slider.touch_start(point);
            self.dragging = true;
        }
    }

    pub fn mouse_drag(&mut self, column: u16, row: u16) {
        if !self.dragging {
            return;
        }
        let point = self.touch_point(column, row);
        if let Some(slider) = self.view.as_slider_mut() {
            slider.touch_move(point);
        }
    }

    pub fn mouse_up(&mut self, column: u16, row: u16) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        self.tick();
        let point = self.touch_point(column, row);
        if let Some(slider) = self.view.as_slider_mut() {
            slider.touch_move(point);
            if let Some(step) = slider.touch_end() {
                debug!(?step, "Swipe");
            }
        }
    }

    /// True while frames or timers are pending
    pub fn needs_fast_update(&self) -> bool {
        self.view
            .as_slider()
            .is_some_and(|s| s.is_animating() || s.next_deadline().is_some())
    }

    pub fn is_ready(&self) -> bool {
        match self.view.as_slider() {
            Some(slider) => slider.is_ready(),
            None => true,
        }
    }
}

fn content_width(width: u16) -> u16 {
    width.saturating_sub(FRAME_COLUMNS).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECK: &str = r#"
[article]
id = "a-05"
title = "Tour"

[article.slider]
_isEnabled = true

[[article.blocks]]
id = "b-05"
title = "One"
body = "First"

[[article.blocks]]
id = "b-10"
title = "Two"
body = "Second block with a longer body"

[[article.blocks]]
id = "b-15"
title = "Three"
"#;

    fn app(width: u16) -> App {
        App::new(AppConfig::default(), Deck::parse(DECK).unwrap(), width)
    }

    #[test]
    fn test_new_renders_slider() {
        let app = app(130);
        assert!(app.view.is_slideable());
        assert_eq!(app.screen_size, ScreenSize::Large);
        assert_eq!(app.view.surface().viewport_width(), Some(128.0));
        assert!(!app.is_ready());
    }

    #[test]
    fn test_resize_crossing_breakpoint() {
        let mut app = app(130);
        app.resize(60);
        assert_eq!(app.screen_size, ScreenSize::Small);
        assert_eq!(app.view.surface().viewport_width(), Some(58.0));
    }

    #[test]
    fn test_jump_out_of_range_ignored() {
        let mut app = app(130);
        app.handle_action(Action::Jump(8));
        assert_eq!(app.view.as_slider().unwrap().current_index(), 0);
    }

    #[test]
    fn test_quit_tears_down() {
        let mut app = app(130);
        app.handle_action(Action::Quit);
        assert!(app.should_quit);
        assert!(app.view.as_slider().unwrap().is_torn_down());
    }

    #[test]
    fn test_failed_image_settles() {
        let deck = DECK.replace("body = \"First\"", "body = \"First\"\nimages = [\"x.png\"]");
        let mut app = App::new(AppConfig::default(), Deck::parse(&deck).unwrap(), 130);
        assert_eq!(blockslider_core::Surface::pending_images(app.view.surface()), 1);

        app.handle_image_result(ImageLoadResult::Failure {
            path: PathBuf::from("x.png"),
            error: "missing".into(),
        });
        assert_eq!(blockslider_core::Surface::pending_images(app.view.surface()), 0);
        assert!(matches!(
            app.images.get(&PathBuf::from("x.png")),
            Some(ImageState::Failed(_))
        ));
    }
}
