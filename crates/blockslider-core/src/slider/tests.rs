use super::*;
use crate::article::BlockModel;
use crate::config::SliderSettings;
use crate::device::Direction;
use crate::readiness::Readiness;
use crate::surface::{Control, Length, MemorySurface, SurfaceOp, Transition};

const WIDTH: f64 = 300.0;

fn article(blocks: usize) -> ArticleModel {
    ArticleModel {
        id: "a-05".into(),
        title: "Slides".into(),
        blocks: (0..blocks)
            .map(|i| BlockModel {
                id: format!("b-{}", i),
                title: format!("Block {}", i),
                component_ids: vec![format!("c-{}", i)],
            })
            .collect(),
        slider: None,
    }
}

fn enabled() -> SliderSettings {
    SliderSettings {
        is_enabled: Some(true),
        ..Default::default()
    }
}

struct Harness {
    slider: BlockSlider<MemorySurface>,
    bus: HostBus,
    events: Subscription<SliderEvent>,
}

impl Harness {
    fn new(settings: SliderSettings, device: Device, surface: MemorySurface) -> Self {
        let bus = HostBus::new();
        let events = bus.events.subscribe();
        let config = SliderConfig::resolve(None, &settings);
        let blocks = surface.block_count();
        let slider = BlockSlider::new(article(blocks), config, device, surface, &bus);
        Self {
            slider,
            bus,
            events,
        }
    }

    fn events(&mut self) -> Vec<SliderEvent> {
        self.events.drain()
    }

    /// Render and run the full ready sequence; returns at t=950 with only
    /// the first block visible
    fn make_ready(&mut self) {
        self.slider.render();
        self.slider.advance(500);
        self.bus.signals.publish(HostSignal::ModelReady);
        self.slider.advance(500);
        self.slider.advance(750);
        assert!(self.slider.is_ready());
        self.slider.advance(950);
        self.events();
    }

    fn surface(&self) -> &MemorySurface {
        self.slider.surface()
    }
}

fn heights(count: usize) -> Vec<f64> {
    (1..=count).map(|i| i as f64 * 100.0).collect()
}

fn harness(blocks: usize) -> Harness {
    Harness::new(
        enabled(),
        Device::default(),
        MemorySurface::new(WIDTH, heights(blocks)),
    )
}

fn count(events: &[SliderEvent], wanted: &SliderEvent) -> usize {
    events.iter().filter(|e| *e == wanted).count()
}

fn has_phase(events: &[SliderEvent], wanted: ViewPhase) -> bool {
    events
        .iter()
        .any(|e| matches!(e, SliderEvent::Lifecycle { phase, .. } if *phase == wanted))
}

#[test]
fn test_ready_sequence() {
    let mut h = harness(4);
    let waiter = h.slider.readiness();

    h.slider.render();
    assert!(has_phase(&h.events(), ViewPhase::Render));

    h.slider.advance(499);
    assert_eq!(h.slider.readiness_phase(), GatePhase::Settling);

    h.slider.advance(500);
    assert_eq!(h.slider.readiness_phase(), GatePhase::Rendered);
    let events = h.events();
    assert!(has_phase(&events, ViewPhase::PostRender));
    assert_eq!(h.surface().block_width(), Length::Px(WIDTH));
    assert_eq!(h.surface().strip_width(), Length::Px(4.0 * WIDTH));
    assert_eq!(h.surface().container_height_style(), Length::Px(400.0));

    h.bus.signals.publish(HostSignal::ModelReady);
    h.slider.advance(600);
    assert!(!h.slider.is_ready());
    h.slider.advance(849);
    assert!(!h.slider.is_ready());
    assert_eq!(waiter.state(), Readiness::Pending);

    h.slider.advance(850);
    assert!(h.slider.is_ready());
    assert_eq!(waiter.state(), Readiness::Ready);
    let events = h.events();
    assert_eq!(
        count(
            &events,
            &SliderEvent::Ready {
                article_id: "a-05".into()
            }
        ),
        1
    );
}

#[test]
fn test_model_ready_before_post_render_is_remembered() {
    let mut h = harness(3);
    h.bus.signals.publish(HostSignal::ModelReady);
    h.slider.render();
    h.slider.advance(0);
    assert_eq!(h.slider.readiness_phase(), GatePhase::Settling);

    h.slider.advance(500);
    assert_eq!(h.slider.readiness_phase(), GatePhase::Finishing);
    h.slider.advance(750);
    assert!(h.slider.is_ready());
}

#[test]
fn test_pending_images_hold_settle_delay() {
    let surface = MemorySurface::new(WIDTH, heights(2)).with_pending_images(2);
    let mut h = Harness::new(enabled(), Device::default(), surface);
    h.slider.render();

    h.slider.advance(1_000);
    assert_eq!(
        h.slider.readiness_phase(),
        GatePhase::AwaitingImages { pending: 2 }
    );

    h.slider.image_settled();
    h.slider.image_settled();
    h.slider.advance(1_499);
    assert_eq!(h.slider.readiness_phase(), GatePhase::Settling);
    h.slider.advance(1_500);
    assert_eq!(h.slider.readiness_phase(), GatePhase::Rendered);
}

#[test]
fn test_exactly_one_block_visible_once_settled() {
    let mut h = harness(4);
    h.make_ready();
    assert_eq!(h.surface().visible_blocks(), vec![0]);
    assert!(h.surface().is_accessible(0));
    assert!(!h.surface().is_accessible(1));
    assert_eq!(h.surface().control_enabled(Control::Previous), Some(false));
    assert_eq!(h.surface().control_enabled(Control::Next), Some(true));
}

#[test]
fn test_moves_before_ready_are_unanimated() {
    let mut h = harness(4);
    h.slider.render();
    h.slider.advance(500);
    h.events();

    h.slider.click(ControlId::Right);
    assert!(!h.slider.is_animating());
    assert_eq!(h.surface().height_transition(), Transition::None);
    let events = h.events();
    assert_eq!(events, vec![SliderEvent::MediaStop, SliderEvent::WindowResize]);

    h.slider.advance(500);
    assert_eq!(h.surface().scroll_left(), WIDTH);
    assert_eq!(h.slider.current_index(), 1);
}

#[test]
fn test_animated_move_after_ready() {
    let mut h = harness(4);
    h.make_ready();

    h.slider.click(ControlId::Right);
    assert!(h.slider.is_animating());
    assert_eq!(
        h.surface().height_transition(),
        Transition::Ease { duration_ms: 600 }
    );
    // All blocks shown while the strip moves
    assert_eq!(h.surface().visible_blocks(), vec![0, 1, 2, 3]);
    assert_eq!(h.events(), vec![SliderEvent::MediaStop]);

    h.slider.advance(1_250);
    assert!((h.surface().scroll_left() - 150.0).abs() < 1e-6);

    h.slider.advance(1_550);
    assert!(!h.slider.is_animating());
    assert_eq!(h.surface().scroll_left(), WIDTH);
    assert_eq!(h.events(), vec![SliderEvent::WindowResize]);

    h.slider.advance(1_750);
    assert_eq!(h.surface().visible_blocks(), vec![1]);
    assert_eq!(h.surface().control_enabled(Control::Previous), Some(true));
    assert!(h.surface().is_visited(1));
}

#[test]
fn test_boundaries_are_no_ops() {
    let mut h = harness(4);
    h.make_ready();

    h.slider.click(ControlId::Left);
    assert!(h.events().is_empty());
    assert_eq!(h.slider.current_index(), 0);

    h.slider.click(ControlId::Index(3));
    assert_eq!(h.slider.current_index(), 3);
    assert_eq!(h.surface().control_enabled(Control::Next), Some(false));
    h.events();

    h.slider.click(ControlId::Right);
    assert!(h.events().is_empty());
    assert_eq!(h.slider.current_index(), 3);
}

#[test]
fn test_move_to_current_only_notifies_resize() {
    let mut h = harness(3);
    h.make_ready();
    h.slider.move_to(0, false);
    assert_eq!(h.events(), vec![SliderEvent::WindowResize]);
}

#[test]
fn test_start_index_applied_after_settle() {
    let settings = SliderSettings {
        start_index: Some(2),
        ..enabled()
    };
    let mut h = Harness::new(
        settings,
        Device::default(),
        MemorySurface::new(WIDTH, heights(4)),
    );
    h.slider.render();
    h.slider.advance(500);
    assert_eq!(h.slider.current_index(), 2);
    assert_eq!(h.surface().scroll_left(), 2.0 * WIDTH);
}

#[test]
fn test_non_uniform_height_tracks_active_block() {
    let settings = SliderSettings {
        has_uniform_height: Some(false),
        ..enabled()
    };
    let mut h = Harness::new(
        settings,
        Device::default(),
        MemorySurface::new(WIDTH, heights(4)),
    );
    h.make_ready();
    assert_eq!(h.surface().container_height_style(), Length::Px(100.0));

    h.slider.click(ControlId::Right);
    assert_eq!(h.surface().container_height_style(), Length::Px(200.0));
}

#[test]
fn test_rtl_mirrors_offset_and_swipe() {
    let mut h = Harness::new(
        enabled(),
        Device::new(ScreenSize::Large, Direction::Rtl),
        MemorySurface::new(WIDTH, heights(4)),
    );
    h.make_ready();
    assert_eq!(h.surface().scroll_left(), 3.0 * WIDTH);

    // Finger travels left: forward, which is a step left under RTL
    h.slider.touch_start(TouchPoint::new(300.0, 100.0));
    assert!(h.slider.touch_move(TouchPoint::new(200.0, 100.0)));
    assert_eq!(h.slider.touch_end(), Some(Step::Left));
    assert_eq!(h.slider.current_index(), 0);

    h.slider.touch_start(TouchPoint::new(200.0, 100.0));
    h.slider.touch_move(TouchPoint::new(300.0, 100.0));
    assert_eq!(h.slider.touch_end(), Some(Step::Right));
    assert_eq!(h.slider.current_index(), 1);

    h.slider.advance(1_550);
    assert_eq!(h.surface().scroll_left(), 2.0 * WIDTH);
}

#[test]
fn test_short_swipe_does_not_move() {
    let mut h = harness(4);
    h.make_ready();
    h.slider.touch_start(TouchPoint::new(200.0, 100.0));
    h.slider.touch_move(TouchPoint::new(170.0, 100.0));
    assert_eq!(h.slider.touch_end(), None);
    assert_eq!(h.slider.current_index(), 0);
}

#[test]
fn test_disabled_breakpoint_degrades_to_stacked_blocks() {
    let mut h = harness(3);
    h.make_ready();

    h.bus
        .signals
        .publish(HostSignal::DeviceChanged(ScreenSize::Small));
    h.slider.advance(1_000);

    assert!(!h.slider.is_enabled_here());
    assert!(!h.surface().toolbar_visible());
    assert_eq!(h.surface().block_width(), Length::Auto);
    assert_eq!(h.surface().strip_width(), Length::Percent(100.0));
    assert_eq!(h.surface().container_height_style(), Length::Auto);
    assert_eq!(h.surface().scroll_left(), 0.0);

    h.slider.advance(2_000);
    assert_eq!(h.surface().visible_blocks(), vec![0, 1, 2]);

    h.slider.touch_start(TouchPoint::new(300.0, 100.0));
    h.slider.touch_move(TouchPoint::new(100.0, 100.0));
    assert_eq!(h.slider.touch_end(), None);

    h.bus
        .signals
        .publish(HostSignal::DeviceChanged(ScreenSize::Large));
    h.slider.advance(2_500);
    assert!(h.surface().toolbar_visible());
    assert_eq!(h.surface().block_width(), Length::Px(WIDTH));

    h.slider.advance(2_700);
    assert_eq!(h.surface().visible_blocks(), vec![0]);
}

#[test]
fn test_failed_stage_does_not_block_later_stages() {
    let mut h = harness(3);
    h.make_ready();
    h.slider.surface_mut().fail_on(SurfaceOp::MeasureContainer);

    let report = h.slider.relayout();
    assert!(report.failed(Stage::Width));
    assert!(!report.failed(Stage::Height));
    assert!(!report.failed(Stage::Scroll));
    assert_eq!(h.surface().container_height_style(), Length::Px(300.0));

    // Navigation still works
    h.slider.click(ControlId::Right);
    assert_eq!(h.slider.current_index(), 1);
}

#[test]
fn test_scroll_to_component_moves_unanimated() {
    let mut h = harness(4);
    h.make_ready();

    h.bus.signals.publish(HostSignal::ScrollTo {
        selector: ".c-2".into(),
    });
    h.slider.advance(960);

    assert_eq!(h.slider.current_index(), 2);
    assert!(!h.slider.is_animating());
    assert_eq!(h.surface().scroll_left(), 2.0 * WIDTH);
    let events = h.events();
    assert_eq!(count(&events, &SliderEvent::MediaStop), 1);
}

#[test]
fn test_scroll_to_disables_animation_until_next_tick() {
    let mut h = harness(4);
    h.make_ready();

    h.slider.handle_signal(HostSignal::ScrollTo {
        selector: ".elsewhere".into(),
    });
    h.slider.click(ControlId::Right);
    assert!(!h.slider.is_animating());

    h.slider.advance(960);
    h.slider.click(ControlId::Right);
    assert!(h.slider.is_animating());
}

#[test]
fn test_scrolled_to_realigns_strip() {
    let mut h = harness(3);
    h.make_ready();
    h.slider.surface_mut().set_scroll_left(42.0).unwrap();

    h.bus.signals.publish(HostSignal::ScrolledTo {
        selector: ".b-0".into(),
    });
    h.slider.advance(960);
    assert_eq!(h.surface().scroll_left(), 0.0);
}

#[test]
fn test_orientation_change_waits_then_relayouts() {
    let settings = SliderSettings {
        has_tabs: Some(true),
        ..enabled()
    };
    let surface = MemorySurface::new(WIDTH, heights(4)).with_tab_bar(2.0, 3.0);
    let mut h = Harness::new(settings, Device::default(), surface);
    h.make_ready();

    h.slider.surface_mut().set_viewport_width(200.0);
    h.slider.handle_signal(HostSignal::OrientationChanged);

    h.slider.advance(1_249);
    assert_eq!(h.surface().strip_width(), Length::Px(4.0 * WIDTH));

    h.slider.advance(1_250);
    assert_eq!(h.surface().block_width(), Length::Px(200.0));
    assert_eq!(h.surface().strip_width(), Length::Px(800.0));
    assert_eq!(h.surface().tab_width(), Length::Percent(25.0));
    assert_eq!(h.surface().margin_top(), 3.0 + DEFAULT_TAB_MARGIN);
}

#[test]
fn test_orientation_steps_survive_failed_width() {
    let settings = SliderSettings {
        has_tabs: Some(true),
        start_index: Some(1),
        ..enabled()
    };
    let surface = MemorySurface::new(WIDTH, heights(4)).with_tab_bar(2.0, 3.0);
    let mut h = Harness::new(settings, Device::default(), surface);
    h.make_ready();
    assert_eq!(h.surface().scroll_left(), WIDTH);

    let surface = h.slider.surface_mut();
    surface.set_viewport_width(200.0);
    surface.set_content_height(2, 900.0);
    surface.set_tab_width(Length::Auto).unwrap();
    surface.set_scroll_left(0.0).unwrap();
    surface.fail_on(SurfaceOp::MeasureContainer);

    h.slider.handle_signal(HostSignal::OrientationChanged);
    h.slider.advance(1_250);

    // Width could not be measured, so the strip keeps its old size
    assert_eq!(h.surface().strip_width(), Length::Px(4.0 * WIDTH));
    // The later steps still ran
    assert_eq!(h.surface().container_height_style(), Length::Px(900.0));
    assert_eq!(h.surface().scroll_left(), WIDTH);
    assert_eq!(h.surface().tab_width(), Length::Percent(25.0));
    assert_eq!(h.slider.current_index(), 1);
}

#[test]
fn test_tap_with_zero_sensitivity_does_not_move() {
    let settings = SliderSettings {
        start_index: Some(2),
        swipe_sensitivity: Some(0.0),
        ..enabled()
    };
    let mut h = Harness::new(settings, Device::default(), MemorySurface::new(WIDTH, heights(4)));
    h.make_ready();

    h.slider.touch_start(TouchPoint::new(150.0, 80.0));
    assert_eq!(h.slider.touch_end(), None);
    assert_eq!(h.slider.current_index(), 2);
}

#[test]
fn test_component_resize_bound_after_ready() {
    let mut h = harness(3);
    h.slider.render();
    h.slider.advance(500);

    h.slider.surface_mut().set_content_height(0, 900.0);
    h.slider.handle_signal(HostSignal::ComponentResize);
    assert_eq!(h.surface().container_height_style(), Length::Px(300.0));

    h.bus.signals.publish(HostSignal::ModelReady);
    h.slider.advance(500);
    h.slider.advance(750);
    assert!(h.slider.is_ready());

    h.slider.surface_mut().set_content_height(1, 1_200.0);
    h.slider.handle_signal(HostSignal::ComponentResize);
    assert_eq!(h.surface().container_height_style(), Length::Px(1_200.0));
    assert_eq!(
        h.surface().height_transition(),
        Transition::Ease { duration_ms: 600 }
    );
}

#[test]
fn test_trailing_resize_notifications_interleave() {
    let mut h = harness(4);
    h.make_ready();

    h.slider.click(ControlId::Right);
    h.slider.advance(1_000);
    h.slider.click(ControlId::Right);

    h.slider.advance(1_550);
    // The first motion was replaced; its completion does not land
    assert!(h.slider.is_animating());

    h.slider.advance(1_600);
    assert_eq!(h.slider.current_index(), 2);
    assert_eq!(h.surface().scroll_left(), 2.0 * WIDTH);
    assert_eq!(count(&h.events(), &SliderEvent::WindowResize), 2);
}

#[test]
fn test_teardown_abandons_and_unbinds() {
    let mut h = harness(3);
    let waiter = h.slider.readiness();
    h.slider.render();
    h.events();

    h.bus.signals.publish(HostSignal::Remove);
    h.slider.advance(10);

    assert!(h.slider.is_torn_down());
    assert_eq!(waiter.state(), Readiness::Abandoned);
    assert_eq!(h.slider.next_deadline(), None);
    assert_eq!(h.bus.signals.subscriber_count(), 0);

    h.slider.advance(5_000);
    h.slider.click(ControlId::Right);
    assert!(h.events().is_empty());

    // Second teardown is a no-op
    h.slider.teardown();
}
