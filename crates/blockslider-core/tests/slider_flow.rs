use blockslider_core::gesture::TouchPoint;
use blockslider_core::readiness::WaitQueue;
use blockslider_core::surface::Control;
use blockslider_core::{
    ArticleLifecycle, ArticleModel, ArticleView, BlockModel, ControlId, HostBus, HostContext,
    HostSignal, MemorySurface, Readiness, SliderEvent, SliderSettings, Surface,
};

fn article(id: &str, blocks: usize) -> ArticleModel {
    ArticleModel {
        id: id.into(),
        title: format!("Article {}", id),
        blocks: (0..blocks)
            .map(|i| BlockModel {
                id: format!("{}-b{}", id, i),
                title: format!("Block {}", i),
                component_ids: vec![format!("{}-c{}", id, i)],
            })
            .collect(),
        slider: Some(SliderSettings {
            is_enabled: Some(true),
            ..Default::default()
        }),
    }
}

fn build(bus: &HostBus, id: &str, blocks: usize) -> ArticleView<MemorySurface> {
    let surface = MemorySurface::new(320.0, vec![120.0; blocks]);
    ArticleView::build(article(id, blocks), surface, &HostContext::default(), bus)
}

/// Drive an article from render to ready
fn bring_ready(view: &mut ArticleView<MemorySurface>, bus: &HostBus) -> u64 {
    view.render();
    view.advance(500);
    bus.signals.publish(HostSignal::ModelReady);
    view.advance(500);
    view.advance(750);
    view.advance(950);
    950
}

#[test]
fn clicking_next_walks_to_the_last_block() {
    let bus = HostBus::new();
    let mut view = build(&bus, "a-05", 4);
    let mut now = bring_ready(&mut view, &bus);

    for _ in 0..3 {
        view.as_slider_mut().unwrap().click(ControlId::Right);
        now += 1_000;
        view.advance(now);
    }

    let slider = view.as_slider().unwrap();
    assert_eq!(slider.current_index(), 3);
    assert_eq!(slider.surface().control_enabled(Control::Next), Some(false));
    assert_eq!(slider.surface().control_enabled(Control::Previous), Some(true));
    assert_eq!(slider.surface().visible_blocks(), vec![3]);
    assert_eq!(slider.surface().scroll_left(), 3.0 * 320.0);

    // A short swipe at the end changes nothing
    let slider = view.as_slider_mut().unwrap();
    slider.touch_start(TouchPoint::new(200.0, 50.0));
    slider.touch_move(TouchPoint::new(180.0, 50.0));
    assert_eq!(slider.touch_end(), None);
    assert_eq!(slider.current_index(), 3);
}

#[test]
fn rapid_clicks_settle_with_one_visible_block() {
    let bus = HostBus::new();
    let mut view = build(&bus, "a-10", 5);
    let mut now = bring_ready(&mut view, &bus);

    for _ in 0..4 {
        view.as_slider_mut().unwrap().click(ControlId::Right);
        now += 50;
        view.advance(now);
    }
    view.as_slider_mut().unwrap().click(ControlId::Index(1));

    now += 2_000;
    view.advance(now);
    let slider = view.as_slider().unwrap();
    assert_eq!(slider.current_index(), 1);
    assert_eq!(slider.surface().visible_blocks(), vec![1]);
    assert_eq!(slider.surface().selected_indexes(), vec![1]);
    assert!(!slider.is_animating());
}

#[test]
fn readiness_resolves_once_per_article() {
    let bus = HostBus::new();
    let mut events = bus.events.subscribe();
    let mut view = build(&bus, "a-15", 3);
    let waiter = view.readiness();

    let now = bring_ready(&mut view, &bus);
    bus.signals.publish(HostSignal::ModelReady);
    view.advance(now + 5_000);

    assert_eq!(waiter.state(), Readiness::Ready);
    let ready = events
        .drain()
        .into_iter()
        .filter(|e| matches!(e, SliderEvent::Ready { .. }))
        .count();
    assert_eq!(ready, 1);
}

#[tokio::test]
async fn wait_queue_releases_when_every_article_settles() {
    let bus = HostBus::new();
    let mut first = build(&bus, "a-20", 2);
    let mut second = build(&bus, "a-25", 2);

    let mut queue = WaitQueue::new();
    queue.queue(first.readiness());
    queue.queue(second.readiness());

    first.render();
    second.render();
    first.advance(500);
    second.advance(500);
    bus.signals.publish(HostSignal::ModelReady);
    first.advance(500);
    first.advance(750);

    // The second article goes away before it is ready
    second.teardown();

    assert_eq!(queue.wait_all().await, 1);
}
