use std::io;
use std::path::Path;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, MouseButton, MouseEventKind},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::info;

use blockslider_core::AppConfig;
use blockslider_tui::{
    event::{AppEvent, EventHandler},
    images::{spawn_image_load, ImageLoadResult},
    input::{handle_key_event, Action},
    widgets::{SliderWidget, StatusBarWidget},
    App, Deck,
};

pub async fn run(config: AppConfig, path: &Path) -> Result<()> {
    let deck = Deck::load(path)?;
    let (width, _) = terminal::size()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let title = format!("blockslider - {}", deck.article.title);
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle(title))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.animation_fps);

    // Create channel for async image loading results
    let (img_tx, mut img_rx) = mpsc::unbounded_channel::<ImageLoadResult>();

    let mut app = App::new(config, deck, width);
    for path in app.images.keys() {
        spawn_image_load(path.clone(), img_tx.clone());
    }

    let result = main_loop(&mut terminal, &mut app, &event_handler, &mut img_rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!(media_stops = app.media_stops, "Viewer closed");
    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
    img_rx: &mut mpsc::UnboundedReceiver<ImageLoadResult>,
) -> Result<()> {
    // Checked at the end of each iteration to pick the next poll rate
    let mut needs_fast_update = true;

    loop {
        // Process any completed image loads (non-blocking)
        while let Ok(result) = img_rx.try_recv() {
            app.handle_image_result(result);
        }

        app.tick();

        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(frame.area());

            SliderWidget::render(frame, layout[0], app);
            StatusBarWidget::render(frame, layout[1], app);
        })?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key);
                    app.handle_action(action);
                }
                AppEvent::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => app.mouse_down(mouse.column, mouse.row),
                    MouseEventKind::Drag(MouseButton::Left) => app.mouse_drag(mouse.column, mouse.row),
                    MouseEventKind::Up(MouseButton::Left) => app.mouse_up(mouse.column, mouse.row),
                    MouseEventKind::ScrollDown => app.handle_action(Action::Next),
                    MouseEventKind::ScrollUp => app.handle_action(Action::Previous),
                    _ => {}
                },
                AppEvent::Resize(width, _) => app.resize(width),
                AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            return Ok(());
        }
    }
}
