use ratatui::{
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use blockslider_core::surface::{Control, Length};
use blockslider_core::{BlockSlider, MemorySurface, Surface};

use crate::app::App;
use crate::content::{block_lines, BlockLine};
use crate::theme::Theme;

pub struct SliderWidget;

impl SliderWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let title = format!(" {} ", app.deck.article.title);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(app.theme.grey0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match app.view.as_slider() {
            Some(slider) if slider.is_enabled_here() => render_slider(frame, inner, app, slider),
            _ => render_stacked(frame, inner, app),
        }
    }
}

fn render_slider(frame: &mut Frame, area: Rect, app: &App, slider: &BlockSlider<MemorySurface>) {
    let surface = slider.surface();
    let toolbar_rows = u16::from(surface.toolbar_visible());
    let tab_rows = if slider.config().has_tabs {
        surface.margin_top().round().max(1.0) as u16
    } else {
        0
    };

    let rows = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(toolbar_rows),
            Constraint::Length(tab_rows),
            Constraint::Min(1),
        ])
        .split(area);

    if toolbar_rows > 0 {
        render_toolbar(frame, rows[0], &app.theme, slider);
    }
    if tab_rows > 0 {
        render_tabs(frame, rows[1], &app.theme, slider);
    }
    render_strip(frame, rows[2], app, slider);
}

/// Arrows around the index buttons
fn render_toolbar(frame: &mut Frame, area: Rect, theme: &Theme, slider: &BlockSlider<MemorySurface>) {
    let surface = slider.surface();
    let rtl = slider.device().direction.is_rtl();
    let mut spans = Vec::new();

    let arrow = |control: Control, glyph: &'static str| {
        let enabled = surface.control_enabled(control).unwrap_or(false);
        Span::styled(glyph, theme.control(enabled))
    };
    // Previous sits at the reading start
    let (start, end) = if rtl { (" ▶ ", " ◀ ") } else { (" ◀ ", " ▶ ") };

    if slider.config().has_arrows {
        spans.push(arrow(Control::Previous, start));
    }
    let mut buttons: Vec<Span> = slider
        .state()
        .item_buttons()
        .iter()
        .map(|button| {
            let selected = surface.is_selected(button.index);
            let visited = surface.is_visited(button.index);
            let label = if selected { " ● " } else { " ○ " };
            Span::styled(label, theme.index_button(selected, visited))
        })
        .collect();
    if rtl {
        buttons.reverse();
    }
    spans.extend(buttons);
    if slider.config().has_arrows {
        spans.push(arrow(Control::Next, end));
    }

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_tabs(frame: &mut Frame, area: Rect, theme: &Theme, slider: &BlockSlider<MemorySurface>) {
    let surface = slider.surface();
    let buttons = slider.state().item_buttons();
    if buttons.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> = buttons
        .iter()
        .map(|_| match surface.tab_width() {
            Length::Percent(p) => Constraint::Percentage(p.round().clamp(1.0, 100.0) as u16),
            _ => Constraint::Ratio(1, buttons.len() as u32),
        })
        .collect();
    let mut cells = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints(constraints)
        .split(Rect { height: 1, ..area })
        .to_vec();
    if slider.device().direction.is_rtl() {
        cells.reverse();
    }

    for (button, cell) in buttons.iter().zip(cells) {
        let label = if button.include_number {
            format!("{}. {}", button.index, button.title)
        } else {
            button.title.clone()
        };
        let selected = surface.is_selected(button.index);
        let visited = surface.is_visited(button.index);
        let tab = Paragraph::new(Line::from(Span::styled(
            label,
            theme.index_button(selected, visited),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(tab, cell);
    }
}

/// The horizontally scrolled strip: every visible block in its slot,
/// offset by the strip's current scroll position
fn render_strip(frame: &mut Frame, area: Rect, app: &App, slider: &BlockSlider<MemorySurface>) {
    let surface = slider.surface();
    let total = app.deck.article.blocks.len();
    let slot_width = match surface.block_width() {
        Length::Px(w) if w > 0.0 => w,
        _ => f64::from(area.width),
    };
    let height = match surface.container_height_style() {
        Length::Px(h) => (h.round() as u16).min(area.height),
        _ => area.height,
    };
    let offset = surface.scroll_left();
    let rtl = slider.device().direction.is_rtl();
    let view_width = f64::from(area.width);

    for (index, block) in app.deck.article.blocks.iter().enumerate() {
        if !surface.is_visible(index) {
            continue;
        }
        let slot = if rtl { total - 1 - index } else { index };
        let left = slot as f64 * slot_width - offset;
        let right = left + slot_width;
        if right <= 0.0 || left >= view_width {
            continue;
        }

        let x0 = left.max(0.0).round() as u16;
        let x1 = right.min(view_width).round() as u16;
        if x1 <= x0 {
            continue;
        }
        let skip = (-left).max(0.0).round() as u16;

        let rect = Rect {
            x: area.x + x0,
            y: area.y,
            width: x1 - x0,
            height,
        };
        let lines = styled_lines(app, block_lines(block, slot_width as usize, &app.images));
        frame.render_widget(Paragraph::new(lines).scroll((0, skip)), rect);
    }
}

/// Normal flow: blocks one after another
fn render_stacked(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();
    for block in &app.deck.article.blocks {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(styled_lines(
            app,
            block_lines(block, usize::from(area.width), &app.images),
        ));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn styled_lines(app: &App, lines: Vec<BlockLine>) -> Vec<Line<'static>> {
    let theme = &app.theme;
    lines
        .into_iter()
        .map(|line| match line {
            BlockLine::Title(text) => Line::from(Span::styled(text, theme.title())),
            BlockLine::Text(text) => Line::from(Span::styled(text, theme.text())),
            BlockLine::Image(text) => {
                Line::from(Span::styled(text, Style::default().fg(theme.image)))
            }
        })
        .collect()
}
