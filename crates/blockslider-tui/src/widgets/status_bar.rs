use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let total = app.deck.article.blocks.len();

        let (mode_str, position) = match app.view.as_slider() {
            Some(slider) if slider.is_enabled_here() => {
                ("SLIDER", format!("{}/{}", slider.current_index() + 1, total))
            }
            Some(_) => ("STACKED", format!("{} blocks", total)),
            None => ("STANDARD", format!("{} blocks", total)),
        };

        let status_text = match &app.status_message {
            Some(msg) => format!(" {} | {} | {} |{}", mode_str, position, app.screen_size, msg),
            None => format!(" {} | {} | {}", mode_str, position, app.screen_size),
        };
        let (ready_text, ready_color) = if app.is_ready() {
            (" ● ", theme.ready)
        } else {
            (" ◌ ", theme.pending)
        };

        let help_hint = " q:quit h/l:move 1-9:jump o:rotate ";
        let used = status_text.chars().count() + ready_text.chars().count() + help_hint.len();
        let padding = " ".repeat((area.width as usize).saturating_sub(used));

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(ready_text, Style::default().fg(ready_color).bg(theme.bg2)),
            Span::styled(padding, Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
