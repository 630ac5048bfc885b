use ratatui::style::{Color, Modifier, Style};

/// Colors used by the slider widgets
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg0: Color,
    pub bg2: Color,
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey2: Color,

    pub accent: Color,
    pub visited: Color,
    pub disabled: Color,
    pub image: Color,
    pub ready: Color,
    pub pending: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Material dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            visited: Color::Rgb(0x7d, 0xae, 0xa3),
            disabled: Color::Rgb(0x50, 0x49, 0x45),
            image: Color::Rgb(0xd3, 0x86, 0x9b),
            ready: Color::Rgb(0xa9, 0xb6, 0x65),
            pending: Color::Rgb(0xd8, 0xa6, 0x57),
        }
    }
}

impl Theme {
    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.fg0)
    }

    pub fn control(&self, enabled: bool) -> Style {
        if enabled {
            Style::default().fg(self.fg1)
        } else {
            Style::default().fg(self.disabled)
        }
    }

    pub fn index_button(&self, selected: bool, visited: bool) -> Style {
        match (selected, visited) {
            (true, _) => Style::default()
                .fg(self.bg0)
                .bg(self.accent)
                .add_modifier(Modifier::BOLD),
            (false, true) => Style::default().fg(self.visited),
            (false, false) => Style::default().fg(self.grey2),
        }
    }
}
