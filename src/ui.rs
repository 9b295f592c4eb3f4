pub mod screen;
pub mod view;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::presenter::Screen;
use view::TerminalView;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

pub(crate) struct Styles {
    pub bold: Style,
    pub dim_bold: Style,
    pub cursor: Style,
    pub correct: Style,
    pub incorrect: Style,
    pub success: Style,
    pub italic: Style,
    pub title: Style,
}

impl Default for Styles {
    fn default() -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let dim_bold = Style::default().patch(bold).add_modifier(Modifier::DIM);
        Self {
            bold,
            dim_bold,
            cursor: Style::default()
                .patch(dim_bold)
                .add_modifier(Modifier::UNDERLINED),
            correct: Style::default().patch(bold).fg(Color::Green),
            incorrect: Style::default().patch(bold).fg(Color::Red),
            success: Style::default().patch(bold).fg(Color::Green),
            italic: Style::default().add_modifier(Modifier::ITALIC),
            title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        }
    }
}

impl Widget for &TerminalView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.screen {
            Screen::Start => screen::render_start(self, area, buf),
            Screen::Game => screen::render_game(self, area, buf),
            Screen::Result => screen::render_result(self, area, buf),
        }
    }
}
