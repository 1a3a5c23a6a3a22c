use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::engine::session::SessionEngine;
use crate::ui::theme::Theme;

pub struct StatusBar<'a> {
    engine: &'a SessionEngine,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(engine: &'a SessionEngine, theme: &'a Theme) -> Self {
        Self { engine, theme }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let config = self.engine.config();
        let stats = self.engine.stats();

        let mut info = format!(
            " {} | card {}/{}",
            config.game_mode.as_str(),
            self.engine.cursor() + 1,
            self.engine.history_len(),
        );
        if config.show_card_count {
            info.push_str(&format!(" | cards shown: {}", stats.cards_shown()));
        }
        if config.show_timer {
            let secs = stats.elapsed_secs();
            info.push_str(&format!(" | {}:{:02}", secs / 60, secs % 60));
        }

        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                " firstread ",
                Style::default()
                    .fg(colors.header_fg())
                    .bg(colors.header_bg())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                info,
                Style::default()
                    .fg(colors.text_dim())
                    .bg(colors.header_bg()),
            ),
        ]))
        .style(Style::default().bg(colors.header_bg()));
        header.render(area, buf);
    }
}
