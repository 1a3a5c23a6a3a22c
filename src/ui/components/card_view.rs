use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::pool::{Card, CardKind};
use crate::ui::layout::centered_rect;
use crate::ui::theme::{Theme, ThemeColors};

pub struct CardView<'a> {
    card: &'a Card,
    theme: &'a Theme,
}

impl<'a> CardView<'a> {
    pub fn new(card: &'a Card, theme: &'a Theme) -> Self {
        Self { card, theme }
    }
}

impl Widget for CardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let colors = &self.theme.colors;

        if self.card.kind == CardKind::Message {
            let text = Paragraph::new(Line::from(Span::styled(
                self.card.value.clone(),
                Style::default()
                    .fg(colors.text_dim())
                    .add_modifier(Modifier::ITALIC),
            )))
            .alignment(Alignment::Center);
            let row = area.y + area.height / 2;
            text.render(Rect::new(area.x, row, area.width, 1), buf);
            return;
        }

        let card_bg = self
            .card
            .color
            .as_deref()
            .map(ThemeColors::parse_color)
            .unwrap_or_else(|| colors.accent_dim());
        let card_fg = self
            .card
            .text_color
            .as_deref()
            .map(ThemeColors::parse_color)
            .unwrap_or_else(|| colors.fg());

        let card_area = centered_rect(50, 60, area);
        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()).bg(card_bg))
            .style(Style::default().bg(card_bg));
        let inner = block.inner(card_area);
        block.render(card_area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        // rem offsets from the source typeface, roughly one row per 2.5rem
        let nudge = (self.card.vertical_offset.unwrap_or(0.0) / 2.5).round() as i32;
        let mid = inner.y as i32 + inner.height as i32 / 2 + nudge;
        let max_row = inner.y as i32 + inner.height as i32 - 1;
        let row = mid.clamp(inner.y as i32, max_row) as u16;

        let value = Paragraph::new(Line::from(Span::styled(
            self.card.value.clone(),
            Style::default()
                .fg(card_fg)
                .bg(card_bg)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        value.render(Rect::new(inner.x, row, inner.width, 1), buf);

        if self.card.is_hard_word == Some(true) && inner.height >= 3 {
            let badge = Paragraph::new(Line::from(Span::styled(
                "tricky word",
                Style::default()
                    .fg(colors.hard_badge())
                    .bg(card_bg)
                    .add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center);
            let badge_row = inner.y + inner.height - 1;
            if badge_row != row {
                badge.render(Rect::new(inner.x, badge_row, inner.width, 1), buf);
            }
        }
    }
}
