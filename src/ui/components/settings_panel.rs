use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::content::levels::LETTER_LEVELS;
use crate::engine::session::SessionEngine;
use crate::ui::layout::centered_rect;
use crate::ui::theme::{Theme, ThemeColors};

pub const LENGTH_CHOICES: [usize; 6] = [2, 3, 4, 5, 6, 7];

/// Rows above the per-level letter rows: mode, difficulty, lengths, and the
/// two display toggles.
pub const FIXED_ROWS: usize = 5;

pub fn row_count() -> usize {
    FIXED_ROWS + LETTER_LEVELS.len()
}

/// Sub-column count of a settings row; rows without a sub-cursor report 1.
pub fn row_width(row: usize) -> usize {
    match row {
        2 => LENGTH_CHOICES.len(),
        row if row >= FIXED_ROWS => LETTER_LEVELS[row - FIXED_ROWS].letters.len(),
        _ => 1,
    }
}

pub struct SettingsPanel<'a> {
    pub engine: &'a SessionEngine,
    pub selected: usize,
    pub col: usize,
    pub theme: &'a Theme,
}

impl SettingsPanel<'_> {
    fn indicator(&self, row: usize) -> &'static str {
        if row == self.selected { " > " } else { "   " }
    }

    fn label_style(&self, row: usize) -> Style {
        let colors = &self.theme.colors;
        if row == self.selected {
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.fg())
        }
    }

    fn value_line(&self, row: usize, label: &str, value: String) -> Line<'static> {
        let colors = &self.theme.colors;
        Line::from(vec![
            Span::styled(
                format!("{}{label:<18}", self.indicator(row)),
                self.label_style(row),
            ),
            Span::styled(
                format!("< {value} >"),
                Style::default().fg(colors.text_dim()),
            ),
        ])
    }

    fn toggle_line(&self, row: usize, label: &str, on: bool) -> Line<'static> {
        let colors = &self.theme.colors;
        let marker = if on { "[x]" } else { "[ ]" };
        Line::from(vec![
            Span::styled(
                format!("{}{label:<18}", self.indicator(row)),
                self.label_style(row),
            ),
            Span::styled(marker.to_string(), Style::default().fg(colors.text_dim())),
        ])
    }

    fn lengths_line(&self) -> Line<'static> {
        let colors = &self.theme.colors;
        let lengths = &self.engine.config().word_lengths;
        let mut spans = vec![Span::styled(
            format!("{}{:<18}", self.indicator(2), "Word lengths"),
            self.label_style(2),
        )];
        for (i, len) in LENGTH_CHOICES.iter().enumerate() {
            let text = if lengths.contains(len) {
                format!("[{len}]")
            } else {
                format!(" {len} ")
            };
            let mut style = Style::default().fg(if lengths.contains(len) {
                colors.fg()
            } else {
                colors.text_dim()
            });
            if self.selected == 2 && self.col == i {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    fn level_line(&self, index: usize) -> Line<'static> {
        let colors = &self.theme.colors;
        let level = &LETTER_LEVELS[index];
        let row = FIXED_ROWS + index;
        let selection = &self.engine.config().selected_letters;

        let mut spans = vec![
            Span::styled(
                self.indicator(row).to_string(),
                self.label_style(row),
            ),
            Span::styled(
                "■ ".to_string(),
                Style::default().fg(ThemeColors::parse_color(level.color)),
            ),
            Span::styled(format!("{:<9}", level.name), self.label_style(row)),
        ];
        for (i, info) in level.letters.iter().enumerate() {
            let chosen = selection.contains(&info.ch);
            let text = if chosen {
                format!("[{}]", info.ch)
            } else {
                format!(" {} ", info.ch)
            };
            let mut style = Style::default().fg(if chosen {
                ThemeColors::parse_color(level.color)
            } else {
                colors.text_dim()
            });
            if chosen {
                style = style.add_modifier(Modifier::BOLD);
            }
            if self.selected == row && self.col == i {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }
}

impl Widget for SettingsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let config = self.engine.config();

        let panel = centered_rect(60, 80, area);
        Clear.render(panel, buf);
        let block = Block::bordered()
            .title(" Settings ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.overlay_bg()));
        let inner = block.inner(panel);
        block.render(panel, buf);

        let mut lines = vec![
            Line::from(""),
            self.value_line(0, "Game mode", config.game_mode.as_str().to_string()),
            self.value_line(
                1,
                "Word difficulty",
                config.word_difficulty.as_str().to_string(),
            ),
            self.lengths_line(),
            self.toggle_line(3, "Show card count", config.show_card_count),
            self.toggle_line(4, "Show timer", config.show_timer),
            Line::from(""),
        ];
        for i in 0..LETTER_LEVELS.len() {
            lines.push(self.level_line(i));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  [Up/Down] Row  [Left/Right] Column  [Enter] Toggle  [Esc] Close",
            Style::default().fg(colors.text_dim()),
        )));

        Paragraph::new(lines)
            .alignment(Alignment::Left)
            .render(inner, buf);
    }
}
