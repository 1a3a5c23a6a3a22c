use std::path::PathBuf;

use crate::config::Config;
use crate::content::levels::LETTER_LEVELS;
use crate::engine::session::SessionEngine;
use crate::store::json_store::JsonStore;
use crate::ui::components::settings_panel::{self, FIXED_ROWS, LENGTH_CHOICES};
use crate::ui::theme::Theme;

pub struct App {
    pub engine: SessionEngine,
    pub config: Config,
    pub theme: &'static Theme,
    pub settings_open: bool,
    pub settings_selected: usize,
    pub settings_col: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(data_dir: Option<PathBuf>) -> Self {
        let config = Config::load().unwrap_or_default();
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let store = match data_dir {
            Some(dir) => JsonStore::with_base_dir(dir),
            None => JsonStore::new(),
        };
        let store = match store {
            Ok(store) => Some(store),
            Err(err) => {
                log::warn!("running without persistence: {err}");
                None
            }
        };
        let engine = SessionEngine::new(store);

        Self {
            engine,
            config,
            theme,
            settings_open: false,
            settings_selected: 0,
            settings_col: 0,
            should_quit: false,
        }
    }

    pub fn open_settings(&mut self) {
        self.settings_open = true;
        self.settings_selected = 0;
        self.settings_col = 0;
        self.engine.set_overlay_open(true);
    }

    pub fn close_settings(&mut self) {
        self.settings_open = false;
        self.engine.set_overlay_open(false);
    }

    pub fn settings_next(&mut self) {
        if self.settings_selected + 1 < settings_panel::row_count() {
            self.settings_selected += 1;
            self.clamp_settings_col();
        }
    }

    pub fn settings_prev(&mut self) {
        if self.settings_selected > 0 {
            self.settings_selected -= 1;
            self.clamp_settings_col();
        }
    }

    /// Left within a multi-column row; on single-value rows it cycles the
    /// value, matching how the row reads ("< letters >").
    pub fn settings_left(&mut self) {
        if settings_panel::row_width(self.settings_selected) > 1 {
            self.settings_col = self.settings_col.saturating_sub(1);
        } else {
            self.settings_toggle();
        }
    }

    pub fn settings_right(&mut self) {
        let width = settings_panel::row_width(self.settings_selected);
        if width > 1 {
            self.settings_col = (self.settings_col + 1).min(width - 1);
        } else {
            self.settings_toggle();
        }
    }

    pub fn settings_toggle(&mut self) {
        match self.settings_selected {
            0 => {
                let mode = self.engine.config().game_mode.toggled();
                self.engine.set_game_mode(mode);
            }
            1 => {
                let difficulty = self.engine.config().word_difficulty.toggled();
                self.engine.set_word_difficulty(difficulty);
            }
            2 => self.engine.toggle_word_length(LENGTH_CHOICES[self.settings_col]),
            3 => {
                let show = !self.engine.config().show_card_count;
                self.engine.set_show_card_count(show);
            }
            4 => {
                let show = !self.engine.config().show_timer;
                self.engine.set_show_timer(show);
            }
            row => {
                let level = &LETTER_LEVELS[row - FIXED_ROWS];
                if let Some(info) = level.letters.get(self.settings_col) {
                    self.engine.toggle_letter(info.ch);
                }
            }
        }
    }

    fn clamp_settings_col(&mut self) {
        let width = settings_panel::row_width(self.settings_selected);
        self.settings_col = self.settings_col.min(width - 1);
    }
}
