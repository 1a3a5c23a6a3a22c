//! The session engine: owns the card history and cursor, draws new content
//! through the sampling bag, and self-heals the displayed card when the
//! configuration changes out from under it.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::content::levels;
use crate::content::words::WordLists;
use crate::engine::bag;
use crate::engine::pool::{self, Card, CardKind};
use crate::engine::stats::SessionStats;
use crate::store::json_store::JsonStore;

/// Wall-clock gate between interactive advances; a combined pointer+key
/// double-fire lands well inside this window.
pub const DEBOUNCE: Duration = Duration::from_millis(100);

const KEY_SELECTION: &str = "selection";
const KEY_GAME_MODE: &str = "game_mode";
const KEY_WORD_DIFFICULTY: &str = "word_difficulty";
const KEY_WORD_LENGTHS: &str = "word_lengths";
const KEY_LETTERS_CYCLE: &str = "letters_cycle";
const KEY_WORDS_CYCLE: &str = "words_cycle";
const KEY_HISTORY: &str = "history";
const KEY_SHOW_CARD_COUNT: &str = "show_card_count";
const KEY_SHOW_TIMER: &str = "show_timer";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Letters,
    Words,
}

impl GameMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Letters => "letters",
            GameMode::Words => "words",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            GameMode::Letters => GameMode::Words,
            GameMode::Words => GameMode::Letters,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordDifficulty {
    Easy,
    Hard,
}

impl WordDifficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            WordDifficulty::Easy => "easy",
            WordDifficulty::Hard => "hard",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            WordDifficulty::Easy => WordDifficulty::Hard,
            WordDifficulty::Hard => WordDifficulty::Easy,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AdvanceTrigger {
    Interactive,
    Forced,
}

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Always sorted alphabetically, catalog letters only.
    pub selected_letters: Vec<char>,
    pub game_mode: GameMode,
    pub word_difficulty: WordDifficulty,
    pub word_lengths: BTreeSet<usize>,
    pub show_card_count: bool,
    pub show_timer: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
struct HistoryState {
    entries: Vec<Card>,
    cursor: usize,
    next_key: u64,
}

impl Default for HistoryState {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            next_key: 1,
        }
    }
}

fn default_word_lengths() -> BTreeSet<usize> {
    [3, 4, 5].into_iter().collect()
}

fn get_field<T: DeserializeOwned>(store: &Option<JsonStore>, key: &str, default: T) -> T {
    match store {
        Some(store) => store.get(key, default),
        None => default,
    }
}

pub struct SessionEngine {
    config: EngineConfig,
    history: Vec<Card>,
    cursor: usize,
    next_key: u64,
    letters_bag: Vec<char>,
    words_bag: Vec<String>,
    words: WordLists,
    stats: SessionStats,
    store: Option<JsonStore>,
    overlay_open: bool,
    last_advance_at: Option<Instant>,
    debounce: Duration,
    rng: SmallRng,
}

impl SessionEngine {
    pub fn new(store: Option<JsonStore>) -> Self {
        Self::with_parts(store, SmallRng::from_entropy(), DEBOUNCE)
    }

    pub fn with_parts(store: Option<JsonStore>, rng: SmallRng, debounce: Duration) -> Self {
        let words = WordLists::load();

        let mut selected: Vec<char> =
            get_field(&store, KEY_SELECTION, levels::default_letters());
        selected.retain(|&ch| levels::letter_level(ch).is_some());
        selected.sort_unstable();
        selected.dedup();

        let game_mode = get_field(&store, KEY_GAME_MODE, GameMode::Letters);
        let word_difficulty = get_field(&store, KEY_WORD_DIFFICULTY, WordDifficulty::Easy);
        let mut word_lengths: BTreeSet<usize> =
            get_field(&store, KEY_WORD_LENGTHS, default_word_lengths());
        word_lengths.retain(|&len| len >= 1);

        let show_card_count = get_field(&store, KEY_SHOW_CARD_COUNT, true);
        let show_timer = get_field(&store, KEY_SHOW_TIMER, true);

        let letters_bag: Vec<char> = get_field(&store, KEY_LETTERS_CYCLE, Vec::new());
        let words_bag: Vec<String> = get_field(&store, KEY_WORDS_CYCLE, Vec::new());

        let HistoryState {
            entries,
            cursor,
            next_key,
        } = get_field(&store, KEY_HISTORY, HistoryState::default());

        let mut engine = Self {
            config: EngineConfig {
                selected_letters: selected,
                game_mode,
                word_difficulty,
                word_lengths,
                show_card_count,
                show_timer,
            },
            history: entries,
            cursor,
            next_key,
            letters_bag,
            words_bag,
            words,
            stats: SessionStats::new(),
            store,
            overlay_open: false,
            last_advance_at: None,
            debounce,
            rng,
        };

        // keys must stay unique across reloads
        let max_key = engine.history.iter().map(|c| c.key).max().unwrap_or(0);
        engine.next_key = engine.next_key.max(max_key + 1);

        if engine.history.is_empty() {
            engine.initialize_history();
        } else if engine.cursor >= engine.history.len() {
            engine.cursor = engine.history.len() - 1;
        }
        engine.heal_display(false);
        engine
    }

    // --- observable state ---

    pub fn current_card(&self) -> &Card {
        &self.history[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &[Card] {
        &self.history
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn overlay_open(&self) -> bool {
        self.overlay_open
    }

    // --- interaction events ---

    pub fn request_advance(&mut self) {
        self.advance(AdvanceTrigger::Interactive);
    }

    pub fn request_back(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.persist_history();
        }
    }

    /// Forward within history, or new content when already at the end.
    pub fn request_forward(&mut self) {
        if self.cursor + 1 < self.history.len() {
            self.cursor += 1;
            self.persist_history();
        } else {
            self.advance(AdvanceTrigger::Interactive);
        }
    }

    pub fn set_overlay_open(&mut self, open: bool) {
        self.overlay_open = open;
    }

    // --- configuration events ---

    pub fn set_selected_letters(&mut self, letters: Vec<char>) {
        let mut letters: Vec<char> = letters
            .into_iter()
            .filter(|&ch| levels::letter_level(ch).is_some())
            .collect();
        letters.sort_unstable();
        letters.dedup();
        if letters == self.config.selected_letters {
            return;
        }

        let was_empty = self.config.selected_letters.is_empty();
        self.config.selected_letters = letters;
        // both pools derive from the selection, so both cycles are stale
        self.letters_bag.clear();
        self.words_bag.clear();
        self.persist_field(KEY_SELECTION, &self.config.selected_letters);
        self.persist_field(KEY_LETTERS_CYCLE, &self.letters_bag);
        self.persist_field(KEY_WORDS_CYCLE, &self.words_bag);
        self.heal_display(was_empty);
    }

    pub fn toggle_letter(&mut self, ch: char) {
        let mut letters = self.config.selected_letters.clone();
        match letters.iter().position(|&c| c == ch) {
            Some(idx) => {
                letters.remove(idx);
            }
            None => letters.push(ch),
        }
        self.set_selected_letters(letters);
    }

    pub fn set_game_mode(&mut self, mode: GameMode) {
        if mode == self.config.game_mode {
            return;
        }
        self.config.game_mode = mode;
        self.persist_field(KEY_GAME_MODE, &self.config.game_mode);
        self.advance(AdvanceTrigger::Forced);
    }

    pub fn set_word_difficulty(&mut self, difficulty: WordDifficulty) {
        if difficulty == self.config.word_difficulty {
            return;
        }
        self.config.word_difficulty = difficulty;
        self.words_bag.clear();
        self.persist_field(KEY_WORD_DIFFICULTY, &self.config.word_difficulty);
        self.persist_field(KEY_WORDS_CYCLE, &self.words_bag);
        self.heal_after_filter_change();
    }

    pub fn set_word_lengths(&mut self, lengths: BTreeSet<usize>) {
        let lengths: BTreeSet<usize> = lengths.into_iter().filter(|&len| len >= 1).collect();
        if lengths == self.config.word_lengths {
            return;
        }
        self.config.word_lengths = lengths;
        self.words_bag.clear();
        self.persist_field(KEY_WORD_LENGTHS, &self.config.word_lengths);
        self.persist_field(KEY_WORDS_CYCLE, &self.words_bag);
        self.heal_after_filter_change();
    }

    pub fn toggle_word_length(&mut self, len: usize) {
        let mut lengths = self.config.word_lengths.clone();
        if !lengths.remove(&len) {
            lengths.insert(len);
        }
        self.set_word_lengths(lengths);
    }

    pub fn set_show_card_count(&mut self, show: bool) {
        self.config.show_card_count = show;
        self.persist_field(KEY_SHOW_CARD_COUNT, &show);
    }

    pub fn set_show_timer(&mut self, show: bool) {
        self.config.show_timer = show;
        self.persist_field(KEY_SHOW_TIMER, &show);
    }

    // --- transitions ---

    fn advance(&mut self, trigger: AdvanceTrigger) {
        if trigger == AdvanceTrigger::Interactive {
            if self.overlay_open {
                return;
            }
            if let Some(last) = self.last_advance_at {
                if last.elapsed() < self.debounce {
                    return;
                }
            }
        }
        self.last_advance_at = Some(Instant::now());

        match self.config.game_mode {
            GameMode::Letters => self.advance_letters(trigger),
            GameMode::Words => self.advance_words(trigger),
        }
    }

    fn advance_letters(&mut self, trigger: AdvanceTrigger) {
        let pool = pool::letters_pool(&self.config.selected_letters);
        if pool.is_empty() {
            self.push_message(pool::CHOOSE_LETTERS_MSG);
            return;
        }

        let excluded = {
            let card = self.current_card();
            if card.kind == CardKind::Letter {
                card.value.chars().next()
            } else {
                None
            }
        };
        let bag = std::mem::take(&mut self.letters_bag);
        let (drawn, rest) = bag::draw(&pool, bag, excluded.as_ref(), &mut self.rng);
        self.letters_bag = rest;
        self.persist_field(KEY_LETTERS_CYCLE, &self.letters_bag);

        let key = self.take_key();
        self.push_card(pool::describe_letter(drawn, key), trigger);
    }

    fn advance_words(&mut self, trigger: AdvanceTrigger) {
        let pool = self.eligible_words();
        if pool.is_empty() {
            self.push_message(pool::NO_WORDS_MSG);
            return;
        }

        let excluded = {
            let card = self.current_card();
            (card.kind == CardKind::Word).then(|| card.value.clone())
        };
        let bag = std::mem::take(&mut self.words_bag);
        let (drawn, rest) = bag::draw(&pool, bag, excluded.as_ref(), &mut self.rng);
        self.words_bag = rest;
        self.persist_field(KEY_WORDS_CYCLE, &self.words_bag);

        let key = self.take_key();
        let card = pool::describe_word(&drawn, &self.words, key);
        self.push_card(card, trigger);
    }

    /// Re-validate the displayed card against the current configuration.
    /// `reset_from_empty` marks the empty→non-empty selection transition,
    /// which resets history to the first pool member instead of appending.
    fn heal_display(&mut self, reset_from_empty: bool) {
        match self.config.game_mode {
            GameMode::Letters => {
                let Some(&first) = self.config.selected_letters.first() else {
                    self.ensure_message(pool::CHOOSE_LETTERS_MSG);
                    return;
                };
                if reset_from_empty {
                    let key = self.take_key();
                    self.reset_history(pool::describe_letter(first, key));
                    return;
                }
                let displayed_ok = {
                    let card = self.current_card();
                    card.kind == CardKind::Letter
                        && card
                            .value
                            .chars()
                            .next()
                            .is_some_and(|ch| self.config.selected_letters.contains(&ch))
                };
                if !displayed_ok {
                    let key = self.take_key();
                    self.branch_append(pool::describe_letter(first, key));
                }
            }
            GameMode::Words => {
                let pool = self.eligible_words();
                let Some(first) = pool.first().cloned() else {
                    self.ensure_message(pool::NO_WORDS_MSG);
                    return;
                };
                if reset_from_empty {
                    let key = self.take_key();
                    let card = pool::describe_word(&first, &self.words, key);
                    self.reset_history(card);
                    return;
                }
                let displayed_ok = {
                    let card = self.current_card();
                    card.kind == CardKind::Word && pool.contains(&card.value)
                };
                if !displayed_ok {
                    let key = self.take_key();
                    let card = pool::describe_word(&first, &self.words, key);
                    self.branch_append(card);
                }
            }
        }
    }

    /// Word filters only invalidate the currently displayed card; stale
    /// bag members are dropped lazily at draw time.
    fn heal_after_filter_change(&mut self) {
        if self.config.game_mode != GameMode::Words {
            return;
        }
        let pool = self.eligible_words();
        let needs_refresh = {
            let card = self.current_card();
            match card.kind {
                CardKind::Word => !pool.contains(&card.value),
                CardKind::Message => !pool.is_empty(),
                CardKind::Letter => true,
            }
        };
        if needs_refresh {
            self.advance(AdvanceTrigger::Forced);
        }
    }

    fn initialize_history(&mut self) {
        let card = match self.config.game_mode {
            GameMode::Letters => match self.config.selected_letters.first().copied() {
                Some(first) => {
                    let key = self.take_key();
                    pool::describe_letter(first, key)
                }
                None => {
                    let key = self.take_key();
                    pool::message_card(pool::CHOOSE_LETTERS_MSG, key)
                }
            },
            GameMode::Words => {
                let pool = self.eligible_words();
                match pool.first().cloned() {
                    Some(first) => {
                        let key = self.take_key();
                        pool::describe_word(&first, &self.words, key)
                    }
                    None => {
                        let key = self.take_key();
                        pool::message_card(pool::NO_WORDS_MSG, key)
                    }
                }
            }
        };
        self.reset_history(card);
    }

    fn eligible_words(&self) -> Vec<String> {
        pool::words_pool(
            &self.config.selected_letters,
            &self.config.word_lengths,
            self.config.word_difficulty == WordDifficulty::Hard,
            &self.words,
        )
    }

    fn push_card(&mut self, card: Card, trigger: AdvanceTrigger) {
        self.branch_append(card);
        if trigger == AdvanceTrigger::Interactive {
            self.stats.record_card();
        }
    }

    fn push_message(&mut self, text: &str) {
        {
            let card = self.current_card();
            if card.kind == CardKind::Message && card.value == text {
                return;
            }
        }
        let key = self.take_key();
        self.branch_append(pool::message_card(text, key));
    }

    /// Single-message history, per the empty-pool lifecycle rule.
    fn ensure_message(&mut self, text: &str) {
        {
            let card = self.current_card();
            if card.kind == CardKind::Message && card.value == text {
                return;
            }
        }
        let key = self.take_key();
        self.reset_history(pool::message_card(text, key));
    }

    fn branch_append(&mut self, card: Card) {
        self.history.truncate(self.cursor + 1);
        self.history.push(card);
        self.cursor = self.history.len() - 1;
        self.persist_history();
    }

    fn reset_history(&mut self, card: Card) {
        self.history = vec![card];
        self.cursor = 0;
        self.persist_history();
    }

    fn take_key(&mut self) -> u64 {
        let key = self.next_key;
        self.next_key += 1;
        key
    }

    fn persist_history(&self) {
        if let Some(store) = &self.store {
            store.set(
                KEY_HISTORY,
                &HistoryState {
                    entries: self.history.clone(),
                    cursor: self.cursor,
                    next_key: self.next_key,
                },
            );
        }
    }

    fn persist_field<T: Serialize>(&self, key: &str, value: &T) {
        if let Some(store) = &self.store {
            store.set(key, value);
        }
    }
}
