//! Content resolution: which values are eligible under the current
//! configuration, and how a value becomes a fully-described card.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::content::levels;
use crate::content::words::WordLists;

pub const CHOOSE_LETTERS_MSG: &str = "Choose some letters in the menu!";
pub const NO_WORDS_MSG: &str = "No words can be formed with these letters.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Letter,
    Word,
    Message,
}

/// A history entry. Immutable once created; `key` is stable per entry and
/// unique across reloads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub key: u64,
    pub kind: CardKind,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_offset: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hard_word: Option<bool>,
}

/// Letters pool: the selection verbatim (already alphabetical).
pub fn letters_pool(selected: &[char]) -> Vec<char> {
    selected.to_vec()
}

/// Words pool: dictionary words whose every letter is selected, whose length
/// is allowed, and which the difficulty setting permits. Dictionary order is
/// preserved so "first eligible member" is deterministic.
pub fn words_pool(
    selected: &[char],
    lengths: &BTreeSet<usize>,
    allow_hard: bool,
    lists: &WordLists,
) -> Vec<String> {
    let eligible = |w: &&String| {
        lengths.contains(&w.chars().count()) && w.chars().all(|ch| selected.contains(&ch))
    };

    let mut pool: Vec<String> = lists.easy().iter().filter(eligible).cloned().collect();
    if allow_hard {
        pool.extend(lists.hard().iter().filter(eligible).cloned());
    }
    pool
}

pub fn describe_letter(ch: char, key: u64) -> Card {
    let info = levels::letter_info(ch);
    Card {
        key,
        kind: CardKind::Letter,
        value: ch.to_string(),
        color: info.map(|(_, level)| level.color.to_string()),
        text_color: info.map(|(_, level)| level.text_color.to_string()),
        vertical_offset: info.and_then(|(l, _)| l.vertical_offset),
        is_hard_word: None,
    }
}

/// A word card inherits the color of the highest-level letter it contains.
/// A later letter only takes over when its level is strictly greater, so the
/// first letter seen at the winning level decides.
pub fn describe_word(word: &str, lists: &WordLists, key: u64) -> Card {
    let mut winning: Option<&'static levels::Level> = None;
    for ch in word.chars() {
        if let Some(level) = levels::letter_level(ch) {
            if winning.is_none_or(|w| level.level > w.level) {
                winning = Some(level);
            }
        }
    }

    Card {
        key,
        kind: CardKind::Word,
        value: word.to_string(),
        color: winning.map(|l| l.color.to_string()),
        text_color: winning.map(|l| l.text_color.to_string()),
        vertical_offset: None,
        is_hard_word: Some(lists.is_hard(word)),
    }
}

pub fn message_card(text: &str, key: u64) -> Card {
    Card {
        key,
        kind: CardKind::Message,
        value: text.to_string(),
        color: None,
        text_color: None,
        vertical_offset: None,
        is_hard_word: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lengths(values: &[usize]) -> BTreeSet<usize> {
        values.iter().copied().collect()
    }

    #[test]
    fn test_letters_pool_is_selection_verbatim() {
        let selected = vec!['a', 'c', 't'];
        assert_eq!(letters_pool(&selected), selected);
    }

    #[test]
    fn test_word_eligibility() {
        let lists = WordLists::load();
        let selected = vec!['a', 'c', 's', 't'];
        let pool = words_pool(&selected, &lengths(&[3]), false, &lists);

        assert!(pool.contains(&"cat".to_string()));
        assert!(pool.contains(&"sat".to_string()));
        assert!(pool.contains(&"act".to_string()));
        for word in &pool {
            assert_eq!(word.chars().count(), 3);
            assert!(word.chars().all(|ch| selected.contains(&ch)), "{word:?}");
            assert!(!lists.is_hard(word), "{word:?} hard-gated");
        }
        // length filter: "cast" is eligible by letters but not by length
        assert!(!pool.contains(&"cast".to_string()));
    }

    #[test]
    fn test_hard_word_gating() {
        let lists = WordLists::load();
        let selected = vec!['a', 'c', 's', 't'];

        let easy_pool = words_pool(&selected, &lengths(&[4]), false, &lists);
        assert!(easy_pool.contains(&"cast".to_string()));
        assert!(!easy_pool.contains(&"scat".to_string()));
        assert!(!easy_pool.contains(&"tact".to_string()));

        let hard_pool = words_pool(&selected, &lengths(&[4]), true, &lists);
        assert!(hard_pool.contains(&"cast".to_string()));
        assert!(hard_pool.contains(&"scat".to_string()));
        assert!(hard_pool.contains(&"tact".to_string()));
    }

    #[test]
    fn test_empty_selection_empty_pool() {
        let lists = WordLists::load();
        let pool = words_pool(&[], &lengths(&[3, 4, 5]), true, &lists);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_describe_letter_inherits_level() {
        let card = describe_letter('s', 1);
        assert_eq!(card.kind, CardKind::Letter);
        assert_eq!(card.value, "s");
        assert_eq!(card.color.as_deref(), Some("#00A651"));
        assert_eq!(card.text_color.as_deref(), Some("#FFFFFF"));
        assert_eq!(card.vertical_offset, Some(-1.0));
        assert_eq!(card.is_hard_word, None);
    }

    #[test]
    fn test_describe_word_uses_highest_level_letter() {
        let lists = WordLists::load();
        // c is level 2, a/t are level 1
        let card = describe_word("cat", &lists, 1);
        assert_eq!(card.color.as_deref(), Some("#008DC9"));
        assert_eq!(card.is_hard_word, Some(false));

        // all level 1
        let card = describe_word("sat", &lists, 2);
        assert_eq!(card.color.as_deref(), Some("#00A651"));
    }

    #[test]
    fn test_describe_word_flags_hard_words() {
        let lists = WordLists::load();
        let card = describe_word("scat", &lists, 1);
        assert_eq!(card.is_hard_word, Some(true));
    }

    #[test]
    fn test_message_card_has_no_styling() {
        let card = message_card(CHOOSE_LETTERS_MSG, 9);
        assert_eq!(card.kind, CardKind::Message);
        assert_eq!(card.value, CHOOSE_LETTERS_MSG);
        assert!(card.color.is_none());
        assert!(card.vertical_offset.is_none());
    }
}
