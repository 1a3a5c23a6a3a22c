use std::collections::HashSet;

const WORDS_EASY: &str = include_str!("../../assets/words-easy.json");
const WORDS_HARD: &str = include_str!("../../assets/words-hard.json");

/// The two embedded word lists. Easy and hard are disjoint; "hard"
/// difficulty means the union is allowed.
pub struct WordLists {
    easy: Vec<String>,
    hard: Vec<String>,
    hard_set: HashSet<String>,
}

impl WordLists {
    pub fn load() -> Self {
        let easy = sanitize(serde_json::from_str(WORDS_EASY).unwrap_or_default());
        let mut hard = sanitize(serde_json::from_str(WORDS_HARD).unwrap_or_default());
        hard.retain(|w| !easy.contains(w));

        let hard_set = hard.iter().cloned().collect();
        Self {
            easy,
            hard,
            hard_set,
        }
    }

    pub fn easy(&self) -> &[String] {
        &self.easy
    }

    pub fn hard(&self) -> &[String] {
        &self.hard
    }

    pub fn is_hard(&self, word: &str) -> bool {
        self.hard_set.contains(word)
    }
}

fn sanitize(words: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    words
        .into_iter()
        .filter(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_lowercase()))
        .filter(|w| seen.insert(w.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_load_and_are_lowercase() {
        let lists = WordLists::load();
        assert!(!lists.easy().is_empty());
        assert!(!lists.hard().is_empty());
        for w in lists.easy().iter().chain(lists.hard()) {
            assert!(w.chars().all(|c| c.is_ascii_lowercase()), "bad word {w:?}");
        }
    }

    #[test]
    fn test_lists_are_disjoint() {
        let lists = WordLists::load();
        for w in lists.easy() {
            assert!(!lists.is_hard(w), "{w:?} in both lists");
        }
    }

    #[test]
    fn test_hard_lookup() {
        let lists = WordLists::load();
        assert!(lists.is_hard("knight"));
        assert!(!lists.is_hard("cat"));
    }

    #[test]
    fn test_sanitize_rejects_non_lowercase_and_dupes() {
        let words = sanitize(vec![
            "cat".to_string(),
            "Cat".to_string(),
            "cat".to_string(),
            "".to_string(),
            "dog!".to_string(),
        ]);
        assert_eq!(words, vec!["cat".to_string()]);
    }
}
