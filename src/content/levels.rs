//! Static letter catalog: five difficulty levels partitioning a-z, each with
//! a display color and per-letter glyph offsets.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LetterInfo {
    pub ch: char,
    /// Vertical glyph offset in rem, from the source typeface metrics.
    pub vertical_offset: Option<f32>,
}

#[derive(Debug, PartialEq)]
pub struct Level {
    pub level: u8,
    pub name: &'static str,
    pub letters: &'static [LetterInfo],
    pub color: &'static str,
    pub text_color: &'static str,
}

const fn letter(ch: char) -> LetterInfo {
    LetterInfo {
        ch,
        vertical_offset: None,
    }
}

const fn offset_letter(ch: char, offset: f32) -> LetterInfo {
    LetterInfo {
        ch,
        vertical_offset: Some(offset),
    }
}

pub const LETTER_LEVELS: &[Level] = &[
    Level {
        level: 1,
        name: "Level 1",
        letters: &[
            offset_letter('s', -1.0),
            offset_letter('a', -1.0),
            letter('t'),
            offset_letter('p', -2.5),
            letter('i'),
            offset_letter('n', -1.0),
        ],
        color: "#00A651",
        text_color: "#FFFFFF",
    },
    Level {
        level: 2,
        name: "Level 2",
        letters: &[
            offset_letter('c', -1.0),
            offset_letter('o', -1.0),
            letter('d'),
            offset_letter('m', -1.0),
            letter('k'),
        ],
        color: "#008DC9",
        text_color: "#FFFFFF",
    },
    Level {
        level: 3,
        name: "Level 3",
        letters: &[
            offset_letter('e', -1.0),
            offset_letter('r', -1.0),
            offset_letter('g', -2.5),
            letter('b'),
            letter('h'),
        ],
        color: "#A77700",
        text_color: "#FFFFFF",
    },
    Level {
        level: 4,
        name: "Level 4",
        letters: &[
            offset_letter('w', -1.0),
            offset_letter('j', -2.5),
            letter('l'),
            offset_letter('u', -1.0),
            letter('f'),
        ],
        color: "#EF4136",
        text_color: "#FFFFFF",
    },
    Level {
        level: 5,
        name: "Level 5",
        letters: &[
            offset_letter('y', -2.5),
            offset_letter('v', -1.0),
            offset_letter('x', -1.0),
            offset_letter('q', -2.5),
            offset_letter('z', -1.0),
        ],
        color: "#A258D1",
        text_color: "#FFFFFF",
    },
];

/// Look up the letter's catalog entry and the level that owns it.
pub fn letter_info(ch: char) -> Option<(&'static LetterInfo, &'static Level)> {
    for level in LETTER_LEVELS {
        if let Some(info) = level.letters.iter().find(|l| l.ch == ch) {
            return Some((info, level));
        }
    }
    None
}

pub fn letter_level(ch: char) -> Option<&'static Level> {
    letter_info(ch).map(|(_, level)| level)
}

/// Every catalog letter, alphabetical.
pub fn all_letters() -> Vec<char> {
    let mut letters: Vec<char> = LETTER_LEVELS
        .iter()
        .flat_map(|level| level.letters.iter().map(|l| l.ch))
        .collect();
    letters.sort_unstable();
    letters
}

/// The out-of-the-box selection: level 1's letters.
pub fn default_letters() -> Vec<char> {
    LETTER_LEVELS[0].letters.iter().map(|l| l.ch).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_partition_alphabet() {
        let letters = all_letters();
        assert_eq!(letters.len(), 26);
        let expected: Vec<char> = ('a'..='z').collect();
        assert_eq!(letters, expected);
    }

    #[test]
    fn test_levels_ascend() {
        for (i, level) in LETTER_LEVELS.iter().enumerate() {
            assert_eq!(level.level as usize, i + 1);
        }
    }

    #[test]
    fn test_letter_info_carries_level_colors() {
        let (info, level) = letter_info('c').unwrap();
        assert_eq!(info.ch, 'c');
        assert_eq!(level.level, 2);
        assert_eq!(level.color, "#008DC9");
        assert_eq!(level.text_color, "#FFFFFF");
    }

    #[test]
    fn test_letter_info_offsets() {
        let (info, _) = letter_info('p').unwrap();
        assert_eq!(info.vertical_offset, Some(-2.5));
        let (info, _) = letter_info('t').unwrap();
        assert_eq!(info.vertical_offset, None);
    }

    #[test]
    fn test_unknown_char_has_no_level() {
        assert!(letter_info('7').is_none());
        assert!(letter_level('!').is_none());
    }

    #[test]
    fn test_default_letters_are_level_one() {
        let defaults = default_letters();
        assert_eq!(defaults, vec!['s', 'a', 't', 'p', 'i', 'n']);
    }
}
