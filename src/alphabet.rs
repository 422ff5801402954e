// Copyright (C) 2020-2024 Andy Kurnia.

pub const BLANK: char = ' ';

pub struct Tile {
    label: char,
    freq: u8,
    score: i8,
}

impl Tile {
    #[inline(always)]
    pub fn label(&self) -> char {
        self.label
    }

    #[inline(always)]
    pub fn freq(&self) -> u8 {
        self.freq
    }

    #[inline(always)]
    pub fn score(&self) -> i8 {
        self.score
    }
}

pub struct Alphabet<'a> {
    tiles: &'a [Tile],
}

impl<'a> Alphabet<'a> {
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline(always)]
    pub fn tiles(&self) -> &'a [Tile] {
        self.tiles
    }

    #[inline(always)]
    fn get(&self, letter: char) -> Option<&'a Tile> {
        let upper = letter.to_ascii_uppercase();
        self.tiles.iter().find(|tile| tile.label == upper)
    }

    // blanks and anything unrecognized are worth nothing.
    #[inline(always)]
    pub fn score(&self, letter: char) -> i32 {
        self.get(letter).map_or(0, |tile| tile.score as i32)
    }

    #[inline(always)]
    pub fn freq(&self, letter: char) -> u8 {
        self.get(letter).map_or(0, |tile| tile.freq)
    }

    pub fn num_tiles(&self) -> usize {
        self.tiles.iter().map(|tile| tile.freq as usize).sum()
    }

    pub fn word_score(&self, word: &str) -> i32 {
        word.chars().map(|letter| self.score(letter)).sum()
    }

    pub fn fmt_rack(&self, rack: &[char]) -> String {
        rack.iter()
            .map(|&letter| if letter == BLANK { '?' } else { letter })
            .collect()
    }
}

macro_rules! tile {
    ($label:expr, $freq:expr, $score:expr) => {
        Tile {
            label: $label,
            freq: $freq,
            score: $score,
        }
    };
}

pub static ENGLISH_ALPHABET: Alphabet = Alphabet {
    tiles: &[
        tile!('A', 9, 1),
        tile!('B', 2, 3),
        tile!('C', 2, 3),
        tile!('D', 4, 2),
        tile!('E', 12, 1),
        tile!('F', 2, 4),
        tile!('G', 3, 2),
        tile!('H', 2, 4),
        tile!('I', 9, 1),
        tile!('J', 1, 8),
        tile!('K', 1, 5),
        tile!('L', 4, 1),
        tile!('M', 2, 3),
        tile!('N', 6, 1),
        tile!('O', 8, 1),
        tile!('P', 2, 3),
        tile!('Q', 1, 10),
        tile!('R', 6, 1),
        tile!('S', 4, 1),
        tile!('T', 6, 1),
        tile!('U', 4, 1),
        tile!('V', 2, 4),
        tile!('W', 2, 4),
        tile!('X', 1, 8),
        tile!('Y', 2, 4),
        tile!('Z', 1, 10),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_bag_has_no_blanks() {
        // the letter counts add up to 98.
        assert_eq!(ENGLISH_ALPHABET.num_tiles(), 98);
        assert_eq!(ENGLISH_ALPHABET.freq('E'), 12);
        assert_eq!(ENGLISH_ALPHABET.freq(BLANK), 0);
    }

    #[test]
    fn letter_values() {
        let alphabet = &ENGLISH_ALPHABET;
        for letter in "AEIONRTLSU".chars() {
            assert_eq!(alphabet.score(letter), 1);
        }
        assert_eq!(alphabet.score('d'), 2);
        assert_eq!(alphabet.score('C'), 3);
        assert_eq!(alphabet.score('y'), 4);
        assert_eq!(alphabet.score('K'), 5);
        assert_eq!(alphabet.score('X'), 8);
        assert_eq!(alphabet.score('q'), 10);
        assert_eq!(alphabet.score(BLANK), 0);
        assert_eq!(alphabet.score('?'), 0);
        assert_eq!(alphabet.word_score("cat"), 5);
    }
}
