// Copyright (C) 2020-2024 Andy Kurnia.

use super::matrix::{Dim, Position};
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Premium {
    None,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
}

impl Premium {
    #[inline(always)]
    pub fn letter_multiplier(self) -> i32 {
        match self {
            Premium::DoubleLetter => 2,
            Premium::TripleLetter => 3,
            _ => 1,
        }
    }

    #[inline(always)]
    pub fn word_multiplier(self) -> i32 {
        match self {
            Premium::DoubleWord => 2,
            Premium::TripleWord => 3,
            _ => 1,
        }
    }

    fn from_token(token: &str) -> Option<Premium> {
        match token {
            "TW" => Some(Premium::TripleWord),
            "DW" => Some(Premium::DoubleWord),
            "TL" => Some(Premium::TripleLetter),
            "DL" => Some(Premium::DoubleLetter),
            _ => None,
        }
    }
}

// the four sets are pairwise disjoint.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoardLayout {
    dim: Dim,
    triple_word: HashSet<Position>,
    double_word: HashSet<Position>,
    triple_letter: HashSet<Position>,
    double_letter: HashSet<Position>,
}

static DEFAULT_TRIPLE_WORD: &[(i32, i32)] = &[
    (0, 0),
    (0, 7),
    (0, 14),
    (7, 0),
    (7, 14),
    (14, 0),
    (14, 7),
    (14, 14),
];

static DEFAULT_DOUBLE_WORD: &[(i32, i32)] = &[
    (1, 1),
    (2, 2),
    (3, 3),
    (4, 4),
    (10, 10),
    (11, 11),
    (12, 12),
    (13, 13),
    (1, 13),
    (2, 12),
    (3, 11),
    (4, 10),
    (10, 4),
    (11, 3),
    (12, 2),
    (13, 1),
];

static DEFAULT_TRIPLE_LETTER: &[(i32, i32)] = &[
    (1, 5),
    (1, 9),
    (5, 1),
    (5, 5),
    (5, 9),
    (5, 13),
    (9, 1),
    (9, 5),
    (9, 9),
    (9, 13),
    (13, 5),
    (13, 9),
];

static DEFAULT_DOUBLE_LETTER: &[(i32, i32)] = &[
    (0, 3),
    (0, 11),
    (2, 6),
    (2, 8),
    (3, 0),
    (3, 14),
    (6, 2),
    (6, 6),
    (6, 8),
    (6, 12),
    (8, 2),
    (8, 6),
    (8, 8),
    (8, 12),
    (11, 0),
    (11, 14),
    (12, 6),
    (12, 8),
    (14, 3),
    (14, 11),
];

impl BoardLayout {
    fn empty(dim: Dim) -> Self {
        Self {
            dim,
            triple_word: HashSet::new(),
            double_word: HashSet::new(),
            triple_letter: HashSet::new(),
            double_letter: HashSet::new(),
        }
    }

    // the standard 15x15 premiums, minus whatever falls off a smaller board.
    // a square listed twice keeps the first premium it was given.
    pub fn make_default(dim: Dim) -> Self {
        let mut layout = Self::empty(dim);
        let mut fill = |which: Premium, coords: &[(i32, i32)]| {
            for &(row, col) in coords {
                let pos = Position::new(row, col);
                if dim.contains(pos) && layout.premium_at(pos) == Premium::None {
                    layout.set_mut(which).insert(pos);
                }
            }
        };
        fill(Premium::TripleWord, DEFAULT_TRIPLE_WORD);
        fill(Premium::DoubleWord, DEFAULT_DOUBLE_WORD);
        fill(Premium::TripleLetter, DEFAULT_TRIPLE_LETTER);
        fill(Premium::DoubleLetter, DEFAULT_DOUBLE_LETTER);
        layout
    }

    fn set_mut(&mut self, which: Premium) -> &mut HashSet<Position> {
        match which {
            Premium::TripleWord => &mut self.triple_word,
            Premium::DoubleWord => &mut self.double_word,
            Premium::TripleLetter => &mut self.triple_letter,
            // validation never asks for the None set.
            Premium::DoubleLetter | Premium::None => &mut self.double_letter,
        }
    }

    // all or nothing: any problem with the source means the default layout.
    pub fn from_source(dim: Dim, source: &dyn LayoutSource) -> Self {
        match source.load() {
            None => {
                tracing::info!(size = dim.size, "no premium layout given, using defaults");
                Self::make_default(dim)
            }
            Some(raw) => match Self::validate(dim, &raw) {
                Ok(layout) => layout,
                Err(reason) => {
                    tracing::warn!(%reason, "invalid premium layout, using defaults");
                    Self::make_default(dim)
                }
            },
        }
    }

    pub fn validate(dim: Dim, raw: &RawLayout) -> Result<Self, String> {
        let size = raw.size.ok_or("missing size")?;
        if size != dim.size {
            return Err(format!(
                "layout size {} does not match board size {}",
                size, dim.size
            ));
        }
        let squares = raw.squares.as_ref().ok_or("missing squares")?;
        let mut layout = Self::empty(dim);
        for square in squares {
            let (Some(row), Some(col), Some(token)) = (square.row, square.col, &square.kind) else {
                return Err("square is missing row, col or type".into());
            };
            let pos = Position::new(row, col);
            if !dim.contains(pos) {
                return Err(format!("square {} is out of range", pos));
            }
            let premium =
                Premium::from_token(token).ok_or_else(|| format!("unknown square type {:?}", token))?;
            if layout.premium_at(pos) != Premium::None {
                return Err(format!("square {} defined multiple times", pos));
            }
            layout.set_mut(premium).insert(pos);
        }
        Ok(layout)
    }

    // what validate guarantees, for layouts that were built some other way.
    pub fn check(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for set in [
            &self.triple_word,
            &self.double_word,
            &self.triple_letter,
            &self.double_letter,
        ] {
            for &pos in set {
                if !self.dim.contains(pos) {
                    return Err(format!("square {} is out of range", pos));
                }
                if !seen.insert(pos) {
                    return Err(format!("square {} defined multiple times", pos));
                }
            }
        }
        Ok(())
    }

    #[inline(always)]
    pub fn dim(&self) -> Dim {
        self.dim
    }

    #[inline(always)]
    pub fn star(&self) -> Position {
        self.dim.center()
    }

    pub fn premium_at(&self, pos: Position) -> Premium {
        if self.triple_word.contains(&pos) {
            Premium::TripleWord
        } else if self.double_word.contains(&pos) {
            Premium::DoubleWord
        } else if self.triple_letter.contains(&pos) {
            Premium::TripleLetter
        } else if self.double_letter.contains(&pos) {
            Premium::DoubleLetter
        } else {
            Premium::None
        }
    }

    pub fn triple_word(&self) -> &HashSet<Position> {
        &self.triple_word
    }

    pub fn double_word(&self) -> &HashSet<Position> {
        &self.double_word
    }

    pub fn triple_letter(&self) -> &HashSet<Position> {
        &self.triple_letter
    }

    pub fn double_letter(&self) -> &HashSet<Position> {
        &self.double_letter
    }
}

// unvalidated layout as read from a source. every field may be missing.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct RawLayout {
    pub size: Option<i32>,
    pub squares: Option<Vec<RawSquare>>,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct RawSquare {
    pub row: Option<i32>,
    pub col: Option<i32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

pub trait LayoutSource {
    // None means use the defaults.
    fn load(&self) -> Option<RawLayout>;
}

pub struct DefaultLayout;

impl LayoutSource for DefaultLayout {
    fn load(&self) -> Option<RawLayout> {
        None
    }
}

impl LayoutSource for RawLayout {
    fn load(&self) -> Option<RawLayout> {
        Some(self.clone())
    }
}

// {"size": 15, "squares": [{"row": 0, "col": 0, "type": "TW"}, ...]}
pub struct JsonLayoutFile {
    pub path: std::path::PathBuf,
}

impl JsonLayoutFile {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LayoutSource for JsonLayoutFile {
    fn load(&self) -> Option<RawLayout> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "cannot read layout file");
                return None;
            }
        };
        match serde_json::from_str::<RawLayout>(&data) {
            Ok(raw) => Some(raw),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "cannot parse layout file");
                // an unparseable file is a malformed layout, not an absent one.
                Some(RawLayout::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(row: i32, col: i32, kind: &str) -> RawSquare {
        RawSquare {
            row: Some(row),
            col: Some(col),
            kind: Some(kind.to_string()),
        }
    }

    fn raw(size: i32, squares: Vec<RawSquare>) -> RawLayout {
        RawLayout {
            size: Some(size),
            squares: Some(squares),
        }
    }

    #[test]
    fn default_layout_matches_the_standard_board() {
        let layout = BoardLayout::make_default(Dim::new(15));
        assert_eq!(layout.triple_word().len(), 8);
        assert_eq!(layout.double_word().len(), 16);
        assert_eq!(layout.triple_letter().len(), 12);
        assert_eq!(layout.double_letter().len(), 20);
        assert_eq!(layout.premium_at(Position::new(0, 0)), Premium::TripleWord);
        assert_eq!(layout.premium_at(Position::new(0, 3)), Premium::DoubleLetter);
        assert_eq!(layout.premium_at(Position::new(1, 5)), Premium::TripleLetter);
        assert_eq!(layout.premium_at(Position::new(1, 1)), Premium::DoubleWord);
        assert_eq!(layout.premium_at(Position::new(7, 7)), Premium::None);
    }

    #[test]
    fn default_sets_are_disjoint() {
        let layout = BoardLayout::make_default(Dim::new(15));
        let sets = [
            layout.triple_word(),
            layout.double_word(),
            layout.triple_letter(),
            layout.double_letter(),
        ];
        let total: usize = sets.iter().map(|s| s.len()).sum();
        let union: HashSet<_> = sets.iter().flat_map(|s| s.iter()).collect();
        assert_eq!(total, union.len());
        assert_eq!(layout.check(), Ok(()));
        // the two lower double word squares are not double letters too.
        for pos in [Position::new(11, 3), Position::new(11, 11)] {
            assert_eq!(layout.premium_at(pos), Premium::DoubleWord);
            assert!(!layout.double_letter().contains(&pos));
        }
    }

    #[test]
    fn check_catches_overlaps_and_strays() {
        let dim = Dim::new(15);
        let mut layout = BoardLayout::make_default(dim);
        layout.double_letter.insert(Position::new(0, 0));
        assert!(layout.check().is_err());

        let mut layout = BoardLayout::make_default(dim);
        layout.triple_letter.insert(Position::new(99, 99));
        assert!(layout.check().is_err());

        let validated =
            BoardLayout::validate(dim, &raw(15, vec![square(0, 7, "TW"), square(1, 1, "DL")]))
                .unwrap();
        assert_eq!(validated.check(), Ok(()));
    }

    #[test]
    fn small_board_keeps_only_in_range_defaults() {
        let layout = BoardLayout::make_default(Dim::new(7));
        assert!(layout.triple_word().contains(&Position::new(0, 0)));
        assert!(!layout.triple_word().contains(&Position::new(0, 7)));
        assert!(
            layout
                .double_letter()
                .iter()
                .all(|&pos| layout.dim().contains(pos))
        );
    }

    #[test]
    fn valid_source_replaces_defaults_entirely() {
        let dim = Dim::new(15);
        let source = raw(15, vec![square(0, 7, "TW"), square(7, 7, "DW")]);
        let layout = BoardLayout::from_source(dim, &source);
        assert!(layout.triple_word().contains(&Position::new(0, 7)));
        assert!(!layout.triple_word().contains(&Position::new(0, 0)));
        assert_eq!(layout.premium_at(Position::new(7, 7)), Premium::DoubleWord);
        assert!(layout.double_letter().is_empty());
    }

    #[test]
    fn every_malformation_falls_back_to_defaults() {
        let dim = Dim::new(15);
        let default = BoardLayout::make_default(dim);
        let bad_sources = vec![
            RawLayout {
                size: None,
                squares: Some(vec![square(0, 7, "TW")]),
            },
            raw(13, vec![square(0, 7, "TW")]),
            RawLayout {
                size: Some(15),
                squares: None,
            },
            raw(
                15,
                vec![RawSquare {
                    row: Some(1),
                    col: None,
                    kind: Some("TW".into()),
                }],
            ),
            raw(15, vec![square(0, 7, "TW"), square(15, 0, "DW")]),
            raw(15, vec![square(0, 7, "TW"), square(-1, 0, "DW")]),
            raw(15, vec![square(0, 7, "TW"), square(0, 7, "DL")]),
            raw(15, vec![square(2, 2, "DW"), square(2, 2, "DW")]),
            raw(15, vec![square(0, 7, "TW"), square(3, 3, "QW")]),
        ];
        for source in bad_sources {
            assert_eq!(BoardLayout::from_source(dim, &source), default);
        }
    }

    #[test]
    fn json_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        std::fs::write(
            &path,
            r#"{"size": 15, "squares": [{"row": 0, "col": 7, "type": "TW"}]}"#,
        )
        .unwrap();
        let dim = Dim::new(15);
        let layout = BoardLayout::from_source(dim, &JsonLayoutFile::new(&path));
        assert!(layout.triple_word().contains(&Position::new(0, 7)));
        assert!(!layout.triple_word().contains(&Position::new(0, 0)));

        std::fs::write(&path, "not json").unwrap();
        let layout = BoardLayout::from_source(dim, &JsonLayoutFile::new(&path));
        assert_eq!(layout, BoardLayout::make_default(dim));

        let missing = dir.path().join("nope.json");
        let layout = BoardLayout::from_source(dim, &JsonLayoutFile::new(missing));
        assert_eq!(layout, BoardLayout::make_default(dim));
    }
}
