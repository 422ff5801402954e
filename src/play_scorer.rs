// Copyright (C) 2020-2021 Andy Kurnia.

use super::{alphabet, board_layout, game_state, matrix};
use matrix::Position;
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormedWord {
    pub text: String,
    pub cells: Vec<Position>,
}

// the maximal run of tiles through pos. always at least pos itself when occupied.
pub fn word_at_position(
    game_state: &game_state::GameState,
    pos: Position,
    horizontal: bool,
) -> FormedWord {
    let mut start = pos;
    loop {
        let prev = start.step(horizontal, -1);
        if !game_state.is_occupied(prev) {
            break;
        }
        start = prev;
    }
    let mut text = String::new();
    let mut cells = Vec::new();
    let mut cur = start;
    while let Some(tile) = game_state.at(cur) {
        text.push(tile);
        cells.push(cur);
        cur = cur.step(horizontal, 1);
    }
    FormedWord { text, cells }
}

// each distinct word of two or more letters through this turn's tiles, first occurrence wins.
pub fn all_new_words(game_state: &game_state::GameState) -> Vec<FormedWord> {
    let mut seen = HashSet::new();
    let mut words = Vec::new();
    for &(pos, _) in game_state.current_turn_placements.iter() {
        for horizontal in [true, false] {
            let word = word_at_position(game_state, pos, horizontal);
            if word.text.chars().count() > 1 && seen.insert(word.text.clone()) {
                words.push(word);
            }
        }
    }
    words
}

// letter values only, no premiums.
#[inline(always)]
pub fn word_face_value(word: &str) -> i32 {
    alphabet::ENGLISH_ALPHABET.word_score(word)
}

pub struct PlayScorer {
    processed: HashSet<Position>,
}

impl PlayScorer {
    pub fn new() -> Self {
        Self {
            processed: HashSet::new(),
        }
    }

    // Each premium square takes effect at most once per submission, even when
    // two words share the tile.
    pub fn compute_score(
        &mut self,
        alphabet: &alphabet::Alphabet,
        board_layout: &board_layout::BoardLayout,
        game_state: &game_state::GameState,
        words: &[FormedWord],
    ) -> i32 {
        self.processed.clear();
        let mut total = 0;
        for word in words {
            let mut word_multiplier = 1;
            let mut word_score = 0;
            for &pos in word.cells.iter() {
                let Some(tile) = game_state.at(pos) else {
                    continue;
                };
                let face_value = alphabet.score(tile);
                // words are scored in the order given, so a shared new tile's
                // premium belongs to the earliest word that contains it.
                if game_state.is_placed_this_turn(pos) && self.processed.insert(pos) {
                    let premium = board_layout.premium_at(pos);
                    let tile_score = face_value * premium.letter_multiplier();
                    word_multiplier *= premium.word_multiplier();
                    tracing::trace!(
                        tile = %tile,
                        %pos,
                        ?premium,
                        base = face_value,
                        score = tile_score,
                        "scored tile"
                    );
                    word_score += tile_score;
                } else {
                    word_score += face_value;
                }
            }
            let multiplied_word_score = word_score * word_multiplier;
            tracing::debug!(
                word = %word.text,
                word_score,
                word_multiplier,
                score = multiplied_word_score,
                "scored word"
            );
            total += multiplied_word_score;
        }
        total
    }
}

impl Default for PlayScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bag, board_layout::BoardLayout};

    fn state_with_rack(rack: &str) -> game_state::GameState {
        let mut state =
            game_state::GameState::new(matrix::Dim::new(15), bag::Bag(Vec::new()), 7);
        let mut player = game_state::GamePlayer::new("p1", game_state::PlayerKind::Human);
        player.rack = rack.chars().collect();
        state.players.push(player);
        state
    }

    fn score(state: &game_state::GameState, words: &[FormedWord]) -> i32 {
        let layout = BoardLayout::make_default(state.dim);
        PlayScorer::new().compute_score(&alphabet::ENGLISH_ALPHABET, &layout, state, words)
    }

    fn place(state: &mut game_state::GameState, tiles: &[(char, i32, i32)]) {
        for &(tile, row, col) in tiles {
            assert!(state.place_tile(tile, Position::new(row, col)));
        }
    }

    #[test]
    fn extracts_words_in_both_directions() {
        let mut state = state_with_rack("CATS");
        place(&mut state, &[('C', 7, 7), ('A', 7, 8), ('T', 7, 9)]);
        state.clear_placements();
        place(&mut state, &[('S', 8, 9)]);
        let across = word_at_position(&state, Position::new(7, 8), true);
        assert_eq!(across.text, "CAT");
        assert_eq!(across.cells[0], Position::new(7, 7));
        let down = word_at_position(&state, Position::new(8, 9), false);
        assert_eq!(down.text, "TS");
        let single = word_at_position(&state, Position::new(8, 9), true);
        assert_eq!(single.text, "S");

        let words = all_new_words(&state);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "TS");
    }

    #[test]
    fn words_are_deduplicated_by_text() {
        let mut state = state_with_rack("CAT");
        place(&mut state, &[('C', 7, 7), ('A', 7, 8), ('T', 7, 9)]);
        let words = all_new_words(&state);
        assert_eq!(
            words.iter().map(|w| w.text.as_str()).collect::<Vec<_>>(),
            vec!["CAT"]
        );
    }

    #[test]
    fn face_value_ignores_case_and_blanks() {
        assert_eq!(word_face_value("Quiz"), 10 + 1 + 1 + 10);
        assert_eq!(word_face_value("C T"), 4);
        assert_eq!(word_face_value(""), 0);
    }

    #[test]
    fn plain_word_scores_face_value() {
        let mut state = state_with_rack("CAT");
        place(&mut state, &[('C', 7, 7), ('A', 7, 8), ('T', 7, 9)]);
        assert_eq!(score(&state, &all_new_words(&state)), 5);
    }

    #[test]
    fn single_tile_premiums() {
        let mut state = state_with_rack("AD C");
        place(&mut state, &[('A', 0, 0)]);
        let words = [word_at_position(&state, Position::new(0, 0), true)];
        assert_eq!(score(&state, &words), 3);
        state.clear_placements();

        place(&mut state, &[('D', 0, 3)]);
        let words = [word_at_position(&state, Position::new(0, 3), true)];
        assert_eq!(score(&state, &words), 4);
        state.clear_placements();

        place(&mut state, &[('C', 1, 5)]);
        let words = [word_at_position(&state, Position::new(1, 5), true)];
        assert_eq!(score(&state, &words), 9);
        state.clear_placements();

        // blanks are worth nothing, premium or not.
        place(&mut state, &[(' ', 1, 1)]);
        let words = [word_at_position(&state, Position::new(1, 1), true)];
        assert_eq!(score(&state, &words), 0);
    }

    #[test]
    fn word_multipliers_compound() {
        let mut state = state_with_rack("CAT");
        let raw = board_layout::RawLayout {
            size: Some(15),
            squares: Some(vec![
                board_layout::RawSquare {
                    row: Some(7),
                    col: Some(7),
                    kind: Some("DW".into()),
                },
                board_layout::RawSquare {
                    row: Some(7),
                    col: Some(9),
                    kind: Some("DW".into()),
                },
                board_layout::RawSquare {
                    row: Some(7),
                    col: Some(8),
                    kind: Some("TL".into()),
                },
            ]),
        };
        let layout = BoardLayout::validate(state.dim, &raw).unwrap();
        place(&mut state, &[('C', 7, 7), ('A', 7, 8), ('T', 7, 9)]);
        let words = all_new_words(&state);
        let total = PlayScorer::new().compute_score(
            &alphabet::ENGLISH_ALPHABET,
            &layout,
            &state,
            &words,
        );
        assert_eq!(total, (3 + 3 + 1) * 4);
    }

    #[test]
    fn old_tiles_count_face_value_without_premiums() {
        let mut state = state_with_rack("ABS");
        // A on a triple word square, played earlier.
        place(&mut state, &[('A', 0, 0)]);
        state.clear_placements();
        place(&mut state, &[('B', 0, 1)]);
        let words = all_new_words(&state);
        assert_eq!(words[0].text, "AB");
        assert_eq!(score(&state, &words), 1 + 3);
    }

    #[test]
    fn lower_double_word_square_is_not_also_double_letter() {
        let mut state = state_with_rack("AT");
        place(&mut state, &[('A', 11, 11), ('T', 11, 12)]);
        let words = all_new_words(&state);
        assert_eq!(words[0].text, "AT");
        assert_eq!(score(&state, &words), (1 + 1) * 2);
    }

    #[test]
    fn shared_word_multiplier_goes_to_the_first_word_found() {
        let raw = board_layout::RawLayout {
            size: Some(15),
            squares: Some(vec![board_layout::RawSquare {
                row: Some(7),
                col: Some(7),
                kind: Some("DW".into()),
            }]),
        };
        let layout = BoardLayout::validate(matrix::Dim::new(15), &raw).unwrap();
        let total = |tiles: &[(char, i32, i32)]| {
            let mut state = state_with_rack("CATA");
            place(&mut state, tiles);
            let words = all_new_words(&state);
            let texts: Vec<_> = words.iter().map(|w| w.text.clone()).collect();
            let points = PlayScorer::new().compute_score(
                &alphabet::ENGLISH_ALPHABET,
                &layout,
                &state,
                &words,
            );
            (texts, points)
        };

        // C on the double word is shared by across CAT and down CA.
        let (texts, points) = total(&[('C', 7, 7), ('A', 7, 8), ('T', 7, 9), ('A', 8, 7)]);
        assert_eq!(texts, vec!["CAT", "CA"]);
        assert_eq!(points, (3 + 1 + 1) * 2 + (3 + 1));

        // same tiles, placed down first: CA is found first and takes the multiplier.
        let (texts, points) = total(&[('A', 8, 7), ('C', 7, 7), ('A', 7, 8), ('T', 7, 9)]);
        assert_eq!(texts, vec!["CA", "CAT"]);
        assert_eq!(points, (3 + 1) * 2 + (3 + 1 + 1));
    }

    #[test]
    fn shared_tile_premium_applies_once() {
        let mut state = state_with_rack("DOG");
        // D at (0,3) is a double letter shared by across "DO" and down "DG".
        place(&mut state, &[('O', 0, 4), ('G', 1, 3)]);
        state.clear_placements();
        place(&mut state, &[('D', 0, 3)]);
        let words = all_new_words(&state);
        let texts: Vec<_> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["DO", "DG"]);
        // first word gets 2*2 + 1, second word only sees D at face value.
        assert_eq!(score(&state, &words), (4 + 1) + (2 + 2));
    }
}
