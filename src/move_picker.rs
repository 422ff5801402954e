// Copyright (C) 2020-2021 Andy Kurnia. All rights reserved.

use super::{alphabet, dictionary, game, game_state, matrix, play_scorer};
use matrix::Position;
use rand::prelude::*;
use std::collections::BTreeSet;

pub const MAX_RACK_SIZE: usize = 7;

// every ordered arrangement of every non-empty subset of the rack.
fn gen_arrangements(
    rack: &[char],
    used: &mut [bool],
    prefix: &mut String,
    out: &mut BTreeSet<String>,
) {
    for i in 0..rack.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        prefix.push(rack[i]);
        out.insert(prefix.clone());
        gen_arrangements(rack, used, prefix, out);
        prefix.pop();
        used[i] = false;
    }
}

pub fn arrangements(rack: &[char]) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    let mut used = vec![false; rack.len()];
    gen_arrangements(rack, &mut used, &mut String::new(), &mut out);
    out
}

// dictionary words spellable from the rack, best face value first.
pub fn candidate_words(rack: &[char], dictionary: &dictionary::Dictionary) -> Vec<String> {
    let rack = &rack[..rack.len().min(MAX_RACK_SIZE)];
    let mut words = arrangements(rack)
        .into_iter()
        .filter(|word| dictionary.contains(word))
        .collect::<Vec<_>>();
    words.sort_by_key(|word| std::cmp::Reverse(play_scorer::word_face_value(word)));
    words
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AiTurn {
    pub player: usize,
    pub played: bool,
}

pub struct MovePicker {
    rng: Box<dyn RngCore + Send>,
    allow_opening_moves: bool,
}

impl MovePicker {
    pub fn new(rng: Box<dyn RngCore + Send>) -> Self {
        Self {
            rng,
            allow_opening_moves: false,
        }
    }

    // Off by default: the search insists on touching an existing tile, so
    // it cannot open the game.
    pub fn with_opening_moves(mut self, allow: bool) -> Self {
        self.allow_opening_moves = allow;
        self
    }

    #[inline(always)]
    pub fn allows_opening_moves(&self) -> bool {
        self.allow_opening_moves
    }

    pub fn can_place_word(
        &self,
        game_state: &game_state::GameState,
        word: &str,
        start: Position,
        horizontal: bool,
    ) -> bool {
        let dim = game_state.dim;
        let center = dim.center();
        let mut has_adjacent = false;
        let mut covers_center = false;
        for (i, _) in (0..).zip(word.chars()) {
            let cell = start.step(horizontal, i);
            if !dim.contains(cell) || game_state.is_occupied(cell) {
                return false;
            }
            has_adjacent |= cell
                .neighbors()
                .iter()
                .any(|&n| game_state.is_occupied(n));
            covers_center |= cell == center;
        }
        has_adjacent
            || (self.allow_opening_moves && game_state.is_first_turn && covers_center)
    }

    fn find_spot(
        &mut self,
        game_state: &game_state::GameState,
        word: &str,
    ) -> Option<(Position, bool)> {
        let mut positions = game_state.dim.positions().collect::<Vec<_>>();
        positions.shuffle(&mut self.rng);
        positions.into_iter().find_map(|pos| {
            [true, false]
                .into_iter()
                .find(|&horizontal| self.can_place_word(game_state, word, pos, horizontal))
                .map(|horizontal| (pos, horizontal))
        })
    }

    // Leaves rack and board exactly as they were when it returns false.
    fn play_word(
        &mut self,
        game: &mut game::Game,
        word: &str,
        start: Position,
        horizontal: bool,
    ) -> bool {
        let saved_rack = game.current_player().rack.clone();
        let saved_history_len = game.current_player().history.len();
        let mut placed_all = true;
        for (i, tile) in (0..).zip(word.chars()) {
            let cell = start.step(horizontal, i);
            if !game.place_tile(tile, cell.row, cell.col) {
                placed_all = false;
                break;
            }
        }
        if placed_all {
            match game.try_submit_word() {
                Ok(score) => {
                    tracing::info!(player = %game.current_name(), word, %start, horizontal, score, "ai played");
                    return true;
                }
                Err(rejection) => {
                    tracing::debug!(word, %start, horizontal, %rejection, "ai submission rejected");
                }
            }
        } else {
            game.restore_player_tiles();
        }
        let player = game.current_player_mut();
        player.rack = saved_rack;
        player.history.truncate(saved_history_len);
        false
    }

    // One attempt: the best word that fits somewhere gets submitted, and
    // if that fails the turn is reported as having no move.
    pub fn pick(&mut self, game: &mut game::Game) -> bool {
        if game.state().players.is_empty() {
            return false;
        }
        let rack = game.current_player().rack.clone();
        let candidates = candidate_words(&rack, game.dictionary());
        tracing::debug!(
            player = %game.current_name(),
            rack = %alphabet::ENGLISH_ALPHABET.fmt_rack(&rack),
            candidates = candidates.len(),
            "ai searching"
        );
        for word in candidates.iter() {
            if let Some((start, horizontal)) = self.find_spot(game.state(), word) {
                return self.play_word(game, word, start, horizontal);
            }
        }
        false
    }

    // Plays every consecutive ai turn with messages silenced. Stops at a
    // human, at game over, or once every player has passed in a row. An end
    // reached here is announced again once messages are back on.
    pub fn play_ai_turns(&mut self, game: &mut game::Game) -> Vec<AiTurn> {
        let mut turns = Vec::new();
        if game.state().players.is_empty() || (game.is_first_turn() && !self.allow_opening_moves)
        {
            return turns;
        }
        let was_displaying = game.display_messages();
        if was_displaying {
            game.toggle_display_messages();
        }
        let num_players = game.state().players.len();
        let mut consecutive_passes = 0;
        let mut ended = false;
        while game.current_player().is_ai() {
            let player = game.state().turn;
            let played = self.pick(game);
            turns.push(AiTurn { player, played });
            if played {
                consecutive_passes = 0;
            } else {
                tracing::info!(player = %game.current_name(), "ai skipped its turn");
                consecutive_passes += 1;
            }
            if game.is_first_turn() {
                // nobody can move until the opening is played.
                break;
            }
            game.next_turn();
            if game.is_game_over() {
                ended = true;
                break;
            }
            if consecutive_passes >= num_players {
                break;
            }
        }
        if was_displaying {
            game.toggle_display_messages();
            if ended {
                game.is_game_over();
            }
        }
        turns
    }
}
