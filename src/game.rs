// Copyright (C) 2020-2024 Andy Kurnia.

use super::{
    alphabet, bag, board_layout, dictionary, error, game_state, matrix, observer, play_scorer,
};
use matrix::Position;
use observer::Event;
use rand::RngCore;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    NoAdjacentTiles,
    NoWordFound,
    InvalidWord(String),
    CenterNotCovered,
}

impl Rejection {
    pub fn event(&self) -> Event {
        match self {
            Rejection::NoAdjacentTiles => Event::NoAdjacentTiles,
            Rejection::NoWordFound => Event::NoWordFound,
            Rejection::InvalidWord(_) => Event::InvalidWord,
            Rejection::CenterNotCovered => Event::CenterNotCovered,
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::NoAdjacentTiles => write!(f, "no adjacent tiles"),
            Rejection::NoWordFound => write!(f, "no word found"),
            Rejection::InvalidWord(word) => write!(f, "invalid word: {}", word),
            Rejection::CenterNotCovered => write!(f, "center not covered"),
        }
    }
}

impl std::error::Error for Rejection {}

// One game session. Every mutation goes through here so observers hear about it.
pub struct Game {
    pub(crate) state: game_state::GameState,
    pub(crate) layout: board_layout::BoardLayout,
    pub(crate) dictionary: Arc<dictionary::Dictionary>,
    pub(crate) observers: observer::Observers,
    pub(crate) turn_serial: u64,
    play_scorer: play_scorer::PlayScorer,
}

impl Game {
    pub fn new(
        dim: matrix::Dim,
        layout: board_layout::BoardLayout,
        dictionary: Arc<dictionary::Dictionary>,
        rack_size: usize,
        rng: &mut dyn RngCore,
    ) -> Self {
        let bag = bag::Bag::new_shuffled(&alphabet::ENGLISH_ALPHABET, rng);
        Self::with_bag(dim, layout, dictionary, rack_size, bag)
    }

    pub fn with_bag(
        dim: matrix::Dim,
        layout: board_layout::BoardLayout,
        dictionary: Arc<dictionary::Dictionary>,
        rack_size: usize,
        bag: bag::Bag,
    ) -> Self {
        Self {
            state: game_state::GameState::new(dim, bag, rack_size),
            layout,
            dictionary,
            observers: observer::Observers::default(),
            turn_serial: 0,
            play_scorer: play_scorer::PlayScorer::new(),
        }
    }

    #[inline(always)]
    pub fn state(&self) -> &game_state::GameState {
        &self.state
    }

    #[inline(always)]
    pub fn layout(&self) -> &board_layout::BoardLayout {
        &self.layout
    }

    #[inline(always)]
    pub fn dictionary(&self) -> &Arc<dictionary::Dictionary> {
        &self.dictionary
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.state.dim
    }

    // bumped whenever the turn changes hands or the timer is reset.
    #[inline(always)]
    pub fn turn_serial(&self) -> u64 {
        self.turn_serial
    }

    pub fn add_observer(&mut self, observer: Box<dyn observer::Observer>) {
        self.observers.add(observer);
    }

    pub(crate) fn notify(&mut self, event: Event) {
        self.observers.notify(event, &self.state);
    }

    pub fn initialize(&mut self) {
        self.notify(Event::Initialize);
    }

    pub fn add_player(&mut self, name: impl Into<String>, kind: game_state::PlayerKind) {
        let mut player = game_state::GamePlayer::new(name, kind);
        self.state
            .bag
            .replenish(&mut player.rack, self.state.rack_size);
        tracing::debug!(name = %player.name, ?kind, rack = %alphabet::ENGLISH_ALPHABET.fmt_rack(&player.rack), "player joined");
        self.state.players.push(player);
    }

    pub fn reload_layout(&mut self, source: &dyn board_layout::LayoutSource) {
        self.layout = board_layout::BoardLayout::from_source(self.state.dim, source);
    }

    pub fn current_player(&self) -> &game_state::GamePlayer {
        self.state.current_player()
    }

    pub fn current_player_mut(&mut self) -> &mut game_state::GamePlayer {
        self.state.current_player_mut()
    }

    // for log fields. empty while nobody has joined.
    pub(crate) fn current_name(&self) -> &str {
        self.state
            .players
            .get(self.state.turn)
            .map_or("", |player| player.name.as_str())
    }

    pub fn player(&self, index: usize) -> error::Returns<&game_state::GamePlayer> {
        match self.state.players.get(index) {
            Some(player) => Ok(player),
            None => {
                return_error!(Precondition, format!("no player #{}", index + 1));
            }
        }
    }

    #[inline(always)]
    pub fn is_first_turn(&self) -> bool {
        self.state.is_first_turn
    }

    pub fn is_center_covered(&self) -> bool {
        self.state.is_center_covered()
    }

    pub fn place_tile(&mut self, tile: char, row: i32, col: i32) -> bool {
        if !self.state.place_tile(tile, Position::new(row, col)) {
            tracing::debug!(%tile, row, col, "placement refused");
            return false;
        }
        self.notify(Event::TilePlaced);
        true
    }

    pub fn remove_current_placement_tile(&mut self, pos: Position) -> Option<char> {
        self.state.remove_current_placement_tile(pos)
    }

    pub fn remove_tile_from_board(&mut self, row: i32, col: i32) {
        self.state.remove_tile_from_board(Position::new(row, col));
        self.notify(Event::Board);
    }

    pub fn add_tile_to_board(&mut self, tile: char, row: i32, col: i32) {
        self.state.add_tile_to_board(tile, Position::new(row, col));
        self.notify(Event::Board);
    }

    pub fn restore_player_tiles(&mut self) {
        self.state.restore_player_tiles();
        self.notify(Event::ResetTiles);
    }

    pub fn word_at_position(&self, row: i32, col: i32, horizontal: bool) -> String {
        play_scorer::word_at_position(&self.state, Position::new(row, col), horizontal).text
    }

    pub fn all_new_words(&self) -> Vec<String> {
        play_scorer::all_new_words(&self.state)
            .into_iter()
            .map(|word| word.text)
            .collect()
    }

    pub fn validate_word(&self, word: &str) -> bool {
        self.dictionary.contains(word)
    }

    pub fn calculate_total_score(&mut self, words: &[play_scorer::FormedWord]) -> i32 {
        self.play_scorer.compute_score(
            &alphabet::ENGLISH_ALPHABET,
            &self.layout,
            &self.state,
            words,
        )
    }

    fn reject(&mut self, rejection: Rejection) -> Result<i32, Rejection> {
        tracing::info!(player = %self.current_name(), %rejection, "submission rejected");
        self.restore_player_tiles();
        self.notify(rejection.event());
        Err(rejection)
    }

    // On success returns the points scored. On rejection the board is as it
    // was before this turn's placements.
    pub fn try_submit_word(&mut self) -> Result<i32, Rejection> {
        if !self.state.is_first_turn && !self.state.has_adjacent_tiles() {
            return self.reject(Rejection::NoAdjacentTiles);
        }

        let words = play_scorer::all_new_words(&self.state);
        if words.is_empty() {
            return self.reject(Rejection::NoWordFound);
        }

        if let Some(word) = words.iter().find(|word| !self.validate_word(&word.text)) {
            let text = word.text.clone();
            return self.reject(Rejection::InvalidWord(text));
        }

        if self.state.is_first_turn {
            if !self.state.is_center_covered() {
                return self.reject(Rejection::CenterNotCovered);
            }
            self.state.is_first_turn = false;
        }

        let score = self.calculate_total_score(&words);
        self.current_player_mut().add_score(score);
        self.state.replenish_current_player();
        self.state.clear_placements();
        tracing::info!(
            player = %self.current_name(),
            words = ?words.iter().map(|w| w.text.as_str()).collect::<Vec<_>>(),
            score,
            total = self.current_player().score,
            "word submitted"
        );
        self.notify(Event::WordSubmitted);
        Ok(score)
    }

    pub fn submit_word(&mut self) -> bool {
        self.try_submit_word().is_ok()
    }

    pub fn next_turn(&mut self) {
        if self.state.is_first_turn {
            self.notify(Event::FirstTurn);
            return;
        }
        self.state.advance_turn();
        self.turn_serial += 1;
        tracing::debug!(turn = self.state.turn, player = %self.current_name(), "next turn");
        self.notify(Event::NextTurn);
    }

    // gives up the turn. also what the turn timer calls.
    pub fn skip_turn(&mut self) {
        if self.state.is_first_turn {
            self.next_turn();
            return;
        }
        if !self.state.current_turn_placements.is_empty() {
            self.restore_player_tiles();
        }
        self.next_turn();
    }

    // observable: announces the end each time it is asked and it is true.
    pub fn is_game_over(&mut self) -> bool {
        let over = self.state.is_game_over();
        if over {
            self.notify(Event::GameOver);
        }
        over
    }

    pub fn undo(&mut self) -> error::Returns<Position> {
        let pos = self.state.undo()?;
        self.notify(Event::Board);
        Ok(pos)
    }

    pub fn redo(&mut self) -> error::Returns<Position> {
        let pos = self.state.redo()?;
        self.notify(Event::Board);
        Ok(pos)
    }

    pub fn toggle_display_messages(&mut self) {
        self.state.display_messages = !self.state.display_messages;
        self.notify(Event::ToggleMessages);
    }

    #[inline(always)]
    pub fn display_messages(&self) -> bool {
        self.state.display_messages
    }

    pub fn set_timer_mode(&mut self, timer_mode: bool) {
        self.state.timer_mode = timer_mode;
        self.notify(Event::TimerModeChanged);
    }

    #[inline(always)]
    pub fn is_timer_mode(&self) -> bool {
        self.state.timer_mode
    }

    pub fn reset_timer(&mut self) {
        self.turn_serial += 1;
        self.notify(Event::ResetTimer);
    }

    pub fn remaining_tiles(&self) -> usize {
        self.state.bag.len()
    }
}
