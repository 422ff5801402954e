// Copyright (C) 2020-2021 Andy Kurnia. All rights reserved.

use super::{bag, error, matrix};
use matrix::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PlayerKind {
    Human,
    Ai,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Undone {
    pub pos: Position,
    pub tile: char,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct GamePlayer {
    pub name: String,
    pub kind: PlayerKind,
    pub score: i32,
    pub rack: Vec<char>,
    // positions placed this turn, oldest first.
    pub history: Vec<Position>,
    // undone placements, most recent last.
    pub undo_history: Vec<Undone>,
}

impl GamePlayer {
    pub fn new(name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            score: 0,
            rack: Vec::with_capacity(7),
            history: Vec::new(),
            undo_history: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn is_ai(&self) -> bool {
        self.kind == PlayerKind::Ai
    }

    fn tile_index(&self, tile: char) -> Option<usize> {
        self.rack.iter().position(|&t| t.eq_ignore_ascii_case(&tile))
    }

    pub fn has_tile(&self, tile: char) -> bool {
        self.tile_index(tile).is_some()
    }

    // rack cap is only enforced by replenishment.
    pub fn add_tile(&mut self, tile: char) {
        self.rack.push(tile);
    }

    // returns the rack's own spelling of the tile.
    pub fn remove_tile(&mut self, tile: char) -> Option<char> {
        let idx = self.tile_index(tile)?;
        Some(self.rack.remove(idx))
    }

    pub fn add_score(&mut self, points: i32) {
        self.score += points;
    }

    pub fn clear_histories(&mut self) {
        self.history.clear();
        self.undo_history.clear();
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct GameState {
    pub dim: matrix::Dim,
    pub board_tiles: Vec<Option<char>>,
    pub players: Vec<GamePlayer>,
    pub bag: bag::Bag,
    pub turn: usize,
    pub rack_size: usize,
    // this turn's placements in placement order; every key is occupied on the board.
    pub current_turn_placements: Vec<(Position, char)>,
    pub is_first_turn: bool,
    pub display_messages: bool,
    pub timer_mode: bool,
}

impl GameState {
    pub fn new(dim: matrix::Dim, bag: bag::Bag, rack_size: usize) -> Self {
        Self {
            dim,
            board_tiles: vec![None; dim.num_cells()],
            players: Vec::new(),
            bag,
            turn: 0,
            rack_size,
            current_turn_placements: Vec::new(),
            is_first_turn: true,
            display_messages: true,
            timer_mode: false,
        }
    }

    #[inline(always)]
    pub fn at(&self, pos: Position) -> Option<char> {
        if self.dim.contains(pos) {
            self.board_tiles[self.dim.at(pos)]
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.at(pos).is_some()
    }

    pub fn is_center_covered(&self) -> bool {
        self.is_occupied(self.dim.center())
    }

    pub fn current_player(&self) -> &GamePlayer {
        &self.players[self.turn]
    }

    pub fn current_player_mut(&mut self) -> &mut GamePlayer {
        &mut self.players[self.turn]
    }

    pub fn placement_at(&self, pos: Position) -> Option<char> {
        self.current_turn_placements
            .iter()
            .find(|&&(p, _)| p == pos)
            .map(|&(_, tile)| tile)
    }

    #[inline(always)]
    pub fn is_placed_this_turn(&self, pos: Position) -> bool {
        self.placement_at(pos).is_some()
    }

    fn record_placement(&mut self, pos: Position, tile: char) {
        match self
            .current_turn_placements
            .iter_mut()
            .find(|(p, _)| *p == pos)
        {
            Some(entry) => entry.1 = tile,
            None => self.current_turn_placements.push((pos, tile)),
        }
    }

    // the turn's tiles never overwrite the board.
    pub fn place_tile(&mut self, tile: char, pos: Position) -> bool {
        if self.players.is_empty() || !self.current_player().has_tile(tile) {
            return false;
        }
        if !self.dim.contains(pos) || self.is_occupied(pos) {
            return false;
        }
        let Some(tile) = self.current_player_mut().remove_tile(tile) else {
            return false;
        };
        let idx = self.dim.at(pos);
        self.board_tiles[idx] = Some(tile);
        self.current_player_mut().history.push(pos);
        self.record_placement(pos, tile);
        true
    }

    pub fn remove_current_placement_tile(&mut self, pos: Position) -> Option<char> {
        let idx = self
            .current_turn_placements
            .iter()
            .position(|&(p, _)| p == pos)?;
        Some(self.current_turn_placements.remove(idx).1)
    }

    pub fn remove_tile_from_board(&mut self, pos: Position) -> Option<char> {
        if !self.dim.contains(pos) {
            return None;
        }
        let idx = self.dim.at(pos);
        self.board_tiles[idx].take()
    }

    pub fn add_tile_to_board(&mut self, tile: char, pos: Position) -> bool {
        if !self.dim.contains(pos) {
            return false;
        }
        let idx = self.dim.at(pos);
        self.board_tiles[idx] = Some(tile);
        self.record_placement(pos, tile);
        true
    }

    pub fn clear_placements(&mut self) {
        self.current_turn_placements.clear();
    }

    // puts every tile of this turn back on the rack.
    pub fn restore_player_tiles(&mut self) {
        let placements = std::mem::take(&mut self.current_turn_placements);
        for (pos, tile) in placements {
            let tile = self.remove_tile_from_board(pos).unwrap_or(tile);
            self.current_player_mut().add_tile(tile);
        }
    }

    // true if any of this turn's tiles touches a tile from an earlier turn.
    pub fn has_adjacent_tiles(&self) -> bool {
        self.current_turn_placements.iter().any(|&(pos, _)| {
            pos.neighbors()
                .iter()
                .any(|&n| self.is_occupied(n) && !self.is_placed_this_turn(n))
        })
    }

    pub fn undo(&mut self) -> error::Returns<Position> {
        if self.players.is_empty() {
            return_error!(Precondition, "no players".into());
        }
        let Some(pos) = self.current_player_mut().history.pop() else {
            return_error!(Precondition, "nothing to undo".into());
        };
        let scratch = self.remove_current_placement_tile(pos);
        let on_board = self.remove_tile_from_board(pos);
        let Some(tile) = scratch.or(on_board) else {
            return_error!(Precondition, format!("no tile at {}", pos));
        };
        let player = self.current_player_mut();
        player.add_tile(tile);
        player.undo_history.push(Undone { pos, tile });
        Ok(pos)
    }

    // takes back the exact tile that was undone, wherever it sits on the rack.
    pub fn redo(&mut self) -> error::Returns<Position> {
        if self.players.is_empty() {
            return_error!(Precondition, "no players".into());
        }
        let Some(&Undone { pos, tile }) = self.current_player().undo_history.last() else {
            return_error!(Precondition, "nothing to redo".into());
        };
        if self.is_occupied(pos) {
            return_error!(Precondition, format!("cannot redo, {} is occupied", pos));
        }
        let player = self.current_player_mut();
        let Some(idx) = player.rack.iter().rposition(|&t| t == tile) else {
            return_error!(Precondition, format!("cannot redo, {:?} is no longer on the rack", tile));
        };
        player.rack.remove(idx);
        player.undo_history.pop();
        player.history.push(pos);
        self.add_tile_to_board(tile, pos);
        Ok(pos)
    }

    pub fn replenish_current_player(&mut self) {
        let rack_size = self.rack_size;
        let Self { players, bag, turn, .. } = self;
        bag.replenish(&mut players[*turn].rack, rack_size);
    }

    pub fn advance_turn(&mut self) {
        if self.players.is_empty() {
            return;
        }
        self.turn = (self.turn + 1) % self.players.len();
        self.clear_placements();
        self.current_player_mut().clear_histories();
    }

    pub fn is_game_over(&self) -> bool {
        self.bag.is_empty() && self.players.iter().any(|player| player.rack.len() < 3)
    }

    pub fn num_tiles_on_board(&self) -> usize {
        self.board_tiles.iter().filter(|t| t.is_some()).count()
    }
}
