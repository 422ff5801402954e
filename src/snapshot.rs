// Copyright (C) 2020-2024 Andy Kurnia.

use super::{board_layout, error, game, game_state, matrix, observer};
use std::path::Path;

// what goes into a save file. observers and the dictionary stay with the session.
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    pub state: game_state::GameState,
    pub layout: board_layout::BoardLayout,
}

impl Snapshot {
    fn check(&self) -> Result<(), String> {
        let state = &self.state;
        let dim = state.dim;
        if dim != matrix::Dim::new(dim.size) {
            return Err(format!("bad board size {}", dim.size));
        }
        if state.board_tiles.len() != dim.num_cells() {
            return Err(format!("{} cells on a board of size {}", state.board_tiles.len(), dim.size));
        }
        if self.layout.dim() != dim {
            return Err(format!("layout size {} on a board of size {}", self.layout.dim().size, dim.size));
        }
        self.layout.check()?;
        if state.turn >= state.players.len().max(1) {
            return Err(format!("turn {} with {} players", state.turn, state.players.len()));
        }
        // this turn's tiles are on the board.
        if let Some(&(pos, _)) = state
            .current_turn_placements
            .iter()
            .find(|&&(pos, _)| !state.is_occupied(pos))
        {
            return Err(format!("placement {} is not on the board", pos));
        }
        for player in state.players.iter() {
            let history = player.history.iter().copied();
            let undone = player.undo_history.iter().map(|undone| undone.pos);
            if let Some(pos) = history.chain(undone).find(|&pos| !dim.contains(pos)) {
                return Err(format!("{} has a move at {}", player.name, pos));
            }
        }
        Ok(())
    }
}

impl game::Game {
    pub fn save(&self, path: impl AsRef<Path>) -> error::Returns<()> {
        let path = path.as_ref();
        let snapshot = Snapshot {
            state: self.state.clone(),
            layout: self.layout.clone(),
        };
        let json = match serde_json::to_string(&snapshot) {
            Ok(x) => x,
            Err(err) => {
                return_error!(Persistence, format!("error saving game: {err}"));
            }
        };
        if let Err(err) = std::fs::write(path, json) {
            return_error!(Persistence, format!("error saving game: {err}"));
        }
        tracing::info!(path = %path.display(), "game saved");
        Ok(())
    }

    // on failure the current game is left as it was.
    pub fn load(&mut self, path: impl AsRef<Path>) -> error::Returns<()> {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(x) => x,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return_error!(Persistence, "save file not found".into());
            }
            Err(err) => {
                return_error!(Persistence, format!("error loading game: {err}"));
            }
        };
        let snapshot = match serde_json::from_str::<Snapshot>(&json)
            .map_err(|err| err.to_string())
            .and_then(|x| x.check().map(|()| x))
        {
            Ok(x) => x,
            Err(reason) => {
                tracing::warn!(path = %path.display(), %reason, "rejected save file");
                return_error!(
                    Persistence,
                    "save file is corrupted or incompatible".into()
                );
            }
        };
        self.state = snapshot.state;
        self.layout = snapshot.layout;
        self.turn_serial += 1;
        tracing::info!(
            path = %path.display(),
            players = self.state.players.len(),
            turn = self.state.turn,
            "game loaded"
        );
        self.notify(observer::Event::Initialize);
        Ok(())
    }
}
