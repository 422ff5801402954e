// Copyright (C) 2020-2023 Andy Kurnia.

use super::{board_layout, dictionary, error, game, game_state, matrix};
use rand::RngCore;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const MAX_AI_PLAYERS: usize = 5;

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub board_size: i32,
    pub rack_size: usize,
    pub layout_path: Option<PathBuf>,
    pub dictionary_path: PathBuf,
    pub num_humans: usize,
    pub num_ai: usize,
    pub timer_mode: bool,
    pub turn_limit: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 15,
            rack_size: 7,
            layout_path: None,
            dictionary_path: PathBuf::from("words.txt"),
            num_humans: 1,
            num_ai: 1,
            timer_mode: false,
            turn_limit: Duration::from_secs(30),
        }
    }
}

fn parse_arg<T: std::str::FromStr>(what: &str, arg: &str) -> error::Returns<T> {
    match arg.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => {
            return_error!(Config, format!("invalid {what}: {arg:?}"));
        }
    }
}

impl GameConfig {
    // positional: [dictionary] [humans] [ai] [layout.json] [size] [timer secs].
    // "-" keeps the default for that slot.
    pub fn from_args(args: &[String]) -> error::Returns<Self> {
        let mut config = Self::default();
        if args.len() > 6 {
            return_error!(Config, format!("too many arguments: {}", args.len()));
        }
        for (i, arg) in args.iter().enumerate() {
            if arg == "-" {
                continue;
            }
            match i {
                0 => config.dictionary_path = PathBuf::from(arg),
                1 => config.num_humans = parse_arg("number of humans", arg)?,
                2 => config.num_ai = parse_arg("number of ai players", arg)?,
                3 => config.layout_path = Some(PathBuf::from(arg)),
                4 => config.board_size = parse_arg("board size", arg)?,
                _ => {
                    let secs = parse_arg::<u64>("turn limit", arg)?;
                    config.timer_mode = secs > 0;
                    if secs > 0 {
                        config.turn_limit = Duration::from_secs(secs);
                    }
                }
            }
        }
        if config.board_size < 1 {
            return_error!(Config, format!("invalid board size: {}", config.board_size));
        }
        Ok(config)
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        matrix::Dim::new(self.board_size)
    }

    pub fn num_ai_players(&self) -> usize {
        self.num_ai.min(MAX_AI_PLAYERS)
    }

    pub fn make_layout(&self) -> board_layout::BoardLayout {
        let dim = self.dim();
        match &self.layout_path {
            Some(path) => {
                board_layout::BoardLayout::from_source(dim, &board_layout::JsonLayoutFile::new(path))
            }
            None => board_layout::BoardLayout::from_source(dim, &board_layout::DefaultLayout),
        }
    }

    // humans first, then the ai players.
    pub fn make_game(&self, rng: &mut dyn RngCore) -> game::Game {
        if self.num_ai > MAX_AI_PLAYERS {
            tracing::warn!(
                requested = self.num_ai,
                max = MAX_AI_PLAYERS,
                "too many ai players"
            );
        }
        let dictionary = Arc::new(dictionary::Dictionary::load(&self.dictionary_path));
        self.make_game_with_dictionary(dictionary, rng)
    }

    pub fn make_game_with_dictionary(
        &self,
        dictionary: Arc<dictionary::Dictionary>,
        rng: &mut dyn RngCore,
    ) -> game::Game {
        let mut game = game::Game::new(
            self.dim(),
            self.make_layout(),
            dictionary,
            self.rack_size,
            rng,
        );
        for i in 1..=self.num_humans {
            game.add_player(format!("Player {i}"), game_state::PlayerKind::Human);
        }
        for i in 1..=self.num_ai_players() {
            game.add_player(format!("AI {i}"), game_state::PlayerKind::Ai);
        }
        if self.timer_mode {
            game.set_timer_mode(true);
        }
        tracing::info!(
            size = game.dim().size,
            humans = self.num_humans,
            ai = self.num_ai_players(),
            words = game.dictionary().len(),
            "game created"
        );
        game
    }
}
