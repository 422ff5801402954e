// Copyright (C) 2020-2021 Andy Kurnia. All rights reserved.

use rand::prelude::*;
use wordgrid::{alphabet, display, error, game_config, move_picker, return_error};

// ai self-play: auto [dictionary] [num ai] [layout.json] [size] [seed]
fn main() -> error::Returns<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let seed = match args.get(4) {
        Some(arg) => match arg.parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(_) => {
                return_error!(Config, format!("invalid seed: {arg:?}"));
            }
        },
        None => None,
    };
    // same slots as the shell, minus the human count.
    let slot = |i: usize| args.get(i).cloned().unwrap_or_else(|| "-".to_string());
    let config_args = vec![slot(0), "0".to_string(), slot(1), slot(2), slot(3)];
    let mut config = game_config::GameConfig::from_args(&config_args)?;
    if config_args[2] == "-" {
        config.num_ai = 2;
    }
    config.timer_mode = false;

    let mut rng: Box<dyn RngCore + Send> = match seed {
        Some(seed) => Box::new(rand_chacha::ChaCha20Rng::seed_from_u64(seed)),
        None => Box::new(rand_chacha::ChaCha20Rng::from_os_rng()),
    };
    let mut game = config.make_game(&mut rng);
    if game.state().players.is_empty() {
        return_error!(Config, "need at least one ai player".into());
    }
    println!(
        "bag: {}",
        alphabet::ENGLISH_ALPHABET.fmt_rack(&game.state().bag.0)
    );

    let mut picker = move_picker::MovePicker::new(rng).with_opening_moves(true);
    loop {
        let turns = picker.play_ai_turns(&mut game);
        display::print_board(game.layout(), game.state());
        print!("{}", display::format_scores(game.state()));
        for turn in turns.iter() {
            println!(
                "{} {}",
                game.state().players[turn.player].name,
                if turn.played { "played" } else { "passed" }
            );
        }
        if game.is_first_turn() {
            println!("nobody could open the board");
            break;
        }
        if game.is_game_over() || turns.iter().all(|turn| !turn.played) {
            break;
        }
    }

    if let Some(best) = game.state().players.iter().max_by_key(|p| p.score) {
        println!("winner: {} with {}", best.name, best.score);
    }
    Ok(())
}
