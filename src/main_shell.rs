// Copyright (C) 2020-2021 Andy Kurnia. All rights reserved.

use rand::SeedableRng;
use std::sync::{Arc, Mutex, MutexGuard};
use wordgrid::{
    display, error, game, game_config, game_state, game_timers, matrix, move_picker, observer,
    rlhelper,
};

static HELP: &str = "\
commands:
  board                  show the board
  rack                   show the current player's rack
  scores                 show everyone's score
  place <tile> <row> <col>
                         put a rack tile on the board (? or _ for a blank)
  undo / redo            take back or replay the last placement
  words                  words formed by this turn's tiles
  submit                 submit this turn's word
  skip                   give up this turn
  ai                     let the ai players move now
  save <file> / load <file>
  timer [on|off|reset]   turn timer
  messages               toggle messages
  source <file>          run commands from a file
  exit";

fn lock(game: &Mutex<game::Game>) -> MutexGuard<'_, game::Game> {
    match game.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn print_status(game: &game::Game) {
    display::print_board(game.layout(), game.state());
    print!("{}", display::format_scores(game.state()));
    let player = game.current_player();
    println!(
        "turn: {}, rack: {}, bag: {}",
        player.name,
        wordgrid::alphabet::ENGLISH_ALPHABET.fmt_rack(&player.rack),
        game.remaining_tiles()
    );
}

fn parse_tile(arg: &str) -> Option<char> {
    let mut chars = arg.chars();
    let tile = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    match tile {
        '?' | '_' => Some(wordgrid::alphabet::BLANK),
        _ if tile.is_ascii_alphabetic() => Some(tile.to_ascii_uppercase()),
        _ => None,
    }
}

// after a human's turn ends: hand over, then let any ai players go.
// returns true when the game is over.
fn end_human_turn(game: &mut game::Game, picker: &mut move_picker::MovePicker) -> bool {
    game.next_turn();
    if game.is_game_over() {
        return true;
    }
    run_ai(game, picker)
}

fn run_ai(game: &mut game::Game, picker: &mut move_picker::MovePicker) -> bool {
    for turn in picker.play_ai_turns(game) {
        let name = &game.state().players[turn.player].name;
        if turn.played {
            println!("{} played.", name);
        } else {
            println!("{} passed.", name);
        }
    }
    // play_ai_turns has already announced an end it reached.
    game.state().is_game_over()
}

fn announce_winner(game: &game::Game) {
    print!("{}", display::format_scores(game.state()));
    if let Some(best) = game.state().players.iter().max_by_key(|p| p.score) {
        println!("winner: {} with {}", best.name, best.score);
    }
}

fn run_command(
    strings: &[String],
    game: &Arc<Mutex<game::Game>>,
    picker: &mut move_picker::MovePicker,
) -> error::Returns<bool> {
    let mut game = lock(game);
    let game = &mut *game;
    match strings[0].as_str() {
        "board" => {
            display::print_board(game.layout(), game.state());
        }
        "rack" => {
            let player = game.player(game.state().turn)?;
            println!(
                "{}: {}",
                player.name,
                wordgrid::alphabet::ENGLISH_ALPHABET.fmt_rack(&player.rack)
            );
        }
        "scores" => {
            print!("{}", display::format_scores(game.state()));
        }
        "place" => {
            if strings.len() != 4 {
                println!("usage: place <tile> <row> <col>");
                return Ok(false);
            }
            let (Some(tile), Ok(row), Ok(col)) = (
                parse_tile(&strings[1]),
                strings[2].parse::<i32>(),
                strings[3].parse::<i32>(),
            ) else {
                println!("usage: place <tile> <row> <col>");
                return Ok(false);
            };
            if game.current_player().is_ai() {
                println!("it is not your turn");
            } else if game.place_tile(tile, row, col) {
                display::print_board(game.layout(), game.state());
            } else {
                println!("cannot place {} at {}", tile, matrix::Position::new(row, col));
            }
        }
        "undo" => {
            let pos = game.undo()?;
            println!("took back {}", pos);
        }
        "redo" => {
            let pos = game.redo()?;
            println!("replayed {}", pos);
        }
        "words" => {
            println!("{:?}", game.all_new_words());
        }
        "submit" => match game.try_submit_word() {
            Ok(score) => {
                println!("{} scored {}", game.current_player().name, score);
                if end_human_turn(game, picker) {
                    announce_winner(game);
                    return Ok(true);
                }
                print_status(game);
            }
            Err(rejection) => {
                if !game.display_messages() {
                    println!("not accepted: {}", rejection);
                }
            }
        },
        "skip" => {
            game.skip_turn();
            if game.is_first_turn() {
                return Ok(false);
            }
            if game.is_game_over() || run_ai(game, picker) {
                announce_winner(game);
                return Ok(true);
            }
            print_status(game);
        }
        "ai" => {
            if run_ai(game, picker) {
                announce_winner(game);
                return Ok(true);
            }
            print_status(game);
        }
        "save" => {
            if strings.len() != 2 {
                println!("usage: save <file>");
            } else {
                game.save(&strings[1])?;
                println!("saved");
            }
        }
        "load" => {
            if strings.len() != 2 {
                println!("usage: load <file>");
            } else {
                game.load(&strings[1])?;
                print_status(game);
            }
        }
        "timer" => match strings.get(1).map(String::as_str) {
            Some("on") => game.set_timer_mode(true),
            Some("off") => game.set_timer_mode(false),
            Some("reset") => game.reset_timer(),
            _ => println!("timer is {}", if game.is_timer_mode() { "on" } else { "off" }),
        },
        "messages" => {
            game.toggle_display_messages();
            println!("messages {}", if game.display_messages() { "on" } else { "off" });
        }
        _ => {
            println!("invalid input, help for help");
        }
    }
    Ok(false)
}

fn main() -> error::Returns<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let config = game_config::GameConfig::from_args(&args)?;
    let mut rng = rand_chacha::ChaCha20Rng::from_os_rng();
    let mut game = config.make_game(&mut rng);
    if game.state().players.is_empty() {
        game.add_player("Player 1", game_state::PlayerKind::Human);
    }
    game.add_observer(Box::new(
        |event: observer::Event, _: &game_state::GameState| {
            if let Some(message) = event.message() {
                println!("{}", message);
            }
        },
    ));
    game.initialize();
    let mut picker = move_picker::MovePicker::new(Box::new(rand_chacha::ChaCha20Rng::from_os_rng()));
    print_status(&game);

    let game = Arc::new(Mutex::new(game));
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.spawn(game_timers::run_turn_timer(
        game.clone(),
        config.turn_limit,
        std::time::Duration::from_millis(200),
    ));

    let mut rl = rlhelper::new_rl_editor(">> ")?;
    let mut cmd_stack = Vec::<(String, Option<(String, usize)>)>::new();
    loop {
        if let Some((line, source)) = cmd_stack.pop() {
            if let Some((filename, line_num)) = source {
                println!("{}:{}> {}", filename, line_num, line);
            }
            match shell_words::split(&line) {
                Ok(strings) => {
                    if !strings.is_empty() {
                        match strings[0].as_str() {
                            "help" => {
                                println!("{}", HELP);
                            }
                            "exit" => {
                                break;
                            }
                            "source" => {
                                if strings.len() > 1 {
                                    match std::fs::read_to_string(&strings[1]) {
                                        Ok(whole_file) => {
                                            let v = cmd_stack.len();
                                            for (line_num, line) in whole_file.lines().enumerate() {
                                                cmd_stack.push((
                                                    line.to_string(),
                                                    Some((strings[1].clone(), line_num + 1)),
                                                ));
                                            }
                                            cmd_stack[v..].reverse();
                                        }
                                        Err(err) => {
                                            println!("cannot open file: {:?}", err);
                                        }
                                    }
                                } else {
                                    println!("need another arg");
                                }
                            }
                            _ => match run_command(&strings, &game, &mut picker) {
                                Ok(true) => break,
                                Ok(false) => {}
                                Err(err) => println!("{}", err),
                            },
                        }
                    }
                }
                Err(err) => {
                    println!("Bad quoting: {:?}", err);
                }
            }
        } else {
            match rl.readline(">> ") {
                Ok(line) => {
                    rl.add_history_entry(line.as_str())?;
                    cmd_stack.push((line, None));
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }
    }

    runtime.shutdown_background();
    Ok(())
}
