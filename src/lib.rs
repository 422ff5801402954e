// Copyright (C) 2020-2024 Andy Kurnia.

#[macro_use]
pub mod error;

pub mod alphabet;
pub mod bag;
pub mod board_layout;
pub mod dictionary;
pub mod display;
pub mod game;
pub mod game_config;
pub mod game_state;
pub mod game_timers;
pub mod matrix;
pub mod move_picker;
pub mod observer;
pub mod play_scorer;
pub mod rlhelper;
pub mod snapshot;
