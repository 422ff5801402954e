// Copyright (C) 2020-2024 Andy Kurnia.

use super::game;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

// Skips the current turn once it has run longer than the limit. Any turn
// change (or reset) seen through the game's turn serial restarts the clock.
pub struct GameTimers {
    instant: Instant,
    limit: Duration,
    turn_serial: u64,
}

impl GameTimers {
    pub fn new(limit: Duration, turn_serial: u64) -> Self {
        Self {
            instant: Instant::now(),
            limit,
            turn_serial,
        }
    }

    pub fn reset_to(&mut self, instant: Instant, turn_serial: u64) {
        self.instant = instant;
        self.turn_serial = turn_serial;
    }

    #[inline(always)]
    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn remaining_as_at(&self, instant: Instant) -> Duration {
        self.limit
            .saturating_sub(instant.saturating_duration_since(self.instant))
    }

    // returns true if it skipped the turn.
    pub fn tick(&mut self, game: &mut game::Game, instant: Instant) -> bool {
        if game.turn_serial() != self.turn_serial {
            self.reset_to(instant, game.turn_serial());
            return false;
        }
        if !game.is_timer_mode()
            || game.state().players.is_empty()
            || !self.remaining_as_at(instant).is_zero()
        {
            return false;
        }
        tracing::info!(player = %game.current_name(), limit_ms = self.limit.as_millis() as u64, "time is up");
        game.skip_turn();
        // a skip on the first turn does not change hands, so restart by hand.
        self.reset_to(instant, game.turn_serial());
        true
    }
}

fn lock_game(game: &Mutex<game::Game>) -> std::sync::MutexGuard<'_, game::Game> {
    match game.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

// Drives a shared game's turn clock until the game ends. The lock is only
// held for the duration of one tick, so it never interleaves with a move.
pub async fn run_turn_timer(
    game: Arc<Mutex<game::Game>>,
    limit: Duration,
    resolution: Duration,
) -> usize {
    let mut timers = {
        let game = lock_game(&game);
        GameTimers::new(limit, game.turn_serial())
    };
    let mut interval = tokio::time::interval(resolution);
    let mut num_skipped = 0;
    loop {
        interval.tick().await;
        let mut game = lock_game(&game);
        if game.state().is_game_over() {
            break;
        }
        if timers.tick(&mut game, Instant::now()) {
            num_skipped += 1;
        }
    }
    num_skipped
}
