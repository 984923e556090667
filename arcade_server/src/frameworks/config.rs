use crate::domain::GameTuning;
use std::{env, time::Duration};

// Runtime/server constants (not gameplay tuning).

pub fn http_port() -> u16 {
    env::var("GAME_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000)
}

/// Lobby size needed before a start request is honored. Never below one.
pub fn min_players_to_start() -> usize {
    env::var("MIN_PLAYERS_TO_START")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(2)
}

/// Default gameplay tuning with the environment overrides applied.
pub fn game_tuning() -> GameTuning {
    GameTuning {
        min_players: min_players_to_start(),
        ..GameTuning::default()
    }
}

pub const INPUT_CHANNEL_CAPACITY: usize = 1024;
pub const MAILBOX_CAPACITY: usize = 256;

pub const TICK_INTERVAL: Duration = Duration::from_millis(1000 / 30);
