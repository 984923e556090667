// Gameplay tuning. Keep this separate from runtime/server configuration.

pub mod arena;
pub mod asteroid;
pub mod player;
pub mod power_up;
pub mod round;

pub use arena::ArenaTuning;
pub use asteroid::AsteroidTuning;
pub use player::PlayerTuning;
pub use power_up::PowerUpTuning;
pub use round::RoundTuning;

use std::time::Duration;

/// Every gameplay knob a session needs, bundled so tests can tweak single values.
#[derive(Debug, Clone, Copy)]
pub struct GameTuning {
    /// Lobby players required before a match may start.
    pub min_players: usize,
    /// Grace period between game over and session removal.
    pub session_cleanup_delay: Duration,
    pub arena: ArenaTuning,
    pub asteroid: AsteroidTuning,
    pub player: PlayerTuning,
    pub power_up: PowerUpTuning,
    pub round: RoundTuning,
}

impl Default for GameTuning {
    fn default() -> Self {
        Self {
            min_players: 2,
            session_cleanup_delay: Duration::from_secs(30),
            arena: ArenaTuning::default(),
            asteroid: AsteroidTuning::default(),
            player: PlayerTuning::default(),
            power_up: PowerUpTuning::default(),
            round: RoundTuning::default(),
        }
    }
}
