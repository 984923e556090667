/// Gameplay tuning for players.
#[derive(Debug, Clone, Copy)]
pub struct PlayerTuning {
    /// Lives granted at the start of every match.
    pub starting_lives: u32,
    /// Position assigned on connect, before the client reports its own.
    pub spawn_x: f32,
    pub spawn_y: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            spawn_x: 400.0,
            spawn_y: 500.0,
        }
    }
}
