/// Playfield geometry shared by spawning and pruning.
///
/// Coordinates are screen-space pixels with +Y pointing down.
#[derive(Debug, Clone, Copy)]
pub struct ArenaTuning {
    /// Width of the visible playfield; spawn x is drawn from `0..width`.
    pub width: f32,
    /// Y coordinate asteroids spawn at (just above the top edge).
    pub spawn_y: f32,
    /// Aim point used when a session has no living players to steer toward.
    pub default_aim: (f32, f32),

    // Pruning margin around the playfield.
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl ArenaTuning {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            width: 800.0,
            spawn_y: -50.0,
            default_aim: (400.0, 500.0),
            min_x: -200.0,
            max_x: 1000.0,
            min_y: -200.0,
            max_y: 800.0,
        }
    }
}
