/// Gameplay tuning for asteroid hazards and the score they award.
#[derive(Debug, Clone, Copy)]
pub struct AsteroidTuning {
    /// Minimum speed in pixels per second at round 1.
    pub base_speed: f32,
    /// Random extra speed (0..variance) at round 1.
    pub speed_variance: f32,
    /// Probability that a spawned asteroid is armored.
    pub armored_chance: f64,
    pub normal_health: i32,
    pub armored_health: i32,
    /// Render size hint attached to armored asteroids.
    pub armored_size_hint: f32,
    /// Flat score for destroying a normal asteroid.
    pub score_per_asteroid: u64,
    /// Score per point of armor removed from an armored asteroid.
    pub score_per_armor_hp: u64,
}

impl Default for AsteroidTuning {
    fn default() -> Self {
        Self {
            base_speed: 100.0,
            speed_variance: 150.0,
            armored_chance: 0.25,
            normal_health: 1,
            armored_health: 3,
            armored_size_hint: 60.0,
            score_per_asteroid: 50,
            score_per_armor_hp: 25,
        }
    }
}
