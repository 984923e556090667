use std::time::Duration;

/// Gameplay tuning for power-up drops and the effects they grant.
#[derive(Debug, Clone, Copy)]
pub struct PowerUpTuning {
    /// Probability that a destroyed asteroid drops a power-up.
    pub drop_chance: f64,
    /// Cumulative weight thresholds: roll < shield => Shield, roll < rapid_fire => RapidFire.
    pub shield_weight: f64,
    pub rapid_fire_weight: f64,
    /// Downward drift in pixels per second.
    pub fall_speed: f32,
    pub shield_duration: Duration,
    pub rapid_fire_duration: Duration,
    pub score_multiplier_duration: Duration,
    pub score_multiplier: u64,
}

impl Default for PowerUpTuning {
    fn default() -> Self {
        Self {
            drop_chance: 0.20,
            shield_weight: 0.40,
            rapid_fire_weight: 0.35,
            fall_speed: 50.0,
            shield_duration: Duration::from_millis(5000),
            rapid_fire_duration: Duration::from_millis(7000),
            score_multiplier_duration: Duration::from_millis(10000),
            score_multiplier: 2,
        }
    }
}
