use crate::domain::state::{Asteroid, AsteroidKind};
use crate::domain::tuning::AsteroidTuning;

/// Result of a single damage application against an asteroid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOutcome {
    /// Score earned by the attacker for this hit (multiplier included).
    pub score: u64,
    pub destroyed: bool,
    pub health_after: i32,
}

/// Subtracts `amount` from the asteroid and scores the hit.
///
/// Armored asteroids pay per point of health actually removed, so overkill on the
/// last point is not rewarded. Normal asteroids pay a flat bonus on the killing hit.
pub fn apply_hit(
    asteroid: &mut Asteroid,
    amount: i32,
    multiplier: u64,
    tuning: &AsteroidTuning,
) -> HitOutcome {
    let health_before = asteroid.health;
    asteroid.health -= amount;
    let destroyed = asteroid.health <= 0;

    let score = match asteroid.kind {
        AsteroidKind::Armored => {
            let consumed = amount.min(health_before).max(0) as u64;
            consumed * tuning.score_per_armor_hp * multiplier
        }
        AsteroidKind::Normal if destroyed => tuning.score_per_asteroid * multiplier,
        AsteroidKind::Normal => 0,
    };

    HitOutcome {
        score,
        destroyed,
        health_after: asteroid.health,
    }
}
