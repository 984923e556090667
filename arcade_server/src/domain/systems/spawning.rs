use crate::domain::state::{Asteroid, AsteroidKind, EntityId, PowerUpKind};
use crate::domain::tuning::{ArenaTuning, AsteroidTuning, PowerUpTuning, RoundTuning};
use rand::Rng;

#[derive(Debug, Clone, Copy)]
pub struct SpawnConfig<'a> {
    pub arena: &'a ArenaTuning,
    pub asteroid: &'a AsteroidTuning,
    pub round_tuning: &'a RoundTuning,
    pub round: u32,
}

/// Builds an asteroid on the top edge, heading for `target` (or the default aim point).
pub fn spawn_asteroid<R: Rng + ?Sized>(
    id: EntityId,
    target: Option<(f32, f32)>,
    rng: &mut R,
    cfg: SpawnConfig<'_>,
) -> Asteroid {
    let x = rng.gen_range(0.0..cfg.arena.width);
    let y = cfg.arena.spawn_y;
    let target = target.unwrap_or(cfg.arena.default_aim);

    let scale = cfg.round_tuning.speed_scale(cfg.round);
    let speed = cfg.asteroid.base_speed * scale
        + rng.gen_range(0.0..1.0_f32) * cfg.asteroid.speed_variance * scale;
    let (vel_x, vel_y) = aim_velocity((x, y), target, speed);

    let (kind, health, size_hint) = if rng.gen_bool(cfg.asteroid.armored_chance) {
        (
            AsteroidKind::Armored,
            cfg.asteroid.armored_health,
            Some(cfg.asteroid.armored_size_hint),
        )
    } else {
        (AsteroidKind::Normal, cfg.asteroid.normal_health, None)
    };

    Asteroid {
        id,
        x,
        y,
        vel_x,
        vel_y,
        kind,
        max_health: health,
        health,
        size_hint,
    }
}

/// Velocity of magnitude `speed` pointing from `from` to `to`; straight down if they coincide.
pub fn aim_velocity(from: (f32, f32), to: (f32, f32), speed: f32) -> (f32, f32) {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let magnitude = (dx * dx + dy * dy).sqrt();
    if magnitude > 0.0 {
        (dx / magnitude * speed, dy / magnitude * speed)
    } else {
        (0.0, speed)
    }
}

/// Maps a uniform roll in `0..1` onto the weighted power-up table.
pub fn power_up_kind(roll: f64, tuning: &PowerUpTuning) -> PowerUpKind {
    if roll < tuning.shield_weight {
        PowerUpKind::Shield
    } else if roll < tuning.shield_weight + tuning.rapid_fire_weight {
        PowerUpKind::RapidFire
    } else {
        PowerUpKind::ScoreMultiplier
    }
}
