use crate::domain::state::{Asteroid, PowerUp};
use crate::domain::tuning::ArenaTuning;

pub fn integrate_asteroid(a: &mut Asteroid, dt: f32) {
    a.x += a.vel_x * dt;
    a.y += a.vel_y * dt;
}

pub fn integrate_power_up(p: &mut PowerUp, dt: f32) {
    // Power-ups only drift downward.
    p.y += p.vel_y * dt;
}

pub fn out_of_bounds(arena: &ArenaTuning, x: f32, y: f32) -> bool {
    !arena.contains(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::state::{AsteroidKind, PowerUpKind};

    fn asteroid(vel_x: f32, vel_y: f32) -> Asteroid {
        Asteroid {
            id: 1,
            x: 100.0,
            y: 0.0,
            vel_x,
            vel_y,
            kind: AsteroidKind::Normal,
            max_health: 1,
            health: 1,
            size_hint: None,
        }
    }

    #[test]
    fn asteroid_moves_by_velocity_times_dt() {
        let mut a = asteroid(30.0, 60.0);
        integrate_asteroid(&mut a, 0.5);
        assert_eq!((a.x, a.y), (115.0, 30.0));
    }

    #[test]
    fn power_up_falls() {
        let mut p = PowerUp {
            id: 1,
            x: 10.0,
            y: 10.0,
            vel_y: 50.0,
            kind: PowerUpKind::Shield,
        };
        integrate_power_up(&mut p, 0.2);
        assert_eq!((p.x, p.y), (10.0, 20.0));
    }

    #[test]
    fn margin_around_playfield_is_in_bounds() {
        let arena = ArenaTuning::default();
        assert!(!out_of_bounds(&arena, -150.0, -50.0));
        assert!(!out_of_bounds(&arena, 1000.0, 800.0));
        assert!(out_of_bounds(&arena, 400.0, 800.5));
        assert!(out_of_bounds(&arena, -200.5, 300.0));
        assert!(out_of_bounds(&arena, 1001.0, 300.0));
        assert!(out_of_bounds(&arena, 400.0, -201.0));
    }
}
