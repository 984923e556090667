// Fixed-rate simulation step for every live session.

use super::game::Game;
use super::types::{Audience, ServerEvent};
use crate::domain::systems::{motion, spawning};
use crate::domain::{AsteroidSnapshot, EntityPosition, PowerUpSnapshot, SessionId};
use rand::Rng;
use std::time::{Duration, Instant};

impl Game {
    /// Advances every active, non-transitioning session by `dt`, then fires due timers.
    pub fn tick(&mut self, dt: Duration, now: Instant) {
        let live: Vec<SessionId> = self
            .sessions
            .iter()
            .filter(|s| s.is_live())
            .map(|s| s.id.clone())
            .collect();
        for session_id in live {
            self.tick_session(&session_id, dt);
        }
        self.run_due_tasks(now);
    }

    fn tick_session(&mut self, session_id: &str, dt: Duration) {
        let Game {
            tuning,
            players,
            sessions,
            outbox,
            rng,
            ..
        } = self;
        let Some(session) = sessions.get_mut(session_id) else {
            return;
        };
        let audience = || Audience::Session(session_id.to_string());

        // Spawn before integrating so the new asteroid moves exactly once this tick.
        if session.advance_spawn_timer(dt) {
            let targets: Vec<(f32, f32)> =
                players.in_game(session_id).map(|p| (p.x, p.y)).collect();
            if !targets.is_empty() {
                let target = targets[rng.gen_range(0..targets.len())];
                let id = session.next_entity_id();
                let asteroid = spawning::spawn_asteroid(
                    id,
                    Some(target),
                    rng,
                    spawning::SpawnConfig {
                        arena: &tuning.arena,
                        asteroid: &tuning.asteroid,
                        round_tuning: &tuning.round,
                        round: session.round,
                    },
                );
                outbox.push(
                    players,
                    audience(),
                    ServerEvent::AsteroidSpawned(AsteroidSnapshot::from(&asteroid)),
                );
                session.asteroids.insert(id, asteroid);
            }
        }

        let secs = dt.as_secs_f32();

        let mut moved = Vec::with_capacity(session.asteroids.len());
        let mut pruned = Vec::new();
        for asteroid in session.asteroids.values_mut() {
            motion::integrate_asteroid(asteroid, secs);
            if motion::out_of_bounds(&tuning.arena, asteroid.x, asteroid.y) {
                pruned.push(asteroid.id);
            } else {
                moved.push(EntityPosition::from(&*asteroid));
            }
        }
        for id in pruned {
            session.asteroids.remove(&id);
            outbox.push(players, audience(), ServerEvent::AsteroidDestroyed(id));
        }

        let mut drifted = Vec::with_capacity(session.power_ups.len());
        let mut expired = Vec::new();
        for power_up in session.power_ups.values_mut() {
            motion::integrate_power_up(power_up, secs);
            if motion::out_of_bounds(&tuning.arena, power_up.x, power_up.y) {
                expired.push(power_up.id);
            } else {
                drifted.push(PowerUpSnapshot::from(&*power_up));
            }
        }
        for id in expired {
            session.power_ups.remove(&id);
            outbox.push(players, audience(), ServerEvent::PowerUpCollected(id));
        }

        if !moved.is_empty() {
            outbox.push(players, audience(), ServerEvent::AsteroidsUpdate(moved));
        }
        if !drifted.is_empty() {
            outbox.push(players, audience(), ServerEvent::PowerUpsUpdate(drifted));
        }
    }
}
