// Authoritative combat: position relays, damage, pickups and hits on players.

use super::game::Game;
use super::scheduler::ScheduledTask;
use super::types::{Audience, ServerEvent};
use crate::domain::systems::{combat, spawning};
use crate::domain::{
    AsteroidKind, EntityId, GameError, PlayerId, PlayerStatus, PowerUp, PowerUpKind,
    PowerUpSnapshot,
};
use rand::Rng;
use std::time::Instant;
use tracing::info;

impl Game {
    pub fn update_position(&mut self, player_id: PlayerId, x: f32, y: f32) -> Result<(), GameError> {
        let session_id = self.in_game_session(player_id)?;
        if let Some(player) = self.players.get_mut(player_id) {
            player.x = x;
            player.y = y;
        }
        self.emit(
            Audience::SessionExcept(session_id, player_id),
            ServerEvent::RemotePlayerUpdate { id: player_id, x, y },
        );
        Ok(())
    }

    /// Relays a shot to peers. Hits are reported by clients via `apply_damage`.
    pub fn shoot(&mut self, player_id: PlayerId, x: f32, y: f32) -> Result<(), GameError> {
        let session_id = self.in_game_session(player_id)?;
        self.emit(
            Audience::SessionExcept(session_id, player_id),
            ServerEvent::PlayerShot {
                shooter_id: player_id,
                x,
                y,
            },
        );
        Ok(())
    }

    pub fn apply_damage(
        &mut self,
        player_id: PlayerId,
        asteroid_id: EntityId,
        damage: u32,
        now: Instant,
    ) -> Result<(), GameError> {
        let session_id = self.in_game_session(player_id)?;
        let multiplier = match self.players.get(player_id) {
            Some(p) if p.effects.score_multiplier_active(now) => {
                self.tuning.power_up.score_multiplier
            }
            _ => 1,
        };
        // A zero or missing amount still counts as one point of damage.
        let amount = i32::try_from(damage.max(1)).unwrap_or(i32::MAX);

        let session = self
            .sessions
            .get_mut(&session_id)
            .ok_or(GameError::UnknownSession)?;
        if !session.active {
            return Err(GameError::SessionInactive);
        }
        if session.round_transition {
            return Err(GameError::RoundTransition);
        }
        let asteroid = session
            .asteroids
            .get_mut(&asteroid_id)
            .ok_or(GameError::UnknownAsteroid)?;
        let kind = asteroid.kind;
        let drop_at = (asteroid.x, asteroid.y);
        let outcome = combat::apply_hit(asteroid, amount, multiplier, &self.tuning.asteroid);

        if outcome.destroyed {
            session.asteroids.remove(&asteroid_id);
            session.destroyed_this_round += 1;
        }
        let progress = (session.destroyed_this_round, session.needed_for_round);
        let goal_met = session.round_goal_met();

        if !outcome.destroyed && kind == AsteroidKind::Armored {
            self.emit(
                Audience::Session(session_id.clone()),
                ServerEvent::AsteroidDamaged {
                    id: asteroid_id,
                    health: outcome.health_after,
                },
            );
        }

        if outcome.score > 0 {
            if let Some(player) = self.players.get_mut(player_id) {
                player.score += outcome.score;
                let score = player.score;
                self.emit(
                    Audience::Session(session_id.clone()),
                    ServerEvent::ScoreUpdate {
                        id: player_id,
                        score,
                    },
                );
            }
        }

        if outcome.destroyed {
            self.emit(
                Audience::Session(session_id.clone()),
                ServerEvent::AsteroidDestroyed(asteroid_id),
            );
            self.emit(
                Audience::Session(session_id.clone()),
                ServerEvent::RoundProgress {
                    destroyed: progress.0,
                    needed: progress.1,
                },
            );

            if goal_met {
                self.start_round_transition(&session_id, now);
            } else if self.rng.gen_bool(self.tuning.power_up.drop_chance) {
                self.spawn_power_up(&session_id, drop_at);
            }
        }

        self.recheck_leader(&session_id);
        Ok(())
    }

    pub fn collect_power_up(
        &mut self,
        player_id: PlayerId,
        power_up_id: EntityId,
        now: Instant,
    ) -> Result<(), GameError> {
        let session_id = self.in_game_session(player_id)?;
        let session = self
            .sessions
            .get_mut(&session_id)
            .ok_or(GameError::UnknownSession)?;
        let power_up = session
            .power_ups
            .remove(&power_up_id)
            .ok_or(GameError::UnknownPowerUp)?;
        info!(player_id, power_up_id, kind = ?power_up.kind, "power-up collected");

        let tuning = self.tuning.power_up;
        let Some(player) = self.players.get_mut(player_id) else {
            return Err(GameError::UnknownPlayer);
        };
        let effect = match power_up.kind {
            PowerUpKind::Shield => {
                player.effects.shield = true;
                player.effects.shield_grant = player.effects.shield_grant.wrapping_add(1);
                self.scheduler.schedule(
                    now + tuning.shield_duration,
                    ScheduledTask::ShieldExpiry {
                        player_id,
                        session_id: session_id.clone(),
                        grant: player.effects.shield_grant,
                    },
                );
                ServerEvent::PlayerShieldOn(player_id)
            }
            PowerUpKind::RapidFire => {
                player.effects.rapid_fire_until = Some(now + tuning.rapid_fire_duration);
                ServerEvent::PlayerPowerUpOn {
                    id: player_id,
                    kind: PowerUpKind::RapidFire,
                    duration: tuning.rapid_fire_duration,
                }
            }
            PowerUpKind::ScoreMultiplier => {
                player.effects.score_multiplier_until =
                    Some(now + tuning.score_multiplier_duration);
                ServerEvent::PlayerPowerUpOn {
                    id: player_id,
                    kind: PowerUpKind::ScoreMultiplier,
                    duration: tuning.score_multiplier_duration,
                }
            }
        };

        self.emit(
            Audience::Session(session_id.clone()),
            ServerEvent::PowerUpCollected(power_up_id),
        );
        self.emit(Audience::Session(session_id), effect);
        Ok(())
    }

    /// A client reports its ship was struck. Shields absorb the hit.
    pub fn player_hit(&mut self, player_id: PlayerId, now: Instant) -> Result<(), GameError> {
        let session_id = self.in_game_session(player_id)?;
        let session = self
            .sessions
            .get(&session_id)
            .ok_or(GameError::UnknownSession)?;
        if !session.active {
            return Err(GameError::SessionInactive);
        }

        let Some(player) = self.players.get_mut(player_id) else {
            return Err(GameError::UnknownPlayer);
        };
        if player.effects.shield {
            player.effects.shield = false;
            self.emit(
                Audience::Session(session_id),
                ServerEvent::PlayerShieldUsed(player_id),
            );
            return Ok(());
        }

        player.lives = player.lives.saturating_sub(1);
        let lives = player.lives;
        if lives == 0 {
            player.status = PlayerStatus::Dead;
        }
        self.emit(
            Audience::Session(session_id.clone()),
            ServerEvent::LivesUpdate {
                id: player_id,
                lives,
            },
        );

        if lives == 0 {
            info!(player_id, session_id = %session_id, "player died");
            self.emit(
                Audience::Session(session_id.clone()),
                ServerEvent::PlayerDied(player_id),
            );
            self.check_game_over(&session_id, now);
        } else {
            self.recheck_leader(&session_id);
        }
        Ok(())
    }

    fn spawn_power_up(&mut self, session_id: &str, (x, y): (f32, f32)) {
        let kind = spawning::power_up_kind(self.rng.gen_range(0.0..1.0), &self.tuning.power_up);
        let Some(session) = self.sessions.get_mut(session_id) else {
            return;
        };
        let id = session.next_entity_id();
        let power_up = PowerUp {
            id,
            x,
            y,
            vel_y: self.tuning.power_up.fall_speed,
            kind,
        };
        let snapshot = PowerUpSnapshot::from(&power_up);
        session.power_ups.insert(id, power_up);

        info!(session_id, power_up_id = id, kind = ?kind, x, y, "power-up spawned");
        self.emit(
            Audience::Session(session_id.to_string()),
            ServerEvent::PowerUpSpawned(snapshot),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{
        count, events, game_with, place_asteroid, place_power_up, quiet_tuning, start_match,
    };
    use std::time::Duration;

    #[test]
    fn when_armored_asteroid_takes_three_hits_then_score_accrues_per_hit() {
        let mut game = game_with(quiet_tuning());
        let session_id = start_match(&mut game, &[1, 2]);
        let asteroid_id = place_asteroid(&mut game, &session_id, AsteroidKind::Armored, 3);
        let now = Instant::now();
        let per_hp = game.tuning.asteroid.score_per_armor_hp;

        game.apply_damage(1, asteroid_id, 1, now).expect("first hit");
        game.apply_damage(1, asteroid_id, 1, now).expect("second hit");
        let session = game.sessions.get(&session_id).expect("session");
        assert_eq!(session.asteroids.get(&asteroid_id).map(|a| a.health), Some(1));

        game.apply_damage(1, asteroid_id, 1, now).expect("third hit");
        let out = game.take_outbound();

        assert_eq!(game.players.get(1).expect("p1").score, 3 * per_hp);
        let scores: Vec<u64> = out
            .iter()
            .filter_map(|o| match o.event {
                ServerEvent::ScoreUpdate { id: 1, score } => Some(score),
                _ => None,
            })
            .collect();
        assert_eq!(scores, vec![per_hp, 2 * per_hp, 3 * per_hp]);
        let damaged: Vec<i32> = out
            .iter()
            .filter_map(|o| match o.event {
                ServerEvent::AsteroidDamaged { health, .. } => Some(health),
                _ => None,
            })
            .collect();
        assert_eq!(damaged, vec![2, 1]);
        assert_eq!(
            count(&out, |e| *e == ServerEvent::AsteroidDestroyed(asteroid_id)),
            1
        );
        assert!(
            events(&out).contains(&&ServerEvent::RoundProgress {
                destroyed: 1,
                needed: 10
            })
        );
        assert!(game.sessions.get(&session_id).expect("session").asteroids.is_empty());
    }

    #[test]
    fn when_multiplier_is_active_then_normal_kill_pays_double_until_expiry() {
        let mut game = game_with(quiet_tuning());
        let session_id = start_match(&mut game, &[1, 2]);
        let now = Instant::now();
        let power_up_id = place_power_up(&mut game, &session_id, PowerUpKind::ScoreMultiplier);

        game.collect_power_up(1, power_up_id, now).expect("pickup");
        let out = game.take_outbound();
        assert_eq!(out[0].event, ServerEvent::PowerUpCollected(power_up_id));
        assert_eq!(
            out[1].event,
            ServerEvent::PlayerPowerUpOn {
                id: 1,
                kind: PowerUpKind::ScoreMultiplier,
                duration: Duration::from_secs(10),
            }
        );

        let first = place_asteroid(&mut game, &session_id, AsteroidKind::Normal, 1);
        game.apply_damage(1, first, 1, now + Duration::from_secs(9))
            .expect("boosted kill");
        assert_eq!(game.players.get(1).expect("p1").score, 100);

        let second = place_asteroid(&mut game, &session_id, AsteroidKind::Normal, 1);
        game.apply_damage(1, second, 1, now + Duration::from_secs(10))
            .expect("plain kill");
        assert_eq!(game.players.get(1).expect("p1").score, 150);
    }

    #[test]
    fn when_rapid_fire_is_collected_then_expiry_is_recorded() {
        let mut game = game_with(quiet_tuning());
        let session_id = start_match(&mut game, &[1, 2]);
        let now = Instant::now();
        let power_up_id = place_power_up(&mut game, &session_id, PowerUpKind::RapidFire);

        game.collect_power_up(2, power_up_id, now).expect("pickup");

        let effects = &game.players.get(2).expect("p2").effects;
        assert!(effects.rapid_fire_active(now + Duration::from_secs(6)));
        assert!(!effects.rapid_fire_active(now + Duration::from_secs(7)));
        assert_eq!(
            game.collect_power_up(2, power_up_id, now),
            Err(GameError::UnknownPowerUp)
        );
    }

    #[test]
    fn when_preconditions_fail_then_damage_is_a_no_op() {
        let mut game = game_with(quiet_tuning());
        let session_id = start_match(&mut game, &[1, 2]);
        game.join(3);
        let asteroid_id = place_asteroid(&mut game, &session_id, AsteroidKind::Normal, 1);
        let now = Instant::now();

        assert_eq!(
            game.apply_damage(1, 999, 1, now),
            Err(GameError::UnknownAsteroid)
        );
        assert_eq!(
            game.apply_damage(3, asteroid_id, 1, now),
            Err(GameError::NotInGame)
        );
        assert_eq!(
            game.apply_damage(42, asteroid_id, 1, now),
            Err(GameError::UnknownPlayer)
        );

        game.sessions
            .get_mut(&session_id)
            .expect("session")
            .round_transition = true;
        assert_eq!(
            game.apply_damage(1, asteroid_id, 1, now),
            Err(GameError::RoundTransition)
        );
        let session = game.sessions.get(&session_id).expect("session");
        assert_eq!(session.asteroids.get(&asteroid_id).map(|a| a.health), Some(1));
        assert_eq!(game.players.get(1).expect("p1").score, 0);
    }

    #[test]
    fn when_drop_roll_succeeds_then_power_up_spawns_at_death_location() {
        let mut tuning = quiet_tuning();
        tuning.power_up.drop_chance = 1.0;
        let mut game = game_with(tuning);
        let session_id = start_match(&mut game, &[1, 2]);
        let asteroid_id = place_asteroid(&mut game, &session_id, AsteroidKind::Normal, 1);

        game.apply_damage(1, asteroid_id, 0, Instant::now())
            .expect("zero damage counts as one");
        let out = game.take_outbound();

        let spawned: Vec<_> = out
            .iter()
            .filter_map(|o| match &o.event {
                ServerEvent::PowerUpSpawned(p) => Some(p.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(spawned.len(), 1);
        assert_eq!((spawned[0].x, spawned[0].y), (200.0, 150.0));
        let session = game.sessions.get(&session_id).expect("session");
        assert!(session.power_ups.contains_key(&spawned[0].id));
        assert_ne!(spawned[0].id, asteroid_id);
    }

    #[test]
    fn when_kill_completes_round_then_no_power_up_drops() {
        let mut tuning = quiet_tuning();
        tuning.power_up.drop_chance = 1.0;
        tuning.round.base_goal = 1;
        let mut game = game_with(tuning);
        let session_id = start_match(&mut game, &[1, 2]);
        let asteroid_id = place_asteroid(&mut game, &session_id, AsteroidKind::Normal, 1);

        game.apply_damage(1, asteroid_id, 1, Instant::now())
            .expect("kill");
        let out = game.take_outbound();

        assert_eq!(
            count(&out, |e| matches!(e, ServerEvent::PowerUpSpawned(_))),
            0
        );
        assert!(game.sessions.get(&session_id).expect("session").power_ups.is_empty());
    }

    #[test]
    fn when_shielded_player_is_hit_then_shield_absorbs_it() {
        let mut game = game_with(quiet_tuning());
        let session_id = start_match(&mut game, &[1, 2]);
        let now = Instant::now();
        let power_up_id = place_power_up(&mut game, &session_id, PowerUpKind::Shield);
        game.collect_power_up(1, power_up_id, now).expect("pickup");
        let out = game.take_outbound();
        assert_eq!(out[1].event, ServerEvent::PlayerShieldOn(1));

        game.player_hit(1, now).expect("hit");
        let out = game.take_outbound();

        assert_eq!(events(&out), vec![&ServerEvent::PlayerShieldUsed(1)]);
        let p = game.players.get(1).expect("p1");
        assert_eq!(p.lives, 3);
        assert!(!p.effects.shield);

        game.player_hit(1, now).expect("hit");
        let out = game.take_outbound();
        assert_eq!(out[0].event, ServerEvent::LivesUpdate { id: 1, lives: 2 });
    }

    #[test]
    fn when_shield_expires_then_it_is_cleared_once() {
        let mut game = game_with(quiet_tuning());
        let session_id = start_match(&mut game, &[1, 2]);
        let now = Instant::now();
        let power_up_id = place_power_up(&mut game, &session_id, PowerUpKind::Shield);
        game.collect_power_up(1, power_up_id, now).expect("pickup");
        game.take_outbound();

        game.run_due_tasks(now + Duration::from_millis(4999));
        assert!(game.players.get(1).expect("p1").effects.shield);

        game.run_due_tasks(now + Duration::from_secs(5));
        let out = game.take_outbound();
        assert_eq!(events(&out), vec![&ServerEvent::PlayerShieldOff(1)]);
        assert!(!game.players.get(1).expect("p1").effects.shield);
    }

    #[test]
    fn when_newer_shield_is_held_then_stale_expiry_leaves_it() {
        let mut game = game_with(quiet_tuning());
        let session_id = start_match(&mut game, &[1, 2]);
        let now = Instant::now();
        let first = place_power_up(&mut game, &session_id, PowerUpKind::Shield);
        game.collect_power_up(1, first, now).expect("pickup");
        game.player_hit(1, now).expect("shield used");
        let second = place_power_up(&mut game, &session_id, PowerUpKind::Shield);
        game.collect_power_up(1, second, now + Duration::from_secs(3))
            .expect("pickup");
        game.take_outbound();

        game.run_due_tasks(now + Duration::from_secs(5));
        assert!(game.players.get(1).expect("p1").effects.shield);
        assert!(game.take_outbound().is_empty());

        game.run_due_tasks(now + Duration::from_secs(8));
        assert!(!game.players.get(1).expect("p1").effects.shield);
    }

    #[test]
    fn when_player_left_session_then_shield_expiry_is_a_no_op() {
        let mut game = game_with(quiet_tuning());
        let session_id = start_match(&mut game, &[1, 2, 3]);
        let now = Instant::now();
        let power_up_id = place_power_up(&mut game, &session_id, PowerUpKind::Shield);
        game.collect_power_up(1, power_up_id, now).expect("pickup");
        game.leave(1, now).expect("disconnect");
        game.take_outbound();

        game.run_due_tasks(now + Duration::from_secs(5));

        assert!(game.take_outbound().is_empty());
    }

    #[test]
    fn when_player_moves_then_peers_get_the_update() {
        let mut game = game_with(quiet_tuning());
        start_match(&mut game, &[1, 2, 3]);

        game.update_position(2, 120.0, 480.0).expect("in game");
        game.shoot(2, 120.0, 470.0).expect("in game");
        let out = game.take_outbound();

        assert_eq!(
            out[0].event,
            ServerEvent::RemotePlayerUpdate {
                id: 2,
                x: 120.0,
                y: 480.0
            }
        );
        assert_eq!(out[0].recipients, vec![1, 3]);
        assert!(matches!(out[1].event, ServerEvent::PlayerShot { shooter_id: 2, .. }));
        let p = game.players.get(2).expect("p2");
        assert_eq!((p.x, p.y), (120.0, 480.0));

        game.join(9);
        assert_eq!(
            game.update_position(9, 0.0, 0.0),
            Err(GameError::NotInGame)
        );
    }
}
