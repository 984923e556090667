// Domain-level players, hazard entities and the snapshots handed to the outbound layer.

use std::time::Instant;

pub type PlayerId = u64;
pub type EntityId = u64;
pub type SessionId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStatus {
    InLobby,
    InGame,
    Dead,
}

/// Time-boxed buffs granted by power-ups.
#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub shield: bool,
    /// Bumped on every shield pickup so a stale expiry task cannot clear a newer shield.
    pub shield_grant: u32,
    pub rapid_fire_until: Option<Instant>,
    pub score_multiplier_until: Option<Instant>,
}

impl Effects {
    pub fn rapid_fire_active(&self, now: Instant) -> bool {
        matches!(self.rapid_fire_until, Some(until) if now < until)
    }

    pub fn score_multiplier_active(&self, now: Instant) -> bool {
        matches!(self.score_multiplier_until, Some(until) if now < until)
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub x: f32,
    pub y: f32,
    pub lives: u32,
    pub score: u64,
    pub status: PlayerStatus,
    // Some iff status is InGame or Dead.
    pub session: Option<SessionId>,
    pub effects: Effects,
}

impl Player {
    pub fn new(id: PlayerId, x: f32, y: f32, lives: u32) -> Self {
        Self {
            id,
            x,
            y,
            lives,
            score: 0,
            status: PlayerStatus::InLobby,
            session: None,
            effects: Effects::default(),
        }
    }

    /// Binds the player to a match with fresh stats.
    pub fn enter_session(&mut self, session_id: SessionId, lives: u32) {
        self.status = PlayerStatus::InGame;
        self.session = Some(session_id);
        self.lives = lives;
        self.score = 0;
        self.clear_effects();
    }

    /// Drops any session binding and resets match stats.
    pub fn return_to_lobby(&mut self, lives: u32) {
        self.status = PlayerStatus::InLobby;
        self.session = None;
        self.lives = lives;
        self.score = 0;
        self.clear_effects();
    }

    pub fn is_in_game(&self) -> bool {
        self.status == PlayerStatus::InGame
    }

    pub fn is_bound_to(&self, session_id: &str) -> bool {
        self.session.as_deref() == Some(session_id)
    }

    fn clear_effects(&mut self) {
        let shield_grant = self.effects.shield_grant;
        self.effects = Effects {
            shield_grant,
            ..Effects::default()
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsteroidKind {
    Normal,
    Armored,
}

#[derive(Debug, Clone)]
pub struct Asteroid {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub vel_x: f32,
    pub vel_y: f32,
    pub kind: AsteroidKind,
    pub max_health: i32,
    pub health: i32,
    pub size_hint: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Shield,
    RapidFire,
    ScoreMultiplier,
}

#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub vel_y: f32,
    pub kind: PowerUpKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub x: f32,
    pub y: f32,
    pub lives: u32,
    pub score: u64,
    pub status: PlayerStatus,
    pub shield: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AsteroidSnapshot {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub vel_x: f32,
    pub vel_y: f32,
    pub kind: AsteroidKind,
    pub health: i32,
    pub max_health: i32,
    pub size_hint: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PowerUpSnapshot {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub kind: PowerUpKind,
}

/// Position-only delta used by the batched per-tick updates.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityPosition {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
}

impl From<&Player> for PlayerSnapshot {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id,
            x: p.x,
            y: p.y,
            lives: p.lives,
            score: p.score,
            status: p.status,
            shield: p.effects.shield,
        }
    }
}

impl From<&Asteroid> for AsteroidSnapshot {
    fn from(a: &Asteroid) -> Self {
        Self {
            id: a.id,
            x: a.x,
            y: a.y,
            vel_x: a.vel_x,
            vel_y: a.vel_y,
            kind: a.kind,
            health: a.health,
            max_health: a.max_health,
            size_hint: a.size_hint,
        }
    }
}

impl From<&PowerUp> for PowerUpSnapshot {
    fn from(p: &PowerUp) -> Self {
        Self {
            id: p.id,
            x: p.x,
            y: p.y,
            kind: p.kind,
        }
    }
}

impl From<&Asteroid> for EntityPosition {
    fn from(a: &Asteroid) -> Self {
        Self {
            id: a.id,
            x: a.x,
            y: a.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn when_expiry_is_in_the_future_then_effect_is_active() {
        let now = Instant::now();
        let effects = Effects {
            score_multiplier_until: Some(now + Duration::from_secs(1)),
            ..Effects::default()
        };

        assert!(effects.score_multiplier_active(now));
        assert!(!effects.score_multiplier_active(now + Duration::from_secs(1)));
        assert!(!effects.rapid_fire_active(now));
    }

    #[test]
    fn when_player_returns_to_lobby_then_binding_and_stats_reset() {
        let mut player = Player::new(7, 400.0, 500.0, 3);
        player.enter_session("game_a".to_string(), 3);
        player.score = 120;
        player.lives = 1;
        player.effects.shield = true;
        player.effects.shield_grant = 4;

        player.return_to_lobby(3);

        assert_eq!(player.status, PlayerStatus::InLobby);
        assert_eq!(player.session, None);
        assert_eq!((player.lives, player.score), (3, 0));
        assert!(!player.effects.shield);
        // Grant counter survives so pending expiry tasks stay stale.
        assert_eq!(player.effects.shield_grant, 4);
    }
}
