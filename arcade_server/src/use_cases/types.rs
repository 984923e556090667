// Use-case level inputs/outputs for the world task.

use crate::domain::{
    AsteroidSnapshot, EntityId, EntityPosition, PlayerId, PlayerSnapshot, PowerUpKind,
    PowerUpSnapshot, SessionId,
};
use crate::use_cases::outbox::Mailbox;
use std::time::Duration;

/// Everything the network layer feeds into the world task.
#[derive(Debug)]
pub enum GameEvent {
    Connect { player_id: PlayerId, mailbox: Mailbox },
    Disconnect { player_id: PlayerId },
    Command { player_id: PlayerId, command: PlayerCommand },
}

/// Player-originated requests once a connection is registered.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    RequestStartGame,
    PlayerUpdate { x: f32, y: f32 },
    Shoot { x: f32, y: f32 },
    DealDamage { asteroid_id: EntityId, damage: u32 },
    CollectPowerUp { power_up_id: EntityId },
    PlayerWasHit,
    EnterLobby,
}

impl PlayerCommand {
    /// High-rate commands that may be dropped under backpressure.
    pub fn is_droppable(&self) -> bool {
        matches!(self, Self::PlayerUpdate { .. } | Self::Shoot { .. })
    }
}

/// Who should receive an outbound event, resolved against the player directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    Player(PlayerId),
    Lobby,
    LobbyExcept(PlayerId),
    Session(SessionId),
    SessionExcept(SessionId, PlayerId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinalScore {
    pub id: PlayerId,
    pub score: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    YourId(PlayerId),
    LobbyState(Vec<PlayerSnapshot>),
    PlayerJoinedLobby(PlayerSnapshot),
    PlayerLeftLobby(PlayerId),
    LobbyStatus {
        count: usize,
        can_start: bool,
    },
    GameStarting {
        session_id: SessionId,
        players: Vec<PlayerSnapshot>,
        round: u32,
        goal: u32,
    },
    RemotePlayerUpdate {
        id: PlayerId,
        x: f32,
        y: f32,
    },
    PlayerShot {
        shooter_id: PlayerId,
        x: f32,
        y: f32,
    },
    ScoreUpdate {
        id: PlayerId,
        score: u64,
    },
    LivesUpdate {
        id: PlayerId,
        lives: u32,
    },
    PlayerDied(PlayerId),
    PlayerLeftGame(PlayerId),
    AsteroidSpawned(AsteroidSnapshot),
    AsteroidsUpdate(Vec<EntityPosition>),
    AsteroidDestroyed(EntityId),
    AsteroidDamaged {
        id: EntityId,
        health: i32,
    },
    PowerUpSpawned(PowerUpSnapshot),
    PowerUpsUpdate(Vec<PowerUpSnapshot>),
    PowerUpCollected(EntityId),
    PlayerShieldOn(PlayerId),
    PlayerShieldOff(PlayerId),
    PlayerShieldUsed(PlayerId),
    PlayerPowerUpOn {
        id: PlayerId,
        kind: PowerUpKind,
        duration: Duration,
    },
    GameOver {
        winner: Option<PlayerId>,
        final_scores: Vec<FinalScore>,
        highest_score: Option<u64>,
    },
    LeaderUpdate {
        leader: Option<PlayerId>,
    },
    RoundProgress {
        destroyed: u32,
        needed: u32,
    },
    RoundOver {
        completed_round: u32,
        next_round: u32,
        next_goal: u32,
        transition_time: Duration,
    },
    NewRoundStarting {
        round: u32,
    },
    ClearEntities,
}

impl ServerEvent {
    /// Per-tick deltas a lagging client can miss; the next one supersedes them.
    pub fn is_droppable(&self) -> bool {
        matches!(
            self,
            Self::AsteroidsUpdate(_) | Self::PowerUpsUpdate(_) | Self::RemotePlayerUpdate { .. }
        )
    }
}

/// An event paired with the recipients resolved at the moment it was raised.
#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub audience: Audience,
    pub recipients: Vec<PlayerId>,
    pub event: ServerEvent,
}
