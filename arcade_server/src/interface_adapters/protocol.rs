// Wire protocol DTOs and conversions for the public game socket.
// Ids travel as strings; the domain keeps them numeric.

use crate::domain::{
    AsteroidKind, AsteroidSnapshot, EntityId, EntityPosition, PlayerId, PlayerSnapshot,
    PlayerStatus, PowerUpKind, PowerUpSnapshot,
};
use crate::use_cases::{FinalScore, PlayerCommand, ServerEvent};
use serde::{Deserialize, Serialize};

/// Messages the server sends to connected clients over the WebSocket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(
    tag = "type",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ServerMessage {
    YourId(String),
    LobbyState(Vec<PlayerDto>),
    PlayerJoinedLobby(PlayerDto),
    PlayerLeftLobby(String),
    LobbyStatusUpdate {
        count: usize,
        can_start: bool,
    },
    GameStarting {
        game_id: String,
        players: Vec<PlayerDto>,
        round: u32,
        goal: u32,
    },
    RemotePlayerUpdate {
        id: String,
        x: f32,
        y: f32,
    },
    PlayerShot {
        shooter_id: String,
        x: f32,
        y: f32,
    },
    ScoreUpdate {
        id: String,
        score: u64,
    },
    LivesUpdate {
        id: String,
        lives: u32,
    },
    PlayerDied(String),
    PlayerLeftGame(String),
    AsteroidSpawned(AsteroidDto),
    AsteroidsUpdate(Vec<PositionDto>),
    AsteroidDestroyed(String),
    AsteroidDamaged {
        id: String,
        current_health: i32,
    },
    PowerUpSpawned(PowerUpDto),
    PowerUpsUpdate(Vec<PowerUpDto>),
    PowerUpCollected(String),
    PlayerShieldOn {
        id: String,
    },
    PlayerShieldOff {
        id: String,
    },
    PlayerShieldUsed {
        id: String,
    },
    PlayerPowerUpOn {
        id: String,
        #[serde(rename = "type")]
        kind: PowerUpKindDto,
        // Seconds.
        duration: f32,
    },
    GameOver {
        winner_id: Option<String>,
        final_scores: Vec<FinalScoreDto>,
        highest_score: Option<u64>,
    },
    LeaderUpdate {
        leader_id: Option<String>,
    },
    RoundProgress {
        destroyed: u32,
        needed: u32,
    },
    RoundOver {
        completed_round: u32,
        next_round: u32,
        next_goal: u32,
        // Seconds.
        transition_time: f32,
    },
    NewRoundStarting {
        round: u32,
    },
    ClearEntities,
}

/// Messages the client sends to the server over the WebSocket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(
    tag = "type",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ClientMessage {
    RequestStartGame,
    PlayerUpdate {
        x: f32,
        y: f32,
    },
    Shoot {
        x: f32,
        y: f32,
    },
    DealDamage {
        asteroid_id: String,
        #[serde(default)]
        damage: Option<u32>,
    },
    CollectPowerUp {
        id: String,
    },
    PlayerWasHit,
    EnterLobby,
}

/// Why a well-formed client message could not become a command.
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolError {
    InvalidId(String),
    NonFinitePosition,
}

impl TryFrom<ClientMessage> for PlayerCommand {
    type Error = ProtocolError;

    fn try_from(msg: ClientMessage) -> Result<Self, Self::Error> {
        Ok(match msg {
            ClientMessage::RequestStartGame => PlayerCommand::RequestStartGame,
            ClientMessage::PlayerUpdate { x, y } => {
                let (x, y) = finite(x, y)?;
                PlayerCommand::PlayerUpdate { x, y }
            }
            ClientMessage::Shoot { x, y } => {
                let (x, y) = finite(x, y)?;
                PlayerCommand::Shoot { x, y }
            }
            ClientMessage::DealDamage {
                asteroid_id,
                damage,
            } => PlayerCommand::DealDamage {
                asteroid_id: parse_id(&asteroid_id)?,
                damage: damage.unwrap_or(1),
            },
            ClientMessage::CollectPowerUp { id } => PlayerCommand::CollectPowerUp {
                power_up_id: parse_id(&id)?,
            },
            ClientMessage::PlayerWasHit => PlayerCommand::PlayerWasHit,
            ClientMessage::EnterLobby => PlayerCommand::EnterLobby,
        })
    }
}

fn parse_id(raw: &str) -> Result<EntityId, ProtocolError> {
    raw.trim()
        .parse()
        .map_err(|_| ProtocolError::InvalidId(raw.to_string()))
}

fn finite(x: f32, y: f32) -> Result<(f32, f32), ProtocolError> {
    if x.is_finite() && y.is_finite() {
        Ok((x, y))
    } else {
        Err(ProtocolError::NonFinitePosition)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatusDto {
    Lobby,
    InGame,
    Dead,
}

impl From<PlayerStatus> for PlayerStatusDto {
    fn from(status: PlayerStatus) -> Self {
        match status {
            PlayerStatus::InLobby => Self::Lobby,
            PlayerStatus::InGame => Self::InGame,
            PlayerStatus::Dead => Self::Dead,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AsteroidKindDto {
    Normal,
    Armored,
}

impl From<AsteroidKind> for AsteroidKindDto {
    fn from(kind: AsteroidKind) -> Self {
        match kind {
            AsteroidKind::Normal => Self::Normal,
            AsteroidKind::Armored => Self::Armored,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerUpKindDto {
    Shield,
    RapidFire,
    ScoreMultiplier,
}

impl From<PowerUpKind> for PowerUpKindDto {
    fn from(kind: PowerUpKind) -> Self {
        match kind {
            PowerUpKind::Shield => Self::Shield,
            PowerUpKind::RapidFire => Self::RapidFire,
            PowerUpKind::ScoreMultiplier => Self::ScoreMultiplier,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub lives: u32,
    pub score: u64,
    pub status: PlayerStatusDto,
    pub has_shield: bool,
}

impl From<&PlayerSnapshot> for PlayerDto {
    fn from(p: &PlayerSnapshot) -> Self {
        Self {
            id: p.id.to_string(),
            x: p.x,
            y: p.y,
            lives: p.lives,
            score: p.score,
            status: p.status.into(),
            has_shield: p.shield,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AsteroidDto {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub vel_x: f32,
    pub vel_y: f32,
    #[serde(rename = "type")]
    pub kind: AsteroidKindDto,
    pub health: i32,
    pub max_health: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_hint: Option<f32>,
}

impl From<&AsteroidSnapshot> for AsteroidDto {
    fn from(a: &AsteroidSnapshot) -> Self {
        Self {
            id: a.id.to_string(),
            x: a.x,
            y: a.y,
            vel_x: a.vel_x,
            vel_y: a.vel_y,
            kind: a.kind.into(),
            health: a.health,
            max_health: a.max_health,
            size_hint: a.size_hint,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerUpDto {
    pub id: String,
    pub x: f32,
    pub y: f32,
    #[serde(rename = "type")]
    pub kind: PowerUpKindDto,
}

impl From<&PowerUpSnapshot> for PowerUpDto {
    fn from(p: &PowerUpSnapshot) -> Self {
        Self {
            id: p.id.to_string(),
            x: p.x,
            y: p.y,
            kind: p.kind.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionDto {
    pub id: String,
    pub x: f32,
    pub y: f32,
}

impl From<&EntityPosition> for PositionDto {
    fn from(p: &EntityPosition) -> Self {
        Self {
            id: p.id.to_string(),
            x: p.x,
            y: p.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalScoreDto {
    pub id: String,
    pub score: u64,
}

impl From<&FinalScore> for FinalScoreDto {
    fn from(s: &FinalScore) -> Self {
        Self {
            id: s.id.to_string(),
            score: s.score,
        }
    }
}

fn wire_id(id: PlayerId) -> String {
    id.to_string()
}

impl From<&ServerEvent> for ServerMessage {
    fn from(event: &ServerEvent) -> Self {
        match event {
            ServerEvent::YourId(id) => Self::YourId(wire_id(*id)),
            ServerEvent::LobbyState(players) => {
                Self::LobbyState(players.iter().map(PlayerDto::from).collect())
            }
            ServerEvent::PlayerJoinedLobby(p) => Self::PlayerJoinedLobby(p.into()),
            ServerEvent::PlayerLeftLobby(id) => Self::PlayerLeftLobby(wire_id(*id)),
            ServerEvent::LobbyStatus { count, can_start } => Self::LobbyStatusUpdate {
                count: *count,
                can_start: *can_start,
            },
            ServerEvent::GameStarting {
                session_id,
                players,
                round,
                goal,
            } => Self::GameStarting {
                game_id: session_id.clone(),
                players: players.iter().map(PlayerDto::from).collect(),
                round: *round,
                goal: *goal,
            },
            ServerEvent::RemotePlayerUpdate { id, x, y } => Self::RemotePlayerUpdate {
                id: wire_id(*id),
                x: *x,
                y: *y,
            },
            ServerEvent::PlayerShot { shooter_id, x, y } => Self::PlayerShot {
                shooter_id: wire_id(*shooter_id),
                x: *x,
                y: *y,
            },
            ServerEvent::ScoreUpdate { id, score } => Self::ScoreUpdate {
                id: wire_id(*id),
                score: *score,
            },
            ServerEvent::LivesUpdate { id, lives } => Self::LivesUpdate {
                id: wire_id(*id),
                lives: *lives,
            },
            ServerEvent::PlayerDied(id) => Self::PlayerDied(wire_id(*id)),
            ServerEvent::PlayerLeftGame(id) => Self::PlayerLeftGame(wire_id(*id)),
            ServerEvent::AsteroidSpawned(a) => Self::AsteroidSpawned(a.into()),
            ServerEvent::AsteroidsUpdate(moved) => {
                Self::AsteroidsUpdate(moved.iter().map(PositionDto::from).collect())
            }
            ServerEvent::AsteroidDestroyed(id) => Self::AsteroidDestroyed(id.to_string()),
            ServerEvent::AsteroidDamaged { id, health } => Self::AsteroidDamaged {
                id: id.to_string(),
                current_health: *health,
            },
            ServerEvent::PowerUpSpawned(p) => Self::PowerUpSpawned(p.into()),
            ServerEvent::PowerUpsUpdate(drifted) => {
                Self::PowerUpsUpdate(drifted.iter().map(PowerUpDto::from).collect())
            }
            ServerEvent::PowerUpCollected(id) => Self::PowerUpCollected(id.to_string()),
            ServerEvent::PlayerShieldOn(id) => Self::PlayerShieldOn { id: wire_id(*id) },
            ServerEvent::PlayerShieldOff(id) => Self::PlayerShieldOff { id: wire_id(*id) },
            ServerEvent::PlayerShieldUsed(id) => Self::PlayerShieldUsed { id: wire_id(*id) },
            ServerEvent::PlayerPowerUpOn { id, kind, duration } => Self::PlayerPowerUpOn {
                id: wire_id(*id),
                kind: (*kind).into(),
                duration: duration.as_secs_f32(),
            },
            ServerEvent::GameOver {
                winner,
                final_scores,
                highest_score,
            } => Self::GameOver {
                winner_id: winner.map(wire_id),
                final_scores: final_scores.iter().map(FinalScoreDto::from).collect(),
                highest_score: *highest_score,
            },
            ServerEvent::LeaderUpdate { leader } => Self::LeaderUpdate {
                leader_id: leader.map(wire_id),
            },
            ServerEvent::RoundProgress { destroyed, needed } => Self::RoundProgress {
                destroyed: *destroyed,
                needed: *needed,
            },
            ServerEvent::RoundOver {
                completed_round,
                next_round,
                next_goal,
                transition_time,
            } => Self::RoundOver {
                completed_round: *completed_round,
                next_round: *next_round,
                next_goal: *next_goal,
                transition_time: transition_time.as_secs_f32(),
            },
            ServerEvent::NewRoundStarting { round } => Self::NewRoundStarting { round: *round },
            ServerEvent::ClearEntities => Self::ClearEntities,
        }
    }
}
