// Domain-level rejections. Every one of these is a silent no-op for the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    UnknownPlayer,
    UnknownSession,
    UnknownAsteroid,
    UnknownPowerUp,
    NotInLobby,
    NotInGame,
    NotEnoughPlayers,
    SessionInactive,
    RoundTransition,
}
