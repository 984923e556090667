// Domain layer: core simulation types and rules.

pub mod errors;
pub mod session;
pub mod state;
pub mod systems;
pub mod tuning;

pub use errors::GameError;
pub use session::Session;
pub use state::{
    Asteroid, AsteroidKind, AsteroidSnapshot, Effects, EntityId, EntityPosition, Player,
    PlayerId, PlayerSnapshot, PlayerStatus, PowerUp, PowerUpKind, PowerUpSnapshot, SessionId,
};
pub use tuning::GameTuning;
