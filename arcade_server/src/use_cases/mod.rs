// Use cases layer: application workflows for the game server.

pub mod combat;
pub mod directory;
pub mod game;
pub mod lobby;
pub mod log_throttle;
pub mod outbox;
pub mod progression;
pub mod scheduler;
pub mod sessions;
pub mod standings;
pub mod tick;
pub mod types;
pub mod world;

#[cfg(test)]
pub(crate) mod test_support;

pub use directory::PlayerDirectory;
pub use game::Game;
pub use outbox::{Mailbox, Mailboxes};
pub use scheduler::{ScheduledTask, Scheduler};
pub use sessions::SessionTable;
pub use types::{Audience, FinalScore, GameEvent, Outbound, PlayerCommand, ServerEvent};
pub use world::world_task;
