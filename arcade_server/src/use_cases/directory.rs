// Process-wide registry of connected players.

use crate::domain::tuning::PlayerTuning;
use crate::domain::{Player, PlayerId, PlayerStatus};
use crate::use_cases::types::Audience;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct PlayerDirectory {
    players: BTreeMap<PlayerId, Player>,
}

impl PlayerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fresh lobby player under the connection id. Returns false if the id is taken.
    pub fn join(&mut self, id: PlayerId, tuning: &PlayerTuning) -> bool {
        if self.players.contains_key(&id) {
            return false;
        }
        self.players.insert(
            id,
            Player::new(id, tuning.spawn_x, tuning.spawn_y, tuning.starting_lives),
        );
        true
    }

    pub fn remove(&mut self, id: PlayerId) -> Option<Player> {
        self.players.remove(&id)
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    pub fn lobby(&self) -> impl Iterator<Item = &Player> {
        self.players
            .values()
            .filter(|p| p.status == PlayerStatus::InLobby)
    }

    pub fn lobby_count(&self) -> usize {
        self.lobby().count()
    }

    /// Players whose session binding points at `session_id` (dead ones included).
    pub fn bound_to<'a>(&'a self, session_id: &'a str) -> impl Iterator<Item = &'a Player> {
        self.players
            .values()
            .filter(move |p| p.is_bound_to(session_id))
    }

    /// Living participants of `session_id`.
    pub fn in_game<'a>(&'a self, session_id: &'a str) -> impl Iterator<Item = &'a Player> {
        self.bound_to(session_id).filter(|p| p.is_in_game())
    }

    pub fn recipients(&self, audience: &Audience) -> Vec<PlayerId> {
        match audience {
            Audience::Player(id) => self.players.get(id).map(|p| p.id).into_iter().collect(),
            Audience::Lobby => self.lobby().map(|p| p.id).collect(),
            Audience::LobbyExcept(skip) => {
                self.lobby().map(|p| p.id).filter(|id| id != skip).collect()
            }
            Audience::Session(session_id) => self.bound_to(session_id).map(|p| p.id).collect(),
            Audience::SessionExcept(session_id, skip) => self
                .bound_to(session_id)
                .map(|p| p.id)
                .filter(|id| id != skip)
                .collect(),
        }
    }
}
