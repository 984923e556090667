// Session table and the orchestration that creates and retires matches.

use super::game::Game;
use super::types::{Audience, ServerEvent};
use crate::domain::{GameError, PlayerId, PlayerSnapshot, PlayerStatus, Session, SessionId};
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct SessionTable {
    sessions: BTreeMap<SessionId, Session>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, session: Session) {
        self.sessions.insert(session.id.clone(), session);
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Session> {
        self.sessions.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.sessions.values()
    }

}

impl Game {
    /// Starts a match for the named lobby players. Unknown or non-lobby ids are skipped
    /// before the minimum-size check.
    pub fn create_session(
        &mut self,
        player_ids: impl IntoIterator<Item = PlayerId>,
    ) -> Result<SessionId, GameError> {
        let roster: BTreeSet<PlayerId> = player_ids
            .into_iter()
            .filter(|id| {
                self.players
                    .get(*id)
                    .is_some_and(|p| p.status == PlayerStatus::InLobby)
            })
            .collect();
        if roster.len() < self.tuning.min_players {
            return Err(GameError::NotEnoughPlayers);
        }

        let session_id: SessionId = format!("game_{}", Uuid::new_v4());
        let round = &self.tuning.round;
        let goal = round.goal(1);
        let spawn_interval = round.spawn_interval(1, roster.len() > 1);
        let lives = self.tuning.player.starting_lives;

        for id in &roster {
            if let Some(player) = self.players.get_mut(*id) {
                player.enter_session(session_id.clone(), lives);
            }
        }
        let players: Vec<PlayerSnapshot> = roster
            .iter()
            .filter_map(|id| self.players.get(*id))
            .map(PlayerSnapshot::from)
            .collect();
        self.sessions.insert(Session::new(
            session_id.clone(),
            roster,
            goal,
            spawn_interval,
        ));

        info!(
            session_id = %session_id,
            players = players.len(),
            goal,
            spawn_interval_ms = spawn_interval.as_millis(),
            "session starting"
        );
        self.emit(
            Audience::Session(session_id.clone()),
            ServerEvent::GameStarting {
                session_id: session_id.clone(),
                players,
                round: 1,
                goal,
            },
        );
        self.broadcast_lobby_status();
        Ok(session_id)
    }

    /// Removes a session. Players still bound to it keep their binding until they
    /// re-enter the lobby or disconnect; every handler treats the missing session as a no-op.
    pub fn destroy_session(&mut self, session_id: &str) -> Result<(), GameError> {
        self.sessions
            .remove(session_id)
            .ok_or(GameError::UnknownSession)?;
        info!(session_id, "session cleaned up");
        Ok(())
    }
}
