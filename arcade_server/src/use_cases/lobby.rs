// Lobby management: connection lifecycle, roster broadcasts and start requests.

use super::game::Game;
use super::types::{Audience, ServerEvent};
use crate::domain::{GameError, PlayerId, PlayerSnapshot, PlayerStatus, SessionId};
use std::time::Instant;
use tracing::info;

impl Game {
    /// Registers a new connection as a lobby player and greets it.
    pub fn join(&mut self, player_id: PlayerId) -> PlayerId {
        if !self.players.join(player_id, &self.tuning.player) {
            return player_id;
        }
        info!(player_id, "player joined lobby");

        self.emit(Audience::Player(player_id), ServerEvent::YourId(player_id));
        self.announce_lobby_entry(player_id);
        player_id
    }

    /// Removes a disconnected player from wherever it was.
    pub fn leave(&mut self, player_id: PlayerId, now: Instant) -> Result<(), GameError> {
        let player = self
            .players
            .remove(player_id)
            .ok_or(GameError::UnknownPlayer)?;
        info!(player_id, status = ?player.status, "player disconnected");

        match player.session {
            Some(session_id) if self.sessions.contains(&session_id) => {
                self.leave_session(player_id, &session_id, now);
            }
            _ if player.status == PlayerStatus::InLobby => {
                self.emit(Audience::Lobby, ServerEvent::PlayerLeftLobby(player_id));
                self.broadcast_lobby_status();
            }
            _ => {}
        }
        Ok(())
    }

    /// Returns a player to the lobby from any status, dropping its match binding and stats.
    pub fn enter_lobby(&mut self, player_id: PlayerId, now: Instant) -> Result<(), GameError> {
        let lives = self.tuning.player.starting_lives;
        let player = self
            .players
            .get_mut(player_id)
            .ok_or(GameError::UnknownPlayer)?;
        let previous = player.session.take();
        player.return_to_lobby(lives);
        info!(player_id, "player returning to lobby");

        if let Some(session_id) = previous {
            if self.sessions.contains(&session_id) {
                self.leave_session(player_id, &session_id, now);
            }
        }
        self.announce_lobby_entry(player_id);
        Ok(())
    }

    /// Starts a match with every lobby player, if enough are waiting.
    pub fn request_start(&mut self, player_id: PlayerId) -> Result<SessionId, GameError> {
        let requester = self
            .players
            .get(player_id)
            .ok_or(GameError::UnknownPlayer)?;
        if requester.status != PlayerStatus::InLobby {
            return Err(GameError::NotInLobby);
        }
        if !self.start_eligible() {
            return Err(GameError::NotEnoughPlayers);
        }
        let roster: Vec<PlayerId> = self.players.lobby().map(|p| p.id).collect();
        self.create_session(roster)
    }

    pub fn lobby_roster(&self) -> Vec<PlayerSnapshot> {
        self.players.lobby().map(PlayerSnapshot::from).collect()
    }

    pub fn start_eligible(&self) -> bool {
        self.players.lobby_count() >= self.tuning.min_players
    }

    pub(crate) fn broadcast_lobby_status(&mut self) {
        let count = self.players.lobby_count();
        let can_start = count >= self.tuning.min_players;
        self.emit(Audience::Lobby, ServerEvent::LobbyStatus { count, can_start });
    }

    fn announce_lobby_entry(&mut self, player_id: PlayerId) {
        let roster = self.lobby_roster();
        self.emit(Audience::Player(player_id), ServerEvent::LobbyState(roster));
        if let Some(snapshot) = self.players.get(player_id).map(PlayerSnapshot::from) {
            self.emit(
                Audience::LobbyExcept(player_id),
                ServerEvent::PlayerJoinedLobby(snapshot),
            );
        }
        self.broadcast_lobby_status();
    }

    fn leave_session(&mut self, player_id: PlayerId, session_id: &str, now: Instant) {
        if let Some(session) = self.sessions.get_mut(session_id) {
            session.players.remove(&player_id);
        }
        self.emit(
            Audience::Session(session_id.to_string()),
            ServerEvent::PlayerLeftGame(player_id),
        );
        self.check_game_over(session_id, now);
    }
}
