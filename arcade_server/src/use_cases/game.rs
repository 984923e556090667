// Top-level coordinator: owns the player directory, the session table and every timer.
// All mutation happens through `&mut Game` on the world task, so nothing here locks.

use super::directory::PlayerDirectory;
use super::outbox::Outbox;
use super::scheduler::{ScheduledTask, Scheduler};
use super::sessions::SessionTable;
use super::types::{Audience, Outbound, PlayerCommand, ServerEvent};
use crate::domain::{GameError, GameTuning, PlayerId, SessionId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::debug;

pub struct Game {
    pub(crate) tuning: GameTuning,
    pub(crate) players: PlayerDirectory,
    pub(crate) sessions: SessionTable,
    pub(crate) scheduler: Scheduler,
    pub(crate) outbox: Outbox,
    pub(crate) rng: StdRng,
}

impl Game {
    pub fn new(tuning: GameTuning) -> Self {
        Self::with_rng(tuning, StdRng::from_entropy())
    }

    /// Seeded constructor for reproducible simulations.
    pub fn with_rng(tuning: GameTuning, rng: StdRng) -> Self {
        Self {
            tuning,
            players: PlayerDirectory::new(),
            sessions: SessionTable::new(),
            scheduler: Scheduler::new(),
            outbox: Outbox::default(),
            rng,
        }
    }

    /// Drains every event raised since the last call.
    pub fn take_outbound(&mut self) -> Vec<Outbound> {
        self.outbox.take()
    }

    /// Routes a player command to its use case.
    pub fn apply(
        &mut self,
        player_id: PlayerId,
        command: PlayerCommand,
        now: Instant,
    ) -> Result<(), GameError> {
        match command {
            PlayerCommand::RequestStartGame => self.request_start(player_id).map(|_| ()),
            PlayerCommand::PlayerUpdate { x, y } => self.update_position(player_id, x, y),
            PlayerCommand::Shoot { x, y } => self.shoot(player_id, x, y),
            PlayerCommand::DealDamage {
                asteroid_id,
                damage,
            } => self.apply_damage(player_id, asteroid_id, damage, now),
            PlayerCommand::CollectPowerUp { power_up_id } => {
                self.collect_power_up(player_id, power_up_id, now)
            }
            PlayerCommand::PlayerWasHit => self.player_hit(player_id, now),
            PlayerCommand::EnterLobby => self.enter_lobby(player_id, now),
        }
    }

    /// Fires every scheduled task that is due. Stale targets are skipped silently.
    pub fn run_due_tasks(&mut self, now: Instant) {
        for task in self.scheduler.take_due(now) {
            match task {
                ScheduledTask::ShieldExpiry {
                    player_id,
                    session_id,
                    grant,
                } => self.expire_shield(player_id, &session_id, grant),
                ScheduledTask::EndRoundTransition { session_id, round } => {
                    self.finish_round_transition(&session_id, round)
                }
                ScheduledTask::DestroySession { session_id } => {
                    if self.destroy_session(&session_id).is_err() {
                        debug!(session_id = %session_id, "session already gone");
                    }
                }
            }
        }
    }

    pub(crate) fn emit(&mut self, audience: Audience, event: ServerEvent) {
        self.outbox.push(&self.players, audience, event);
    }

    /// Session id of an InGame player, or the reason the player cannot act.
    pub(crate) fn in_game_session(&self, player_id: PlayerId) -> Result<SessionId, GameError> {
        let player = self
            .players
            .get(player_id)
            .ok_or(GameError::UnknownPlayer)?;
        if !player.is_in_game() {
            return Err(GameError::NotInGame);
        }
        player.session.clone().ok_or(GameError::NotInGame)
    }

    fn expire_shield(&mut self, player_id: PlayerId, session_id: &str, grant: u32) {
        let Some(player) = self.players.get_mut(player_id) else {
            return;
        };
        if !player.is_bound_to(session_id)
            || player.effects.shield_grant != grant
            || !player.effects.shield
        {
            return;
        }
        player.effects.shield = false;
        self.emit(
            Audience::Session(session_id.to_string()),
            ServerEvent::PlayerShieldOff(player_id),
        );
    }
}
