// Round transitions and win/loss determination.

use super::game::Game;
use super::scheduler::ScheduledTask;
use super::types::{Audience, FinalScore, ServerEvent};
use crate::domain::PlayerId;
use std::time::Instant;
use tracing::{debug, info};

impl Game {
    /// Closes the current round: clears the field, advances counters and schedules the next round.
    pub(crate) fn start_round_transition(&mut self, session_id: &str, now: Instant) {
        let round_tuning = self.tuning.round;
        let Some(session) = self.sessions.get_mut(session_id) else {
            return;
        };
        if !session.active || session.round_transition {
            return;
        }

        session.round_transition = true;
        session.clear_entities();
        let completed_round = session.round;
        let next_round = completed_round + 1;
        let multiplayer = session.players.len() > 1;
        session.advance_round(
            round_tuning.goal(next_round),
            round_tuning.spawn_interval(next_round, multiplayer),
        );
        let next_goal = session.needed_for_round;

        info!(session_id, completed_round, next_round, next_goal, "round complete");
        self.emit(
            Audience::Session(session_id.to_string()),
            ServerEvent::ClearEntities,
        );
        self.emit(
            Audience::Session(session_id.to_string()),
            ServerEvent::RoundOver {
                completed_round,
                next_round,
                next_goal,
                transition_time: round_tuning.transition_time,
            },
        );
        self.scheduler.schedule(
            now + round_tuning.transition_time,
            ScheduledTask::EndRoundTransition {
                session_id: session_id.to_string(),
                round: next_round,
            },
        );
    }

    pub(crate) fn finish_round_transition(&mut self, session_id: &str, round: u32) {
        let Some(session) = self.sessions.get_mut(session_id) else {
            debug!(session_id, "round timer fired for a removed session");
            return;
        };
        if !session.round_transition || session.round != round {
            return;
        }
        session.round_transition = false;

        info!(session_id, round, "round starting");
        self.emit(
            Audience::Session(session_id.to_string()),
            ServerEvent::NewRoundStarting { round },
        );
    }

    /// Ends the match once at most one participant is still alive.
    pub(crate) fn check_game_over(&mut self, session_id: &str, now: Instant) {
        let Some(session) = self.sessions.get(session_id) else {
            return;
        };
        if !session.active {
            return;
        }

        let survivors: Vec<PlayerId> = session
            .players
            .iter()
            .filter_map(|id| self.players.get(*id))
            .filter(|p| p.is_in_game() && p.is_bound_to(session_id))
            .map(|p| p.id)
            .collect();
        if survivors.len() > 1 {
            self.recheck_leader(session_id);
            return;
        }

        let winner = match survivors.as_slice() {
            [only] => Some(*only),
            _ => None,
        };
        let final_scores: Vec<FinalScore> = session
            .players
            .iter()
            .filter_map(|id| self.players.get(*id))
            .map(|p| FinalScore {
                id: p.id,
                score: p.score,
            })
            .collect();
        let highest_score = final_scores.iter().map(|s| s.score).max();

        if let Some(session) = self.sessions.get_mut(session_id) {
            session.active = false;
        }
        info!(session_id, ?winner, ?highest_score, "game over");
        self.emit(
            Audience::Session(session_id.to_string()),
            ServerEvent::GameOver {
                winner,
                final_scores,
                highest_score,
            },
        );
        self.scheduler.schedule(
            now + self.tuning.session_cleanup_delay,
            ScheduledTask::DestroySession {
                session_id: session_id.to_string(),
            },
        );
    }
}
