// Leader tracking for running sessions.

use super::game::Game;
use super::types::{Audience, ServerEvent};
use crate::domain::systems::standings;
use tracing::info;

impl Game {
    /// Recomputes the session leader and announces it only when it changes.
    pub(crate) fn recheck_leader(&mut self, session_id: &str) {
        let Some(session) = self.sessions.get(session_id) else {
            return;
        };
        if !session.active {
            return;
        }

        let leader = standings::leader(
            session
                .players
                .iter()
                .filter_map(|id| self.players.get(*id))
                .filter(|p| p.is_in_game() && p.is_bound_to(session_id))
                .map(|p| (p.id, p.score)),
        );
        if leader == session.leader {
            return;
        }

        if let Some(session) = self.sessions.get_mut(session_id) {
            session.leader = leader;
        }
        info!(session_id, ?leader, "leader changed");
        self.emit(
            Audience::Session(session_id.to_string()),
            ServerEvent::LeaderUpdate { leader },
        );
    }
}
