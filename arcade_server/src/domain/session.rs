// A single match: roster, round counters and the entities it owns.

use crate::domain::state::{Asteroid, EntityId, PlayerId, PowerUp, SessionId};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub active: bool,
    pub round_transition: bool,
    pub round: u32,
    pub destroyed_this_round: u32,
    pub needed_for_round: u32,
    pub spawn_timer: Duration,
    pub spawn_interval: Duration,
    pub leader: Option<PlayerId>,
    pub asteroids: BTreeMap<EntityId, Asteroid>,
    pub power_ups: BTreeMap<EntityId, PowerUp>,
    /// Participants, dead ones included. Disconnected players are removed.
    pub players: BTreeSet<PlayerId>,
    next_entity_id: EntityId,
}

impl Session {
    pub fn new(
        id: SessionId,
        players: BTreeSet<PlayerId>,
        goal: u32,
        spawn_interval: Duration,
    ) -> Self {
        Self {
            id,
            active: true,
            round_transition: false,
            round: 1,
            destroyed_this_round: 0,
            needed_for_round: goal,
            spawn_timer: Duration::ZERO,
            spawn_interval,
            leader: None,
            asteroids: BTreeMap::new(),
            power_ups: BTreeMap::new(),
            players,
            next_entity_id: 1,
        }
    }

    /// Allocates an id unique within this session (shared by asteroids and power-ups).
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        id
    }

    /// True when the tick loop and combat should act on this session.
    pub fn is_live(&self) -> bool {
        self.active && !self.round_transition
    }

    pub fn round_goal_met(&self) -> bool {
        self.destroyed_this_round >= self.needed_for_round
    }

    /// Adds `dt` to the spawn timer; returns true (and resets it) once the interval elapses.
    pub fn advance_spawn_timer(&mut self, dt: Duration) -> bool {
        self.spawn_timer += dt;
        if self.spawn_timer >= self.spawn_interval {
            self.spawn_timer = Duration::ZERO;
            true
        } else {
            false
        }
    }

    pub fn clear_entities(&mut self) {
        self.asteroids.clear();
        self.power_ups.clear();
    }

    /// Moves to the next round with the given goal and spawn interval.
    pub fn advance_round(&mut self, goal: u32, spawn_interval: Duration) {
        self.round += 1;
        self.destroyed_this_round = 0;
        self.needed_for_round = goal;
        self.spawn_interval = spawn_interval;
        self.spawn_timer = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(
            "game_test".to_string(),
            BTreeSet::from([1, 2]),
            10,
            Duration::from_millis(100),
        )
    }

    #[test]
    fn entity_ids_are_unique() {
        let mut s = session();
        let ids: BTreeSet<_> = (0..100).map(|_| s.next_entity_id()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn spawn_timer_fires_once_interval_is_reached() {
        let mut s = session();
        let dt = Duration::from_millis(40);
        assert!(!s.advance_spawn_timer(dt));
        assert!(!s.advance_spawn_timer(dt));
        assert!(s.advance_spawn_timer(dt));
        assert_eq!(s.spawn_timer, Duration::ZERO);
    }

    #[test]
    fn advance_round_resets_progress() {
        let mut s = session();
        s.destroyed_this_round = 10;
        s.advance_round(15, Duration::from_millis(90));
        assert_eq!(s.round, 2);
        assert_eq!(s.destroyed_this_round, 0);
        assert_eq!(s.needed_for_round, 15);
        assert_eq!(s.spawn_interval, Duration::from_millis(90));
    }
}
