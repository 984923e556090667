use crate::domain::{
    Asteroid, AsteroidKind, EntityId, GameTuning, PlayerId, PowerUp, PowerUpKind, SessionId,
};
use crate::use_cases::game::Game;
use crate::use_cases::types::{Outbound, ServerEvent};
use rand::SeedableRng;
use rand::rngs::StdRng;

// Deterministic tuning: no random drops, no random armor.
pub(crate) fn quiet_tuning() -> GameTuning {
    let mut tuning = GameTuning::default();
    tuning.power_up.drop_chance = 0.0;
    tuning.asteroid.armored_chance = 0.0;
    tuning
}

pub(crate) fn game_with(tuning: GameTuning) -> Game {
    Game::with_rng(tuning, StdRng::seed_from_u64(42))
}

/// Joins `ids`, starts a match for all of them and discards the setup events.
pub(crate) fn start_match(game: &mut Game, ids: &[PlayerId]) -> SessionId {
    for id in ids {
        game.join(*id);
    }
    let session_id = game
        .create_session(ids.iter().copied())
        .expect("match should start");
    game.take_outbound();
    session_id
}

pub(crate) fn place_asteroid(
    game: &mut Game,
    session_id: &str,
    kind: AsteroidKind,
    health: i32,
) -> EntityId {
    let session = game.sessions.get_mut(session_id).expect("session exists");
    let id = session.next_entity_id();
    session.asteroids.insert(
        id,
        Asteroid {
            id,
            x: 200.0,
            y: 150.0,
            vel_x: 0.0,
            vel_y: 0.0,
            kind,
            max_health: health,
            health,
            size_hint: None,
        },
    );
    id
}

pub(crate) fn place_power_up(game: &mut Game, session_id: &str, kind: PowerUpKind) -> EntityId {
    let session = game.sessions.get_mut(session_id).expect("session exists");
    let id = session.next_entity_id();
    session.power_ups.insert(
        id,
        PowerUp {
            id,
            x: 300.0,
            y: 300.0,
            vel_y: 50.0,
            kind,
        },
    );
    id
}

pub(crate) fn events(outbound: &[Outbound]) -> Vec<&ServerEvent> {
    outbound.iter().map(|o| &o.event).collect()
}

pub(crate) fn count(outbound: &[Outbound], pred: impl Fn(&ServerEvent) -> bool) -> usize {
    outbound.iter().filter(|o| pred(&o.event)).count()
}
