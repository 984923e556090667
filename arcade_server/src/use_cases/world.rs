// The single world task: owns the `Game`, applies inputs in arrival order and ticks.

use super::game::Game;
use super::outbox::Mailboxes;
use super::types::GameEvent;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

pub async fn world_task(
    mut input_rx: mpsc::Receiver<GameEvent>,
    mut game: Game,
    tick_interval: Duration,
) {
    let mut mailboxes = Mailboxes::default();
    let mut tick: u64 = 0;

    // Drive the fixed-step game loop at the configured tick rate.
    let mut interval = tokio::time::interval(tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                tick += 1;
                game.tick(tick_interval, Instant::now());
            }
            event = input_rx.recv() => {
                let Some(event) = event else {
                    info!(tick, "input channel closed; world task exiting");
                    break;
                };
                handle_event(&mut game, &mut mailboxes, event, Instant::now());
            }
        }

        mailboxes.deliver(game.take_outbound());
    }
}

fn handle_event(game: &mut Game, mailboxes: &mut Mailboxes, event: GameEvent, now: Instant) {
    match event {
        GameEvent::Connect { player_id, mailbox } => {
            mailboxes.register(player_id, mailbox);
            game.join(player_id);
        }
        GameEvent::Disconnect { player_id } => {
            mailboxes.unregister(player_id);
            if let Err(reason) = game.leave(player_id, now) {
                debug!(player_id, ?reason, "disconnect ignored");
            }
        }
        GameEvent::Command { player_id, command } => {
            if let Err(reason) = game.apply(player_id, command.clone(), now) {
                debug!(player_id, ?reason, ?command, "command ignored");
            }
        }
    }
}
