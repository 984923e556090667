// Outbound plumbing: events raised by the game and the per-connection mailboxes they go to.

use crate::domain::PlayerId;
use crate::use_cases::directory::PlayerDirectory;
use crate::use_cases::types::{Audience, Outbound, ServerEvent};
use std::collections::HashMap;
use std::sync::Arc;
use crate::use_cases::log_throttle;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Per-connection sink for events addressed to one player.
pub type Mailbox = mpsc::Sender<Arc<ServerEvent>>;

/// Events raised while handling one input or tick, waiting to be delivered.
#[derive(Debug, Default)]
pub struct Outbox {
    pending: Vec<Outbound>,
}

impl Outbox {
    /// Queues `event` for whoever matches `audience` right now.
    pub fn push(&mut self, players: &PlayerDirectory, audience: Audience, event: ServerEvent) {
        let recipients = players.recipients(&audience);
        self.pending.push(Outbound {
            audience,
            recipients,
            event,
        });
    }

    pub fn take(&mut self) -> Vec<Outbound> {
        std::mem::take(&mut self.pending)
    }
}

/// Registered connections, keyed by player id.
#[derive(Debug)]
pub struct Mailboxes {
    senders: HashMap<PlayerId, Mailbox>,
    dropped: u64,
    evicted: u64,
    last_full_log: Instant,
}

impl Default for Mailboxes {
    fn default() -> Self {
        Self {
            senders: HashMap::new(),
            dropped: 0,
            evicted: 0,
            last_full_log: log_throttle::primed(),
        }
    }
}

impl Mailboxes {
    pub fn register(&mut self, player_id: PlayerId, mailbox: Mailbox) {
        self.senders.insert(player_id, mailbox);
    }

    pub fn unregister(&mut self, player_id: PlayerId) {
        self.senders.remove(&player_id);
    }

    /// Fire-and-forget fan-out. A full mailbox sheds per-tick deltas. Any other event
    /// evicts the mailbox, which closes the connection and triggers its disconnect.
    pub fn deliver(&mut self, batch: Vec<Outbound>) {
        for outbound in batch {
            if outbound.recipients.is_empty() {
                continue;
            }
            let droppable = outbound.event.is_droppable();
            let event = Arc::new(outbound.event);
            for player_id in outbound.recipients {
                let Some(sender) = self.senders.get(&player_id) else {
                    continue;
                };
                match sender.try_send(event.clone()) {
                    Ok(()) => {}
                    Err(mpsc::error::TrySendError::Full(_)) if droppable => {
                        self.dropped += 1;
                        if log_throttle::should_log(&mut self.last_full_log) {
                            warn!(player_id, dropped = self.dropped, "mailbox full; dropping update");
                        }
                    }
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        self.senders.remove(&player_id);
                        self.evicted += 1;
                        warn!(
                            player_id,
                            evicted = self.evicted,
                            "mailbox full on a must-deliver event; closing connection"
                        );
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => {
                        debug!(player_id, "mailbox closed; awaiting disconnect");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tuning::PlayerTuning;

    #[tokio::test]
    async fn when_event_targets_lobby_then_only_registered_lobby_players_receive_it() {
        let mut players = PlayerDirectory::new();
        for id in [1, 2, 3] {
            players.join(id, &PlayerTuning::default());
        }
        players
            .get_mut(3)
            .expect("player 3")
            .enter_session("game_a".to_string(), 3);

        let mut outbox = Outbox::default();
        outbox.push(&players, Audience::Lobby, ServerEvent::ClearEntities);

        let mut mailboxes = Mailboxes::default();
        let (tx1, mut rx1) = mpsc::channel(4);
        let (tx3, mut rx3) = mpsc::channel(4);
        mailboxes.register(1, tx1);
        mailboxes.register(3, tx3);

        mailboxes.deliver(outbox.take());

        assert_eq!(
            rx1.try_recv().expect("lobby player gets event").as_ref(),
            &ServerEvent::ClearEntities
        );
        assert!(rx3.try_recv().is_err());
        assert!(outbox.take().is_empty());
    }

    fn position_batch() -> ServerEvent {
        ServerEvent::AsteroidsUpdate(Vec::new())
    }

    #[tokio::test]
    async fn when_mailbox_is_full_then_position_updates_are_shed() {
        let mut players = PlayerDirectory::new();
        players.join(1, &PlayerTuning::default());
        let mut mailboxes = Mailboxes::default();
        let (tx, mut rx) = mpsc::channel(1);
        mailboxes.register(1, tx);

        let mut outbox = Outbox::default();
        outbox.push(&players, Audience::Player(1), ServerEvent::YourId(1));
        outbox.push(&players, Audience::Player(1), position_batch());
        mailboxes.deliver(outbox.take());

        assert_eq!(rx.try_recv().expect("first").as_ref(), &ServerEvent::YourId(1));
        assert!(matches!(rx.try_recv(), Err(mpsc::error::TryRecvError::Empty)));
        assert_eq!(mailboxes.dropped, 1);
        assert!(mailboxes.senders.contains_key(&1));
    }

    #[tokio::test]
    async fn when_mailbox_is_full_then_game_over_closes_it_instead_of_vanishing() {
        let mut players = PlayerDirectory::new();
        players.join(1, &PlayerTuning::default());
        let mut mailboxes = Mailboxes::default();
        let (tx, mut rx) = mpsc::channel(256);
        mailboxes.register(1, tx);

        let mut outbox = Outbox::default();
        for _ in 0..256 {
            outbox.push(&players, Audience::Player(1), position_batch());
        }
        outbox.push(
            &players,
            Audience::Player(1),
            ServerEvent::GameOver {
                winner: Some(1),
                final_scores: Vec::new(),
                highest_score: None,
            },
        );
        mailboxes.deliver(outbox.take());

        assert_eq!(mailboxes.evicted, 1);
        assert!(!mailboxes.senders.contains_key(&1));

        let mut buffered = 0;
        loop {
            match rx.try_recv() {
                Ok(event) => {
                    assert!(event.is_droppable());
                    buffered += 1;
                }
                Err(err) => {
                    assert_eq!(err, mpsc::error::TryRecvError::Disconnected);
                    break;
                }
            }
        }
        assert_eq!(buffered, 256);
    }

    #[tokio::test]
    async fn when_evicted_player_is_addressed_again_then_nothing_is_sent() {
        let mut players = PlayerDirectory::new();
        players.join(1, &PlayerTuning::default());
        let mut mailboxes = Mailboxes::default();
        let (tx, mut rx) = mpsc::channel(1);
        mailboxes.register(1, tx);

        let mut outbox = Outbox::default();
        outbox.push(&players, Audience::Player(1), ServerEvent::YourId(1));
        outbox.push(&players, Audience::Player(1), ServerEvent::ClearEntities);
        mailboxes.deliver(outbox.take());
        assert_eq!(rx.try_recv().expect("first").as_ref(), &ServerEvent::YourId(1));

        outbox.push(&players, Audience::Player(1), ServerEvent::ClearEntities);
        mailboxes.deliver(outbox.take());

        assert_eq!(mailboxes.evicted, 1);
        assert!(matches!(
            rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }
}
