// Deferred work owned by the world task. Tasks carry ids, never references, and are
// re-validated by the game when they fire.

use crate::domain::{PlayerId, SessionId};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduledTask {
    /// Clears a shield unless the player left the session or picked up a newer one.
    ShieldExpiry {
        player_id: PlayerId,
        session_id: SessionId,
        grant: u32,
    },
    /// Ends the pause between rounds.
    EndRoundTransition { session_id: SessionId, round: u32 },
    /// Drops a finished session after its grace period.
    DestroySession { session_id: SessionId },
}

#[derive(Debug)]
struct Entry {
    due: Instant,
    seq: u64,
    task: ScheduledTask,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Ties on `due` fire in scheduling order.
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Instant, task: ScheduledTask) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Entry { due, seq, task }));
    }

    /// Pops every task due at or before `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<ScheduledTask> {
        let mut due = Vec::new();
        while self
            .queue
            .peek()
            .is_some_and(|Reverse(entry)| entry.due <= now)
        {
            if let Some(Reverse(entry)) = self.queue.pop() {
                due.push(entry.task);
            }
        }
        due
    }

}
