use alloc::collections::BinaryHeap;
use core::cmp::{Ordering, Reverse};
use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Token identifying one round; timers tagged with an older token never fire.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoundId(pub u64);

impl RoundId {
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug)]
struct Entry<A> {
    due: Duration,
    seq: u64,
    round: RoundId,
    action: A,
}

impl<A> Entry<A> {
    fn key(&self) -> (Duration, u64) {
        (self.due, self.seq)
    }
}

impl<A> PartialEq for Entry<A> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<A> Eq for Entry<A> {}

impl<A> PartialOrd for Entry<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A> Ord for Entry<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Virtual clock with a queue of delayed actions.
///
/// Nothing runs on its own: the owner moves time forward and pops whatever became due. Actions due at the same
/// instant come out in the order they were scheduled.
#[derive(Debug)]
pub struct Timeline<A> {
    now: Duration,
    seq: u64,
    queue: BinaryHeap<Reverse<Entry<A>>>,
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            seq: 0,
            queue: BinaryHeap::new(),
        }
    }
}

impl<A> Timeline<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn schedule(&mut self, delay: Duration, round: RoundId, action: A) {
        let entry = Entry {
            due: self.now.saturating_add(delay),
            seq: self.seq,
            round,
            action,
        };
        self.seq += 1;
        self.queue.push(Reverse(entry));
    }

    /// Earliest pending deadline, stale entries included.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse(entry)| entry.due)
    }

    /// Pops the next action due at or before `until` that belongs to `live`, moving the clock to its deadline.
    ///
    /// Entries from other rounds are dropped on the way.
    pub fn pop_due(&mut self, until: Duration, live: RoundId) -> Option<A> {
        while let Some(Reverse(entry)) = self.queue.peek() {
            if entry.due > until {
                return None;
            }

            let Some(Reverse(entry)) = self.queue.pop() else {
                return None;
            };
            self.now = self.now.max(entry.due);

            if entry.round != live {
                log::trace!(
                    "dropping stale timer from round {} (live round {})",
                    entry.round.0,
                    live.0
                );
                continue;
            }

            return Some(entry.action);
        }
        None
    }

    /// Moves the clock forward without firing anything; never goes backwards.
    pub fn settle_at(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
