use std::time::{Duration, Instant};

/// Deadline-ordered queue of deferred follow-ups, drained by the event loop.
///
/// Nothing runs in the background: the loop asks for due entries on every
/// iteration and applies each one synchronously.
#[derive(Debug)]
pub struct TimerQueue<T> {
    // Sorted by deadline; equal deadlines keep insertion order.
    entries: Vec<(Instant, T)>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn schedule(&mut self, deadline: Instant, item: T) {
        let pos = self.entries.partition_point(|(at, _)| *at <= deadline);
        self.entries.insert(pos, (deadline, item));
    }

    pub fn schedule_in(&mut self, now: Instant, delay: Duration, item: T) {
        self.schedule(now + delay, item);
    }

    /// Remove and return every entry due at `now`, earliest first.
    pub fn drain_due(&mut self, now: Instant) -> Vec<T> {
        let due = self.entries.partition_point(|(at, _)| *at <= now);
        self.entries.drain(..due).map(|(_, item)| item).collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.first().map(|(at, _)| *at)
    }

    /// How long the loop may block before the next entry is due, capped at `max`.
    pub fn poll_timeout(&self, now: Instant, max: Duration) -> Duration {
        self.next_deadline()
            .map_or(max, |at| at.saturating_duration_since(now).min(max))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
