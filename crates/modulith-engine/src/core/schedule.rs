//! Deferred, fire-once events owned by the game loop.
//!
//! Each entry is tagged with the generation that scheduled it. When the
//! entry comes due, it is delivered only if that generation is still the
//! current one; otherwise it is silently dropped. A transition scheduled by
//! an earlier round can therefore never act on a newer round.

#[derive(Debug, Clone)]
struct Scheduled<E> {
    at_ms: f64,
    generation: u64,
    event: E,
}

/// A small queue of delayed events keyed by due time.
#[derive(Debug, Clone)]
pub struct TimerQueue<E> {
    entries: Vec<Scheduled<E>>,
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(8),
        }
    }

    /// Schedule `event` to fire at `at_ms` on behalf of `generation`.
    pub fn schedule(&mut self, at_ms: f64, generation: u64, event: E) {
        self.entries.push(Scheduled {
            at_ms,
            generation,
            event,
        });
    }

    /// Remove and return every event due at `now_ms` that still belongs to
    /// `current_generation`, in due-time order. Stale due events are dropped.
    pub fn poll(&mut self, now_ms: f64, current_generation: u64) -> Vec<E> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].at_ms <= now_ms {
                due.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));

        let mut fired = Vec::with_capacity(due.len());
        for entry in due {
            if entry.generation == current_generation {
                fired.push(entry.event);
            } else {
                log::debug!(
                    "dropping stale timer from generation {} (current {})",
                    entry.generation,
                    current_generation
                );
            }
        }
        fired
    }

    /// Drop everything still pending.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_when_due() {
        let mut q = TimerQueue::new();
        q.schedule(100.0, 1, "next");
        assert!(q.poll(50.0, 1).is_empty());
        assert_eq!(q.poll(100.0, 1), vec!["next"]);
        assert!(q.poll(200.0, 1).is_empty());
        assert!(q.is_empty());
    }

    #[test]
    fn stale_generation_is_dropped() {
        let mut q = TimerQueue::new();
        q.schedule(100.0, 1, "old");
        q.schedule(150.0, 2, "new");
        let fired = q.poll(200.0, 2);
        assert_eq!(fired, vec!["new"]);
        assert!(q.is_empty());
    }

    #[test]
    fn due_events_come_out_in_time_order() {
        let mut q = TimerQueue::new();
        q.schedule(30.0, 0, 3);
        q.schedule(10.0, 0, 1);
        q.schedule(20.0, 0, 2);
        assert_eq!(q.poll(30.0, 0), vec![1, 2, 3]);
    }

    #[test]
    fn clear_drops_pending() {
        let mut q = TimerQueue::new();
        q.schedule(10.0, 0, ());
        q.clear();
        assert_eq!(q.len(), 0);
        assert!(q.poll(100.0, 0).is_empty());
    }
}
