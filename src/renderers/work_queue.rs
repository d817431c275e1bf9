// Copyright @yucwang 2026

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

struct QueueState<T> {
    items: Vec<T>,
    last_poll: Instant,
}

/// Pre-loaded multi-consumer queue. Items are handed out from the back of
/// the vector it was built from, each exactly once; once drained every `pop`
/// returns `None`. Items with equal priority in a sorted input therefore come
/// out in reverse of their sorted order.
pub struct WorkQueue<T> {
    state: Mutex<QueueState<T>>,
    poll_interval: Duration,
}

impl<T> WorkQueue<T> {
    pub fn new(items: Vec<T>, poll_interval: Duration) -> Self {
        Self {
            state: Mutex::new(QueueState { items, last_poll: Instant::now() }),
            poll_interval,
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take the next item. When `poll_interval` has elapsed since the last
    /// poll, `on_poll` runs first, on this thread and outside the lock, so
    /// other consumers keep popping while it publishes progress.
    pub fn pop<F: FnOnce()>(&self, on_poll: F) -> Option<T> {
        let poll_due = {
            let mut state = self.lock();
            let now = Instant::now();
            let due = now.duration_since(state.last_poll) >= self.poll_interval;
            if due {
                state.last_poll = now;
            }
            due
        };
        if poll_due {
            on_poll();
        }

        self.lock().items.pop()
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_pops_from_back_then_stops() {
        let queue = WorkQueue::new(vec![1, 2, 3], Duration::from_secs(3600));
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(|| {}), Some(3));
        assert_eq!(queue.pop(|| {}), Some(2));
        assert_eq!(queue.pop(|| {}), Some(1));
        assert!(queue.is_empty());
        assert_eq!(queue.pop(|| {}), None);
        assert_eq!(queue.pop(|| {}), None);
    }

    #[test]
    fn test_every_item_popped_exactly_once_under_contention() {
        const ITEMS: usize = 10_000;
        const WORKERS: usize = 8;
        let queue = WorkQueue::new((0..ITEMS).collect::<Vec<usize>>(), Duration::ZERO);
        let polls = AtomicUsize::new(0);
        let stops = AtomicUsize::new(0);

        let mut popped: Vec<usize> = thread::scope(|scope| {
            let handles: Vec<_> = (0..WORKERS).map(|_| {
                let (queue, polls, stops) = (&queue, &polls, &stops);
                scope.spawn(move || {
                    let mut mine = Vec::new();
                    while let Some(item) = queue.pop(|| { polls.fetch_add(1, Ordering::Relaxed); }) {
                        mine.push(item);
                    }
                    stops.fetch_add(1, Ordering::Relaxed);
                    mine
                })
            }).collect();
            handles.into_iter()
                .flat_map(|h| h.join().expect("worker panicked"))
                .collect()
        });

        assert_eq!(popped.len(), ITEMS);
        popped.sort_unstable();
        assert!(popped.iter().copied().eq(0..ITEMS));
        assert_eq!(stops.load(Ordering::Relaxed), WORKERS);
        // Zero interval: every pop polls, including each worker's final one.
        assert_eq!(polls.load(Ordering::Relaxed), ITEMS + WORKERS);
        assert_eq!(queue.pop(|| {}), None);
    }

    #[test]
    fn test_long_interval_suppresses_polls() {
        let queue = WorkQueue::new(vec![0; 16], Duration::from_secs(3600));
        let mut polls = 0;
        while queue.pop(|| polls += 1).is_some() {}
        assert_eq!(polls, 0);
    }
}
