//! Virtual-time task scheduler.
//!
//! The page model is single threaded and event driven. The only deferred
//! work is timers (`setTimeout`-style delays such as the simulated submission
//! latency) and animation frames (counter steps). Both are queued here against
//! a virtual clock, so a test can say "advance 1500 ms" instead of sleeping.
//!
//! Tasks are plain values; whoever owns the scheduler decides what a task
//! means when it comes due (see [`crate::app::App`]). Tasks due at the same
//! instant run in the order they were scheduled.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

/// Identifies a scheduled task. Informational only: nothing can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

struct Entry<T> {
    due: Duration,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    frame_interval: Duration,
    queue: BinaryHeap<Reverse<Entry<T>>>,
}

impl<T> Scheduler<T> {
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            frame_interval,
            queue: BinaryHeap::new(),
        }
    }

    /// Virtual time elapsed since the page loaded.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Run `task` once `delay` has elapsed.
    pub fn set_timeout(&mut self, delay: Duration, task: T) -> TaskId {
        let due = self.now + delay;
        self.push(due, task)
    }

    /// Run `task` on the next paint, one frame interval from now.
    pub fn request_animation_frame(&mut self, task: T) -> TaskId {
        let due = self.now + self.frame_interval;
        self.push(due, task)
    }

    fn push(&mut self, due: Duration, task: T) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Entry { due, seq, task }));
        TaskId(seq)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse(e)| e.due)
    }

    /// Pop the earliest task due at or before `deadline`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<T> {
        if self.next_due()? > deadline {
            return None;
        }
        self.pop_next()
    }

    /// Pop the earliest task whatever its due time, moving the clock forward.
    pub fn pop_next(&mut self) -> Option<T> {
        let Reverse(entry) = self.queue.pop()?;
        self.now = self.now.max(entry.due);
        Some(entry.task)
    }

    /// Move the clock to `time` (never backwards) without running anything.
    pub fn settle_at(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }
}
