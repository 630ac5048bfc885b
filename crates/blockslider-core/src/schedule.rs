//! Virtual-time task queue for deferred and delayed slider work.
//!
//! The slider never sleeps. It queues tasks against a millisecond clock the
//! host advances, which keeps every deferral cancellable and every test
//! deterministic. Tasks due at the same instant run in the order queued.

use std::collections::{BTreeMap, HashMap};

/// Milliseconds on the host's clock
pub type Millis = u64;

/// Handle to a queued task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Single-shot timers keyed by due time
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Millis,
    next_seq: u64,
    queue: BTreeMap<(Millis, u64), T>,
    due_by_id: HashMap<u64, Millis>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            queue: BTreeMap::new(),
            due_by_id: HashMap::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Run on the next tick, after anything already due now
    pub fn defer(&mut self, task: T) -> TimerId {
        self.delay(0, task)
    }

    pub fn delay(&mut self, delay_ms: Millis, task: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let due = self.now.saturating_add(delay_ms);
        self.queue.insert((due, seq), task);
        self.due_by_id.insert(seq, due);
        TimerId(seq)
    }

    /// Cancel a queued task; false if it already ran or was cancelled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.due_by_id.remove(&id.0) {
            Some(due) => self.queue.remove(&(due, id.0)).is_some(),
            None => false,
        }
    }

    /// Pop the earliest task due at or before `until`
    ///
    /// The clock moves to the task's due time so work it queues is
    /// measured from when it ran.
    pub fn pop_due(&mut self, until: Millis) -> Option<T> {
        let (&(due, seq), _) = self.queue.first_key_value()?;
        if due > until {
            return None;
        }
        let task = self.queue.remove(&(due, seq))?;
        self.due_by_id.remove(&seq);
        self.now = self.now.max(due);
        Some(task)
    }

    /// Move the clock forward once every due task has been popped
    pub fn advance_clock(&mut self, to: Millis) {
        self.now = self.now.max(to);
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.due_by_id.contains_key(&id.0)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop every queued task, returning how many were cancelled
    pub fn clear(&mut self) -> usize {
        let count = self.queue.len();
        self.queue.clear();
        self.due_by_id.clear();
        count
    }
}

/// Collapses bursts of calls into one trailing task
#[derive(Debug)]
pub struct Debouncer {
    window: Millis,
    pending: Option<TimerId>,
}

impl Debouncer {
    pub fn new(window: Millis) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Queue `task` after the window, replacing any call still waiting
    pub fn call<T>(&mut self, scheduler: &mut Scheduler<T>, task: T) {
        self.cancel(scheduler);
        self.pending = Some(scheduler.delay(self.window, task));
    }

    pub fn cancel<T>(&mut self, scheduler: &mut Scheduler<T>) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel(id);
        }
    }

    /// Mark the trailing task as run
    pub fn fired(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
