//! Deferred-tick task scheduler.
//!
//! Crash recovery must not recreate a browsing context inside the platform
//! callback that is tearing the old one down, so recreation is queued here and
//! executed on the next tick of the composition loop. Tasks carry the owning
//! window's origin as a cancellation token: a later synchronous `kill()`
//! cancels still-pending work for that window deterministically.

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Recreate the homescreen frame after a fatal crash.
    RestartHomescreen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    pub id: u64,
    /// Cancellation token: the origin of the window the task belongs to.
    pub origin: String,
    pub kind: TaskKind,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    pending: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `kind` for execution on the next tick, returning the task id.
    pub fn schedule(&mut self, origin: impl Into<String>, kind: TaskKind) -> u64 {
        self.next_id += 1;
        let task = ScheduledTask {
            id: self.next_id,
            origin: origin.into(),
            kind,
        };
        debug!("scheduled {:?}", task);
        self.pending.push(task);
        self.next_id
    }

    /// Cancel every pending task owned by `origin`; returns how many.
    pub fn cancel_for(&mut self, origin: &str) -> usize {
        let before = self.pending.len();
        self.pending.retain(|task| task.origin != origin);
        before - self.pending.len()
    }

    pub fn cancel(&mut self, id: u64) -> bool {
        let before = self.pending.len();
        self.pending.retain(|task| task.id != id);
        before != self.pending.len()
    }

    /// Take everything due for this tick as a snapshot.
    pub fn take_due(&mut self) -> Vec<ScheduledTask> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending_for(&self, origin: &str) -> bool {
        self.pending.iter().any(|task| task.origin == origin)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_for_invalidates_pending_work() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule("https://home", TaskKind::RestartHomescreen);
        scheduler.schedule("https://other", TaskKind::RestartHomescreen);

        assert_eq!(scheduler.cancel_for("https://home"), 1);
        assert!(!scheduler.has_pending_for("https://home"));

        let due = scheduler.take_due();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].origin, "https://other");
        assert!(scheduler.is_empty());
    }

    #[test]
    fn cancel_by_id() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule("https://home", TaskKind::RestartHomescreen);
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
    }
}
