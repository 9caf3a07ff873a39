//! Deferred execution primitives: debounce timers and per-frame coalescing.
//!
//! There is no background thread and no global clock. Callers pass `now` (a
//! monotonic millisecond count) into every time-sensitive call and poll
//! timers from their own tick. Re-arming a timer replaces the previous
//! deadline, so only the most recently scheduled deadline can ever fire.

/// A single-purpose, re-armable debounce timer.
///
/// `arm` overwrites any pending deadline; `fire` consumes the deadline when
/// it has elapsed. A `Timer` therefore cannot leak superseded deadlines.
#[derive(Clone, Copy, Debug, Default)]
pub struct Timer {
    deadline: Option<u64>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule (or reschedule) the timer `delay_ms` after `now_ms`.
    pub fn arm(&mut self, now_ms: u64, delay_ms: u64) {
        self.deadline = Some(now_ms.saturating_add(delay_ms));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume and report an elapsed deadline.
    ///
    /// Returns `true` at most once per `arm`.
    pub fn fire(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Work deferred to the next host frame, coalesced by task identity.
///
/// Queueing the same task twice before the frame runs keeps a single entry,
/// which is how multiple catalog-changed notifications collapse into one
/// rebuild. Tasks drain in queue order.
#[derive(Debug)]
pub struct FrameQueue<T: PartialEq> {
    tasks: Vec<T>,
}

impl<T: PartialEq> Default for FrameQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> FrameQueue<T> {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Queue `task` for the next frame unless an equal task is already queued.
    pub fn schedule(&mut self, task: T) {
        if !self.tasks.contains(&task) {
            self.tasks.push(task);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Take everything queued so far; the queue is empty afterwards.
    pub fn drain(&mut self) -> Vec<T> {
        std::mem::take(&mut self.tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rearming_supersedes_previous_deadline() {
        let mut t = Timer::new();
        t.arm(0, 200);
        t.arm(10, 200);
        t.arm(20, 200);

        // The first two deadlines (200, 210) must never fire.
        assert!(!t.fire(210));
        assert!(t.fire(220));
        // A consumed deadline does not fire again.
        assert!(!t.fire(500));
    }

    #[test]
    fn cancel_discards_pending_deadline() {
        let mut t = Timer::new();
        t.arm(0, 100);
        t.cancel();
        assert!(!t.is_armed());
        assert!(!t.fire(1_000));
    }

    #[test]
    fn zero_delay_fires_at_now() {
        let mut t = Timer::new();
        t.arm(42, 0);
        assert!(t.fire(42));
    }

    #[test]
    fn frame_queue_coalesces_equal_tasks() {
        let mut q: FrameQueue<&str> = FrameQueue::new();
        q.schedule("rebuild");
        q.schedule("rebuild");
        q.schedule("focus");

        assert_eq!(q.drain(), vec!["rebuild", "focus"]);
        assert!(q.is_empty());
    }
}
