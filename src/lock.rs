//! Soft input lock held while a submitted row settles on screen.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Default time input stays locked after a submission.
pub const DEFAULT_LOCK_MS: u64 = 1800;

/// Source of the current time, injectable so tests can drive the lock.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// A boolean lock with at most one pending release.
#[derive(Debug, Clone)]
pub struct InputLock {
    duration: Duration,
    release_at: Option<Instant>,
}

impl InputLock {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            release_at: None,
        }
    }

    /// Locks input until `now + duration`.
    ///
    /// Engaging an already engaged lock means the caller ignored
    /// [`InputLock::is_locked`]; debug builds panic, release builds keep the
    /// existing deadline.
    pub fn engage(&mut self, now: Instant) {
        self.poll(now);
        debug_assert!(
            self.release_at.is_none(),
            "input lock engaged while already locked"
        );
        if self.release_at.is_none() {
            self.release_at = Some(now + self.duration);
        }
    }

    /// Releases the lock if its deadline has passed. Returns `true` when
    /// this call released it.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.release_at {
            Some(deadline) if now >= deadline => {
                self.release_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_locked(&mut self, now: Instant) -> bool {
        self.poll(now);
        self.release_at.is_some()
    }

    /// Drops any pending release without waiting for it.
    pub(crate) fn clear(&mut self) {
        self.release_at = None;
    }
}

impl Default for InputLock {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_LOCK_MS))
    }
}
