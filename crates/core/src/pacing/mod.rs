use std::{
    sync::atomic::{AtomicU8, Ordering},
    thread,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};

/// Longest uninterrupted sleep while waiting out a step delay.
const POLL_SLICE: Duration = Duration::from_millis(2);

/// Whether a sort is currently running on the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortState {
    Idle,
    Sorting,
}

/// Run state shared between the controller and the sort worker. Storing
/// [`SortState::Idle`] is the cancellation signal.
#[derive(Debug)]
pub struct RunFlag(AtomicU8);

impl RunFlag {
    const IDLE: u8 = 0;
    const SORTING: u8 = 1;

    pub fn new() -> Self {
        Self(AtomicU8::new(Self::IDLE))
    }

    pub fn state(&self) -> SortState {
        match self.0.load(Ordering::Acquire) {
            Self::SORTING => SortState::Sorting,
            _ => SortState::Idle,
        }
    }

    pub fn start(&self) {
        self.0.store(Self::SORTING, Ordering::Release);
    }

    pub fn cancel(&self) {
        self.0.store(Self::IDLE, Ordering::Release);
    }

    pub fn is_sorting(&self) -> bool {
        self.state() == SortState::Sorting
    }
}

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds a visual step for a fixed delay while watching for cancellation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepPacer {
    delay: Duration,
}

impl StepPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Sleeps for the configured delay. Returns `false` as soon as the flag
    /// stops reporting [`SortState::Sorting`].
    pub fn wait(&self, flag: &RunFlag) -> bool {
        if self.delay.is_zero() {
            return flag.is_sorting();
        }

        let deadline = Instant::now() + self.delay;
        loop {
            if !flag.is_sorting() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep((deadline - now).min(POLL_SLICE));
        }
    }
}
