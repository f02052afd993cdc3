//! Simulated time

use core::cell::Cell;

use crate::clock::MonotonicClock;

/// Shared simulated time base
///
/// Every clock read advances time by the poll step, which models the
/// cost of one iteration of a busy-poll loop.
#[derive(Debug)]
pub struct SimTime {
    now_us: Cell<u32>,
    poll_step_us: Cell<u32>,
}

impl Default for SimTime {
    fn default() -> Self {
        Self::new(1)
    }
}

impl SimTime {
    /// Create a time base starting at 0 with the given poll step
    pub const fn new(poll_step_us: u32) -> Self {
        Self {
            now_us: Cell::new(0),
            poll_step_us: Cell::new(poll_step_us),
        }
    }

    /// Create a time base starting at `start_us`
    pub const fn starting_at(start_us: u32, poll_step_us: u32) -> Self {
        Self {
            now_us: Cell::new(start_us),
            poll_step_us: Cell::new(poll_step_us),
        }
    }

    /// Current simulated time without advancing it
    pub fn now_us(&self) -> u32 {
        self.now_us.get()
    }

    /// Advance simulated time
    pub fn advance(&self, us: u32) {
        self.now_us.set(self.now_us.get().wrapping_add(us));
    }

    fn poll(&self) -> u32 {
        let now = self.now_us.get();
        self.advance(self.poll_step_us.get());
        now
    }
}

/// Clock reading a [`SimTime`]
#[derive(Debug, Clone, Copy)]
pub struct MockClock<'a> {
    time: &'a SimTime,
}

impl<'a> MockClock<'a> {
    /// Create a clock over a shared time base
    pub fn new(time: &'a SimTime) -> Self {
        Self { time }
    }
}

impl MonotonicClock for MockClock<'_> {
    fn micros(&self) -> u32 {
        self.time.poll()
    }

    fn millis(&self) -> u32 {
        self.time.poll() / 1000
    }

    fn delay_us(&self, us: u32) {
        self.time.advance(us);
    }

    fn delay_ms(&self, ms: u32) {
        self.time.advance(ms.saturating_mul(1000));
    }
}
