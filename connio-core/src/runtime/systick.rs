//! Tick counter and reset countdown

use portable_atomic::{AtomicI32, AtomicU32, Ordering};

/// Countdown value meaning no reset is pending
const DISARMED: i32 = -1;

/// Result of servicing one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Nothing to do
    Idle,
    /// The reset countdown expired; the board should reset now
    ResetDue,
}

/// Millisecond tick bookkeeping shared with the timer interrupt
///
/// All methods take `&self` so a `static SysTick` can be serviced from the
/// interrupt and armed from the foreground.
#[derive(Debug)]
pub struct SysTick {
    ticks: AtomicU32,
    reset_countdown: AtomicI32,
}

impl Default for SysTick {
    fn default() -> Self {
        Self::new()
    }
}

impl SysTick {
    /// Create a tick counter at zero with no reset pending
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU32::new(0),
            reset_countdown: AtomicI32::new(DISARMED),
        }
    }

    /// Ticks serviced so far (wrapping)
    pub fn ticks(&self) -> u32 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Arm the reset countdown
    ///
    /// The reset falls due on the `ticks`-th tick from now. A countdown of 0
    /// never fires; the next tick just disarms it. Re-arming replaces any
    /// pending countdown.
    pub fn initiate_reset(&self, ticks: u32) {
        let ticks = i32::try_from(ticks).unwrap_or(i32::MAX);
        debug!("reset in {} ticks", ticks);
        self.reset_countdown.store(ticks, Ordering::Release);
    }

    /// Disarm the reset countdown
    pub fn cancel_reset(&self) {
        self.reset_countdown.store(DISARMED, Ordering::Release);
    }

    /// Check if a reset countdown is running
    pub fn reset_pending(&self) -> bool {
        self.reset_countdown.load(Ordering::Acquire) != DISARMED
    }

    /// Service one timer tick
    ///
    /// Called from the timer interrupt. Reports [`TickOutcome::ResetDue`]
    /// exactly once per armed countdown.
    pub fn on_tick(&self) -> TickOutcome {
        self.ticks.fetch_add(1, Ordering::Relaxed);

        let previous = self
            .reset_countdown
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |remaining| {
                match remaining {
                    DISARMED => None,
                    0 | 1 => Some(DISARMED),
                    r => Some(r - 1),
                }
            });

        match previous {
            Ok(1) => TickOutcome::ResetDue,
            _ => TickOutcome::Idle,
        }
    }
}
