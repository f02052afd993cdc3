//! Pulse width measurement
//!
//! A measurement walks three phases in strict order:
//!
//! ```text
//!   Drain ──(level left)──> AwaitEdge ──(level entered)──> Measure ──(level left)──> width
//!     │                        │                              │
//!     └───── elapsed since start >= timeout: return 0 ────────┘
//! ```
//!
//! `Drain` skips a pulse that was already in progress when the call began.
//! All three phases are charged against one deadline taken at the start of
//! the call; the budget is not reset when measurement begins. A timeout and
//! a zero-width pulse both read as 0.

use connio_hal::{Connector, ConnectorDirectory, ConnectorMode, MonotonicClock};

use crate::digital::PinStatus;
use crate::mode::try_transition;
use crate::pins::{Pin, PinTarget};

/// Measurement phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Waiting for a stale pulse at the target level to end
    Drain,
    /// Waiting for the signal to enter the target level
    AwaitEdge,
    /// Timing the pulse
    Measure {
        /// Clock reading when the target level was entered
        begin_us: u32,
    },
}

impl Phase {
    /// Phase after observing the signal, or `None` to keep polling
    ///
    /// `at_level` is whether the signal is at the target level; `now` reads
    /// the clock and is only called when measurement begins.
    fn advance(self, at_level: bool, now: impl FnOnce() -> u32) -> Option<Self> {
        match (self, at_level) {
            (Phase::Drain, false) => Some(Phase::AwaitEdge),
            (Phase::AwaitEdge, true) => Some(Phase::Measure { begin_us: now() }),
            _ => None,
        }
    }

    /// Start time of the pulse being timed, if it has just ended
    fn completed(self, at_level: bool) -> Option<u32> {
        match self {
            Phase::Measure { begin_us } if !at_level => Some(begin_us),
            _ => None,
        }
    }
}

/// Measure the width of a pulse at `level` on an already-prepared connector
///
/// # Arguments
///
/// - `connector`: connector in digital input mode
/// - `clock`: monotonic microsecond clock
/// - `level`: target level, [`PinStatus::High`] or [`PinStatus::Low`]
/// - `timeout_us`: budget for the whole call, measured from its start
///
/// Returns the pulse width in microseconds, or 0 on timeout.
pub fn measure_pulse<C, K>(connector: &C, clock: &K, level: PinStatus, timeout_us: u32) -> u32
where
    C: Connector + ?Sized,
    K: MonotonicClock + ?Sized,
{
    let start = clock.micros();
    let mut phase = Phase::Drain;

    loop {
        let at_level = PinStatus::from_state(connector.state()) == level;

        if let Some(begin_us) = phase.completed(at_level) {
            let now = clock.micros();
            if now.wrapping_sub(start) >= timeout_us {
                trace!("pulse ended after the deadline");
                return 0;
            }
            return now.wrapping_sub(begin_us);
        }

        match phase.advance(at_level, || clock.micros()) {
            Some(next) => phase = next,
            None => {
                if clock.micros().wrapping_sub(start) >= timeout_us {
                    trace!("pulse measurement timed out in {}", phase);
                    return 0;
                }
            }
        }
    }
}

/// Measure a pulse on a logical pin
///
/// Only non-output connectors that accept digital input can be measured.
/// Virtual motor-input pins, edge conditions in place of a level, missing
/// connectors and refused mode changes all return 0 without polling.
pub fn pulse_in<D, K>(directory: &mut D, clock: &K, pin: Pin, level: PinStatus, timeout_us: u32) -> u32
where
    D: ConnectorDirectory + ?Sized,
    K: MonotonicClock + ?Sized,
{
    if !level.is_level() {
        return 0;
    }
    let Some(PinTarget::Physical(index)) = PinTarget::resolve(pin) else {
        return 0;
    };
    let Some(connector) = directory.connector(index) else {
        return 0;
    };
    if connector.is_writable() {
        debug!("pulse_in on output-capable pin {} rejected", index);
        return 0;
    }
    if !try_transition(connector, ConnectorMode::InputDigital) {
        return 0;
    }

    measure_pulse(&*connector, clock, level, timeout_us)
}
