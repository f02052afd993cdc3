//! Monotonic time source
//!
//! Counters are 32-bit and wrap; elapsed time must always be computed with
//! `wrapping_sub` so that intervals spanning a wrap stay correct.

/// Microsecond/millisecond monotonic clock
pub trait MonotonicClock {
    /// Microseconds since an arbitrary epoch (wrapping)
    fn micros(&self) -> u32;

    /// Milliseconds since an arbitrary epoch (wrapping)
    fn millis(&self) -> u32;

    /// Busy-wait for `us` microseconds
    fn delay_us(&self, us: u32) {
        let start = self.micros();
        while self.micros().wrapping_sub(start) < us {
            core::hint::spin_loop();
        }
    }

    /// Busy-wait for `ms` milliseconds
    fn delay_ms(&self, ms: u32) {
        let start = self.millis();
        while self.millis().wrapping_sub(start) < ms {
            core::hint::spin_loop();
        }
    }
}

impl<T: MonotonicClock + ?Sized> MonotonicClock for &T {
    fn micros(&self) -> u32 {
        (**self).micros()
    }

    fn millis(&self) -> u32 {
        (**self).millis()
    }

    fn delay_us(&self, us: u32) {
        (**self).delay_us(us)
    }

    fn delay_ms(&self, ms: u32) {
        (**self).delay_ms(ms)
    }
}

/// Clock backed by the embassy time driver
#[cfg(feature = "embassy")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

#[cfg(feature = "embassy")]
impl MonotonicClock for EmbassyClock {
    fn micros(&self) -> u32 {
        embassy_time::Instant::now().as_micros() as u32
    }

    fn millis(&self) -> u32 {
        embassy_time::Instant::now().as_millis() as u32
    }

    fn delay_us(&self, us: u32) {
        embassy_time::block_for(embassy_time::Duration::from_micros(us as u64));
    }

    fn delay_ms(&self, ms: u32) {
        embassy_time::block_for(embassy_time::Duration::from_millis(ms as u64));
    }
}
