//! `embedded-hal` adapters
//!
//! Lets drivers written against `embedded-hal` use logical pins, motor
//! input bits included, and the context's clock.

use core::convert::Infallible;

use connio_hal::{AdcControl, ConnectorDirectory, MonotonicClock};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};

use crate::digital::PinStatus;
use crate::io::Io;
use crate::pins::Pin;

/// A logical pin borrowed from an [`Io`] context
pub struct LogicalPin<'a, D, C, A> {
    io: &'a mut Io<D, C, A>,
    pin: Pin,
}

impl<'a, D, C, A> LogicalPin<'a, D, C, A>
where
    D: ConnectorDirectory,
    C: MonotonicClock,
    A: AdcControl,
{
    pub(crate) fn new(io: &'a mut Io<D, C, A>, pin: Pin) -> Self {
        Self { io, pin }
    }

    /// Logical pin number
    pub fn pin(&self) -> Pin {
        self.pin
    }
}

impl<D, C, A> ErrorType for LogicalPin<'_, D, C, A> {
    type Error = Infallible;
}

impl<D, C, A> InputPin for LogicalPin<'_, D, C, A>
where
    D: ConnectorDirectory,
    C: MonotonicClock,
    A: AdcControl,
{
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.io.digital_read(self.pin) == PinStatus::High)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.io.digital_read(self.pin) == PinStatus::Low)
    }
}

impl<D, C, A> OutputPin for LogicalPin<'_, D, C, A>
where
    D: ConnectorDirectory,
    C: MonotonicClock,
    A: AdcControl,
{
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.io.digital_write(self.pin, PinStatus::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.io.digital_write(self.pin, PinStatus::High);
        Ok(())
    }
}

impl<D, C, A> StatefulOutputPin for LogicalPin<'_, D, C, A>
where
    D: ConnectorDirectory,
    C: MonotonicClock,
    A: AdcControl,
{
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.io.driven_level(self.pin) == PinStatus::High)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.io.driven_level(self.pin) == PinStatus::Low)
    }
}

/// `embedded-hal` delay over a [`MonotonicClock`]
#[derive(Debug, Clone, Copy)]
pub struct IoDelay<C> {
    clock: C,
}

impl<C: MonotonicClock> IoDelay<C> {
    /// Create a delay over a clock
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: MonotonicClock> DelayNs for IoDelay<C> {
    fn delay_ns(&mut self, ns: u32) {
        // Microsecond clock: round up so short delays are never skipped
        self.clock.delay_us(ns.div_ceil(1000));
    }

    fn delay_us(&mut self, us: u32) {
        self.clock.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock.delay_ms(ms);
    }
}
