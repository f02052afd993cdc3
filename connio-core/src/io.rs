//! Single-owner I/O context
//!
//! [`Io`] owns the connector directory, the clock, the ADC resolution
//! register and the board configuration. Every pin operation goes through
//! `&mut self`, so connector modes are only ever changed from one place.

use connio_hal::{AdcControl, ConnectorDirectory, InterruptController, InterruptHandler, MonotonicClock};

use crate::analog::{self, AnalogInputUnits, AnalogOutMode, AnalogOutputUnits};
use crate::config::{BoardConfig, ConfigError};
use crate::digital::{self, PinMode, PinStatus};
use crate::embedded::{IoDelay, LogicalPin};
use crate::interrupt;
use crate::pins::Pin;
use crate::pulse;
use crate::tone;

/// Pin-level I/O context
///
/// # Type parameters
///
/// - `D`: connector directory
/// - `C`: monotonic clock
/// - `A`: ADC resolution control
pub struct Io<D, C, A> {
    directory: D,
    clock: C,
    adc: A,
    config: BoardConfig,
}

impl<D, C, A> Io<D, C, A>
where
    D: ConnectorDirectory,
    C: MonotonicClock,
    A: AdcControl,
{
    /// Create a context with the reference board configuration
    pub fn new(directory: D, clock: C, adc: A) -> Self {
        Self {
            directory,
            clock,
            adc,
            config: BoardConfig::new(),
        }
    }

    /// Create a context with a custom board configuration
    pub fn with_config(directory: D, clock: C, adc: A, config: BoardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            directory,
            clock,
            adc,
            config,
        })
    }

    /// Get the board configuration
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Get the connector directory
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Get the connector directory mutably
    pub fn directory_mut(&mut self) -> &mut D {
        &mut self.directory
    }

    /// Get the clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Get the ADC control
    pub fn adc(&self) -> &A {
        &self.adc
    }

    /// Consume the context, returning its parts
    pub fn into_parts(self) -> (D, C, A) {
        (self.directory, self.clock, self.adc)
    }

    // Digital

    /// Configure a pin's direction
    pub fn pin_mode(&mut self, pin: Pin, mode: PinMode) {
        digital::pin_mode(&mut self.directory, pin, mode);
    }

    /// Read a pin; see [`digital::digital_read`]
    pub fn digital_read(&mut self, pin: Pin) -> PinStatus {
        digital::digital_read(&mut self.directory, pin)
    }

    /// Write a pin; see [`digital::digital_write`]
    pub fn digital_write(&mut self, pin: Pin, status: PinStatus) {
        digital::digital_write(&mut self.directory, pin, status);
    }

    /// Borrow a pin as an `embedded-hal` digital pin
    pub fn pin(&mut self, pin: Pin) -> LogicalPin<'_, D, C, A> {
        LogicalPin::new(self, pin)
    }

    pub(crate) fn driven_level(&mut self, pin: Pin) -> PinStatus {
        digital::driven_level(&mut self.directory, pin)
    }

    // Analog

    /// Read an analog input; see [`analog::analog_read`]
    pub fn analog_read(&mut self, pin: Pin, units: AnalogInputUnits) -> i32 {
        analog::analog_read(&mut self.directory, &self.adc, &self.config, pin, units)
    }

    /// Write an analog output; see [`analog::analog_write`]
    pub fn analog_write(&mut self, pin: Pin, value: u32, mode: AnalogOutMode, units: AnalogOutputUnits) {
        analog::analog_write(&mut self.directory, &self.config, pin, value, mode, units);
    }

    /// Active ADC resolution in bits
    pub fn analog_read_resolution(&self) -> u8 {
        self.adc.resolution()
    }

    /// Request a new ADC resolution
    pub fn set_analog_read_resolution(&mut self, bits: u8) {
        self.adc.set_resolution(bits);
    }

    // Pulses

    /// Measure a pulse; `None` uses the configured default timeout
    pub fn pulse_in(&mut self, pin: Pin, level: PinStatus, timeout_us: Option<u32>) -> u32 {
        let timeout_us = timeout_us.unwrap_or(self.config.default_pulse_timeout_us);
        pulse::pulse_in(&mut self.directory, &self.clock, pin, level, timeout_us)
    }

    /// Measure a pulse with an explicit timeout
    ///
    /// Same engine as [`pulse_in`](Self::pulse_in), suited to long pulses.
    pub fn pulse_in_long(&mut self, pin: Pin, level: PinStatus, timeout_us: u32) -> u32 {
        pulse::pulse_in(&mut self.directory, &self.clock, pin, level, timeout_us)
    }

    /// Start an output pulse train; see [`pulse::output_pulses_start`]
    pub fn output_pulses_start(
        &mut self,
        pin: Pin,
        on_time_us: u32,
        off_time_us: u32,
        count: u16,
        block_until_done: bool,
    ) {
        pulse::output_pulses_start(
            &mut self.directory,
            pin,
            on_time_us,
            off_time_us,
            count,
            block_until_done,
        );
    }

    /// Stop an output pulse train immediately
    pub fn output_pulses_stop(&mut self, pin: Pin) {
        pulse::output_pulses_stop(&mut self.directory, pin);
    }

    /// Stop an output pulse train, optionally after the current cycle
    pub fn output_pulses_stop_with(&mut self, pin: Pin, stop_immediately: bool) {
        pulse::output_pulses_stop_with(&mut self.directory, pin, stop_immediately);
    }

    // Tone

    /// Play a tone on an H-bridge pin
    pub fn tone(&mut self, pin: Pin, frequency_hz: u32, duration_ms: u32) {
        tone::tone(&mut self.directory, pin, frequency_hz, duration_ms);
    }

    /// Stop a continuous tone
    pub fn no_tone(&mut self, pin: Pin) {
        tone::no_tone(&mut self.directory, pin);
    }

    /// Set the tone volume as a fraction of full scale
    pub fn tone_volume(&mut self, pin: Pin, volume: f32) {
        tone::tone_volume(&mut self.directory, pin, volume);
    }

    // Interrupts

    /// Interrupt line wired to a pin
    pub fn digital_pin_to_interrupt(&mut self, pin: Pin) -> Option<u8> {
        interrupt::digital_pin_to_interrupt(&mut self.directory, pin)
    }

    /// Register an interrupt handler on a line
    pub fn attach_interrupt<I: InterruptController + ?Sized>(
        &mut self,
        controller: &mut I,
        line: u8,
        handler: InterruptHandler,
        status: PinStatus,
    ) {
        interrupt::attach_interrupt(&mut self.directory, controller, line, handler, status);
    }

    /// Remove the handler on a line
    pub fn detach_interrupt<I: InterruptController + ?Sized>(&mut self, controller: &mut I, line: u8) {
        interrupt::detach_interrupt(controller, line);
    }

    /// Enable external interrupts
    pub fn interrupts<I: InterruptController + ?Sized>(&mut self, controller: &mut I) {
        controller.set_enabled(true);
    }

    /// Disable external interrupts
    pub fn no_interrupts<I: InterruptController + ?Sized>(&mut self, controller: &mut I) {
        controller.set_enabled(false);
    }

    // Time

    /// Microseconds since boot (wrapping)
    pub fn micros(&self) -> u32 {
        self.clock.micros()
    }

    /// Milliseconds since boot (wrapping)
    pub fn millis(&self) -> u32 {
        self.clock.millis()
    }

    /// Busy-wait for `ms` milliseconds
    pub fn delay_ms(&self, ms: u32) {
        self.clock.delay_ms(ms);
    }

    /// Busy-wait for `us` microseconds
    pub fn delay_us(&self, us: u32) {
        self.clock.delay_us(us);
    }

    /// `embedded-hal` delay backed by this context's clock
    pub fn delay(&self) -> IoDelay<&C> {
        IoDelay::new(&self.clock)
    }
}
