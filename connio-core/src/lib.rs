//! Pin-level I/O engines for connector-based boards
//!
//! This crate turns a board's connector directory into the classic
//! pin-numbered primitives:
//!
//! - Logical pin resolution, including virtual motor-input pins
//! - Mode coercion with write-then-verify
//! - Digital read/write and the motor-input multiplexer
//! - Analog read/write with unit conversion
//! - Pulse width measurement and pulse-train generation
//! - Tone output, pin modes and external interrupt routing
//! - The tick/reset countdown and setup/loop runner
//!
//! All operations go through the single-owner [`Io`] context. Failures are
//! reported as neutral values or silent no-ops, never as errors.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

pub mod analog;
pub mod config;
pub mod digital;
pub mod embedded;
pub mod interrupt;
pub mod io;
pub mod mode;
pub mod pins;
pub mod pulse;
pub mod runtime;
pub mod tone;

#[cfg(test)]
mod testing;

pub use analog::{AdcResolution, AnalogInputUnits, AnalogOutMode, AnalogOutputUnits};
pub use config::{BoardConfig, ConfigError};
pub use digital::{PinMode, PinStatus};
pub use embedded::{IoDelay, LogicalPin};
pub use io::Io;
pub use pins::{MotorInput, PinTarget};
pub use runtime::{Runner, Sketch, SysTick, TickOutcome};
