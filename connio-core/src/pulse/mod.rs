//! Pulse timing
//!
//! - [`measure`]: busy-polled pulse width measurement under one shared
//!   timeout budget
//! - [`train`]: starting and stopping driver-owned output pulse trains

pub mod measure;
pub mod train;

pub use measure::{measure_pulse, pulse_in, Phase};
pub use train::{output_pulses_start, output_pulses_stop, output_pulses_stop_with};
