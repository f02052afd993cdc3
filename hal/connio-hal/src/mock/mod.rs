//! Simulated board for host testing
//!
//! Everything here runs on simulated time. A [`SimTime`] is shared by
//! reference between the [`MockClock`] and any [`MockConnector`] that plays
//! a scripted waveform, so busy-polling code observes deterministic edges
//! without real delays.

mod adc;
mod connector;
mod directory;
mod interrupt;
mod time;

pub use adc::MockAdc;
pub use connector::{MockConnector, PulseTrainRequest, ToneRequest};
pub use directory::MockDirectory;
pub use interrupt::MockInterrupts;
pub use time::{MockClock, SimTime};
