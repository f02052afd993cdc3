//! connio Hardware Abstraction Layer
//!
//! This crate defines the contracts offered by a connector driver library:
//! the board's addressable connectors, the motor-input sub-state of motor
//! connectors, pulse-train and tone generators, the monotonic clock, the
//! ADC resolution register and the external interrupt controller. The
//! engines in `connio-core` consume these traits and never reach the
//! hardware directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Sketch / application                   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  connio-core (pin engines, Io context)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  connio-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ board driver  │       │  mock board   │
//! │   library     │       │ (host tests)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`connector::Connector`] - Type, mode and state of one connector
//! - [`connector::MotorInputs`] - A/B input bits of a motor connector
//! - [`connector::PulseOutput`], [`connector::ToneOutput`] - Output generators
//! - [`directory::ConnectorDirectory`] - Index to connector lookup
//! - [`clock::MonotonicClock`] - Microsecond/millisecond time source
//! - [`adc::AdcControl`] - ADC resolution register
//! - [`interrupt::InterruptController`] - External interrupt lines

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod clock;
pub mod connector;
pub mod directory;
pub mod interrupt;

#[cfg(feature = "mock")]
pub mod mock;

// Re-export key traits at crate root for convenience
pub use adc::AdcControl;
pub use clock::MonotonicClock;
pub use connector::{
    Connector, ConnectorMode, ConnectorType, MotorInputs, PulseOutput, ToneOutput, ToneState,
};
pub use directory::ConnectorDirectory;
pub use interrupt::{
    InterruptController, InterruptHandler, InterruptTrigger, EXTERNAL_INTERRUPT_LINES,
};
