//! Digital I/O and the motor-input multiplexer
//!
//! Ordinary pins read and write their connector's state after mode
//! coercion. Virtual motor-input pins read and write one of the motor
//! connector's A/B input bits instead.
//!
//! Motor-input reads are inverted: an asserted input bit reads as
//! [`PinStatus::Low`]. Writes are not inverted.

use connio_hal::{ConnectorDirectory, ConnectorMode, MotorInputs};

use crate::mode;
use crate::pins::{MotorInput, Pin, PinTarget};

/// Pin level, or an edge/level condition for interrupts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PinStatus {
    Low = 0,
    High = 1,
    Change = 2,
    Falling = 3,
    Rising = 4,
}

impl PinStatus {
    /// Check if this is a logic level (high or low) rather than an edge
    pub fn is_level(&self) -> bool {
        matches!(self, PinStatus::Low | PinStatus::High)
    }

    /// Interpret a digital connector state
    pub fn from_state(state: i32) -> Self {
        if state == 0 {
            PinStatus::Low
        } else {
            PinStatus::High
        }
    }

    /// Raw connector state for this status
    pub fn as_state(&self) -> i32 {
        *self as i32
    }
}

impl From<bool> for PinStatus {
    fn from(high: bool) -> Self {
        if high {
            PinStatus::High
        } else {
            PinStatus::Low
        }
    }
}

/// Pin direction requested through [`pin_mode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    Input,
    Output,
    InputPullup,
}

impl PinMode {
    fn connector_mode(&self) -> ConnectorMode {
        match self {
            PinMode::Output => ConnectorMode::OutputDigital,
            PinMode::Input | PinMode::InputPullup => ConnectorMode::InputDigital,
        }
    }
}

fn read_motor_input(inputs: &dyn MotorInputs, input: MotorInput) -> PinStatus {
    let asserted = match input {
        MotorInput::A => inputs.input_a(),
        MotorInput::B => inputs.input_b(),
    };
    PinStatus::from(!asserted)
}

fn write_motor_input(inputs: &mut dyn MotorInputs, input: MotorInput, status: PinStatus) {
    let asserted = status != PinStatus::Low;
    match input {
        MotorInput::A => inputs.set_input_a(asserted),
        MotorInput::B => inputs.set_input_b(asserted),
    }
}

/// Read a pin
///
/// Returns [`PinStatus::Low`] for unresolvable pins and for connectors
/// that refuse digital input.
pub fn digital_read<D: ConnectorDirectory + ?Sized>(directory: &mut D, pin: Pin) -> PinStatus {
    let Some(target) = PinTarget::resolve(pin) else {
        return PinStatus::Low;
    };
    let Some(connector) = directory.connector(target.connector()) else {
        return PinStatus::Low;
    };

    match target {
        PinTarget::MotorBit { input, .. } => match connector.as_motor_inputs() {
            Some(inputs) => read_motor_input(inputs, input),
            None => PinStatus::Low,
        },
        PinTarget::Physical(_) => {
            if !mode::prepare_digital_read(connector) {
                return PinStatus::Low;
            }
            PinStatus::from_state(connector.state())
        }
    }
}

/// Write a pin
///
/// Dropped silently for unresolvable pins and for connectors that cannot
/// be put into digital output.
pub fn digital_write<D: ConnectorDirectory + ?Sized>(
    directory: &mut D,
    pin: Pin,
    status: PinStatus,
) {
    let Some(target) = PinTarget::resolve(pin) else {
        return;
    };
    let Some(connector) = directory.connector(target.connector()) else {
        return;
    };

    match target {
        PinTarget::MotorBit { input, .. } => {
            if let Some(inputs) = connector.as_motor_inputs() {
                write_motor_input(inputs, input, status);
            }
        }
        PinTarget::Physical(index) => {
            if mode::prepare_digital_write(connector) {
                connector.set_state(status.as_state());
            } else {
                debug!("digital write to pin {} dropped", index);
            }
        }
    }
}

/// Level a pin is currently driven to
///
/// Reads back what [`digital_write`] last set, without mode coercion and
/// without the motor-input read inversion.
pub fn driven_level<D: ConnectorDirectory + ?Sized>(directory: &mut D, pin: Pin) -> PinStatus {
    let Some(target) = PinTarget::resolve(pin) else {
        return PinStatus::Low;
    };
    let Some(connector) = directory.connector(target.connector()) else {
        return PinStatus::Low;
    };

    match target {
        PinTarget::MotorBit { input, .. } => match connector.as_motor_inputs() {
            Some(inputs) => match input {
                MotorInput::A => PinStatus::from(inputs.input_a()),
                MotorInput::B => PinStatus::from(inputs.input_b()),
            },
            None => PinStatus::Low,
        },
        PinTarget::Physical(_) => PinStatus::from_state(connector.state()),
    }
}

/// Configure a pin's direction
///
/// Fire-and-forget: a refused request is not reported. Virtual pins and
/// unresolvable pins are ignored.
pub fn pin_mode<D: ConnectorDirectory + ?Sized>(directory: &mut D, pin: Pin, pin_mode: PinMode) {
    let Some(PinTarget::Physical(index)) = PinTarget::resolve(pin) else {
        return;
    };
    if let Some(connector) = directory.connector(index) {
        connector.set_mode(pin_mode.connector_mode());
    }
}
