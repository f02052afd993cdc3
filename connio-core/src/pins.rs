//! Logical pin address space
//!
//! Applications name every resource by an integer logical pin. Ordinary
//! pins `0..=MAX_PIN` map one-to-one onto connector indices. Above them sit
//! eight virtual pins, two per motor connector, that alias the motor's
//! A and B input bits:
//!
//! ```text
//!   0..=3     M0..M3        motor connectors
//!   4..=9     IO0..IO5      digital I/O (IO0 analog out, IO4/IO5 H-bridge)
//!  10..=12    DI6..DI8      digital inputs
//!  13..=16    A9..A12       analog inputs
//!  17         LED           status LED
//!  64..=127   CCIO A0..H7   expansion-bus pins
//! 128..=135   M0_INA..M3_INB  virtual motor inputs
//! ```
//!
//! [`PinTarget::resolve`] is the only place that does range arithmetic on
//! pin numbers.

/// Logical pin number
pub type Pin = u8;

pub const M0: Pin = 0;
pub const M1: Pin = 1;
pub const M2: Pin = 2;
pub const M3: Pin = 3;
pub const IO0: Pin = 4;
pub const IO1: Pin = 5;
pub const IO2: Pin = 6;
pub const IO3: Pin = 7;
pub const IO4: Pin = 8;
pub const IO5: Pin = 9;
pub const DI6: Pin = 10;
pub const DI7: Pin = 11;
pub const DI8: Pin = 12;
pub const A9: Pin = 13;
pub const A10: Pin = 14;
pub const A11: Pin = 15;
pub const A12: Pin = 16;
pub const LED: Pin = 17;

/// First expansion-bus pin (board A, pin 0)
pub const CCIO_A0: Pin = 64;
/// Pins per expansion-bus board
pub const CCIO_PINS_PER_BOARD: u8 = 8;
/// Maximum expansion-bus boards on the chain
pub const CCIO_MAX_BOARDS: u8 = 8;
/// Last expansion-bus pin (board H, pin 7)
pub const CCIO_H7: Pin = CCIO_A0 + CCIO_PINS_PER_BOARD * CCIO_MAX_BOARDS - 1;

/// Last ordinary connector pin
pub const MAX_PIN: Pin = CCIO_H7;

/// Number of motor connectors
pub const MOTOR_CHANNELS: u8 = 4;

pub const M0_INA: Pin = MAX_PIN + 1;
pub const M0_INB: Pin = MAX_PIN + 2;
pub const M1_INA: Pin = MAX_PIN + 3;
pub const M1_INB: Pin = MAX_PIN + 4;
pub const M2_INA: Pin = MAX_PIN + 5;
pub const M2_INB: Pin = MAX_PIN + 6;
pub const M3_INA: Pin = MAX_PIN + 7;
pub const M3_INB: Pin = MAX_PIN + 8;

/// First virtual motor-input pin
pub const FIRST_VIRTUAL: Pin = M0_INA;
/// Last virtual motor-input pin
pub const LAST_VIRTUAL: Pin = M3_INB;

/// Expansion-bus pin number for a board and pin on that board
///
/// Returns `None` if either index is out of range.
pub const fn ccio_pin(board: u8, pin: u8) -> Option<Pin> {
    if board < CCIO_MAX_BOARDS && pin < CCIO_PINS_PER_BOARD {
        Some(CCIO_A0 + board * CCIO_PINS_PER_BOARD + pin)
    } else {
        None
    }
}

/// Motor input selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorInput {
    /// Input A
    A,
    /// Input B
    B,
}

/// What a logical pin refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinTarget {
    /// A physical connector, by directory index
    Physical(u8),
    /// One input bit of a motor connector
    MotorBit {
        /// Directory index of the motor connector
        connector: u8,
        /// Which input bit
        input: MotorInput,
    },
}

impl PinTarget {
    /// Classify a logical pin
    ///
    /// Pure function of `pin`. Returns `None` above [`LAST_VIRTUAL`].
    /// Whether the board actually populates a physical index is decided by
    /// the connector directory, not here.
    pub const fn resolve(pin: Pin) -> Option<Self> {
        if pin <= MAX_PIN {
            return Some(PinTarget::Physical(pin));
        }
        if pin > LAST_VIRTUAL {
            return None;
        }
        let offset = pin - FIRST_VIRTUAL;
        let input = if offset % 2 == 0 {
            MotorInput::A
        } else {
            MotorInput::B
        };
        Some(PinTarget::MotorBit {
            connector: M0 + offset / 2,
            input,
        })
    }

    /// Directory index of the connector behind this target
    pub const fn connector(&self) -> u8 {
        match *self {
            PinTarget::Physical(index) => index,
            PinTarget::MotorBit { connector, .. } => connector,
        }
    }

    /// Check if this is a virtual motor-input target
    pub const fn is_motor_bit(&self) -> bool {
        matches!(self, PinTarget::MotorBit { .. })
    }
}
