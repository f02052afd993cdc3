//! Shared fixtures for unit tests

use connio_hal::mock::{MockConnector, MockDirectory};
use connio_hal::ConnectorType;

use crate::pins::{self, A10, A11, A12, A9, DI6, DI7, DI8, IO0, IO1, IO2, IO3, IO4, IO5, LED};

/// Reference board: four motors, IO0..IO5, DI6..DI8, A9..A12, the LED and
/// one expansion board (CCIO A0..A7). Every connector starts unconfigured.
pub fn reference_board<'a>() -> MockDirectory<'a> {
    let mut board = MockDirectory::new();
    for motor in pins::M0..=pins::M3 {
        let _ = board.insert(MockConnector::new(motor, ConnectorType::MotorDriver));
    }
    let _ = board.insert(MockConnector::new(IO0, ConnectorType::AnalogOutDigitalInOut));
    for io in [IO1, IO2, IO3] {
        let _ = board.insert(MockConnector::new(io, ConnectorType::DigitalInOut));
    }
    for io in [IO4, IO5] {
        let _ = board.insert(MockConnector::new(io, ConnectorType::HBridge));
    }
    for (line, di) in [DI6, DI7, DI8].into_iter().enumerate() {
        let _ = board.insert(
            MockConnector::new(di, ConnectorType::DigitalIn).with_interrupt(line as u8 + 4),
        );
    }
    for (line, a) in [A9, A10, A11, A12].into_iter().enumerate() {
        let _ = board.insert(
            MockConnector::new(a, ConnectorType::AnalogInDigitalIn).with_interrupt(line as u8 + 7),
        );
    }
    let _ = board.insert(MockConnector::new(LED, ConnectorType::ShiftRegister));
    for pin in 0..pins::CCIO_PINS_PER_BOARD {
        if let Some(index) = pins::ccio_pin(0, pin) {
            let _ = board.insert(MockConnector::new(index, ConnectorType::CcioDigitalInOut));
        }
    }
    board
}
