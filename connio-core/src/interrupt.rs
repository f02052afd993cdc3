//! External interrupt routing
//!
//! Only the digital inputs and analog inputs (`DI6..=A12`) are wired to
//! external interrupt lines.

use connio_hal::{
    ConnectorDirectory, ConnectorMode, ConnectorType, InterruptController, InterruptHandler,
    InterruptTrigger, EXTERNAL_INTERRUPT_LINES,
};

use crate::digital::PinStatus;
use crate::mode::try_transition;
use crate::pins::{Pin, A12, A9, DI6};

/// Interrupt trigger for a pin condition
pub fn trigger_for(status: PinStatus) -> InterruptTrigger {
    match status {
        PinStatus::Low => InterruptTrigger::Low,
        PinStatus::High => InterruptTrigger::High,
        PinStatus::Change => InterruptTrigger::Change,
        PinStatus::Falling => InterruptTrigger::Falling,
        PinStatus::Rising => InterruptTrigger::Rising,
    }
}

/// Interrupt line wired to a pin
///
/// Returns `None` for pins outside `DI6..=A12` and for pins without a line.
pub fn digital_pin_to_interrupt<D: ConnectorDirectory + ?Sized>(
    directory: &mut D,
    pin: Pin,
) -> Option<u8> {
    if !(DI6..=A12).contains(&pin) {
        return None;
    }
    directory.connector(pin)?.external_interrupt()
}

/// Register an interrupt handler
///
/// Lines outside the controller's range are ignored. An analog input that
/// owns `line` is switched to digital input first so its edges can fire.
pub fn attach_interrupt<D, I>(
    directory: &mut D,
    controller: &mut I,
    line: u8,
    handler: InterruptHandler,
    status: PinStatus,
) where
    D: ConnectorDirectory + ?Sized,
    I: InterruptController + ?Sized,
{
    if line >= EXTERNAL_INTERRUPT_LINES {
        return;
    }

    for pin in A9..=A12 {
        let Some(connector) = directory.connector(pin) else {
            continue;
        };
        if connector.connector_type() == ConnectorType::AnalogInDigitalIn
            && connector.external_interrupt() == Some(line)
        {
            try_transition(connector, ConnectorMode::InputDigital);
        }
    }

    debug!("interrupt line {} attached ({})", line, status);
    controller.set_handler(line, Some(handler), trigger_for(status));
}

/// Remove the handler for a line
pub fn detach_interrupt<I: InterruptController + ?Sized>(controller: &mut I, line: u8) {
    if line >= EXTERNAL_INTERRUPT_LINES {
        return;
    }
    controller.set_handler(line, None, InterruptTrigger::Change);
}
