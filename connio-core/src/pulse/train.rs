//! Output pulse trains
//!
//! The connector driver owns a running train once started; this module only
//! starts and stops it. Accepted connectors are the pulse-capable types
//! (digital in/out, H-bridge, analog-out combo, expansion-bus in/out) that
//! have already been configured into some mode.

use connio_hal::{ConnectorDirectory, ConnectorMode, PulseOutput};

use crate::pins::{Pin, PinTarget};

/// Find the pulse generator behind a pin
fn pulse_output<D: ConnectorDirectory + ?Sized>(
    directory: &mut D,
    pin: Pin,
) -> Option<&mut dyn PulseOutput> {
    let Some(PinTarget::Physical(index)) = PinTarget::resolve(pin) else {
        return None;
    };
    let connector = directory.connector(index)?;
    if connector.mode() == ConnectorMode::InvalidNone {
        debug!("pulse train on unconfigured pin {} rejected", index);
        return None;
    }
    if !connector.connector_type().supports_pulses() {
        return None;
    }
    connector.as_pulse_output()
}

/// Start a pulse train
///
/// # Arguments
///
/// - `on_time_us`: high time of each pulse
/// - `off_time_us`: low time between pulses
/// - `count`: number of pulses, 0 for an unbounded train
/// - `block_until_done`: whether the driver blocks until the train ends
pub fn output_pulses_start<D: ConnectorDirectory + ?Sized>(
    directory: &mut D,
    pin: Pin,
    on_time_us: u32,
    off_time_us: u32,
    count: u16,
    block_until_done: bool,
) {
    if let Some(output) = pulse_output(directory, pin) {
        output.output_pulses_start(on_time_us, off_time_us, count, block_until_done);
    }
}

/// Stop a pulse train immediately
pub fn output_pulses_stop<D: ConnectorDirectory + ?Sized>(directory: &mut D, pin: Pin) {
    output_pulses_stop_with(directory, pin, true);
}

/// Stop a pulse train, either immediately or after the current cycle
pub fn output_pulses_stop_with<D: ConnectorDirectory + ?Sized>(
    directory: &mut D,
    pin: Pin,
    stop_immediately: bool,
) {
    if let Some(output) = pulse_output(directory, pin) {
        output.output_pulses_stop(stop_immediately);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins::{ccio_pin, A9, DI6, IO0, IO1, IO4, LED, M0, M0_INA};
    use crate::testing::reference_board;
    use connio_hal::mock::{MockConnector, PulseTrainRequest};
    use connio_hal::{Connector, ConnectorType};

    #[test]
    fn test_start_on_configured_pins() {
        let mut board = reference_board();
        let ccio = ccio_pin(0, 3).unwrap();
        for pin in [IO0, IO1, IO4, ccio] {
            board.get_mut(pin).unwrap().set_mode(ConnectorMode::OutputDigital);
            output_pulses_start(&mut board, pin, 100, 200, 5, false);

            assert_eq!(
                board.get(pin).unwrap().pulse_train(),
                Some(PulseTrainRequest {
                    on_time_us: 100,
                    off_time_us: 200,
                    count: 5,
                    block_until_done: false,
                })
            );
        }
    }

    #[test]
    fn test_unbounded_train() {
        let mut board = reference_board();
        board.get_mut(IO1).unwrap().set_mode(ConnectorMode::OutputDigital);

        output_pulses_start(&mut board, IO1, 50, 50, 0, true);
        let request = board.get(IO1).unwrap().pulse_train().unwrap();
        assert_eq!(request.count, 0);
        assert!(request.block_until_done);
    }

    #[test]
    fn test_unconfigured_connector_rejected() {
        let mut board = reference_board();

        output_pulses_start(&mut board, IO1, 100, 100, 1, false);
        output_pulses_stop(&mut board, IO1);

        let c = board.get(IO1).unwrap();
        assert_eq!(c.pulse_train(), None);
        assert_eq!(c.pulse_stop(), None);
        assert_eq!(c.mode_requests(), 0);
    }

    #[test]
    fn test_non_pulse_types_rejected() {
        let mut board = reference_board();
        for pin in [DI6, A9, LED] {
            let connector_type = board.get(pin).unwrap().connector_type();
            let _ = board.insert(
                MockConnector::new(pin, connector_type).with_mode(ConnectorMode::InputDigital),
            );
            output_pulses_start(&mut board, pin, 100, 100, 1, false);
            assert_eq!(board.get(pin).unwrap().pulse_train(), None);
        }

        let _ = board.insert(
            MockConnector::new(M0, ConnectorType::MotorDriver).with_mode(ConnectorMode::OutputPwm),
        );
        output_pulses_start(&mut board, M0, 100, 100, 1, false);
        output_pulses_start(&mut board, M0_INA, 100, 100, 1, false);
        assert_eq!(board.get(M0).unwrap().pulse_train(), None);
    }

    #[test]
    fn test_stop_defaults_to_immediate() {
        let mut board = reference_board();
        board.get_mut(IO4).unwrap().set_mode(ConnectorMode::OutputPwm);

        output_pulses_start(&mut board, IO4, 10, 10, 0, false);
        output_pulses_stop(&mut board, IO4);
        assert_eq!(board.get(IO4).unwrap().pulse_stop(), Some(true));

        output_pulses_start(&mut board, IO4, 10, 10, 0, false);
        output_pulses_stop_with(&mut board, IO4, false);
        assert_eq!(board.get(IO4).unwrap().pulse_stop(), Some(false));
    }
}
