//! Mode coercion
//!
//! Connector drivers drop mode requests they cannot honour without telling
//! anyone. Every coercion here therefore writes the requested mode and then
//! reads the mode back; callers only proceed when the read-back matches.

use connio_hal::{Connector, ConnectorMode};

/// Put a connector into `mode`, verifying the result
///
/// No request is issued if the connector is already in `mode`, so repeated
/// coercion has no side effect beyond the first transition.
///
/// Returns true iff the connector is now in `mode`.
pub fn try_transition<C: Connector + ?Sized>(connector: &mut C, mode: ConnectorMode) -> bool {
    if connector.mode() == mode {
        return true;
    }

    connector.set_mode(mode);
    let accepted = connector.mode() == mode;
    if accepted {
        debug!("connector mode -> {}", mode);
    } else {
        warn!(
            "{} connector refused mode {}",
            connector.connector_type(),
            mode
        );
    }
    accepted
}

/// Prepare a connector for a digital read
///
/// Output-capable connectors are read as they are. Anything else is
/// coerced into digital input.
pub fn prepare_digital_read<C: Connector + ?Sized>(connector: &mut C) -> bool {
    connector.is_writable() || try_transition(connector, ConnectorMode::InputDigital)
}

/// Prepare a connector for a digital write
///
/// Returns false if the connector cannot be written or refused digital
/// output, in which case the write must be dropped.
pub fn prepare_digital_write<C: Connector + ?Sized>(connector: &mut C) -> bool {
    connector.is_writable() && try_transition(connector, ConnectorMode::OutputDigital)
}

#[cfg(test)]
mod tests {
    use super::*;
    use connio_hal::mock::MockConnector;
    use connio_hal::ConnectorType;

    #[test]
    fn test_transition_accepted() {
        let mut c = MockConnector::new(5, ConnectorType::DigitalInOut);

        assert!(try_transition(&mut c, ConnectorMode::OutputDigital));
        assert_eq!(c.mode(), ConnectorMode::OutputDigital);
    }

    #[test]
    fn test_transition_refused_is_detected() {
        let mut c = MockConnector::new(10, ConnectorType::DigitalIn);

        assert!(!try_transition(&mut c, ConnectorMode::OutputDigital));
        assert_eq!(c.mode(), ConnectorMode::InvalidNone);
    }

    #[test]
    fn test_transition_is_idempotent() {
        let mut c = MockConnector::new(5, ConnectorType::DigitalInOut);

        assert!(try_transition(&mut c, ConnectorMode::OutputDigital));
        assert!(try_transition(&mut c, ConnectorMode::OutputDigital));
        assert_eq!(c.mode_requests(), 1);
        assert_eq!(c.connector_type(), ConnectorType::DigitalInOut);
    }

    #[test]
    fn test_refused_transition_keeps_previous_mode() {
        let mut c = MockConnector::new(13, ConnectorType::AnalogInDigitalIn)
            .with_mode(ConnectorMode::InputAnalog);

        assert!(!try_transition(&mut c, ConnectorMode::OutputPwm));
        assert_eq!(c.mode(), ConnectorMode::InputAnalog);
    }

    #[test]
    fn test_digital_read_leaves_outputs_alone() {
        let mut c = MockConnector::new(5, ConnectorType::DigitalInOut)
            .with_mode(ConnectorMode::OutputDigital);

        assert!(prepare_digital_read(&mut c));
        assert_eq!(c.mode(), ConnectorMode::OutputDigital);
        assert_eq!(c.mode_requests(), 0);
    }

    #[test]
    fn test_digital_read_coerces_inputs() {
        let mut c = MockConnector::new(13, ConnectorType::AnalogInDigitalIn)
            .with_mode(ConnectorMode::InputAnalog);

        assert!(prepare_digital_read(&mut c));
        assert_eq!(c.mode(), ConnectorMode::InputDigital);
    }

    #[test]
    fn test_digital_write_requires_writable() {
        let mut c = MockConnector::new(10, ConnectorType::DigitalIn);

        assert!(!prepare_digital_write(&mut c));
        assert_eq!(c.mode_requests(), 0);
    }

    #[test]
    fn test_digital_write_verifies_mode() {
        // Claims to be writable but refuses digital output
        let mut c = MockConnector::new(4, ConnectorType::AnalogOutDigitalInOut)
            .with_supported_modes(&[ConnectorMode::OutputAnalog])
            .with_writable(true);

        assert!(!prepare_digital_write(&mut c));
        assert_eq!(c.mode_requests(), 1);
    }
}
