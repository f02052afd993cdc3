//! Tone output on H-bridge connectors
//!
//! Every other connector type ignores tone requests.

use connio_hal::{ConnectorDirectory, ConnectorMode, ConnectorType, ToneOutput, ToneState};

use crate::mode::try_transition;
use crate::pins::{Pin, PinTarget};

fn tone_output<D: ConnectorDirectory + ?Sized>(
    directory: &mut D,
    pin: Pin,
    mode: Option<ConnectorMode>,
) -> Option<&mut dyn ToneOutput> {
    let Some(PinTarget::Physical(index)) = PinTarget::resolve(pin) else {
        return None;
    };
    let connector = directory.connector(index)?;
    if connector.connector_type() != ConnectorType::HBridge {
        return None;
    }
    if let Some(mode) = mode {
        if !try_transition(connector, mode) {
            return None;
        }
    }
    connector.as_tone_output()
}

/// Play a tone
///
/// A `duration_ms` of 0 plays until [`no_tone`] is called.
pub fn tone<D: ConnectorDirectory + ?Sized>(
    directory: &mut D,
    pin: Pin,
    frequency_hz: u32,
    duration_ms: u32,
) {
    if let Some(output) = tone_output(directory, pin, Some(ConnectorMode::OutputTone)) {
        output.tone_timed(frequency_hz, duration_ms);
    }
}

/// Stop a tone
///
/// Timed tones are left to run out.
pub fn no_tone<D: ConnectorDirectory + ?Sized>(directory: &mut D, pin: Pin) {
    if let Some(output) = tone_output(directory, pin, None) {
        if output.tone_state() != ToneState::Timed {
            output.tone_stop();
        }
    }
}

/// Set the tone volume
///
/// `volume` is a fraction of full scale; out-of-range values saturate.
pub fn tone_volume<D: ConnectorDirectory + ?Sized>(directory: &mut D, pin: Pin, volume: f32) {
    if let Some(output) = tone_output(directory, pin, None) {
        // Float to int casts saturate
        output.set_tone_amplitude((volume * i16::MAX as f32) as i16);
    }
}
