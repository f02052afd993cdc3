//! Analog conversion layer
//!
//! Reads convert raw ADC codes to millivolts against the active ADC
//! resolution. Writes either pass a raw PWM duty / DAC code through, or
//! remap a current in microamps onto the DAC code range.
//!
//! # Scaling
//!
//! ```text
//! mV   = round(full_scale_mv * raw / max_code(resolution))
//! code = round(clamp(uA, 0, max_current_ua) * dac_max / max_current_ua)
//! ```

use connio_hal::{AdcControl, ConnectorDirectory, ConnectorMode};

use crate::config::BoardConfig;
use crate::mode::try_transition;
use crate::pins::{Pin, PinTarget};

/// Units for analog reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogInputUnits {
    /// Raw ADC code
    #[default]
    AdcRaw,
    /// Millivolts
    Millivolts,
}

/// Output drive for analog writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogOutMode {
    /// PWM duty cycle
    #[default]
    Pwm,
    /// Analog current loop (DAC)
    Current,
}

/// Units for analog writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogOutputUnits {
    /// Raw duty or DAC code
    #[default]
    DacRaw,
    /// Microamps (current mode only)
    Microamps,
}

/// ADC resolutions with a defined full-scale code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcResolution {
    Bits8,
    Bits10,
    Bits12,
    Bits16,
}

impl AdcResolution {
    /// Map a resolution register value
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            8 => Some(AdcResolution::Bits8),
            10 => Some(AdcResolution::Bits10),
            12 => Some(AdcResolution::Bits12),
            16 => Some(AdcResolution::Bits16),
            _ => None,
        }
    }

    /// Resolution in bits
    pub fn bits(&self) -> u8 {
        match self {
            AdcResolution::Bits8 => 8,
            AdcResolution::Bits10 => 10,
            AdcResolution::Bits12 => 12,
            AdcResolution::Bits16 => 16,
        }
    }

    /// Largest raw code at this resolution
    pub fn max_code(&self) -> u32 {
        (1u32 << self.bits()) - 1
    }

    /// Full-scale code for a register value
    ///
    /// Unrecognised values fall back to the 12-bit full scale.
    pub fn max_code_for_bits(bits: u8) -> u32 {
        Self::from_bits(bits)
            .unwrap_or(AdcResolution::Bits12)
            .max_code()
    }
}

/// Integer division rounding half away from zero
fn div_round(numerator: i64, denominator: i64) -> i64 {
    if (numerator < 0) != (denominator < 0) {
        (numerator - denominator / 2) / denominator
    } else {
        (numerator + denominator / 2) / denominator
    }
}

/// Convert a raw ADC code to millivolts
///
/// Results outside the `i32` range saturate.
pub fn raw_to_millivolts(raw: i32, resolution_bits: u8, full_scale_mv: u32) -> i32 {
    let max_code = AdcResolution::max_code_for_bits(resolution_bits) as i64;
    let millivolts = div_round(i64::from(full_scale_mv) * i64::from(raw), max_code);
    millivolts.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Convert a current in microamps to a DAC code
///
/// The current is clamped to `[0, max_current_ua]` first. Codes above
/// `i32::MAX` saturate.
pub fn microamps_to_dac(microamps: u32, max_current_ua: u32, dac_max: u32) -> i32 {
    if max_current_ua == 0 {
        return 0;
    }
    let clamped = u64::from(microamps.min(max_current_ua));
    let max_current = u64::from(max_current_ua);
    // (2^32 - 1)^2 + 2^31 still fits in a u64
    let code = (clamped * u64::from(dac_max) + max_current / 2) / max_current;
    i32::try_from(code).unwrap_or(i32::MAX)
}

/// Read an analog input
///
/// Forces analog input mode first. Returns 0 for unresolvable or virtual
/// pins and for connectors without analog input.
pub fn analog_read<D, A>(
    directory: &mut D,
    adc: &A,
    config: &BoardConfig,
    pin: Pin,
    units: AnalogInputUnits,
) -> i32
where
    D: ConnectorDirectory + ?Sized,
    A: AdcControl + ?Sized,
{
    let Some(PinTarget::Physical(index)) = PinTarget::resolve(pin) else {
        return 0;
    };
    let Some(connector) = directory.connector(index) else {
        return 0;
    };
    if !try_transition(connector, ConnectorMode::InputAnalog) {
        return 0;
    }

    let raw = connector.state();
    match units {
        AnalogInputUnits::AdcRaw => raw,
        AnalogInputUnits::Millivolts => {
            raw_to_millivolts(raw, adc.resolution(), config.analog_full_scale_mv)
        }
    }
}

/// Write an analog output
///
/// PWM is accepted on digital in/out, H-bridge and analog-out connectors;
/// current output only on analog-out connectors. PWM with microamps has no
/// defined conversion and is rejected. Every rejected write is a silent
/// no-op that leaves the connector untouched.
pub fn analog_write<D: ConnectorDirectory + ?Sized>(
    directory: &mut D,
    config: &BoardConfig,
    pin: Pin,
    value: u32,
    out_mode: AnalogOutMode,
    units: AnalogOutputUnits,
) {
    let Some(PinTarget::Physical(index)) = PinTarget::resolve(pin) else {
        return;
    };
    let Some(connector) = directory.connector(index) else {
        return;
    };
    if !connector.is_writable() {
        return;
    }
    if out_mode == AnalogOutMode::Pwm && units == AnalogOutputUnits::Microamps {
        debug!("analog write to pin {}: PWM in microamps rejected", index);
        return;
    }

    let code = match units {
        AnalogOutputUnits::Microamps => {
            microamps_to_dac(value, config.max_output_current_ua, config.dac_max_code)
        }
        AnalogOutputUnits::DacRaw => i32::try_from(value).unwrap_or(i32::MAX),
    };

    let connector_type = connector.connector_type();
    let mode = match out_mode {
        AnalogOutMode::Pwm if connector_type.supports_pwm() => ConnectorMode::OutputPwm,
        AnalogOutMode::Current if connector_type.supports_current_output() => {
            ConnectorMode::OutputAnalog
        }
        _ => {
            debug!("analog write: {} unsupported on {}", out_mode, connector_type);
            return;
        }
    };

    if try_transition(connector, mode) {
        connector.set_state(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins::{A9, DI6, IO0, IO1, IO4, LED, M0_INA};
    use crate::testing::reference_board;
    use connio_hal::mock::{MockAdc, MockConnector};
    use connio_hal::{Connector, ConnectorType};

    #[test]
    fn test_resolution_table() {
        assert_eq!(AdcResolution::Bits8.max_code(), 255);
        assert_eq!(AdcResolution::Bits10.max_code(), 1023);
        assert_eq!(AdcResolution::Bits12.max_code(), 4095);
        assert_eq!(AdcResolution::Bits16.max_code(), 65535);
        assert_eq!(AdcResolution::from_bits(14), None);
        assert_eq!(AdcResolution::max_code_for_bits(14), 4095);
    }

    #[test]
    fn test_millivolt_scaling() {
        assert_eq!(raw_to_millivolts(4095, 12, 9900), 9900);
        assert_eq!(raw_to_millivolts(0, 12, 9900), 0);
        assert_eq!(raw_to_millivolts(2048, 12, 9900), 4951);
        assert_eq!(raw_to_millivolts(255, 8, 9900), 9900);
        assert_eq!(raw_to_millivolts(65535, 16, 9900), 9900);
        // Unknown resolution falls back to 12-bit
        assert_eq!(raw_to_millivolts(4095, 3, 9900), 9900);
    }

    #[test]
    fn test_microamp_remap() {
        assert_eq!(microamps_to_dac(0, 20_000, 4095), 0);
        assert_eq!(microamps_to_dac(20_000, 20_000, 4095), 4095);
        assert_eq!(microamps_to_dac(10_000, 20_000, 4095), 2048);
        assert_eq!(microamps_to_dac(4_000, 20_000, 4095), 819);
        assert_eq!(microamps_to_dac(25_000, 20_000, 4095), 4095);
    }

    #[test]
    fn test_conversions_saturate_instead_of_wrapping() {
        assert_eq!(microamps_to_dac(u32::MAX, u32::MAX, u32::MAX), i32::MAX);
        assert_eq!(microamps_to_dac(1, 1, u32::MAX), i32::MAX);
        assert_eq!(microamps_to_dac(1, 2, u32::MAX), i32::MAX);
        assert_eq!(microamps_to_dac(1, 4, u32::MAX), 1_073_741_824);

        assert_eq!(raw_to_millivolts(4095, 12, u32::MAX), i32::MAX);
        assert_eq!(raw_to_millivolts(-4095, 12, u32::MAX), i32::MIN);
        assert_eq!(raw_to_millivolts(i32::MAX, 8, u32::MAX), i32::MAX);
        assert_eq!(raw_to_millivolts(i32::MIN, 8, u32::MAX), i32::MIN);
    }

    #[test]
    fn test_current_write_with_oversized_dac_range_stays_positive() {
        let mut board = reference_board();
        let config = BoardConfig {
            dac_max_code: u32::MAX,
            ..BoardConfig::default()
        };

        analog_write(
            &mut board,
            &config,
            IO0,
            20_000,
            AnalogOutMode::Current,
            AnalogOutputUnits::Microamps,
        );
        assert_eq!(board.get(IO0).unwrap().raw_state(), i32::MAX);
    }

    #[test]
    fn test_read_millivolts() {
        let mut board = reference_board();
        let adc = MockAdc::new(12);
        let config = BoardConfig::default();
        board.get_mut(A9).unwrap().set_state(4095);

        assert_eq!(
            analog_read(&mut board, &adc, &config, A9, AnalogInputUnits::Millivolts),
            9900
        );
        assert_eq!(
            analog_read(&mut board, &adc, &config, A9, AnalogInputUnits::AdcRaw),
            4095
        );
        assert_eq!(board.get(A9).unwrap().mode(), ConnectorMode::InputAnalog);
    }

    #[test]
    fn test_read_tracks_resolution() {
        let mut board = reference_board();
        let adc = MockAdc::new(10);
        let config = BoardConfig::default();
        board.get_mut(A9).unwrap().set_state(1023);

        assert_eq!(
            analog_read(&mut board, &adc, &config, A9, AnalogInputUnits::Millivolts),
            9900
        );
    }

    #[test]
    fn test_read_with_unknown_resolution_uses_12_bits() {
        let mut board = reference_board();
        let mut adc = MockAdc::default();
        adc.force_resolution(14);
        let config = BoardConfig::default();
        board.get_mut(A9).unwrap().set_state(4095);

        assert_eq!(
            analog_read(&mut board, &adc, &config, A9, AnalogInputUnits::Millivolts),
            9900
        );
    }

    #[test]
    fn test_read_without_analog_input_is_zero() {
        let mut board = reference_board();
        let adc = MockAdc::default();
        let config = BoardConfig::default();
        board.get_mut(DI6).unwrap().set_state(1);

        assert_eq!(
            analog_read(&mut board, &adc, &config, DI6, AnalogInputUnits::AdcRaw),
            0
        );
        assert_eq!(
            analog_read(&mut board, &adc, &config, 40, AnalogInputUnits::AdcRaw),
            0
        );
        assert_eq!(
            analog_read(&mut board, &adc, &config, M0_INA, AnalogInputUnits::AdcRaw),
            0
        );
    }

    #[test]
    fn test_pwm_write() {
        let mut board = reference_board();
        let config = BoardConfig::default();

        analog_write(&mut board, &config, IO1, 128, AnalogOutMode::Pwm, AnalogOutputUnits::DacRaw);
        let c = board.get(IO1).unwrap();
        assert_eq!(c.mode(), ConnectorMode::OutputPwm);
        assert_eq!(c.raw_state(), 128);

        analog_write(&mut board, &config, IO4, 64, AnalogOutMode::Pwm, AnalogOutputUnits::DacRaw);
        assert_eq!(board.get(IO4).unwrap().raw_state(), 64);
    }

    #[test]
    fn test_pwm_write_dropped_when_mode_refused() {
        let mut board = reference_board();
        let config = BoardConfig::default();
        let _ = board.insert(
            MockConnector::new(IO1, ConnectorType::DigitalInOut)
                .with_supported_modes(&[ConnectorMode::InputDigital, ConnectorMode::OutputDigital]),
        );

        analog_write(&mut board, &config, IO1, 128, AnalogOutMode::Pwm, AnalogOutputUnits::DacRaw);

        let c = board.get(IO1).unwrap();
        assert_eq!(c.mode_requests(), 1);
        assert_eq!(c.mode(), ConnectorMode::InvalidNone);
        assert_eq!(c.state_writes(), 0);
        assert_eq!(c.raw_state(), 0);
    }

    #[test]
    fn test_current_write_clamps() {
        let mut board = reference_board();
        let config = BoardConfig::default();

        analog_write(
            &mut board,
            &config,
            IO0,
            25_000,
            AnalogOutMode::Current,
            AnalogOutputUnits::Microamps,
        );
        let over = board.get(IO0).unwrap().raw_state();

        analog_write(
            &mut board,
            &config,
            IO0,
            20_000,
            AnalogOutMode::Current,
            AnalogOutputUnits::Microamps,
        );
        let at_max = board.get(IO0).unwrap().raw_state();

        assert_eq!(over, at_max);
        assert_eq!(at_max, 4095);
        assert_eq!(board.get(IO0).unwrap().mode(), ConnectorMode::OutputAnalog);
    }

    #[test]
    fn test_pwm_in_microamps_is_rejected() {
        let mut board = reference_board();
        let config = BoardConfig::default();

        for value in [0, 1, 10_000, 20_000, u32::MAX] {
            analog_write(&mut board, &config, IO0, value, AnalogOutMode::Pwm, AnalogOutputUnits::Microamps);
            analog_write(&mut board, &config, IO1, value, AnalogOutMode::Pwm, AnalogOutputUnits::Microamps);
        }

        for pin in [IO0, IO1] {
            let c = board.get(pin).unwrap();
            assert_eq!(c.state_writes(), 0);
            assert_eq!(c.mode_requests(), 0);
        }
    }

    #[test]
    fn test_current_only_on_analog_out() {
        let mut board = reference_board();
        let config = BoardConfig::default();

        analog_write(&mut board, &config, IO1, 100, AnalogOutMode::Current, AnalogOutputUnits::DacRaw);
        analog_write(&mut board, &config, IO4, 100, AnalogOutMode::Current, AnalogOutputUnits::DacRaw);
        analog_write(&mut board, &config, LED, 100, AnalogOutMode::Pwm, AnalogOutputUnits::DacRaw);
        analog_write(&mut board, &config, A9, 100, AnalogOutMode::Pwm, AnalogOutputUnits::DacRaw);

        for pin in [IO1, IO4, LED, A9] {
            assert_eq!(board.get(pin).unwrap().state_writes(), 0);
        }
    }
}
