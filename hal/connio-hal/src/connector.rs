//! Connector abstractions
//!
//! A connector is the driver library's unit of addressable hardware: a pin
//! or pin group with a fixed [`ConnectorType`] and a mutable
//! [`ConnectorMode`]. Optional capabilities (motor input bits, pulse trains,
//! tones) are reached through the `as_*` accessors so that a single
//! directory can hand out heterogeneous connectors as `dyn Connector`.

/// Connector hardware type, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectorType {
    /// Digital input only
    DigitalIn,
    /// Digital input or output (PWM capable)
    DigitalInOut,
    /// Analog input that can also be read digitally
    AnalogInDigitalIn,
    /// Analog current output combined with digital input/output
    AnalogOutDigitalInOut,
    /// Digital input/output backed by an H-bridge (PWM and tone capable)
    HBridge,
    /// Digital input/output on an expansion-bus (CCIO) board
    CcioDigitalInOut,
    /// Motor driver connector
    MotorDriver,
    /// Shift-register driven output (status LED)
    ShiftRegister,
}

impl ConnectorType {
    /// Check if this type can generate output pulse trains
    pub fn supports_pulses(&self) -> bool {
        matches!(
            self,
            ConnectorType::DigitalInOut
                | ConnectorType::AnalogOutDigitalInOut
                | ConnectorType::HBridge
                | ConnectorType::CcioDigitalInOut
        )
    }

    /// Check if this type can drive a PWM output
    pub fn supports_pwm(&self) -> bool {
        matches!(
            self,
            ConnectorType::DigitalInOut
                | ConnectorType::AnalogOutDigitalInOut
                | ConnectorType::HBridge
        )
    }

    /// Check if this type can drive an analog current output
    pub fn supports_current_output(&self) -> bool {
        matches!(self, ConnectorType::AnalogOutDigitalInOut)
    }
}

/// Connector operating mode
///
/// Not every (type, mode) pair is legal. A mode request the connector
/// cannot honour is dropped silently by the driver, so callers must read
/// [`Connector::mode`] back to learn whether a transition took effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectorMode {
    /// Connector has not been configured yet
    #[default]
    InvalidNone,
    /// Digital input
    InputDigital,
    /// Digital output
    OutputDigital,
    /// Analog input (ADC)
    InputAnalog,
    /// Analog current output (DAC)
    OutputAnalog,
    /// PWM output
    OutputPwm,
    /// Tone output (H-bridge)
    OutputTone,
}

/// A physical connector
pub trait Connector {
    /// Get the connector hardware type
    fn connector_type(&self) -> ConnectorType;

    /// Get the current operating mode
    fn mode(&self) -> ConnectorMode;

    /// Request a mode change
    ///
    /// The driver may refuse the request without reporting it. Read
    /// [`mode`](Connector::mode) afterwards to verify.
    fn set_mode(&mut self, mode: ConnectorMode);

    /// Get the connector state
    ///
    /// The meaning depends on the mode: 0/1 for digital modes, the raw
    /// converter code for analog modes, the duty for PWM.
    fn state(&self) -> i32;

    /// Set the connector state (same encoding as [`state`](Connector::state))
    fn set_state(&mut self, value: i32);

    /// Check if the connector accepts output writes
    fn is_writable(&self) -> bool;

    /// External interrupt line wired to this connector, if any
    fn external_interrupt(&self) -> Option<u8> {
        None
    }

    /// Motor input bits, for motor driver connectors
    fn as_motor_inputs(&mut self) -> Option<&mut dyn MotorInputs> {
        None
    }

    /// Pulse-train generator, for pulse-capable connectors
    fn as_pulse_output(&mut self) -> Option<&mut dyn PulseOutput> {
        None
    }

    /// Tone generator, for H-bridge connectors
    fn as_tone_output(&mut self) -> Option<&mut dyn ToneOutput> {
        None
    }
}

/// Input A/B state bits of a motor driver connector
pub trait MotorInputs {
    /// Get the A input state
    fn input_a(&self) -> bool;

    /// Set the A input state
    fn set_input_a(&mut self, asserted: bool);

    /// Get the B input state
    fn input_b(&self) -> bool;

    /// Set the B input state
    fn set_input_b(&mut self, asserted: bool);
}

/// Output pulse-train generator
///
/// Once started, the running train (timers, counters) belongs to the
/// driver; callers only start and stop it.
pub trait PulseOutput {
    /// Start a pulse train
    ///
    /// # Arguments
    /// - `on_time_us`: Output high time per pulse
    /// - `off_time_us`: Output low time per pulse
    /// - `count`: Number of pulses (0 = run until stopped)
    /// - `block_until_done`: Return only after the train completes
    fn output_pulses_start(
        &mut self,
        on_time_us: u32,
        off_time_us: u32,
        count: u16,
        block_until_done: bool,
    );

    /// Stop the pulse train, immediately or after the current cycle
    fn output_pulses_stop(&mut self, stop_immediately: bool);
}

/// Tone generator state as reported by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToneState {
    /// No tone playing
    #[default]
    Off,
    /// Tone playing until stopped
    Continuous,
    /// Tone playing for a fixed duration
    Timed,
    /// Tone cycling on and off
    Periodic,
}

/// Tone generator
pub trait ToneOutput {
    /// Play a tone
    ///
    /// `duration_ms == 0` plays until stopped.
    fn tone_timed(&mut self, frequency_hz: u32, duration_ms: u32);

    /// Stop the current tone
    fn tone_stop(&mut self);

    /// Get the tone generator state
    fn tone_state(&self) -> ToneState;

    /// Set the tone amplitude
    fn set_tone_amplitude(&mut self, amplitude: i16);
}
