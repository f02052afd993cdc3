//! Mock connector

use heapless::Vec;

use super::time::SimTime;
use crate::connector::{
    Connector, ConnectorMode, ConnectorType, MotorInputs, PulseOutput, ToneOutput, ToneState,
};

/// Maximum edges in a scripted waveform
const MAX_EDGES: usize = 16;

/// Last pulse train started on a mock connector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTrainRequest {
    pub on_time_us: u32,
    pub off_time_us: u32,
    pub count: u16,
    pub block_until_done: bool,
}

/// Last tone started on a mock connector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneRequest {
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

/// Scripted state over simulated time
#[derive(Debug)]
struct Waveform<'a> {
    time: &'a SimTime,
    /// (time_us, state) pairs, sorted by time
    edges: Vec<(u32, i32), MAX_EDGES>,
}

impl Waveform<'_> {
    fn state_at(&self, initial: i32) -> i32 {
        let now = self.time.now_us();
        self.edges
            .iter()
            .take_while(|(at, _)| *at <= now)
            .last()
            .map_or(initial, |(_, state)| *state)
    }
}

/// Mock connector
///
/// Honours only the modes its type supports and refuses the rest silently,
/// like the real driver. Counts mode requests and state writes so tests
/// can assert on side effects.
#[derive(Debug)]
pub struct MockConnector<'a> {
    index: u8,
    connector_type: ConnectorType,
    mode: ConnectorMode,
    /// Bit set of supported modes
    supported: u8,
    writable: bool,
    state: i32,
    waveform: Option<Waveform<'a>>,
    interrupt: Option<u8>,
    input_a: bool,
    input_b: bool,
    pulse_train: Option<PulseTrainRequest>,
    pulse_stop: Option<bool>,
    tone: Option<ToneRequest>,
    tone_state: ToneState,
    tone_amplitude: i16,
    tone_stops: u32,
    mode_requests: u32,
    mode_changes: u32,
    state_writes: u32,
}

const fn mode_bit(mode: ConnectorMode) -> u8 {
    1 << mode as u8
}

fn default_modes(connector_type: ConnectorType) -> u8 {
    use ConnectorMode::*;
    match connector_type {
        ConnectorType::DigitalIn => mode_bit(InputDigital),
        ConnectorType::DigitalInOut => {
            mode_bit(InputDigital) | mode_bit(OutputDigital) | mode_bit(OutputPwm)
        }
        ConnectorType::AnalogInDigitalIn => mode_bit(InputDigital) | mode_bit(InputAnalog),
        ConnectorType::AnalogOutDigitalInOut => {
            mode_bit(InputDigital)
                | mode_bit(OutputDigital)
                | mode_bit(OutputPwm)
                | mode_bit(OutputAnalog)
        }
        ConnectorType::HBridge => {
            mode_bit(InputDigital)
                | mode_bit(OutputDigital)
                | mode_bit(OutputPwm)
                | mode_bit(OutputTone)
        }
        ConnectorType::CcioDigitalInOut => mode_bit(InputDigital) | mode_bit(OutputDigital),
        ConnectorType::MotorDriver => 0,
        ConnectorType::ShiftRegister => mode_bit(OutputDigital),
    }
}

fn output_capable(supported: u8) -> bool {
    use ConnectorMode::*;
    supported
        & (mode_bit(OutputDigital) | mode_bit(OutputAnalog) | mode_bit(OutputPwm) | mode_bit(OutputTone))
        != 0
}

impl<'a> MockConnector<'a> {
    /// Create an unconfigured connector of the given type
    pub fn new(index: u8, connector_type: ConnectorType) -> Self {
        let supported = default_modes(connector_type);
        Self {
            index,
            connector_type,
            mode: ConnectorMode::InvalidNone,
            supported,
            writable: output_capable(supported),
            state: 0,
            waveform: None,
            interrupt: None,
            input_a: false,
            input_b: false,
            pulse_train: None,
            pulse_stop: None,
            tone: None,
            tone_state: ToneState::Off,
            tone_amplitude: 0,
            tone_stops: 0,
            mode_requests: 0,
            mode_changes: 0,
            state_writes: 0,
        }
    }

    /// Start in `mode` (bypasses support checks and counters)
    pub fn with_mode(mut self, mode: ConnectorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Override the set of modes the connector accepts
    pub fn with_supported_modes(mut self, modes: &[ConnectorMode]) -> Self {
        self.supported = modes.iter().fold(0, |acc, m| acc | mode_bit(*m));
        self
    }

    /// Override writability
    pub fn with_writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    /// Set the initial state
    pub fn with_state(mut self, state: i32) -> Self {
        self.state = state;
        self
    }

    /// Wire an external interrupt line
    pub fn with_interrupt(mut self, line: u8) -> Self {
        self.interrupt = Some(line);
        self
    }

    /// Play a scripted waveform
    ///
    /// Before the first edge the connector reports its initial state; from
    /// each edge's time onwards it reports that edge's state. Edges beyond
    /// capacity are dropped.
    pub fn with_waveform(mut self, time: &'a SimTime, edges: &[(u32, i32)]) -> Self {
        let mut script = Vec::new();
        for edge in edges.iter().take(MAX_EDGES) {
            let _ = script.push(*edge);
        }
        self.waveform = Some(Waveform {
            time,
            edges: script,
        });
        self
    }

    /// Connector index in the directory
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Check if `mode` is accepted by this connector
    pub fn supports(&self, mode: ConnectorMode) -> bool {
        self.supported & mode_bit(mode) != 0
    }

    /// Number of `set_mode` calls received
    pub fn mode_requests(&self) -> u32 {
        self.mode_requests
    }

    /// Number of mode requests that changed the mode
    pub fn mode_changes(&self) -> u32 {
        self.mode_changes
    }

    /// Number of `set_state` calls received
    pub fn state_writes(&self) -> u32 {
        self.state_writes
    }

    /// Last raw state written or set
    pub fn raw_state(&self) -> i32 {
        self.state
    }

    /// Last pulse train started
    pub fn pulse_train(&self) -> Option<PulseTrainRequest> {
        self.pulse_train
    }

    /// Immediacy flag of the last pulse stop, if any
    pub fn pulse_stop(&self) -> Option<bool> {
        self.pulse_stop
    }

    /// Last tone started
    pub fn tone(&self) -> Option<ToneRequest> {
        self.tone
    }

    /// Number of tone stops received
    pub fn tone_stops(&self) -> u32 {
        self.tone_stops
    }

    /// Last tone amplitude set
    pub fn tone_amplitude(&self) -> i16 {
        self.tone_amplitude
    }
}

impl Connector for MockConnector<'_> {
    fn connector_type(&self) -> ConnectorType {
        self.connector_type
    }

    fn mode(&self) -> ConnectorMode {
        self.mode
    }

    fn set_mode(&mut self, mode: ConnectorMode) {
        self.mode_requests += 1;
        if self.supports(mode) && self.mode != mode {
            self.mode = mode;
            self.mode_changes += 1;
        }
    }

    fn state(&self) -> i32 {
        match &self.waveform {
            Some(waveform) => waveform.state_at(self.state),
            None => self.state,
        }
    }

    fn set_state(&mut self, value: i32) {
        self.state_writes += 1;
        self.state = value;
    }

    fn is_writable(&self) -> bool {
        self.writable
    }

    fn external_interrupt(&self) -> Option<u8> {
        self.interrupt
    }

    fn as_motor_inputs(&mut self) -> Option<&mut dyn MotorInputs> {
        match self.connector_type {
            ConnectorType::MotorDriver => Some(self as &mut dyn MotorInputs),
            _ => None,
        }
    }

    fn as_pulse_output(&mut self) -> Option<&mut dyn PulseOutput> {
        if self.connector_type.supports_pulses() {
            Some(self as &mut dyn PulseOutput)
        } else {
            None
        }
    }

    fn as_tone_output(&mut self) -> Option<&mut dyn ToneOutput> {
        match self.connector_type {
            ConnectorType::HBridge => Some(self as &mut dyn ToneOutput),
            _ => None,
        }
    }
}

impl MotorInputs for MockConnector<'_> {
    fn input_a(&self) -> bool {
        self.input_a
    }

    fn set_input_a(&mut self, asserted: bool) {
        self.input_a = asserted;
    }

    fn input_b(&self) -> bool {
        self.input_b
    }

    fn set_input_b(&mut self, asserted: bool) {
        self.input_b = asserted;
    }
}

impl PulseOutput for MockConnector<'_> {
    fn output_pulses_start(
        &mut self,
        on_time_us: u32,
        off_time_us: u32,
        count: u16,
        block_until_done: bool,
    ) {
        self.pulse_stop = None;
        self.pulse_train = Some(PulseTrainRequest {
            on_time_us,
            off_time_us,
            count,
            block_until_done,
        });
    }

    fn output_pulses_stop(&mut self, stop_immediately: bool) {
        self.pulse_stop = Some(stop_immediately);
    }
}

impl ToneOutput for MockConnector<'_> {
    fn tone_timed(&mut self, frequency_hz: u32, duration_ms: u32) {
        self.tone = Some(ToneRequest {
            frequency_hz,
            duration_ms,
        });
        self.tone_state = if duration_ms == 0 {
            ToneState::Continuous
        } else {
            ToneState::Timed
        };
    }

    fn tone_stop(&mut self) {
        self.tone_stops += 1;
        self.tone_state = ToneState::Off;
    }

    fn tone_state(&self) -> ToneState {
        self.tone_state
    }

    fn set_tone_amplitude(&mut self, amplitude: i16) {
        self.tone_amplitude = amplitude;
    }
}
