//! Mock ADC resolution register

use crate::adc::AdcControl;

/// Mock ADC
///
/// Accepts the resolutions the reference hardware supports (8, 10, 12 and
/// 16 bits) and ignores anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockAdc {
    resolution: u8,
}

impl Default for MockAdc {
    fn default() -> Self {
        Self::new(12)
    }
}

impl MockAdc {
    /// Create an ADC at the given resolution
    pub fn new(resolution: u8) -> Self {
        Self { resolution }
    }

    /// Force the register to any value, including unsupported ones
    pub fn force_resolution(&mut self, bits: u8) {
        self.resolution = bits;
    }
}

impl AdcControl for MockAdc {
    fn resolution(&self) -> u8 {
        self.resolution
    }

    fn set_resolution(&mut self, bits: u8) {
        if matches!(bits, 8 | 10 | 12 | 16) {
            self.resolution = bits;
        }
    }
}
