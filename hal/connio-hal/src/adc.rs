//! ADC resolution register

/// ADC resolution control
pub trait AdcControl {
    /// Active ADC resolution in bits
    fn resolution(&self) -> u8;

    /// Request a new ADC resolution in bits
    ///
    /// Unsupported resolutions may be ignored by the driver.
    fn set_resolution(&mut self, bits: u8);
}

impl<T: AdcControl + ?Sized> AdcControl for &mut T {
    fn resolution(&self) -> u8 {
        (**self).resolution()
    }

    fn set_resolution(&mut self, bits: u8) {
        (**self).set_resolution(bits)
    }
}
