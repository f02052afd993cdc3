//! Board-level constants
//!
//! The scales used by the analog conversion layer and the default pulse
//! measurement timeout. Boards that differ from the reference hardware can
//! supply their own values, optionally persisted as postcard binary data.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current board config format version
pub const CONFIG_VERSION: u8 = 1;

/// Default analog input full scale (9.9 V)
pub const DEFAULT_FULL_SCALE_MV: u32 = 9900;

/// Default maximum analog output current (20 mA)
pub const DEFAULT_MAX_CURRENT_UA: u32 = 20_000;

/// Default DAC full-scale code (12-bit)
pub const DEFAULT_DAC_MAX: u32 = 4095;

/// Default pulse measurement timeout (1 s)
pub const DEFAULT_PULSE_TIMEOUT_US: u32 = 1_000_000;

/// Largest full scale or DAC code a conversion can report as `i32`
const MAX_SCALE: u32 = i32::MAX as u32;

/// Errors from board config validation and persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Analog full scale is zero
    ZeroFullScale,
    /// Maximum output current is zero
    ZeroCurrentRange,
    /// DAC full-scale code is zero
    ZeroDacRange,
    /// Analog full scale does not fit the millivolt range
    FullScaleOutOfRange,
    /// DAC full-scale code does not fit the DAC code range
    DacRangeOutOfRange,
    /// Config version mismatch
    VersionMismatch,
    /// Serialization failed (buffer too small)
    Serialize,
    /// Deserialization failed
    Deserialize,
}

/// Board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    /// Format version
    pub version: u8,
    /// Millivolts at the ADC's full-scale code
    pub analog_full_scale_mv: u32,
    /// Current in µA that maps to the DAC's full-scale code
    pub max_output_current_ua: u32,
    /// DAC full-scale code
    pub dac_max_code: u32,
    /// Timeout used by `pulse_in` when the caller gives none
    pub default_pulse_timeout_us: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardConfig {
    /// Create the reference board configuration
    pub const fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            analog_full_scale_mv: DEFAULT_FULL_SCALE_MV,
            max_output_current_ua: DEFAULT_MAX_CURRENT_UA,
            dac_max_code: DEFAULT_DAC_MAX,
            default_pulse_timeout_us: DEFAULT_PULSE_TIMEOUT_US,
        }
    }

    /// Check the configuration for values the conversions cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch);
        }
        if self.analog_full_scale_mv == 0 {
            return Err(ConfigError::ZeroFullScale);
        }
        if self.max_output_current_ua == 0 {
            return Err(ConfigError::ZeroCurrentRange);
        }
        if self.dac_max_code == 0 {
            return Err(ConfigError::ZeroDacRange);
        }
        if self.analog_full_scale_mv > MAX_SCALE {
            return Err(ConfigError::FullScaleOutOfRange);
        }
        if self.dac_max_code > MAX_SCALE {
            return Err(ConfigError::DacRangeOutOfRange);
        }
        Ok(())
    }

    /// Serialize into `buf`, returning the used prefix
    #[cfg(feature = "serde")]
    pub fn to_slice<'b>(&self, buf: &'b mut [u8]) -> Result<&'b mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialize)
    }

    /// Deserialize and validate
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BoardConfig::default();
        assert_eq!(config.analog_full_scale_mv, 9900);
        assert_eq!(config.max_output_current_ua, 20_000);
        assert_eq!(config.dac_max_code, 4095);
        assert_eq!(config.default_pulse_timeout_us, 1_000_000);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_zero_scales() {
        let mut config = BoardConfig::new();
        config.analog_full_scale_mv = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroFullScale));

        let mut config = BoardConfig::new();
        config.max_output_current_ua = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroCurrentRange));

        let mut config = BoardConfig::new();
        config.dac_max_code = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroDacRange));

        let mut config = BoardConfig::new();
        config.version = 7;
        assert_eq!(config.validate(), Err(ConfigError::VersionMismatch));
    }

    #[test]
    fn test_validate_rejects_oversized_scales() {
        let mut config = BoardConfig::new();
        config.analog_full_scale_mv = u32::MAX;
        assert_eq!(config.validate(), Err(ConfigError::FullScaleOutOfRange));

        let mut config = BoardConfig::new();
        config.dac_max_code = u32::MAX;
        assert_eq!(config.validate(), Err(ConfigError::DacRangeOutOfRange));

        let mut config = BoardConfig::new();
        config.analog_full_scale_mv = i32::MAX as u32;
        config.dac_max_code = i32::MAX as u32;
        config.max_output_current_ua = u32::MAX;
        assert_eq!(config.validate(), Ok(()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_postcard_persistence() {
        let mut config = BoardConfig::new();
        config.analog_full_scale_mv = 5000;

        let mut buf = [0u8; 32];
        let used = config.to_slice(&mut buf).unwrap();
        assert_eq!(BoardConfig::from_bytes(used), Ok(config));

        let mut tiny = [0u8; 2];
        assert_eq!(config.to_slice(&mut tiny), Err(ConfigError::Serialize));
        assert_eq!(BoardConfig::from_bytes(&[]), Err(ConfigError::Deserialize));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_invalid_persisted_config_is_rejected() {
        let mut config = BoardConfig::new();
        config.dac_max_code = 0;

        let mut buf = [0u8; 32];
        let used = config.to_slice(&mut buf).unwrap();
        assert_eq!(BoardConfig::from_bytes(used), Err(ConfigError::ZeroDacRange));

        let mut config = BoardConfig::new();
        config.dac_max_code = u32::MAX;
        let used = config.to_slice(&mut buf).unwrap();
        assert_eq!(BoardConfig::from_bytes(used), Err(ConfigError::DacRangeOutOfRange));
    }
}
