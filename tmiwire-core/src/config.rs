//! Bus configuration
//!
//! The pin numbers and bit delay are chosen once and stay fixed for the
//! lifetime of a [`TmiEngine`](crate::TmiEngine).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use tmiwire_hal::PinId;

/// Bit delay used when none is configured (microseconds)
///
/// Safe for the common TM1637 breakout boards, whose DIO/CLK lines carry
/// 10k pull-ups and 100pF filter capacitors.
pub const DEFAULT_DELAY_US: u32 = 100;

/// TMI bus configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct TmiConfig {
    /// Pin attached to the data line (DIO)
    pub dio_pin: PinId,
    /// Pin attached to the clock line (CLK)
    pub clk_pin: PinId,
    /// Delay after each transition of DIO or CLK
    #[cfg_attr(feature = "serde", serde(default = "default_delay_us"))]
    pub delay_us: u32,
}

#[cfg(feature = "serde")]
fn default_delay_us() -> u32 {
    DEFAULT_DELAY_US
}

impl Default for TmiConfig {
    fn default() -> Self {
        Self {
            dio_pin: 0,
            clk_pin: 1,
            delay_us: DEFAULT_DELAY_US,
        }
    }
}

impl TmiConfig {
    /// Create a config for the given pins with the default bit delay
    pub const fn with_pins(dio_pin: PinId, clk_pin: PinId) -> Self {
        Self {
            dio_pin,
            clk_pin,
            delay_us: DEFAULT_DELAY_US,
        }
    }

    /// Replace the bit delay
    pub const fn with_delay_us(mut self, delay_us: u32) -> Self {
        self.delay_us = delay_us;
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dio_pin == self.clk_pin {
            return Err(ConfigError::SharedPin(self.dio_pin));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// DIO and CLK were given the same pin
    SharedPin(PinId),
}
