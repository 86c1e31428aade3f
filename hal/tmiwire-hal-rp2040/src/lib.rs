//! RP2040-specific port for the tmiwire protocol engine
//!
//! Implements [`tmiwire_hal::GpioPort`] on top of embassy-rp's `Flex` pins,
//! switching each pin between output-low and input to get open-drain
//! behaviour on the RP2040's push-pull pads.

#![no_std]

pub mod port;

pub use port::FlexPort;

// Re-export shared traits from tmiwire-hal for convenience
pub use tmiwire_hal::{GpioPort, PinId, PortError};
