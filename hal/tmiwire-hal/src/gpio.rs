//! GPIO pin capability
//!
//! Provides the pin-control trait the protocol engine is written against.

/// GPIO pin number as used by the platform (e.g. 0-29 on RP2040)
pub type PinId = u8;

/// Open-drain pin control, addressed by pin number
///
/// Implementations switch a pin between two modes only:
/// - output with the latch at LOW (line asserted)
/// - input / high impedance (line released, pulled up externally)
///
/// A pin must never be driven actively high. A TMI peer may be pulling the
/// same line low at that moment.
pub trait GpioPort {
    /// Error type for pin operations
    type Error;

    /// Switch the pin to output mode with the line pulled LOW
    fn drive_low(&mut self, pin: PinId) -> Result<(), Self::Error>;

    /// Switch the pin to a non-driving mode so the pull-up brings it HIGH
    fn float(&mut self, pin: PinId) -> Result<(), Self::Error>;

    /// Read the current logic level on the pad
    fn is_high(&mut self, pin: PinId) -> Result<bool, Self::Error>;

    /// Read the current logic level on the pad, inverted
    fn is_low(&mut self, pin: PinId) -> Result<bool, Self::Error> {
        self.is_high(pin).map(|high| !high)
    }
}

/// Errors returned by the provided [`GpioPort`] implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortError<E> {
    /// The port does not own a pin with this number
    UnknownPin(PinId),
    /// The underlying pin driver failed
    Pin(E),
}

impl<T: GpioPort + ?Sized> GpioPort for &mut T {
    type Error = T::Error;

    fn drive_low(&mut self, pin: PinId) -> Result<(), Self::Error> {
        T::drive_low(self, pin)
    }

    fn float(&mut self, pin: PinId) -> Result<(), Self::Error> {
        T::float(self, pin)
    }

    fn is_high(&mut self, pin: PinId) -> Result<bool, Self::Error> {
        T::is_high(self, pin)
    }
}
