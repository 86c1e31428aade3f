//! embedded-hal adapter
//!
//! Wraps a CLK/DIO pair of embedded-hal 1.0 pins that the platform has
//! already configured as open-drain outputs (e.g. embassy's
//! `OutputOpenDrain`). For such pins `set_high` releases the line instead of
//! driving it, which is exactly the [`GpioPort::float`] semantics.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::gpio::{GpioPort, PinId, PortError};

/// CLK/DIO pin pair addressed by pin number
pub struct OpenDrainPair<CLK, DIO> {
    clk_id: PinId,
    clk: CLK,
    dio_id: PinId,
    dio: DIO,
}

impl<CLK, DIO, E> OpenDrainPair<CLK, DIO>
where
    CLK: OutputPin<Error = E> + InputPin<Error = E>,
    DIO: OutputPin<Error = E> + InputPin<Error = E>,
{
    /// Create a new pair
    ///
    /// # Arguments
    /// - `clk_id`, `clk`: pin number and open-drain pin for the clock line
    /// - `dio_id`, `dio`: pin number and open-drain pin for the data line
    ///
    /// # Open-drain requirement
    ///
    /// Both pins must already be configured as open-drain outputs.
    /// [`GpioPort::float`] is implemented with `set_high`, which only
    /// releases the line on an open-drain pin. A push-pull pin would drive
    /// the line HIGH against a device pulling it LOW. Push-pull-only
    /// platforms should implement [`GpioPort`] by switching the pin to
    /// input instead, as `tmiwire-hal-rp2040` does.
    pub fn new(clk_id: PinId, clk: CLK, dio_id: PinId, dio: DIO) -> Self {
        Self {
            clk_id,
            clk,
            dio_id,
            dio,
        }
    }

    /// Give back the wrapped pins as `(clk, dio)`
    pub fn free(self) -> (CLK, DIO) {
        (self.clk, self.dio)
    }
}

impl<CLK, DIO, E> GpioPort for OpenDrainPair<CLK, DIO>
where
    CLK: OutputPin<Error = E> + InputPin<Error = E>,
    DIO: OutputPin<Error = E> + InputPin<Error = E>,
{
    type Error = PortError<E>;

    fn drive_low(&mut self, pin: PinId) -> Result<(), Self::Error> {
        if pin == self.clk_id {
            self.clk.set_low().map_err(PortError::Pin)
        } else if pin == self.dio_id {
            self.dio.set_low().map_err(PortError::Pin)
        } else {
            Err(PortError::UnknownPin(pin))
        }
    }

    fn float(&mut self, pin: PinId) -> Result<(), Self::Error> {
        if pin == self.clk_id {
            self.clk.set_high().map_err(PortError::Pin)
        } else if pin == self.dio_id {
            self.dio.set_high().map_err(PortError::Pin)
        } else {
            Err(PortError::UnknownPin(pin))
        }
    }

    fn is_high(&mut self, pin: PinId) -> Result<bool, Self::Error> {
        if pin == self.clk_id {
            self.clk.is_high().map_err(PortError::Pin)
        } else if pin == self.dio_id {
            self.dio.is_high().map_err(PortError::Pin)
        } else {
            Err(PortError::UnknownPin(pin))
        }
    }
}
