//! Flex-pin GPIO port
//!
//! The RP2040 pads have no true open-drain mode. A released line is the pad
//! in input mode; an asserted line is the pad in output mode with the
//! output latch at LOW. The latch is written LOW before every output
//! enable, so the pad never drives HIGH.

use core::convert::Infallible;

use embassy_rp::gpio::{Flex, Pin, Pull};
use embassy_rp::Peri;
use tmiwire_hal::{GpioPort, PinId, PortError};

/// CLK/DIO pin pair on RP2040 GPIOs
pub struct FlexPort<'d> {
    clk_id: PinId,
    clk: Flex<'d>,
    dio_id: PinId,
    dio: Flex<'d>,
}

impl<'d> FlexPort<'d> {
    /// Create a new port with both lines released
    ///
    /// # Arguments
    /// * `clk_id`, `clk_pin` - GPIO number and pin for the clock line
    /// * `dio_id`, `dio_pin` - GPIO number and pin for the data line
    ///
    /// The GPIO numbers must match the ones in the engine's `TmiConfig`.
    pub fn new<CLK: Pin, DIO: Pin>(
        clk_id: PinId,
        clk_pin: Peri<'d, CLK>,
        dio_id: PinId,
        dio_pin: Peri<'d, DIO>,
    ) -> Self {
        let mut clk = Flex::new(clk_pin);
        let mut dio = Flex::new(dio_pin);

        for pin in [&mut clk, &mut dio] {
            pin.set_pull(Pull::None);
            pin.set_low();
            pin.set_as_input();
        }

        Self {
            clk_id,
            clk,
            dio_id,
            dio,
        }
    }

    /// Enable the internal pull-ups
    ///
    /// Only needed for bare TM1637 chips. Breakout modules already carry
    /// external pull-ups.
    pub fn with_pull_up(mut self) -> Self {
        self.clk.set_pull(Pull::Up);
        self.dio.set_pull(Pull::Up);
        self
    }

    fn pin_mut(&mut self, pin: PinId) -> Result<&mut Flex<'d>, PortError<Infallible>> {
        if pin == self.clk_id {
            Ok(&mut self.clk)
        } else if pin == self.dio_id {
            Ok(&mut self.dio)
        } else {
            Err(PortError::UnknownPin(pin))
        }
    }
}

impl GpioPort for FlexPort<'_> {
    type Error = PortError<Infallible>;

    fn drive_low(&mut self, pin: PinId) -> Result<(), Self::Error> {
        let flex = self.pin_mut(pin)?;
        flex.set_low();
        flex.set_as_output();
        Ok(())
    }

    fn float(&mut self, pin: PinId) -> Result<(), Self::Error> {
        self.pin_mut(pin)?.set_as_input();
        Ok(())
    }

    fn is_high(&mut self, pin: PinId) -> Result<bool, Self::Error> {
        Ok(self.pin_mut(pin)?.is_high())
    }
}
