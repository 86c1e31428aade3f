//! Logical CLK/DIO lines
//!
//! [`Lines`] binds the configured pin numbers to the two logical lines and
//! is the only code that changes pin modes. Every transition is followed by
//! the bit delay, so callers never have to remember it.

use embedded_hal::delay::DelayNs;
use tmiwire_hal::{GpioPort, PinId};

use crate::config::TmiConfig;

/// Logical bus line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// CLK
    Clock,
    /// DIO
    Data,
}

/// Observable state of an open-drain line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineState {
    /// Pulled low (logic 0)
    Asserted,
    /// Floating high through the pull-up (logic 1)
    Released,
}

impl LineState {
    /// State that carries the given bit value
    pub const fn from_bit(bit: bool) -> Self {
        if bit {
            LineState::Released
        } else {
            LineState::Asserted
        }
    }

    /// Logic level of this state
    pub const fn is_high(self) -> bool {
        matches!(self, LineState::Released)
    }
}

/// The two lines of one bus plus the delay source
pub(crate) struct Lines<P, D> {
    port: P,
    delay: D,
    clk_pin: PinId,
    dio_pin: PinId,
    delay_us: u32,
}

impl<P: GpioPort, D: DelayNs> Lines<P, D> {
    pub(crate) fn new(port: P, delay: D, config: &TmiConfig) -> Self {
        Self {
            port,
            delay,
            clk_pin: config.clk_pin,
            dio_pin: config.dio_pin,
            delay_us: config.delay_us,
        }
    }

    fn pin(&self, line: Line) -> PinId {
        match line {
            Line::Clock => self.clk_pin,
            Line::Data => self.dio_pin,
        }
    }

    /// Pull the line low, then wait one bit delay
    pub(crate) fn assert(&mut self, line: Line) -> Result<(), P::Error> {
        self.port.drive_low(self.pin(line))?;
        self.delay.delay_us(self.delay_us);
        Ok(())
    }

    /// Let the line float high, then wait one bit delay
    pub(crate) fn release(&mut self, line: Line) -> Result<(), P::Error> {
        self.port.float(self.pin(line))?;
        self.delay.delay_us(self.delay_us);
        Ok(())
    }

    pub(crate) fn set(&mut self, line: Line, state: LineState) -> Result<(), P::Error> {
        match state {
            LineState::Asserted => self.assert(line),
            LineState::Released => self.release(line),
        }
    }

    /// Single-shot read of the line level. No delay.
    pub(crate) fn sample(&mut self, line: Line) -> Result<LineState, P::Error> {
        let high = self.port.is_high(self.pin(line))?;
        Ok(LineState::from_bit(high))
    }

    pub(crate) fn into_parts(self) -> (P, D) {
        (self.port, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Event, SimBus};

    #[test]
    fn test_from_bit() {
        assert_eq!(LineState::from_bit(true), LineState::Released);
        assert_eq!(LineState::from_bit(false), LineState::Asserted);
        assert!(LineState::Released.is_high());
        assert!(!LineState::Asserted.is_high());
    }

    #[test]
    fn test_transition_then_delay() {
        let config = TmiConfig::with_pins(7, 9).with_delay_us(42);
        let bus = SimBus::new(&config);
        let mut lines = Lines::new(bus.port(), bus.delay(), &config);

        lines.assert(Line::Clock).unwrap();
        lines.set(Line::Data, LineState::Asserted).unwrap();
        lines.release(Line::Clock).unwrap();

        let events = bus.events();
        assert_eq!(
            events.as_slice(),
            &[
                Event::Drive(Line::Clock, LineState::Asserted),
                Event::Delay(42),
                Event::Drive(Line::Data, LineState::Asserted),
                Event::Delay(42),
                Event::Drive(Line::Clock, LineState::Released),
                Event::Delay(42),
            ]
        );
    }

    #[test]
    fn test_sample_does_not_delay() {
        let config = TmiConfig::with_pins(7, 9);
        let bus = SimBus::new(&config);
        let mut lines = Lines::new(bus.port(), bus.delay(), &config);

        assert_eq!(lines.sample(Line::Data), Ok(LineState::Released));
        assert_eq!(bus.events().as_slice(), &[Event::Sample(Line::Data)]);
    }
}
