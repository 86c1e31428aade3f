//! TMI protocol engine
//!
//! Generates the I2C-like start and stop conditions, shifts bytes out LSB
//! first and samples the ACK bit. Every pin transition is followed by the
//! configured bit delay.
//!
//! # Bus states
//!
//! | State | Entered by | Valid next operations |
//! |---|---|---|
//! | Idle | `begin`, `end`, `stop_condition` | `start_condition` |
//! | Active (CLK low) | `start_condition`, `write` | `write`, `stop_condition` |
//!
//! The engine does not track which state the bus is in. Calling an
//! operation out of order produces garbage on the wire, not an error.

use embedded_hal::delay::DelayNs;
use tmiwire_hal::GpioPort;

use crate::config::{ConfigError, TmiConfig};
use crate::line::{Line, LineState, Lines};

/// Device response to a written byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ack {
    /// Device pulled DIO low during the 9th clock
    Ack,
    /// DIO floated high; device absent or busy
    Nack,
}

impl Ack {
    /// True if the device acknowledged
    pub const fn is_ack(self) -> bool {
        matches!(self, Ack::Ack)
    }

    /// Number of bytes the device accepted (1 for ACK, 0 for NACK)
    pub const fn bytes_transferred(self) -> usize {
        match self {
            Ack::Ack => 1,
            Ack::Nack => 0,
        }
    }
}

impl From<LineState> for Ack {
    /// ACK is active low
    fn from(sample: LineState) -> Self {
        match sample {
            LineState::Asserted => Ack::Ack,
            LineState::Released => Ack::Nack,
        }
    }
}

/// Bit-banged TMI bus master
pub struct TmiEngine<P, D> {
    lines: Lines<P, D>,
    config: TmiConfig,
}

impl<P: GpioPort, D: DelayNs> TmiEngine<P, D> {
    /// Create a new engine
    ///
    /// Does not touch the pins; call [`begin`](Self::begin) before the
    /// first transaction.
    pub fn new(port: P, delay: D, config: TmiConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            lines: Lines::new(port, delay, &config),
            config,
        })
    }

    /// The configuration this engine was built with
    pub fn config(&self) -> &TmiConfig {
        &self.config
    }

    /// Release both lines so the bus starts idle (HIGH)
    ///
    /// The lines are open-drain with pull-ups. They are never driven HIGH;
    /// releasing them lets the pull-ups do it.
    pub fn begin(&mut self) -> Result<(), P::Error> {
        self.lines.release(Line::Clock)?;
        self.lines.release(Line::Data)
    }

    /// Release both lines, leaving the bus idle
    pub fn end(&mut self) -> Result<(), P::Error> {
        self.lines.release(Line::Clock)?;
        self.lines.release(Line::Data)
    }

    /// Generate the start condition: DIO falls while CLK is high
    ///
    /// Leaves both lines LOW.
    pub fn start_condition(&mut self) -> Result<(), P::Error> {
        self.lines.release(Line::Clock)?;
        self.lines.release(Line::Data)?;

        self.lines.assert(Line::Data)?;
        self.lines.assert(Line::Clock)
    }

    /// Generate the stop condition: DIO rises while CLK is high
    ///
    /// Must follow `start_condition` or `write`, both of which leave CLK
    /// LOW. Leaves both lines released.
    pub fn stop_condition(&mut self) -> Result<(), P::Error> {
        self.lines.assert(Line::Data)?;
        self.lines.release(Line::Clock)?;
        self.lines.release(Line::Data)
    }

    /// Send one byte, LSB first, and read the device's ACK bit
    ///
    /// CLK stays low for two bit delays per cell but high for only one.
    /// TM1637 parts sample fine with that, and it keeps the transfer short.
    ///
    /// A NACK is a normal outcome and is returned as [`Ack::Nack`], not as
    /// an error.
    pub fn write(&mut self, data: u8) -> Result<Ack, P::Error> {
        let mut bits = data;
        for _ in 0..8 {
            self.lines.set(Line::Data, LineState::from_bit(bits & 0x1 != 0))?;
            self.lines.release(Line::Clock)?;
            self.lines.assert(Line::Clock)?;
            bits >>= 1;
        }

        let ack = self.read_ack()?;

        #[cfg(feature = "defmt")]
        if !ack.is_ack() {
            defmt::trace!("tmi: nack after {=u8:#x}", data);
        }

        Ok(ack)
    }

    /// Read the ACK bit after the falling edge of the 8th clock
    fn read_ack(&mut self) -> Result<Ack, P::Error> {
        // Hand DIO to the device
        self.lines.release(Line::Data)?;

        // DIO is stable while CLK is high
        self.lines.release(Line::Clock)?;
        let sample = self.lines.sample(Line::Data)?;

        // Device lets go of DIO on the falling edge of the 9th clock
        self.lines.assert(Line::Clock)?;
        Ok(Ack::from(sample))
    }

    /// Consume the engine, returning the port and delay
    pub fn release(self) -> (P, D) {
        self.lines.into_parts()
    }
}
