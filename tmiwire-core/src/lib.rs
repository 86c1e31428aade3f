//! Bit-banged TMI protocol engine
//!
//! TMI is the two-wire protocol spoken by TM1637-family LED controllers. It
//! looks like I2C on the wire (open-drain CLK/DIO, start and stop edges, an
//! ACK bit after every byte) but shifts bytes out least-significant bit
//! first and has no addressing.
//!
//! This crate provides the primitives a display driver composes:
//!
//! - [`TmiEngine::begin`] / [`TmiEngine::end`] - leave the bus idle
//! - [`TmiEngine::start_condition`] / [`TmiEngine::stop_condition`] -
//!   bracket a transaction
//! - [`TmiEngine::write`] - send one byte and report [`Ack`]
//!
//! ```ignore
//! let mut tmi = TmiEngine::new(port, delay, TmiConfig::with_pins(dio, clk))?;
//! tmi.begin()?;
//! tmi.start_condition()?;
//! let ack = tmi.write(0x40)?;
//! tmi.stop_condition()?;
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod engine;
pub mod line;

#[cfg(test)]
mod sim;

pub use config::{ConfigError, TmiConfig};
pub use engine::{Ack, TmiEngine};
pub use line::{Line, LineState};
