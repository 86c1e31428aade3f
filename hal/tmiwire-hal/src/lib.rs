//! tmiwire Hardware Abstraction Layer
//!
//! This crate defines the pin capability the TMI protocol engine drives.
//! Chip-specific crates (RP2040, or any embedded-hal 1.0 pin pair) implement
//! it so the same engine runs on different hardware.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tmiwire-core (TmiEngine)               │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tmiwire-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ tmiwire-hal-  │       │ OpenDrainPair │
//! │    rp2040     │       │ (embedded-hal)│
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Open-drain discipline
//!
//! The CLK and DIO lines of a TM1637-style module are open-drain with
//! external pull-ups. [`gpio::GpioPort`] therefore has no way to drive a pin
//! high: a pin is either pulled low or released to float.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod open_drain;

pub use gpio::{GpioPort, PinId, PortError};
pub use open_drain::OpenDrainPair;
