//! Simulated bus for tests
//!
//! [`SimBus`] records every pin transition, delay and sample in one ordered
//! log, and can play a device that pulls DIO low during the ACK window.

use core::cell::RefCell;
use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use tmiwire_hal::{GpioPort, PinId, PortError};

use crate::config::TmiConfig;
use crate::line::{Line, LineState};

pub const MAX_EVENTS: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Host switched a line (no-op transitions included)
    Drive(Line, LineState),
    /// Blocking delay in microseconds
    Delay(u32),
    /// Host read a line
    Sample(Line),
}

struct State {
    clk: LineState,
    dio: LineState,
    device_acks: bool,
    events: Vec<Event, MAX_EVENTS>,
}

pub struct SimBus {
    clk_pin: PinId,
    dio_pin: PinId,
    state: RefCell<State>,
}

impl SimBus {
    /// Bus with both lines floating and no device answering
    pub fn new(config: &TmiConfig) -> Self {
        Self {
            clk_pin: config.clk_pin,
            dio_pin: config.dio_pin,
            state: RefCell::new(State {
                clk: LineState::Released,
                dio: LineState::Released,
                device_acks: false,
                events: Vec::new(),
            }),
        }
    }

    /// Device pulls DIO low whenever it is released while CLK is high
    pub fn acking(config: &TmiConfig) -> Self {
        let bus = Self::new(config);
        bus.state.borrow_mut().device_acks = true;
        bus
    }

    pub fn port(&self) -> SimPort<'_> {
        SimPort { bus: self }
    }

    pub fn delay(&self) -> SimDelay<'_> {
        SimDelay { bus: self }
    }

    pub fn events(&self) -> Vec<Event, MAX_EVENTS> {
        self.state.borrow().events.clone()
    }

    pub fn clear(&self) {
        self.state.borrow_mut().events.clear();
    }

    /// Host-side state of (CLK, DIO)
    pub fn lines(&self) -> (LineState, LineState) {
        let state = self.state.borrow();
        (state.clk, state.dio)
    }

    fn record(&self, event: Event) {
        self.state
            .borrow_mut()
            .events
            .push(event)
            .expect("sim event log full");
    }

    fn line(&self, pin: PinId) -> Result<Line, PortError<Infallible>> {
        if pin == self.clk_pin {
            Ok(Line::Clock)
        } else if pin == self.dio_pin {
            Ok(Line::Data)
        } else {
            Err(PortError::UnknownPin(pin))
        }
    }

    fn drive(&self, pin: PinId, to: LineState) -> Result<(), PortError<Infallible>> {
        let line = self.line(pin)?;
        {
            let mut state = self.state.borrow_mut();
            match line {
                Line::Clock => state.clk = to,
                Line::Data => state.dio = to,
            }
        }
        self.record(Event::Drive(line, to));
        Ok(())
    }
}

pub struct SimPort<'a> {
    bus: &'a SimBus,
}

impl GpioPort for SimPort<'_> {
    type Error = PortError<Infallible>;

    fn drive_low(&mut self, pin: PinId) -> Result<(), Self::Error> {
        self.bus.drive(pin, LineState::Asserted)
    }

    fn float(&mut self, pin: PinId) -> Result<(), Self::Error> {
        self.bus.drive(pin, LineState::Released)
    }

    fn is_high(&mut self, pin: PinId) -> Result<bool, Self::Error> {
        let line = self.bus.line(pin)?;
        self.bus.record(Event::Sample(line));
        let state = self.bus.state.borrow();
        let level = match line {
            Line::Clock => state.clk.is_high(),
            Line::Data => {
                let device_pulls = state.device_acks && state.clk == LineState::Released;
                state.dio.is_high() && !device_pulls
            }
        };
        Ok(level)
    }
}

pub struct SimDelay<'a> {
    bus: &'a SimBus,
}

impl DelayNs for SimDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.bus.record(Event::Delay(ns / 1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.bus.record(Event::Delay(us));
    }
}

/// Replay a log from `start` (CLK, DIO), returning the DIO level seen at
/// every CLK rising edge
pub fn clocked_bits(start: (LineState, LineState), events: &[Event]) -> Vec<LineState, 64> {
    let (mut clk, mut dio) = start;
    let mut bits = Vec::new();
    for event in events {
        if let Event::Drive(line, to) = *event {
            match line {
                Line::Clock => {
                    if clk == LineState::Asserted && to == LineState::Released {
                        bits.push(dio).expect("too many clock edges");
                    }
                    clk = to;
                }
                Line::Data => dio = to,
            }
        }
    }
    bits
}

/// Replay a log from `start`, returning (CLK, DIO) after every transition
pub fn line_states(
    start: (LineState, LineState),
    events: &[Event],
) -> Vec<(LineState, LineState), 64> {
    let (mut clk, mut dio) = start;
    let mut states = Vec::new();
    for event in events {
        if let Event::Drive(line, to) = *event {
            match line {
                Line::Clock => clk = to,
                Line::Data => dio = to,
            }
            states.push((clk, dio)).expect("too many transitions");
        }
    }
    states
}
