//! tmiwire probe firmware
//!
//! Periodically runs a one-byte TMI transaction against the module wired
//! to the pins in probe.toml and reports over defmt whether it answered.
//! Useful for checking wiring and bit delay before writing a display driver.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::{Delay, Duration, Ticker};
use embedded_hal::delay::DelayNs;
use {defmt_rtt as _, panic_probe as _};

use tmiwire_core::{Ack, TmiEngine};
use tmiwire_hal::{GpioPort, PortError};
use tmiwire_hal_rp2040::FlexPort;

/// Constants generated by build.rs from probe.toml
#[macro_use]
mod config {
    include!(concat!(env!("OUT_DIR"), "/probe_config.rs"));
}

/// Run start, write, stop and return the device's answer
fn probe<P: GpioPort, D: DelayNs>(tmi: &mut TmiEngine<P, D>, byte: u8) -> Result<Ack, P::Error> {
    tmi.start_condition()?;
    let ack = tmi.write(byte)?;
    tmi.stop_condition()?;
    Ok(ack)
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("tmiwire probe starting...");

    let p = embassy_rp::init(Default::default());

    let bus = config::BUS;
    let (clk_pin, dio_pin) = bus_pins!(p);
    let port = FlexPort::new(bus.clk_pin, clk_pin, bus.dio_pin, dio_pin);

    let mut tmi = match TmiEngine::new(port, Delay, bus) {
        Ok(tmi) => tmi,
        Err(e) => {
            error!("Invalid bus config: {:?}", e);
            return;
        }
    };

    info!(
        "TMI bus: DIO=GPIO{} CLK=GPIO{} delay={}us",
        bus.dio_pin, bus.clk_pin, bus.delay_us
    );

    if let Err(PortError::UnknownPin(pin)) = tmi.begin() {
        error!("Port does not own GPIO{}", pin);
        return;
    }

    let mut ticker = Ticker::every(Duration::from_millis(config::PROBE_INTERVAL_MS));
    let mut probes: u32 = 0;
    let mut acks: u32 = 0;

    loop {
        probes = probes.wrapping_add(1);
        match probe(&mut tmi, config::PROBE_BYTE) {
            Ok(Ack::Ack) => {
                acks = acks.wrapping_add(1);
                info!(
                    "ACK for {=u8:#x} ({}/{} acknowledged)",
                    config::PROBE_BYTE,
                    acks,
                    probes
                );
            }
            Ok(Ack::Nack) => {
                warn!(
                    "NACK for {=u8:#x}: check wiring, pull-ups and delay_us",
                    config::PROBE_BYTE
                );
            }
            Err(PortError::UnknownPin(pin)) => {
                error!("Port does not own GPIO{}", pin);
                return;
            }
            Err(PortError::Pin(never)) => match never {},
        }

        ticker.next().await;
    }
}
