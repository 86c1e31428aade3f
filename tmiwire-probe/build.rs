//! Build script for tmiwire-probe
//!
//! - Sets up linker search paths for memory.x
//! - Validates probe.toml and turns it into constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tmiwire_core::{ConfigError, TmiConfig};

/// RP2040 has GPIO 0-29
const MAX_GPIO: u8 = 29;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ProbeFile {
    bus: TmiConfig,
    probe: ProbeSection,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ProbeSection {
    byte: u8,
    #[serde(default = "default_interval_ms")]
    interval_ms: u64,
}

fn default_interval_ms() -> u64 {
    1000
}

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    setup_linker(&out_dir);
    let probe = validate_config();
    write_config(&out_dir, &probe);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate probe.toml at compile time
fn validate_config() -> ProbeFile {
    println!("cargo:rerun-if-changed=probe.toml");

    let config_content = match fs::read_to_string("probe.toml") {
        Ok(content) => content,
        Err(e) => fail("Failed to read probe.toml", &[e.to_string()]),
    };

    let probe: ProbeFile = match toml::from_str(&config_content) {
        Ok(probe) => probe,
        Err(e) => fail(
            "Invalid probe.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();

    if let Err(ConfigError::SharedPin(pin)) = probe.bus.validate() {
        errors.push(format!("[bus] dio_pin and clk_pin are both GPIO {}", pin));
    }
    for (name, pin) in [("dio_pin", probe.bus.dio_pin), ("clk_pin", probe.bus.clk_pin)] {
        if pin > MAX_GPIO {
            errors.push(format!("[bus] {} must be 0-{}", name, MAX_GPIO));
        }
    }
    if probe.probe.interval_ms == 0 {
        errors.push("[probe] interval_ms must be at least 1".to_string());
    }

    if !errors.is_empty() {
        fail("Invalid values in probe.toml", &errors);
    }

    println!("cargo:warning=probe.toml validated successfully");
    probe
}

/// Emit constants and the pin-taking macro used by main.rs
fn write_config(out_dir: &Path, probe: &ProbeFile) {
    let bus = &probe.bus;
    let generated = format!(
        "/// Bus configuration from probe.toml\n\
         pub const BUS: tmiwire_core::TmiConfig =\n    \
         tmiwire_core::TmiConfig::with_pins({dio}, {clk}).with_delay_us({delay});\n\
         \n\
         /// Byte written by every probe\n\
         pub const PROBE_BYTE: u8 = {byte:#04x};\n\
         \n\
         /// Time between probes\n\
         pub const PROBE_INTERVAL_MS: u64 = {interval};\n\
         \n\
         /// Take the (CLK, DIO) pins named in probe.toml from the peripherals\n\
         macro_rules! bus_pins {{\n    \
         ($p:expr) => {{\n        \
         ($p.PIN_{clk}, $p.PIN_{dio})\n    \
         }};\n\
         }}\n",
        dio = bus.dio_pin,
        clk = bus.clk_pin,
        delay = bus.delay_us,
        byte = probe.probe.byte,
        interval = probe.probe.interval_ms,
    );

    fs::write(out_dir.join("probe_config.rs"), generated).unwrap();
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.chars().count() > 62 {
                format!("{}...", line.chars().take(59).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}
