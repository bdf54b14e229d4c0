//! Build script for dmd-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates display.toml at compile time
//! - Emits the validated settings as constants in OUT_DIR

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Largest panel count the framebuffer holds
const MAX_PANELS: i64 = 16;

/// Longest marquee text in bytes
const MAX_MARQUEE_TEXT_LEN: usize = 64;

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Settings read from display.toml, defaults filled in
struct Settings {
    panels_wide: i64,
    panels_high: i64,
    scan_interval_us: i64,
    output_enable_inverted: bool,
    spi_frequency_hz: i64,
    marquee_text: String,
    marquee_step_ms: i64,
    marquee_dx: i64,
    marquee_dy: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            panels_wide: 1,
            panels_high: 1,
            scan_interval_us: 1_200,
            output_enable_inverted: false,
            spi_frequency_hz: 4_000_000,
            marquee_text: String::from("Hello World!"),
            marquee_step_ms: 30,
            marquee_dx: -1,
            marquee_dy: 0,
        }
    }
}

/// Validate display.toml configuration at compile time
fn validate_config() -> Settings {
    // Re-run if display.toml changes
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: display.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a display.toml configuration file.        ║\n\
            ║  Please create one in the dmd-firmware directory.                ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read display.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in display.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut settings = Settings::default();
    let mut errors = Vec::new();

    read_display(&config, &mut settings, &mut errors);
    read_marquee(&config, &mut settings, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid display configuration                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=display.toml validated successfully");
    settings
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read an optional integer key, checking its range
fn read_integer(
    table: &toml::value::Table,
    section: &str,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
    target: &mut i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(value)) if range.contains(value) => *target = *value,
        Some(toml::Value::Integer(_)) => errors.push(format!(
            "[{}] {} must be {}-{}",
            section,
            key,
            range.start(),
            range.end()
        )),
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

/// Validate the [display] section
fn read_display(config: &toml::Value, settings: &mut Settings, errors: &mut Vec<String>) {
    let display = match config.get("display") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[display] must be a table".to_string());
            return;
        }
        None => {
            errors.push("Missing [display] section".to_string());
            return;
        }
    };

    read_integer(display, "display", "panels_wide", 1..=MAX_PANELS, &mut settings.panels_wide, errors);
    read_integer(display, "display", "panels_high", 1..=MAX_PANELS, &mut settings.panels_high, errors);
    read_integer(
        display,
        "display",
        "scan_interval_us",
        1..=100_000,
        &mut settings.scan_interval_us,
        errors,
    );
    read_integer(
        display,
        "display",
        "spi_frequency_hz",
        1..=62_500_000,
        &mut settings.spi_frequency_hz,
        errors,
    );

    match display.get("output_enable_inverted") {
        None => {}
        Some(toml::Value::Boolean(inverted)) => settings.output_enable_inverted = *inverted,
        Some(_) => errors.push("[display] output_enable_inverted must be true or false".to_string()),
    }

    if settings.panels_wide * settings.panels_high > MAX_PANELS {
        errors.push(format!(
            "[display] panels_wide x panels_high must be at most {}",
            MAX_PANELS
        ));
    }
}

/// Validate the optional [marquee] section
fn read_marquee(config: &toml::Value, settings: &mut Settings, errors: &mut Vec<String>) {
    let marquee = match config.get("marquee") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[marquee] must be a table".to_string());
            return;
        }
        None => return,
    };

    match marquee.get("text") {
        None => {}
        Some(toml::Value::String(text)) if text.len() <= MAX_MARQUEE_TEXT_LEN => {
            settings.marquee_text = text.clone();
        }
        Some(toml::Value::String(_)) => errors.push(format!(
            "[marquee] text must be at most {} bytes",
            MAX_MARQUEE_TEXT_LEN
        )),
        Some(_) => errors.push("[marquee] text must be a string".to_string()),
    }

    read_integer(marquee, "marquee", "step_ms", 1..=60_000, &mut settings.marquee_step_ms, errors);
    read_integer(marquee, "marquee", "dx", -128..=127, &mut settings.marquee_dx, errors);
    read_integer(marquee, "marquee", "dy", -128..=127, &mut settings.marquee_dy, errors);
}

/// Write the validated settings as Rust constants
fn generate_config(settings: &Settings) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("display_config.rs")).unwrap();

    writeln!(f, "// Generated from display.toml").unwrap();
    writeln!(f, "pub const PANELS_WIDE: u8 = {};", settings.panels_wide).unwrap();
    writeln!(f, "pub const PANELS_HIGH: u8 = {};", settings.panels_high).unwrap();
    writeln!(f, "pub const SCAN_INTERVAL_US: u32 = {};", settings.scan_interval_us).unwrap();
    writeln!(
        f,
        "pub const OUTPUT_ENABLE_INVERTED: bool = {};",
        settings.output_enable_inverted
    )
    .unwrap();
    writeln!(f, "pub const SPI_FREQUENCY_HZ: u32 = {};", settings.spi_frequency_hz).unwrap();
    // Debug formatting yields an escaped string literal
    writeln!(f, "pub const MARQUEE_TEXT: &str = {:?};", settings.marquee_text).unwrap();
    writeln!(f, "pub const MARQUEE_STEP_MS: u32 = {};", settings.marquee_step_ms).unwrap();
    writeln!(f, "pub const MARQUEE_DX: i8 = {};", settings.marquee_dx).unwrap();
    writeln!(f, "pub const MARQUEE_DY: i8 = {};", settings.marquee_dy).unwrap();
}
